use rand::Rng;

/// Approximate centroid for each state the location filter covers.
const REGION_COORDINATES: [(&str, f64, f64); 16] = [
    ("Punjab", 31.1471, 75.3412),
    ("Haryana", 29.0588, 76.0856),
    ("Uttar Pradesh", 26.8467, 80.9462),
    ("Maharashtra", 19.7515, 75.7139),
    ("Karnataka", 15.3173, 75.7139),
    ("Tamil Nadu", 11.1271, 78.6569),
    ("Andhra Pradesh", 15.9129, 79.7400),
    ("West Bengal", 22.9868, 87.8550),
    ("Gujarat", 22.2587, 71.1924),
    ("Rajasthan", 27.0238, 74.2179),
    ("Madhya Pradesh", 22.9734, 78.6569),
    ("Bihar", 25.0961, 85.3131),
    ("Telangana", 18.1124, 79.0193),
    ("Kerala", 10.8505, 76.2711),
    ("Assam", 26.2006, 92.9376),
    ("Odisha", 20.9517, 85.0985),
];

/// Countrywide fallback center (central India).
pub const DEFAULT_CENTER: (f64, f64) = (20.5937, 78.9629);

const JITTER_DEGREES: f64 = 0.4;

pub fn region_center(region: &str) -> Option<(f64, f64)> {
    REGION_COORDINATES
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(region))
        .map(|&(_, lat, lon)| (lat, lon))
}

/// Base coordinates for the region (or the countrywide default) plus a
/// uniform jitter so markers in the same region don't stack.
pub fn jittered_coordinates(region: Option<&str>) -> (f64, f64) {
    let (lat, lon) = region.and_then(region_center).unwrap_or(DEFAULT_CENTER);
    let mut rng = rand::rng();
    (
        lat + rng.random_range(-JITTER_DEGREES..=JITTER_DEGREES),
        lon + rng.random_range(-JITTER_DEGREES..=JITTER_DEGREES),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_regions_resolve_case_insensitively() {
        assert_eq!(region_center("Punjab"), Some((31.1471, 75.3412)));
        assert_eq!(region_center("punjab"), Some((31.1471, 75.3412)));
        assert_eq!(region_center("Atlantis"), None);
    }

    #[test]
    fn jitter_stays_within_bounds() {
        for _ in 0..100 {
            let (lat, lon) = jittered_coordinates(Some("Kerala"));
            assert!((lat - 10.8505).abs() <= JITTER_DEGREES + 1e-9);
            assert!((lon - 76.2711).abs() <= JITTER_DEGREES + 1e-9);
        }
    }

    #[test]
    fn unknown_region_falls_back_to_the_default_center() {
        let (lat, lon) = jittered_coordinates(None);
        assert!((lat - DEFAULT_CENTER.0).abs() <= JITTER_DEGREES + 1e-9);
        assert!((lon - DEFAULT_CENTER.1).abs() <= JITTER_DEGREES + 1e-9);
    }
}
