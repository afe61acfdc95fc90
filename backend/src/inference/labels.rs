use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use shared::Crop;
use strum::IntoEnumIterator;

use crate::error::ApiError;

/// Class labels in the order of the network's output units. Each label is
/// `<crop>_<condition>`; the crop prefix must parse as a [`Crop`] variant.
pub const CLASS_LABELS: [&str; 61] = [
    "Bean_Healthy",
    "Bean_Rust",
    "Bean_Angular_Leaf_Spot",
    "Cotton_Aphids",
    "Cotton_Army_worm",
    "Cotton_Bacterial_Blight",
    "Cotton_Curl_virus",
    "Cotton_Fussarium_wilt",
    "Cotton_Healthy",
    "Cotton_Powdery_Mildew",
    "Cotton_Target_spot",
    "Groundnut_Early_leaf_spot",
    "Groundnut_Early_rust",
    "Groundnut_Healthy_leaf",
    "Groundnut_Late_leaf_spot",
    "Groundnut_Nutrition_deficiency",
    "Groundnut_Rust",
    "Maize_Blight",
    "Maize_Common_Rust",
    "Maize_Gray_Leaf_Spot",
    "Maize_Healthy",
    "Pepper_bell_Bacterial_spot",
    "Pepper_bell_Healthy",
    "Potato_Early_Blight",
    "Potato_Healthy",
    "Potato_Late_Blight",
    "Rice_Bacterialblight",
    "Rice_Blast",
    "Rice_Brownspot",
    "Rice_Tungro",
    "Spinach_Anthracnose",
    "Spinach_Bacterial_Spot",
    "Spinach_Downy_Mildew",
    "Spinach_Healthy_Leaf",
    "Spinach_Pest_Damage",
    "Spinach_Straw_Mite",
    "Sugarcane_Bacterial_Blights",
    "Sugarcane_Brown_Rust",
    "Sugarcane_Dried_Leaves",
    "Sugarcane_Healthy",
    "Sugarcane_Mawa",
    "Sugarcane_Mites",
    "Sugarcane_Mosaic",
    "Sugarcane_Red_Spot",
    "Sugarcane_Yellow_Leaf",
    "Tomato_Bacterial_spot",
    "Tomato_Early_blight",
    "Tomato_healthy",
    "Tomato_Late_blight",
    "Tomato_Leaf_Mold",
    "Tomato_mosaic_virus",
    "Tomato_Septoria_leaf_spot",
    "Tomato_Spider_mites Two-spotted_spider_mite",
    "Tomato_Target_Spot",
    "Tomato_Yellow_Leaf_Curl_Virus",
    "Turmeric_Aphids_Disease",
    "Turmeric_Dry_Leaf",
    "Turmeric_Healthy_Leaf",
    "Turmeric_Leaf_Blotch",
    "Turmeric_Leaf_Spot",
    "Turmeric_Rhizome_Rot",
];

/// Split a class label into its crop prefix and condition suffix.
pub fn split_label(label: &str) -> Option<(Crop, &str)> {
    let (crop, condition) = label.split_once('_')?;
    let crop = Crop::from_str(crop).ok()?;
    Some((crop, condition))
}

/// Shaped outcome of one classification pass.
#[derive(Debug, Clone)]
pub struct Diagnosis {
    pub crop: Crop,
    pub condition: String,
    pub confidence: f32,
    /// Total probability mass assigned to the winning crop.
    pub crop_confidence: f32,
    pub class_probabilities: HashMap<String, f32>,
    pub crop_probabilities: HashMap<Crop, f32>,
}

/// Map a softmax vector onto the label set: pick the top class, split it
/// into crop and condition, and aggregate probability mass per crop.
pub fn shape_result(probabilities: &[f32]) -> Result<Diagnosis, ApiError> {
    if probabilities.len() != CLASS_LABELS.len() {
        return Err(ApiError::Classifier(format!(
            "model returned {} scores for {} classes",
            probabilities.len(),
            CLASS_LABELS.len()
        )));
    }

    let (best_index, &confidence) = probabilities
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .ok_or_else(|| ApiError::Classifier("empty probability vector".into()))?;

    let (crop, condition) = split_label(CLASS_LABELS[best_index])
        .ok_or_else(|| ApiError::Classifier(format!("malformed label: {}", CLASS_LABELS[best_index])))?;

    let mut class_probabilities = HashMap::with_capacity(CLASS_LABELS.len());
    let mut crop_probabilities: HashMap<Crop, f32> = Crop::iter().map(|c| (c, 0.0)).collect();
    for (index, &probability) in probabilities.iter().enumerate() {
        let label = CLASS_LABELS[index];
        class_probabilities.insert(label.to_string(), probability);
        if let Some((label_crop, _)) = split_label(label) {
            *crop_probabilities.entry(label_crop).or_insert(0.0) += probability;
        }
    }

    let crop_confidence = crop_probabilities.get(&crop).copied().unwrap_or(0.0);

    Ok(Diagnosis {
        crop,
        condition: condition.to_string(),
        confidence,
        crop_confidence,
        class_probabilities,
        crop_probabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_label_has_a_valid_crop_prefix() {
        for label in CLASS_LABELS {
            assert!(split_label(label).is_some(), "bad label: {label}");
        }
    }

    #[test]
    fn pepper_label_splits_at_the_first_underscore() {
        let (crop, condition) = split_label("Pepper_bell_Bacterial_spot").unwrap();
        assert_eq!(crop, Crop::Pepper);
        assert_eq!(condition, "bell_Bacterial_spot");
    }

    #[test]
    fn spider_mite_label_keeps_its_embedded_space() {
        let (crop, condition) =
            split_label("Tomato_Spider_mites Two-spotted_spider_mite").unwrap();
        assert_eq!(crop, Crop::Tomato);
        assert_eq!(condition, "Spider_mites Two-spotted_spider_mite");
    }

    #[test]
    fn shape_result_picks_the_argmax_class() {
        let mut probabilities = vec![0.0f32; CLASS_LABELS.len()];
        probabilities[27] = 0.9; // Rice_Blast
        probabilities[26] = 0.1; // Rice_Bacterialblight

        let diagnosis = shape_result(&probabilities).unwrap();
        assert_eq!(diagnosis.crop, Crop::Rice);
        assert_eq!(diagnosis.condition, "Blast");
        assert!((diagnosis.confidence - 0.9).abs() < 1e-6);
        assert!((diagnosis.crop_confidence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn crop_masses_sum_to_one_for_a_uniform_distribution() {
        let probabilities = vec![1.0f32 / CLASS_LABELS.len() as f32; CLASS_LABELS.len()];
        let diagnosis = shape_result(&probabilities).unwrap();
        let total: f32 = diagnosis.crop_probabilities.values().sum();
        assert!((total - 1.0).abs() < 1e-4);
    }

    #[test]
    fn rejects_a_vector_of_the_wrong_length() {
        assert!(shape_result(&[0.5, 0.5]).is_err());
    }
}
