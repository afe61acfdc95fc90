pub mod gemini;
pub mod geo;
pub mod serper;

use log::info;
use shared::{Professional, ProfessionalQuery};
use url::Url;
use uuid::Uuid;

use crate::error::ApiError;

use gemini::GeminiClient;
use serper::SerperClient;

/// Server-side professional search: web search via Serper, structured
/// extraction via Gemini, jittered map coordinates per region.
#[derive(Clone)]
pub struct ProfessionalSearch {
    serper: SerperClient,
    gemini: GeminiClient,
}

/// Build the web-search query from the optional filters. "Any" and empty
/// values are skipped; without a location the search covers all of India.
pub fn build_search_query(query: &ProfessionalQuery) -> String {
    let mut parts = vec!["Agricultural professionals".to_string()];

    if let Some(expertise) = active_filter(&query.expertise) {
        parts.push(expertise.to_string());
    }
    match active_filter(&query.location) {
        Some(location) => parts.push(format!("in {location}")),
        None => parts.push("India".to_string()),
    }
    if let Some(crop) = active_filter(&query.crop_type) {
        parts.push(format!("for {crop}"));
    }
    if let Some(keywords) = active_filter(&query.keywords) {
        parts.push(keywords.to_string());
    }

    parts.join(" ")
}

fn active_filter(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("any"))
}

impl ProfessionalSearch {
    pub fn new(serper: SerperClient, gemini: GeminiClient) -> Self {
        Self { serper, gemini }
    }

    pub async fn search(&self, query: &ProfessionalQuery) -> Result<Vec<Professional>, ApiError> {
        let search_query = build_search_query(query);
        info!("Searching professionals: {search_query}");

        let hits = self.serper.search(&search_query).await?;
        if hits.is_empty() {
            return Ok(Vec::new());
        }

        let extracted = self.gemini.extract_professionals(&hits).await?;
        let fallback_region = active_filter(&query.location).map(str::to_string);

        let professionals = extracted
            .into_iter()
            .filter(|p| !p.name.trim().is_empty())
            .map(|p| {
                let region = p.location.clone().or_else(|| fallback_region.clone());
                let (lat, lon) = geo::jittered_coordinates(region.as_deref());
                Professional {
                    id: Uuid::new_v4(),
                    name: p.name,
                    expertise: p.expertise,
                    location: p.location,
                    crop_specialization: p.crop_specialization,
                    contact: p.contact,
                    link: p.link.filter(|link| Url::parse(link).is_ok()),
                    address: p.address,
                    gender: p.gender,
                    lat,
                    lon,
                }
            })
            .collect();

        Ok(professionals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_query_searches_all_of_india() {
        let query = ProfessionalQuery::default();
        assert_eq!(build_search_query(&query), "Agricultural professionals India");
    }

    #[test]
    fn any_values_are_treated_as_unset() {
        let query = ProfessionalQuery {
            expertise: Some("Any".into()),
            location: Some("any".into()),
            crop_type: Some("  ".into()),
            keywords: None,
        };
        assert_eq!(build_search_query(&query), "Agricultural professionals India");
    }

    #[test]
    fn filters_appear_in_order() {
        let query = ProfessionalQuery {
            expertise: Some("Agronomist".into()),
            location: Some("Punjab".into()),
            crop_type: Some("Rice".into()),
            keywords: Some("organic certification".into()),
        };
        assert_eq!(
            build_search_query(&query),
            "Agricultural professionals Agronomist in Punjab for Rice organic certification"
        );
    }
}
