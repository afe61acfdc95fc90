use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

use super::serper::SearchHit;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Gemini generateContent API, used to turn raw search hits
/// into structured professional records.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    client: Client,
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

/// Professional record in the shape the extraction prompt asks for.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedProfessional {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub expertise: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub crop_specialization: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// Prompt asking the model to distill search hits into a JSON array of
/// professional records.
pub fn extraction_prompt(hits: &[SearchHit]) -> String {
    format!(
        "Analyze these agricultural professional search results and extract structured \
         information about individual farmers, agronomists, or agricultural authorities.\n\
         For each professional you can identify, provide:\n\
         1. Name\n\
         2. Expertise (from: {expertise})\n\
         3. Location (region)\n\
         4. Crop specialization (if mentioned)\n\
         5. Contact info (if available)\n\
         6. Website/source link\n\
         7. Gender (male/female/unknown - based on name if not specified)\n\n\
         Format the response as a JSON array of objects with these properties:\n\
         - name (string)\n\
         - expertise (string)\n\
         - location (string)\n\
         - cropSpecialization (string)\n\
         - contact (string)\n\
         - link (string)\n\
         - address (string if available)\n\
         - gender (string: male/female/unknown)\n\n\
         Search results to analyze:\n{results}",
        expertise = shared::EXPERTISE_OPTIONS.join(", "),
        results = serde_json::to_string_pretty(hits).unwrap_or_default(),
    )
}

/// Parse the model's JSON array, tolerating markdown code fences.
pub fn parse_extraction(text: &str) -> Result<Vec<ExtractedProfessional>, ApiError> {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    serde_json::from_str(text.trim())
        .map_err(|e| ApiError::UpstreamFormat(format!("professional extraction: {e}")))
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            api_key,
            model,
            client,
        })
    }

    pub async fn extract_professionals(
        &self,
        hits: &[SearchHit],
    ) -> Result<Vec<ExtractedProfessional>, ApiError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_URL, self.model, self.api_key
        );

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: extraction_prompt(hits),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                top_k: 32,
                top_p: 0.95,
                max_output_tokens: 8192,
            },
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream { status, body });
        }

        let parsed: GeminiResponse = response.json().await?;
        let text = parsed
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.as_str())
            .ok_or_else(|| ApiError::UpstreamFormat("no content in Gemini response".into()))?;

        parse_extraction(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_bare_json_array() {
        let parsed = parse_extraction(r#"[{"name": "A. Sharma", "gender": "unknown"}]"#).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "A. Sharma");
    }

    #[test]
    fn strips_markdown_code_fences() {
        let text = "```json\n[{\"name\": \"R. Patel\", \"cropSpecialization\": \"Cotton\"}]\n```";
        let parsed = parse_extraction(text).unwrap();
        assert_eq!(parsed[0].crop_specialization.as_deref(), Some("Cotton"));
    }

    #[test]
    fn empty_array_is_fine() {
        assert!(parse_extraction("[]").unwrap().is_empty());
    }

    #[test]
    fn prose_instead_of_json_is_an_error() {
        assert!(parse_extraction("I could not find any professionals.").is_err());
    }

    #[test]
    fn prompt_embeds_the_search_hits() {
        let hits = vec![SearchHit {
            title: "Dr. Verma, Agronomist".into(),
            link: "https://example.com".into(),
            snippet: "Rice specialist in Punjab".into(),
            position: 1,
        }];
        let prompt = extraction_prompt(&hits);
        assert!(prompt.contains("Dr. Verma, Agronomist"));
        assert!(prompt.contains("cropSpecialization"));
    }
}
