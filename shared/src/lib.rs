use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// Marker line the diagnosis message starts with. The chat endpoint scans
/// bot messages for this exact prefix to recover the disease in context.
pub const DISEASE_MARKER: &str = "Disease detected:";

/// Crop species the classifier was trained on. Class labels are prefixed
/// with the crop name, e.g. `Rice_Blast`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum Crop {
    Bean,
    Cotton,
    Groundnut,
    Maize,
    Pepper,
    Potato,
    Rice,
    Spinach,
    Sugarcane,
    Tomato,
    Turmeric,
}

/// Successful reply of `POST /api/predict`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DiagnosisResponse {
    pub disease: String,
    pub confidence: f32,
    pub explanation: String,
    pub crop_type: String,
    pub crop_confidence: f32,
    pub status: String,
}

/// One entry of the client-held conversation transcript.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatMessage {
    /// "user" or "bot".
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            kind: "user".into(),
            content: content.into(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            kind: "bot".into(),
            content: content.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatResponse {
    pub message: String,
    pub error: bool,
}

/// Filters for the professional search. "Any" and empty values mean
/// unfiltered, matching the dropdown defaults.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ProfessionalQuery {
    #[serde(default)]
    pub expertise: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub crop_type: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}

/// An agricultural professional extracted from web search results.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Professional {
    pub id: Uuid,
    pub name: String,
    pub expertise: Option<String>,
    pub location: Option<String>,
    pub crop_specialization: Option<String>,
    pub contact: Option<String>,
    pub link: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProfessionalsResponse {
    pub professionals: Vec<Professional>,
}

pub const EXPERTISE_OPTIONS: [&str; 18] = [
    "Any",
    "Farmer",
    "Agronomist",
    "Agricultural Officer",
    "Soil Scientist",
    "Seed Supplier",
    "Irrigation Expert",
    "Organic Farming",
    "Pesticide Expert",
    "Crop Insurance Agent",
    "Agricultural Engineer",
    "Extension Worker",
    "Veterinarian",
    "Animal Husbandry",
    "Agricultural Consultant",
    "Market Liaison",
    "Farm Equipment Supplier",
    "Agricultural Researcher",
];

pub const LOCATION_OPTIONS: [&str; 17] = [
    "Any",
    "Punjab",
    "Haryana",
    "Uttar Pradesh",
    "Maharashtra",
    "Karnataka",
    "Tamil Nadu",
    "Andhra Pradesh",
    "West Bengal",
    "Gujarat",
    "Rajasthan",
    "Madhya Pradesh",
    "Bihar",
    "Telangana",
    "Kerala",
    "Assam",
    "Odisha",
];

pub const CROP_FILTER_OPTIONS: [&str; 18] = [
    "Any",
    "Rice",
    "Wheat",
    "Cotton",
    "Sugarcane",
    "Maize",
    "Pulses",
    "Millets",
    "Oilseeds",
    "Vegetables",
    "Fruits",
    "Spices",
    "Tea",
    "Coffee",
    "Jute",
    "Coconut",
    "Floriculture",
    "Horticulture",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn chat_request_context_defaults_to_empty() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert!(request.context.is_empty());
    }

    #[test]
    fn chat_message_kind_serializes_as_type() {
        let json = serde_json::to_string(&ChatMessage::bot("hello")).unwrap();
        assert!(json.contains(r#""type":"bot""#));
    }

    #[test]
    fn crop_parses_from_label_prefix() {
        assert_eq!(Crop::from_str("Rice").unwrap(), Crop::Rice);
        assert!(Crop::from_str("Wheat").is_err());
    }
}
