use lazy_static::lazy_static;
use shared::{ChatMessage, DISEASE_MARKER};

lazy_static! {
    /// Keywords that mark a question as being about the diagnosed disease.
    static ref DISEASE_KEYWORDS: Vec<&'static str> = vec![
        "disease", "treatment", "symptoms", "cure", "prevent", "spread",
        "control", "causes", "affected", "infection", "remedy", "solution",
        "manage", "handle", "rice", "plant", "crop", "farm", "field",
    ];
}

/// Recover the disease previously diagnosed in this conversation, if any:
/// the first bot message carrying the marker names it on the marker line.
pub fn disease_from_context(context: &[ChatMessage]) -> Option<String> {
    for message in context {
        if message.kind != "bot" {
            continue;
        }
        if let Some((_, rest)) = message.content.split_once(DISEASE_MARKER) {
            let disease = rest.lines().next().unwrap_or("").trim();
            if !disease.is_empty() {
                return Some(disease.to_string());
            }
        }
    }
    None
}

/// Heuristic gate: does the question concern the diagnosed disease at all?
/// Case-insensitive substring match against the fixed keyword list.
pub fn is_disease_related(message: &str) -> bool {
    let message = message.to_lowercase();
    DISEASE_KEYWORDS.iter().any(|keyword| message.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_disease_from_the_marker_line() {
        let context = vec![
            ChatMessage::user("here is a photo"),
            ChatMessage::bot("Disease detected: Rice Blast\nCrop type: Rice\n\nDetails..."),
        ];
        assert_eq!(disease_from_context(&context).as_deref(), Some("Rice Blast"));
    }

    #[test]
    fn ignores_user_messages_and_missing_markers() {
        let context = vec![
            ChatMessage::user("Disease detected: Fake"),
            ChatMessage::bot("Hello! Upload a leaf photo to get started."),
        ];
        assert!(disease_from_context(&context).is_none());
    }

    #[test]
    fn empty_marker_line_counts_as_no_context() {
        let context = vec![ChatMessage::bot("Disease detected: \nmore text")];
        assert!(disease_from_context(&context).is_none());
    }

    #[test]
    fn first_marked_bot_message_wins() {
        let context = vec![
            ChatMessage::bot("Disease detected: Early_Blight\n..."),
            ChatMessage::bot("Disease detected: Late_Blight\n..."),
        ];
        assert_eq!(
            disease_from_context(&context).as_deref(),
            Some("Early_Blight")
        );
    }

    #[test]
    fn keyword_gate_matches_case_insensitively() {
        assert!(is_disease_related("What TREATMENT do you recommend?"));
        assert!(is_disease_related("will it spread to my field?"));
        assert!(!is_disease_related("How do I bake bread?"));
    }
}
