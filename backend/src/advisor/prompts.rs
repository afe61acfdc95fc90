use shared::Crop;

/// Prompt sent right after a diagnosis to produce the detailed explanation.
pub fn explanation_prompt(condition: &str, crop: Crop) -> String {
    format!(
        "What is {condition} in {crop} plants? Please provide a detailed response covering: \
         1. Disease description and symptoms \
         2. Spreadability \
         3. Common causes \
         4. Treatment methods \
         5. Prevention measures"
    )
}

/// Prompt for follow-up questions about a previously diagnosed disease.
pub fn followup_prompt(disease: &str, question: &str) -> String {
    format!("Regarding {disease} disease: {question}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explanation_prompt_names_condition_and_crop() {
        let prompt = explanation_prompt("Blast", Crop::Rice);
        assert!(prompt.starts_with("What is Blast in Rice plants?"));
        assert!(prompt.contains("5. Prevention measures"));
    }

    #[test]
    fn followup_prompt_carries_the_question_verbatim() {
        let prompt = followup_prompt("Brownspot", "How does it spread?");
        assert_eq!(prompt, "Regarding Brownspot disease: How does it spread?");
    }
}
