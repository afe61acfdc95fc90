use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AdvisorConfig;
use crate::error::ApiError;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Client for the hosted chat model that turns diagnoses into explanations
/// and answers follow-up questions. Single-shot requests, fixed timeout,
/// no retry.
#[derive(Clone)]
pub struct GroqClient {
    api_key: String,
    model: String,
    temperature: f32,
    client: Client,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl GroqClient {
    pub fn new(api_key: String, config: &AdvisorConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            client,
        })
    }

    /// Send a single-turn prompt and return the reply text verbatim.
    pub async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        debug!("Requesting completion from {}", self.model);

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream { status, body });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ApiError::UpstreamFormat("no choices in completion".into()))
    }
}
