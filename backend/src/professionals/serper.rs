use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const SERPER_API_URL: &str = "https://google.serper.dev/search";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Client for the Serper web-search API.
#[derive(Clone)]
pub struct SerperClient {
    api_key: String,
    num_results: u32,
    client: Client,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<SearchHit>,
}

/// One organic result, trimmed to the fields the extraction prompt uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub position: u32,
}

impl SerperClient {
    pub fn new(api_key: String, num_results: u32) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            api_key,
            num_results,
            client,
        })
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ApiError> {
        let response = self
            .client
            .post(SERPER_API_URL)
            .header("X-API-KEY", &self.api_key)
            .json(&SearchRequest {
                q: query,
                num: self.num_results,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream { status, body });
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.organic)
    }
}
