use serde::{Deserialize, Serialize};

/// Server configuration, loaded from `config/app.yaml`. Secrets stay in the
/// environment and never appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub upload: UploadConfig,
    pub advisor: AdvisorConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the TorchScript artifact.
    pub path: String,
    /// Side length of the square network input.
    pub image_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: String,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub num_results: u32,
    pub gemini_model: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let manifest_dir =
            std::env::var("CARGO_MANIFEST_DIR").map_err(|_| "Failed to get manifest directory")?;
        let config_path = format!("{}/../config/app.yaml", manifest_dir);
        let config_str = std::fs::read_to_string(config_path)?;
        let config: AppConfig = serde_yaml::from_str(&config_str)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_shipped_config_shape() {
        let yaml = r#"
model:
  path: models/leaf_classifier.pt
  image_size: 224
upload:
  dir: temp_uploads
  allowed_extensions: [png, jpg, jpeg, gif]
advisor:
  model: llama3-70b-8192
  temperature: 0.7
  timeout_secs: 30
search:
  num_results: 10
  gemini_model: gemini-1.5-flash
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.model.image_size, 224);
        assert_eq!(config.upload.allowed_extensions.len(), 4);
        assert_eq!(config.advisor.timeout_secs, 30);
        assert_eq!(config.search.num_results, 10);
    }
}
