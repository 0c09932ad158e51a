use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("API error: {0}")]
    Api(String),
}

impl ProviderError {
    /// Transport and status errors, as opposed to a response we could not read.
    pub fn is_connection(&self) -> bool {
        matches!(self, ProviderError::Http(_) | ProviderError::Api(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Sampling parameters sent with every chat completion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl GenerationParams {
    /// Deterministic settings used when asking for a command.
    pub fn command() -> Self {
        Self {
            temperature: 0.0,
            top_p: 1.0,
            max_tokens: 1024,
        }
    }

    pub fn summary() -> Self {
        Self {
            temperature: 0.2,
            top_p: 1.0,
            max_tokens: 512,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::command()
    }
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Returns the assistant message content of the first choice.
    async fn generate(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String, ProviderError>;

    fn name(&self) -> &str;
}
