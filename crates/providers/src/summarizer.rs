use crate::prompt::{summary_system_prompt, summary_user_message};
use crate::traits::{GenerationParams, LLMProvider, Message};
use async_trait::async_trait;
use hacker_agent_core::Summarizer;
use std::sync::Arc;

pub struct LlmSummarizer {
    provider: Arc<dyn LLMProvider>,
    params: GenerationParams,
}

impl LlmSummarizer {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            params: GenerationParams::summary(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, request: &str, output: &str) -> String {
        let messages = vec![
            Message::system(summary_system_prompt(request)),
            Message::user(summary_user_message(output)),
        ];

        match self.provider.generate(&messages, &self.params).await {
            Ok(summary) => summary.trim().to_string(),
            Err(e) if e.is_connection() => {
                tracing::warn!("Summarization failed: {}", e);
                format!("Error summarizing output: {}", e)
            }
            Err(e) => {
                tracing::warn!("Summarization failed: {}", e);
                "Error: Invalid response format from LLM during summarization.".to_string()
            }
        }
    }
}
