use crate::prompt::{command_system_prompt, command_user_message};
use crate::traits::{GenerationParams, LLMProvider, Message, ProviderError};
use async_trait::async_trait;
use hacker_agent_core::{CommandGenerator, GenerationResult, HostProfile};
use regex::Regex;
use std::sync::{Arc, LazyLock};

static THINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>(.*?)</think>").unwrap());
static COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<command>(.*?)</command>").unwrap());

pub const NO_THOUGHT: &str = "(No thought process provided)";
pub const INVALID_RESPONSE: &str = "Error: Invalid response format from LLM.";

/// Asks an LLM for the next command to run.
pub struct LlmCommandGenerator {
    provider: Arc<dyn LLMProvider>,
    host: HostProfile,
    params: GenerationParams,
}

impl LlmCommandGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>, host: HostProfile) -> Self {
        Self {
            provider,
            host,
            params: GenerationParams::command(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

/// Splits a `<think>`/`<command>` reply. A reply with neither tag is returned
/// whole as the explanation, with no command.
pub fn parse_reply(reply: &str) -> GenerationResult {
    let thought = THINK.captures(reply).map(|c| c[1].trim().to_string());
    let command = COMMAND
        .captures(reply)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default();

    match thought {
        Some(thought) => GenerationResult::new(thought, command),
        None if command.is_empty() => GenerationResult::without_command(reply),
        None => GenerationResult::new(NO_THOUGHT, command),
    }
}

fn describe_error(error: &ProviderError) -> String {
    if error.is_connection() {
        format!("Error connecting to LLM: {}", error)
    } else {
        INVALID_RESPONSE.to_string()
    }
}

#[async_trait]
impl CommandGenerator for LlmCommandGenerator {
    async fn generate(
        &self,
        request: &str,
        catalog: &str,
        context: Option<&str>,
    ) -> GenerationResult {
        let messages = vec![
            Message::system(command_system_prompt(&self.host, catalog)),
            Message::user(command_user_message(request, context)),
        ];

        tracing::debug!(
            "Requesting command from {} (context: {})",
            self.provider.name(),
            context.is_some()
        );

        match self.provider.generate(&messages, &self.params).await {
            Ok(reply) => parse_reply(&reply),
            Err(e) => {
                tracing::warn!("Command generation failed: {}", e);
                GenerationResult::without_command(describe_error(&e))
            }
        }
    }
}
