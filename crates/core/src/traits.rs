use crate::types::{ExecutionOutcome, GenerationResult};
use async_trait::async_trait;

/// Turns a natural-language request into an explanation and a shell command.
///
/// Implementations never fail: an unreachable or confused model is reported
/// through the explanation together with an empty command.
#[async_trait]
pub trait CommandGenerator: Send + Sync {
    async fn generate(
        &self,
        request: &str,
        catalog: &str,
        context: Option<&str>,
    ) -> GenerationResult;
}

/// Runs a command on the local machine.
#[async_trait]
pub trait HostExecutor: Send + Sync {
    async fn execute(&self, command: &str) -> ExecutionOutcome;
}

/// Condenses successful command output for the user. Must not fail; errors
/// come back as the summary text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, request: &str, output: &str) -> String;
}

/// Side effects of the retry loop. Every hook defaults to a no-op.
pub trait LoopObserver: Send + Sync {
    /// `attempt` is 1-based.
    fn attempt_started(&self, _attempt: usize, _max_attempts: usize) {}

    fn explanation(&self, _text: &str) {}

    fn missing_command(&self) {}

    fn command(&self, _command: &str) {}

    fn output(&self, _output: &str) {}

    fn summary(&self, _summary: &str) {}

    fn execution_failed(&self, _error: &str) {}
}

pub struct SilentObserver;

impl LoopObserver for SilentObserver {}
