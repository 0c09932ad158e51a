//! Retry-with-context loop: generate a command, run it, and feed failures
//! back into the next generation until something succeeds or the attempt
//! budget runs out.

use crate::metrics::LoopMetrics;
use crate::traits::{CommandGenerator, HostExecutor, LoopObserver, Summarizer};
use crate::types::{ExecutionOutcome, LoopOutcome, SessionState};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Attempts per request unless configured otherwise.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Context handed to the generator after it returned no command.
pub const NO_COMMAND_CONTEXT: &str = "no command provided";

const COMMAND_NOT_FOUND: &str = "command not found";

/// Whether successful output is worth a summary: non-blank and not a
/// missing-binary message. The substring check applies to any successful
/// output, including unrelated text that happens to contain it.
pub fn should_summarize(output: &str) -> bool {
    !output.trim().is_empty() && !output.contains(COMMAND_NOT_FOUND)
}

pub struct RetryLoop {
    generator: Arc<dyn CommandGenerator>,
    executor: Arc<dyn HostExecutor>,
    summarizer: Arc<dyn Summarizer>,
    max_retries: usize,
    metrics: Arc<LoopMetrics>,
}

impl RetryLoop {
    pub fn new(
        generator: Arc<dyn CommandGenerator>,
        executor: Arc<dyn HostExecutor>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            generator,
            executor,
            summarizer,
            max_retries: DEFAULT_MAX_RETRIES,
            metrics: LoopMetrics::new(),
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<LoopMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    pub fn metrics(&self) -> Arc<LoopMetrics> {
        self.metrics.clone()
    }

    /// Drive one request to a terminal outcome.
    ///
    /// Generation always precedes execution within an attempt. An empty
    /// command and a failed execution each consume one attempt and become the
    /// context of the next generation call.
    pub async fn run(
        &self,
        request: &str,
        catalog: &str,
        observer: &dyn LoopObserver,
    ) -> LoopOutcome {
        info!("Handling request: {}", request);
        self.metrics.inc_requests();

        let mut state = SessionState::new();

        while state.attempts_used() < self.max_retries {
            let attempt = state.attempts_used() + 1;
            debug!("Attempt {}/{}", attempt, self.max_retries);
            observer.attempt_started(attempt, self.max_retries);

            self.metrics.inc_generations();
            let generation = self
                .generator
                .generate(request, catalog, state.last_context())
                .await;
            observer.explanation(&generation.explanation);

            if !generation.has_command() {
                warn!("No command generated on attempt {}", attempt);
                self.metrics.inc_empty_commands();
                observer.missing_command();
                state.record_failure(NO_COMMAND_CONTEXT.to_string());
                continue;
            }

            let command = generation.command.trim();
            observer.command(command);
            self.metrics.inc_executions();

            match self.executor.execute(command).await {
                ExecutionOutcome::Success(output) => {
                    observer.output(&output);

                    let summary = if should_summarize(&output) {
                        let summary = self.summarizer.summarize(request, &output).await;
                        self.metrics.inc_summaries();
                        observer.summary(&summary);
                        Some(summary)
                    } else {
                        debug!("Output does not qualify for a summary");
                        None
                    };

                    state.resolve_success();
                    info!("Request resolved after {} attempt(s)", state.attempts_used());
                    return LoopOutcome::Executed {
                        output,
                        summary,
                        attempts: state.attempts_used(),
                    };
                }
                ExecutionOutcome::Failure(error) => {
                    warn!("Command failed on attempt {}: {}", attempt, error);
                    self.metrics.inc_execution_failures();
                    observer.execution_failed(&error);
                    state.record_failure(error);
                }
            }
        }

        state.resolve_exhausted();
        self.metrics.inc_exhausted();
        let attempts = state.attempts_used();
        warn!("Request exhausted after {} attempt(s)", attempts);

        LoopOutcome::Exhausted {
            context: state.into_context(),
            attempts,
        }
    }
}
