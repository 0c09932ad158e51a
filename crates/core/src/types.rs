use serde::{Deserialize, Serialize};

/// What the model produced for one attempt.
///
/// `command` may be empty when the model answered without a runnable command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub explanation: String,
    pub command: String,
}

impl GenerationResult {
    pub fn new(explanation: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            explanation: explanation.into(),
            command: command.into(),
        }
    }

    pub fn without_command(explanation: impl Into<String>) -> Self {
        Self::new(explanation, String::new())
    }

    pub fn has_command(&self) -> bool {
        !self.command.trim().is_empty()
    }
}

/// Result of running a command on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    Success(String),
    Failure(String),
}

impl ExecutionOutcome {
    pub fn success(output: impl Into<String>) -> Self {
        Self::Success(output.into())
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure(error.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
        }
    }
}

/// Per-request bookkeeping for the retry loop. Created fresh for every
/// request line and dropped once resolved.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    attempts_used: usize,
    last_context: Option<String>,
    resolved: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts_used(&self) -> usize {
        self.attempts_used
    }

    /// Feedback from the previous failed attempt, if any.
    pub fn last_context(&self) -> Option<&str> {
        self.last_context.as_deref()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub(crate) fn record_failure(&mut self, context: String) {
        self.attempts_used += 1;
        self.last_context = Some(context);
    }

    pub(crate) fn resolve_success(&mut self) {
        self.attempts_used += 1;
        self.resolved = true;
    }

    pub(crate) fn resolve_exhausted(&mut self) {
        self.resolved = true;
    }

    pub(crate) fn into_context(self) -> Option<String> {
        self.last_context
    }
}

/// Terminal outcome of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopOutcome {
    /// A command succeeded. `summary` is set when the output qualified for
    /// summarization.
    Executed {
        output: String,
        summary: Option<String>,
        attempts: usize,
    },
    /// Every attempt was used without a successful execution.
    Exhausted {
        context: Option<String>,
        attempts: usize,
    },
}

impl LoopOutcome {
    pub fn attempts(&self) -> usize {
        match self {
            Self::Executed { attempts, .. } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }

    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed { .. })
    }

    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Executed { output, .. } => Some(output),
            Self::Exhausted { .. } => None,
        }
    }
}

/// Host facts the command generator puts in front of the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostProfile {
    pub os: String,
    pub package_manager: String,
    pub needs_sudo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_command_is_empty() {
        assert!(!GenerationResult::new("thinking", "   \n").has_command());
        assert!(GenerationResult::new("", "ls").has_command());
    }

    #[test]
    fn test_session_state_counts_attempts() {
        let mut state = SessionState::new();
        assert_eq!(state.last_context(), None);

        state.record_failure("boom".to_string());
        assert_eq!(state.attempts_used(), 1);
        assert_eq!(state.last_context(), Some("boom"));
        assert!(!state.is_resolved());

        state.resolve_success();
        assert_eq!(state.attempts_used(), 2);
        assert!(state.is_resolved());
    }

    #[test]
    fn test_execution_outcome_text() {
        let failure = ExecutionOutcome::failure("exit 1");
        assert!(!failure.is_success());
        assert_eq!(failure.text(), "exit 1");
        assert!(ExecutionOutcome::success("").is_success());
    }

    #[test]
    fn test_outcome_accessors() {
        let executed = LoopOutcome::Executed {
            output: "ok".to_string(),
            summary: None,
            attempts: 2,
        };
        assert!(executed.is_executed());
        assert_eq!(executed.output(), Some("ok"));
        assert_eq!(executed.attempts(), 2);

        let exhausted = LoopOutcome::Exhausted {
            context: None,
            attempts: 3,
        };
        assert_eq!(exhausted.output(), None);
    }
}
