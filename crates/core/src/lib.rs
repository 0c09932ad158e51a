//! Hacker-Agent core: the retry-with-context loop that turns a request into
//! an executed shell command.

pub mod metrics;
pub mod retry_loop;
pub mod traits;
pub mod types;

pub use metrics::{LoopMetrics, MetricsSnapshot};
pub use retry_loop::{should_summarize, RetryLoop, DEFAULT_MAX_RETRIES, NO_COMMAND_CONTEXT};
pub use traits::{CommandGenerator, HostExecutor, LoopObserver, SilentObserver, Summarizer};
pub use types::*;
