use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-lifetime counters for the retry loop.
#[derive(Default)]
pub struct LoopMetrics {
    requests: AtomicU64,
    generations: AtomicU64,
    empty_commands: AtomicU64,
    executions: AtomicU64,
    execution_failures: AtomicU64,
    summaries: AtomicU64,
    exhausted: AtomicU64,
}

impl LoopMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_requests(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_generations(&self) {
        self.generations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_empty_commands(&self) {
        self.empty_commands.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_executions(&self) {
        self.executions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_execution_failures(&self) {
        self.execution_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_summaries(&self) {
        self.summaries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_exhausted(&self) {
        self.exhausted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            generations: self.generations.load(Ordering::Relaxed),
            empty_commands: self.empty_commands.load(Ordering::Relaxed),
            executions: self.executions.load(Ordering::Relaxed),
            execution_failures: self.execution_failures.load(Ordering::Relaxed),
            summaries: self.summaries.load(Ordering::Relaxed),
            exhausted: self.exhausted.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub generations: u64,
    pub empty_commands: u64,
    pub executions: u64,
    pub execution_failures: u64,
    pub summaries: u64,
    pub exhausted: u64,
}

impl MetricsSnapshot {
    pub fn execution_success_rate(&self) -> f64 {
        if self.executions == 0 {
            return 1.0;
        }
        1.0 - (self.execution_failures as f64 / self.executions as f64)
    }

    /// Requests that ended with a successful command.
    pub fn resolved_requests(&self) -> u64 {
        self.requests.saturating_sub(self.exhausted)
    }
}
