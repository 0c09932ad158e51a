#![allow(dead_code)]

use async_trait::async_trait;
use hacker_agent_core::LoopObserver;
use hacker_agent_interfaces::Interface;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Replays canned answers and records everything shown to the user.
#[derive(Default)]
pub struct ScriptedInterface {
    answers: Mutex<VecDeque<String>>,
    pub transcript: Mutex<Vec<String>>,
}

impl ScriptedInterface {
    pub fn with_answers(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            transcript: Mutex::new(Vec::new()),
        }
    }

    pub fn said(&self, needle: &str) -> bool {
        self.transcript.lock().iter().any(|line| line.contains(needle))
    }

    fn record(&self, line: String) {
        self.transcript.lock().push(line);
    }
}

#[async_trait]
impl Interface for ScriptedInterface {
    async fn receive_input(&self) -> Option<String> {
        self.answers.lock().pop_front()
    }

    async fn send_output(&self, message: &str) {
        self.record(message.to_string());
    }

    async fn request_approval(&self, action: &str) -> bool {
        self.record(format!("approve? {}", action));
        matches!(self.receive_input().await, Some(answer) if hacker_agent_interfaces::is_affirmative(&answer))
    }

    async fn show_status(&self, status: &str) {
        self.record(format!("status: {}", status));
    }

    async fn show_error(&self, message: &str) {
        self.record(format!("error: {}", message));
    }

    async fn prompt(&self, label: &str) -> Option<String> {
        self.record(format!("prompt: {}", label));
        self.receive_input().await
    }
}

impl LoopObserver for ScriptedInterface {
    fn command(&self, command: &str) {
        self.record(format!("command: {}", command));
    }

    fn summary(&self, summary: &str) {
        self.record(format!("summary: {}", summary));
    }

    fn execution_failed(&self, error: &str) {
        self.record(format!("failed: {}", error));
    }
}
