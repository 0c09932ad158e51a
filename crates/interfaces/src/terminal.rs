use crate::line_reader::LineReader;
use crate::render::{numbered, panel};
use crate::traits::{is_affirmative, Interface};
use async_trait::async_trait;
use hacker_agent_core::LoopObserver;
use tokio::io::AsyncWriteExt;

pub struct TerminalInterface {
    stdin: LineReader,
}

impl TerminalInterface {
    pub fn new() -> Self {
        Self {
            stdin: LineReader::stdin(),
        }
    }

    async fn write(&self, text: &str) {
        let mut stdout = tokio::io::stdout();
        let _ = stdout.write_all(text.as_bytes()).await;
        let _ = stdout.flush().await;
    }
}

impl Default for TerminalInterface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Interface for TerminalInterface {
    async fn receive_input(&self) -> Option<String> {
        self.stdin.read_line().await
    }

    async fn send_output(&self, message: &str) {
        self.write(&format!("{}\n", message)).await;
    }

    async fn request_approval(&self, action: &str) -> bool {
        match self.prompt(&format!("⚠️  {} (yes/no): ", action)).await {
            Some(answer) => is_affirmative(&answer),
            None => false,
        }
    }

    async fn show_status(&self, status: &str) {
        self.send_output(&format!("ℹ️  {}", status)).await;
    }

    async fn show_error(&self, message: &str) {
        self.send_output(&panel("❌ Error", &format!("Error: {}", message)))
            .await;
    }

    async fn prompt(&self, label: &str) -> Option<String> {
        self.write(label).await;
        self.receive_input().await
    }
}

impl LoopObserver for TerminalInterface {
    fn attempt_started(&self, attempt: usize, max_attempts: usize) {
        println!(
            "⏳ Asking LLM for the command (Attempt {}/{})...",
            attempt, max_attempts
        );
    }

    fn explanation(&self, text: &str) {
        if !text.is_empty() {
            println!("{}", panel("🧠 LLM Thought Process", text));
        }
    }

    fn missing_command(&self) {
        println!("{}", panel("❌ Error", "Error: LLM did not provide a command. Retrying..."));
    }

    fn command(&self, command: &str) {
        println!("▶️  Executing Command:");
        println!("{}", numbered(command));
    }

    fn output(&self, output: &str) {
        println!("{}", output);
    }

    fn summary(&self, summary: &str) {
        println!("{}", panel("💡 Summary", summary));
    }

    fn execution_failed(&self, error: &str) {
        println!(
            "{}",
            panel("❌ Error", &format!("Error: Command execution failed: {}", error))
        );
    }
}
