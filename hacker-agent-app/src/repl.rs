//! Interactive session loop.

use crate::builtins::{exhaustion_message, Builtin, HELP_TEXT};
use hacker_agent_core::{LoopObserver, LoopOutcome, MetricsSnapshot, RetryLoop};
use hacker_agent_executor::PackageInstaller;
use hacker_agent_interfaces::Interface;
use hacker_agent_tools::ToolCatalog;
use std::sync::Arc;

pub const PROMPT: &str = ">>> ";
pub const SHUTDOWN_MESSAGE: &str = "\nCaught interrupt or EOF, shutting down...";
pub const SESSION_ENDED: &str = "Agent session ended.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Repl<I> {
    interface: Arc<I>,
    retry_loop: RetryLoop,
    installer: Arc<PackageInstaller>,
    catalog: ToolCatalog,
    catalog_json: String,
}

impl<I: Interface + LoopObserver> Repl<I> {
    pub fn new(
        interface: Arc<I>,
        retry_loop: RetryLoop,
        installer: Arc<PackageInstaller>,
        catalog: ToolCatalog,
    ) -> Self {
        let catalog_json = catalog.to_prompt_json().unwrap_or_else(|e| {
            tracing::warn!("Failed to serialize tool catalog: {}", e);
            "[]".to_string()
        });

        Self {
            interface,
            retry_loop,
            installer,
            catalog,
            catalog_json,
        }
    }

    /// Reads lines until `exit`, end of input or Ctrl-C.
    pub async fn run(&self) {
        self.interface
            .send_output(
                "Agent is ready. Type your commands or 'exit' to quit. Type 'help' for a list of commands.",
            )
            .await;

        loop {
            let line = tokio::select! {
                line = self.interface.prompt(PROMPT) => line,
                _ = tokio::signal::ctrl_c() => None,
            };

            let Some(line) = line else {
                self.interface.send_output(SHUTDOWN_MESSAGE).await;
                break;
            };

            let flow = tokio::select! {
                flow = self.handle_line(&line) => Some(flow),
                _ = tokio::signal::ctrl_c() => None,
            };

            match flow {
                Some(Flow::Continue) => {}
                Some(Flow::Exit) => break,
                None => {
                    self.interface.send_output(SHUTDOWN_MESSAGE).await;
                    break;
                }
            }
        }
    }

    pub async fn handle_line(&self, line: &str) -> Flow {
        let line = line.trim();
        if line.is_empty() {
            return Flow::Continue;
        }

        match Builtin::parse(line) {
            Some(Builtin::Exit) => Flow::Exit,
            Some(builtin) => {
                self.run_builtin(builtin).await;
                Flow::Continue
            }
            None => {
                self.run_request(line).await;
                Flow::Continue
            }
        }
    }

    /// One-shot mode: a single request that Ctrl-C abandons. `None` when
    /// interrupted.
    pub async fn run_once(&self, request: &str) -> Option<LoopOutcome> {
        tokio::select! {
            outcome = self.run_request(request) => Some(outcome),
            _ = tokio::signal::ctrl_c() => {
                self.interface.send_output(SHUTDOWN_MESSAGE).await;
                None
            }
        }
    }

    /// Sends one request through the retry loop and reports exhaustion.
    pub async fn run_request(&self, request: &str) -> LoopOutcome {
        let outcome = self
            .retry_loop
            .run(request, &self.catalog_json, self.interface.as_ref())
            .await;

        if let LoopOutcome::Exhausted { attempts, .. } = &outcome {
            self.interface
                .show_error(&exhaustion_message(*attempts))
                .await;
        }
        outcome
    }

    async fn run_builtin(&self, builtin: Builtin) {
        match builtin {
            Builtin::Exit => {}
            Builtin::Help => self.interface.send_output(HELP_TEXT).await,
            Builtin::ListTools => self.list_installed().await,
            Builtin::ListAllKnownTools => self.list_known().await,
            Builtin::UninstallAll => self.uninstall_all().await,
            Builtin::Uninstall(tool) => self.uninstall(&tool).await,
            Builtin::Stats => {
                let stats = format_stats(&self.retry_loop.metrics().snapshot());
                self.interface.send_output(&stats).await
            }
        }
    }

    async fn list_installed(&self) {
        let tools = self.installer.registry().list().await;
        if tools.is_empty() {
            self.interface
                .send_output("No tools have been installed by the Agent yet.")
                .await;
            return;
        }

        let mut out = String::from("Tools installed by Agent:");
        for tool in tools {
            out.push_str(&format!("\n  - {}", tool));
        }
        self.interface.send_output(&out).await;
    }

    async fn list_known(&self) {
        if self.catalog.is_empty() {
            self.interface.send_output("No tools discovered yet.").await;
            return;
        }

        let mut out = String::from("All known tools on your system:");
        for tool in self.catalog.iter() {
            out.push_str(&format!("\n  - {}: {}", tool.tool_name, tool.description));
        }
        self.interface.send_output(&out).await;
    }

    async fn uninstall(&self, tool: &str) {
        if tool.is_empty() {
            self.interface
                .show_error("Please specify a tool to uninstall.")
                .await;
            return;
        }

        if !self.installer.registry().contains(tool).await {
            self.interface
                .send_output(&format!("{} was not installed by the agent.", tool))
                .await;
            return;
        }

        let question = format!("Are you sure you want to uninstall {}?", tool);
        if self.interface.request_approval(&question).await {
            self.uninstall_one(tool).await;
        }
    }

    async fn uninstall_all(&self) {
        let tools = self.installer.registry().list().await;
        if tools.is_empty() {
            self.interface
                .send_output("No tools installed by the agent to uninstall.")
                .await;
            return;
        }

        let question = format!(
            "Are you sure you want to uninstall ALL {} tools installed by the agent?",
            tools.len()
        );
        if !self.interface.request_approval(&question).await {
            return;
        }
        for tool in tools {
            self.uninstall_one(&tool).await;
        }
    }

    async fn uninstall_one(&self, tool: &str) {
        self.interface
            .show_status(&format!("Uninstalling {}...", tool))
            .await;
        match self.installer.uninstall(tool).await {
            Ok(_) => {
                self.interface
                    .send_output(&format!("✅ {} uninstalled successfully.", tool))
                    .await
            }
            Err(e) => {
                self.interface
                    .show_error(&format!("Failed to uninstall {}: {}", tool, e))
                    .await
            }
        }
    }
}

pub fn format_stats(stats: &MetricsSnapshot) -> String {
    format!(
        "📊 Session Stats:\n  Requests: {} ({} resolved, {} exhausted)\n  LLM generations: {} ({} without a command)\n  Executions: {} ({} failed, {:.1}% success)\n  Summaries: {}",
        stats.requests,
        stats.resolved_requests(),
        stats.exhausted,
        stats.generations,
        stats.empty_commands,
        stats.executions,
        stats.execution_failures,
        stats.execution_success_rate() * 100.0,
        stats.summaries,
    )
}
