mod common;

use async_trait::async_trait;
use common::ScriptedInterface;
use hacker_agent_app::repl::{Flow, Repl};
use hacker_agent_core::{
    CommandGenerator, ExecutionOutcome, GenerationResult, HostExecutor, LoopOutcome, RetryLoop,
    Summarizer,
};
use hacker_agent_executor::{PackageInstaller, PackageManager};
use hacker_agent_memory::{InstalledToolRegistry, MemoryStore};
use hacker_agent_tools::{ToolCatalog, ToolDefinition};
use parking_lot::Mutex;
use std::sync::Arc;

/// Always proposes the same command.
struct FixedGenerator(&'static str);

#[async_trait]
impl CommandGenerator for FixedGenerator {
    async fn generate(&self, _: &str, _: &str, _: Option<&str>) -> GenerationResult {
        GenerationResult::new("plan", self.0)
    }
}

/// Fails commands starting with `bad`, records the rest.
#[derive(Default)]
struct FakeHost {
    commands: Mutex<Vec<String>>,
}

#[async_trait]
impl HostExecutor for FakeHost {
    async fn execute(&self, command: &str) -> ExecutionOutcome {
        self.commands.lock().push(command.to_string());
        if command.starts_with("bad") {
            ExecutionOutcome::failure(format!("zsh: command not found: {}", command))
        } else {
            ExecutionOutcome::success("eth0: flags=4163<UP>")
        }
    }
}

struct EchoSummarizer;

#[async_trait]
impl Summarizer for EchoSummarizer {
    async fn summarize(&self, _request: &str, output: &str) -> String {
        format!("summary of {}", output)
    }
}

struct Harness {
    repl: Repl<ScriptedInterface>,
    interface: Arc<ScriptedInterface>,
    host: Arc<FakeHost>,
    registry: Arc<InstalledToolRegistry>,
}

async fn harness(command: &'static str, answers: &[&str], installed: &[&str]) -> Harness {
    let interface = Arc::new(ScriptedInterface::with_answers(answers));
    let host = Arc::new(FakeHost::default());
    let registry = Arc::new(
        InstalledToolRegistry::open(Arc::new(MemoryStore::<Vec<String>>::new()))
            .await
            .unwrap(),
    );
    for tool in installed {
        registry.add(tool).await.unwrap();
    }

    let installer = Arc::new(PackageInstaller::new(
        PackageManager::Brew,
        host.clone(),
        registry.clone(),
    ));
    let retry_loop = RetryLoop::new(
        Arc::new(FixedGenerator(command)),
        host.clone(),
        Arc::new(EchoSummarizer),
    );
    let catalog: ToolCatalog = vec![ToolDefinition::generic("nmap")].into_iter().collect();

    Harness {
        repl: Repl::new(interface.clone(), retry_loop, installer, catalog),
        interface,
        host,
        registry,
    }
}

#[tokio::test]
async fn test_request_runs_through_retry_loop() {
    let h = harness("ifconfig", &[], &[]).await;

    let outcome = h.repl.run_request("list network interfaces").await;

    assert!(matches!(outcome, LoopOutcome::Executed { attempts: 1, .. }));
    assert!(h.interface.said("command: ifconfig"));
    assert!(h.interface.said("summary: summary of eth0: flags=4163<UP>"));
}

#[tokio::test]
async fn test_exhaustion_is_reported() {
    let h = harness("badcmd", &[], &[]).await;

    assert_eq!(h.repl.handle_line("scan the network").await, Flow::Continue);

    assert_eq!(h.host.commands.lock().len(), 3);
    assert!(h.interface.said(
        "error: Failed to execute command after 3 attempts. Please refine your request or check the environment."
    ));
}

#[tokio::test]
async fn test_exit_and_blank_lines() {
    let h = harness("ifconfig", &[], &[]).await;

    assert_eq!(h.repl.handle_line("   ").await, Flow::Continue);
    assert_eq!(h.repl.handle_line("EXIT").await, Flow::Exit);
    assert!(h.host.commands.lock().is_empty());
}

#[tokio::test]
async fn test_list_commands() {
    let h = harness("ifconfig", &[], &["hydra"]).await;

    h.repl.handle_line("list tools").await;
    h.repl.handle_line("list all known tools").await;
    h.repl.handle_line("help").await;

    assert!(h.interface.said("Tools installed by Agent:\n  - hydra"));
    assert!(h
        .interface
        .said("  - nmap: A common command-line tool for nmap."));
    assert!(h.interface.said("uninstall <tool_name>"));
    assert!(h.host.commands.lock().is_empty());
}

#[tokio::test]
async fn test_uninstall_requires_agent_installed_tool() {
    let h = harness("ifconfig", &[], &[]).await;

    h.repl.handle_line("uninstall nmap").await;

    assert!(h.interface.said("nmap was not installed by the agent."));
    assert!(h.host.commands.lock().is_empty());
}

#[tokio::test]
async fn test_uninstall_confirmed() {
    let h = harness("ifconfig", &["yes"], &["hydra", "nikto"]).await;

    h.repl.handle_line("uninstall hydra").await;

    assert_eq!(*h.host.commands.lock(), vec!["brew uninstall hydra"]);
    assert_eq!(h.registry.list().await, vec!["nikto"]);
    assert!(h.interface.said("✅ hydra uninstalled successfully."));
}

#[tokio::test]
async fn test_uninstall_declined() {
    let h = harness("ifconfig", &["y"], &["hydra"]).await;

    h.repl.handle_line("uninstall hydra").await;

    assert!(h.host.commands.lock().is_empty());
    assert_eq!(h.registry.list().await, vec!["hydra"]);
}

#[tokio::test]
async fn test_uninstall_all() {
    let h = harness("ifconfig", &["YES"], &["hydra", "nikto"]).await;

    h.repl.handle_line("uninstall all").await;

    assert!(h
        .interface
        .said("Are you sure you want to uninstall ALL 2 tools installed by the agent?"));
    assert_eq!(
        *h.host.commands.lock(),
        vec!["brew uninstall hydra", "brew uninstall nikto"]
    );
    assert!(h.registry.list().await.is_empty());
}

#[tokio::test]
async fn test_uninstall_without_name() {
    let h = harness("ifconfig", &[], &["hydra"]).await;

    h.repl.handle_line("uninstall").await;

    assert!(h.interface.said("error: Please specify a tool to uninstall."));
}

#[tokio::test]
async fn test_stats_after_requests() {
    let h = harness("ifconfig", &[], &[]).await;

    h.repl.handle_line("list network interfaces").await;
    h.repl.handle_line("stats").await;

    assert!(h.interface.said("Requests: 1 (1 resolved, 0 exhausted)"));
    assert!(h.interface.said("Executions: 1 (0 failed, 100.0% success)"));
}
