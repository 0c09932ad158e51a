use crate::installer::PackageInstaller;
use async_trait::async_trait;
use hacker_agent_core::{ExecutionOutcome, HostExecutor};
use regex::Regex;
use std::sync::{Arc, LazyLock};

// `install_package("nmap")`, optionally written as `platform_utils.install_package(...)`.
static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:platform_utils\.)?(install|uninstall)_package\(\s*["']([^"']+)["']\s*\)\s*;?$"#,
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageDirective {
    Install(String),
    Uninstall(String),
}

pub fn parse_directive(command: &str) -> Option<PackageDirective> {
    let captures = DIRECTIVE.captures(command.trim())?;
    let package = captures[2].trim().to_string();
    match &captures[1] {
        "install" => Some(PackageDirective::Install(package)),
        _ => Some(PackageDirective::Uninstall(package)),
    }
}

/// The executor the retry loop talks to: package directives go through the
/// installer, everything else through the shell.
pub struct AgentExecutor {
    shell: Arc<dyn HostExecutor>,
    installer: Arc<PackageInstaller>,
}

impl AgentExecutor {
    pub fn new(shell: Arc<dyn HostExecutor>, installer: Arc<PackageInstaller>) -> Self {
        Self { shell, installer }
    }
}

#[async_trait]
impl HostExecutor for AgentExecutor {
    async fn execute(&self, command: &str) -> ExecutionOutcome {
        let (result, package) = match parse_directive(command) {
            Some(PackageDirective::Install(package)) => {
                (self.installer.install(&package).await, package)
            }
            Some(PackageDirective::Uninstall(package)) => {
                (self.installer.uninstall(&package).await, package)
            }
            None => return self.shell.execute(command).await,
        };

        match result {
            Ok(output) if output.trim().is_empty() => ExecutionOutcome::success(format!(
                "{} handled by {}",
                package,
                self.installer.manager()
            )),
            Ok(output) => ExecutionOutcome::success(output),
            Err(e) => {
                tracing::warn!("Package directive for {} failed: {}", package, e);
                ExecutionOutcome::failure(e.to_string())
            }
        }
    }
}
