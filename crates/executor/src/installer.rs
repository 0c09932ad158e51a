use crate::error::ExecutorError;
use crate::platform::PackageManager;
use hacker_agent_core::{ExecutionOutcome, HostExecutor};
use hacker_agent_memory::InstalledToolRegistry;
use regex::Regex;
use std::sync::{Arc, LazyLock};

static PACKAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._+-]*$").unwrap());

/// Installs and removes packages through the host package manager and keeps
/// the installed-tool registry in step.
pub struct PackageInstaller {
    manager: PackageManager,
    runner: Arc<dyn HostExecutor>,
    registry: Arc<InstalledToolRegistry>,
}

impl PackageInstaller {
    pub fn new(
        manager: PackageManager,
        runner: Arc<dyn HostExecutor>,
        registry: Arc<InstalledToolRegistry>,
    ) -> Self {
        Self {
            manager,
            runner,
            registry,
        }
    }

    pub fn manager(&self) -> PackageManager {
        self.manager
    }

    pub fn registry(&self) -> &Arc<InstalledToolRegistry> {
        &self.registry
    }

    pub async fn install(&self, package: &str) -> Result<String, ExecutorError> {
        let package = validate_package(package)?;
        tracing::info!("Installing {} using {}", package, self.manager);

        let output = self.run(&self.manager.install_command(package)).await?;
        self.registry.add(package).await?;
        Ok(output)
    }

    /// Only packages recorded in the registry should be passed here; the
    /// caller decides whether to enforce that.
    pub async fn uninstall(&self, package: &str) -> Result<String, ExecutorError> {
        let package = validate_package(package)?;
        tracing::info!("Uninstalling {} using {}", package, self.manager);

        let output = self.run(&self.manager.uninstall_command(package)).await?;
        self.registry.remove(package).await?;
        Ok(output)
    }

    async fn run(&self, command: &str) -> Result<String, ExecutorError> {
        match self.runner.execute(command).await {
            ExecutionOutcome::Success(output) => Ok(output),
            ExecutionOutcome::Failure(error) => Err(ExecutorError::CommandFailed(error)),
        }
    }
}

pub fn validate_package(package: &str) -> Result<&str, ExecutorError> {
    let package = package.trim();
    if PACKAGE_NAME.is_match(package) {
        Ok(package)
    } else {
        Err(ExecutorError::InvalidPackage(package.to_string()))
    }
}
