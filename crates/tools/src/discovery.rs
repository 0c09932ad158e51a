use crate::catalog::{ToolCatalog, ToolDefinition};
use crate::error::DiscoveryError;
use hacker_agent_core::{ExecutionOutcome, HostExecutor};
use hacker_agent_executor::PackageManager;

/// Tools worth advertising to the model when they are installed.
pub const CORE_TOOLS: &[&str] = &[
    "nmap",
    "hydra",
    "sqlmap",
    "metasploit",
    "msfconsole",
    "nikto",
    "wireshark",
    "tshark",
    "aircrack-ng",
    "john",
    "hashcat",
    "burpsuite",
    "whois",
    "dig",
    "ping",
    "netstat",
    "ss",
    "ifconfig",
    "nmcli",
    "brew",
    "apt-get",
    "apt-cache",
    "dpkg",
];

/// Builds the catalog of core tools installed through `manager`.
///
/// Never fails: a listing error is logged and yields an empty catalog.
pub async fn discover(executor: &dyn HostExecutor, manager: PackageManager) -> ToolCatalog {
    tracing::info!("Starting tool discovery with {}", manager);

    let installed = match installed_packages(executor, manager).await {
        Ok(installed) => installed,
        Err(e) => {
            tracing::warn!("{}", e);
            return ToolCatalog::new();
        }
    };

    let mut catalog = ToolCatalog::new();
    for tool in CORE_TOOLS {
        if installed.iter().any(|pkg| pkg == tool) {
            catalog.register(describe(executor, tool).await);
        }
    }

    tracing::info!("Discovery complete. Found {} tools", catalog.len());
    catalog
}

pub async fn installed_packages(
    executor: &dyn HostExecutor,
    manager: PackageManager,
) -> Result<Vec<String>, DiscoveryError> {
    match executor.execute(manager.list_installed_command()).await {
        ExecutionOutcome::Success(output) => Ok(parse_package_list(&output)),
        ExecutionOutcome::Failure(reason) => Err(DiscoveryError::Listing {
            manager: manager.to_string(),
            reason,
        }),
    }
}

/// One package per line; Debian `:arch` qualifiers are dropped.
pub fn parse_package_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split(':').next().unwrap_or(line).to_string())
        .collect()
}

async fn describe(executor: &dyn HostExecutor, tool: &str) -> ToolDefinition {
    let command = format!("whatis {} 2>/dev/null", tool);
    match executor.execute(&command).await {
        ExecutionOutcome::Success(output) => {
            let first = output.lines().next().unwrap_or("").trim();
            if first.is_empty() || first.contains("nothing appropriate") {
                ToolDefinition::generic(tool)
            } else {
                ToolDefinition::new(tool, first)
            }
        }
        ExecutionOutcome::Failure(_) => ToolDefinition::generic(tool),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeHost {
        responses: HashMap<String, ExecutionOutcome>,
        commands: Mutex<Vec<String>>,
    }

    impl FakeHost {
        fn new(responses: &[(&str, ExecutionOutcome)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(cmd, out)| (cmd.to_string(), out.clone()))
                    .collect(),
                commands: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HostExecutor for FakeHost {
        async fn execute(&self, command: &str) -> ExecutionOutcome {
            self.commands.lock().unwrap().push(command.to_string());
            self.responses
                .get(command)
                .cloned()
                .unwrap_or_else(|| ExecutionOutcome::failure("unexpected command"))
        }
    }

    #[test]
    fn test_parse_package_list_strips_arch() {
        assert_eq!(
            parse_package_list("nmap\nlibc6:amd64\n\n  dpkg  \n"),
            vec!["nmap", "libc6", "dpkg"]
        );
    }

    #[tokio::test]
    async fn test_discovers_installed_core_tools() {
        let host = FakeHost::new(&[
            (
                "dpkg -l | grep '^ii' | awk '{print $2}'",
                ExecutionOutcome::success("dpkg\nlibssl3:amd64\nnmap:amd64\nvim"),
            ),
            (
                "whatis nmap 2>/dev/null",
                ExecutionOutcome::success("nmap (1) - Network exploration tool\nnmap (7) - other"),
            ),
            (
                "whatis dpkg 2>/dev/null",
                ExecutionOutcome::success("dpkg: nothing appropriate."),
            ),
        ]);

        let catalog = discover(&host, PackageManager::Apt).await;

        assert_eq!(catalog.names(), vec!["nmap", "dpkg"]);
        assert_eq!(
            catalog.get("nmap").unwrap().description,
            "nmap (1) - Network exploration tool"
        );
        assert_eq!(
            catalog.get("dpkg").unwrap().description,
            "A common command-line tool for dpkg."
        );
    }

    #[tokio::test]
    async fn test_whatis_failure_uses_generic_description() {
        let host = FakeHost::new(&[("brew list", ExecutionOutcome::success("hydra\nwget"))]);

        let catalog = discover(&host, PackageManager::Brew).await;

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("hydra").unwrap(), &ToolDefinition::generic("hydra"));
    }

    #[tokio::test]
    async fn test_listing_failure_yields_empty_catalog() {
        let host = FakeHost::new(&[]);

        let catalog = discover(&host, PackageManager::Brew).await;

        assert!(catalog.is_empty());
        assert_eq!(*host.commands.lock().unwrap(), vec!["brew list"]);
    }
}
