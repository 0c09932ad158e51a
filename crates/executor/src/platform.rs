use crate::error::ExecutorError;
use hacker_agent_core::HostProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsType {
    MacOs,
    Linux,
}

impl OsType {
    pub fn detect() -> Result<Self, ExecutorError> {
        Self::from_os_name(std::env::consts::OS)
    }

    pub fn from_os_name(name: &str) -> Result<Self, ExecutorError> {
        match name {
            "macos" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            other => Err(ExecutorError::UnsupportedOs(other.to_string())),
        }
    }

    pub fn package_manager(self) -> PackageManager {
        match self {
            Self::MacOs => PackageManager::Brew,
            Self::Linux => PackageManager::Apt,
        }
    }

    pub fn host_profile(self) -> HostProfile {
        let package_manager = self.package_manager();
        HostProfile {
            os: self.to_string(),
            package_manager: package_manager.to_string(),
            needs_sudo: package_manager.needs_sudo(),
        }
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Brew,
    Apt,
}

impl PackageManager {
    pub fn needs_sudo(self) -> bool {
        matches!(self, Self::Apt)
    }

    pub fn install_command(self, package: &str) -> String {
        match self {
            Self::Brew => format!("brew install {}", package),
            Self::Apt => format!(
                "sudo apt-get update && sudo apt-get install -y {}",
                package
            ),
        }
    }

    pub fn uninstall_command(self, package: &str) -> String {
        match self {
            Self::Brew => format!("brew uninstall {}", package),
            Self::Apt => format!("sudo apt-get remove -y {}", package),
        }
    }

    /// Shell pipeline printing one installed package name per line.
    pub fn list_installed_command(self) -> &'static str {
        match self {
            Self::Brew => "brew list",
            Self::Apt => "dpkg -l | grep '^ii' | awk '{print $2}'",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brew => write!(f, "brew"),
            Self::Apt => write!(f, "apt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_detection_by_name() {
        assert_eq!(OsType::from_os_name("macos").unwrap(), OsType::MacOs);
        assert_eq!(OsType::from_os_name("linux").unwrap(), OsType::Linux);
        assert!(matches!(
            OsType::from_os_name("windows"),
            Err(ExecutorError::UnsupportedOs(_))
        ));
    }

    #[test]
    fn test_package_manager_commands() {
        let apt = OsType::Linux.package_manager();
        assert_eq!(
            apt.install_command("nmap"),
            "sudo apt-get update && sudo apt-get install -y nmap"
        );
        assert_eq!(apt.uninstall_command("nmap"), "sudo apt-get remove -y nmap");

        let brew = OsType::MacOs.package_manager();
        assert_eq!(brew.install_command("nmap"), "brew install nmap");
        assert_eq!(brew.uninstall_command("nmap"), "brew uninstall nmap");
    }

    #[test]
    fn test_host_profile() {
        let profile = OsType::MacOs.host_profile();
        assert_eq!(profile.os, "macos");
        assert_eq!(profile.package_manager, "brew");
        assert!(!profile.needs_sudo);
        assert!(OsType::Linux.host_profile().needs_sudo);
    }
}
