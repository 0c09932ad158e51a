use hacker_agent_core::HostProfile;

/// System prompt for command generation on the given host.
pub fn command_system_prompt(host: &HostProfile, catalog: &str) -> String {
    let sudo_note = if host.needs_sudo {
        format!("You WILL need `sudo` for `{}` commands.", host.package_manager)
    } else {
        format!(
            "You do NOT need to use `sudo` for `{}` commands.",
            host.package_manager
        )
    };

    format!(
        r#"You are a self-healing expert penetration testing assistant. Your goal is to translate user requests into executable shell commands for the host system.
Respond in the same language as the user's query.

You are running on a {os} system. The package manager is `{pm}`.
{sudo_note}

**IMPORTANT LIMITATION**: Direct access to physical Wi-Fi hardware (monitor mode, packet injection) depends on the specific adapter and its drivers, and many built-in cards do NOT support it. If the user asks about Wi-Fi devices, explain this limitation and suggest a compatible external USB adapter, or network-level scanning (`nmap`, `arp-scan`) to find devices on the local network.

You will be given:
1. The user's current request.
2. A list of available tools.
3. A `context` which may contain the error from the PREVIOUS command you ran.

**CRITICAL RULE: If the `context` contains a "command not found" error, your ONLY priority is to fix it.**
Find the correct package name with `{pm} search <command>` (`apt-cache search` on Linux, `brew search` on macOS), then install it with `install_package("<package_name>")` as the whole command.

General workflow:
1. Analyze the request and the `context`.
2. If the context indicates a missing command, plan to install it with `install_package`.
3. Otherwise plan how to carry out the request.
4. Explain your plan and reasoning inside a <think> XML tag.
5. Give the single, raw, executable command (or `install_package("nmap")`) inside a <command> XML tag.

Your output MUST follow this structure:
<think>
Your reasoning and analysis here.
</think>
<command>
The final command here.
</command>

Available Tools:
{catalog}"#,
        os = host.os,
        pm = host.package_manager,
        sudo_note = sudo_note,
        catalog = catalog,
    )
}

/// The user turn, prefixed with the previous failure when retrying.
pub fn command_user_message(request: &str, context: Option<&str>) -> String {
    match context {
        Some(context) => format!(
            "My last command failed with this context: {}. My new request is: {}",
            context, request
        ),
        None => request.to_string(),
    }
}

pub fn summary_system_prompt(request: &str) -> String {
    format!(
        r#"You are a helpful assistant. Your task is to summarize the output of a command in a concise and easy-to-understand manner.
Respond in the same language as the user's original request.
The user's original request was: "{}"
The command output is provided below. Extract the key information and present it clearly."#,
        request
    )
}

pub fn summary_user_message(output: &str) -> String {
    format!("Command Output:\n```\n{}\n```", output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux() -> HostProfile {
        HostProfile {
            os: "linux".to_string(),
            package_manager: "apt".to_string(),
            needs_sudo: true,
        }
    }

    #[test]
    fn test_prompt_mentions_host_and_catalog() {
        let prompt = command_system_prompt(&linux(), "[{\"tool_name\": \"nmap\"}]");
        assert!(prompt.contains("running on a linux system"));
        assert!(prompt.contains("The package manager is `apt`"));
        assert!(prompt.contains("You WILL need `sudo`"));
        assert!(prompt.contains("\"command not found\""));
        assert!(prompt.ends_with("[{\"tool_name\": \"nmap\"}]"));
    }

    #[test]
    fn test_brew_needs_no_sudo() {
        let host = HostProfile {
            os: "macos".to_string(),
            package_manager: "brew".to_string(),
            needs_sudo: false,
        };
        assert!(command_system_prompt(&host, "[]").contains("do NOT need to use `sudo`"));
    }

    #[test]
    fn test_user_message_with_context() {
        assert_eq!(command_user_message("scan", None), "scan");
        assert_eq!(
            command_user_message("scan", Some("zsh: command not found: nmapx")),
            "My last command failed with this context: zsh: command not found: nmapx. My new request is: scan"
        );
    }

    #[test]
    fn test_summary_messages() {
        assert!(summary_system_prompt("list ports").contains("\"list ports\""));
        assert_eq!(summary_user_message("22/tcp"), "Command Output:\n```\n22/tcp\n```");
    }
}
