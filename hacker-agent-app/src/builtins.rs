//! Commands handled by the REPL itself instead of the model.

const UNINSTALL_PREFIX: &str = "uninstall ";

pub const HELP_TEXT: &str = "\
📖 Available Agent Commands:
  exit                   - Exit the Agent
  list tools             - List tools installed by the Agent
  list all known tools   - List all tools the Agent is aware of on your system
  uninstall <tool_name>  - Uninstall a specific tool installed by the Agent
  uninstall all          - Uninstall all tools installed by the Agent
  stats                  - Show request statistics for this session
  help                   - Display this help message

💡 Anything else is sent to the LLM as a request";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Help,
    ListTools,
    ListAllKnownTools,
    UninstallAll,
    /// The tool name may be empty when the user typed only `uninstall`.
    Uninstall(String),
    Stats,
}

impl Builtin {
    /// Case-insensitive; `None` means the line is a request for the model.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let is = |word: &str| line.eq_ignore_ascii_case(word);

        if is("exit") {
            Some(Self::Exit)
        } else if is("help") {
            Some(Self::Help)
        } else if is("list tools") {
            Some(Self::ListTools)
        } else if is("list all known tools") {
            Some(Self::ListAllKnownTools)
        } else if is("uninstall all") {
            Some(Self::UninstallAll)
        } else if is("stats") {
            Some(Self::Stats)
        } else if is("uninstall") {
            Some(Self::Uninstall(String::new()))
        } else {
            let prefix = line.get(..UNINSTALL_PREFIX.len())?;
            if prefix.eq_ignore_ascii_case(UNINSTALL_PREFIX) {
                let tool = line[UNINSTALL_PREFIX.len()..].trim();
                Some(Self::Uninstall(tool.to_string()))
            } else {
                None
            }
        }
    }
}

pub fn exhaustion_message(attempts: usize) -> String {
    format!(
        "Failed to execute command after {} attempts. Please refine your request or check the environment.",
        attempts
    )
}
