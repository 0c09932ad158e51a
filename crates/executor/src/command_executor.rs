use async_trait::async_trait;
use hacker_agent_core::{ExecutionOutcome, HostExecutor};
use std::process::{Output, Stdio};
use tokio::process::Command;

pub const DEFAULT_SHELL: &str = "/bin/sh";

const COMMAND_NOT_FOUND_EXIT: i32 = 127;

/// Runs command lines through `<shell> -c`. No timeout is applied.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: String,
}

impl ShellExecutor {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    /// Trimmed stdout on exit status zero, otherwise a failure message.
    ///
    /// A missing binary always yields text containing `command not found`.
    pub async fn run(&self, command: &str) -> ExecutionOutcome {
        tracing::info!("Executing command: {}", command);

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                ExecutionOutcome::success(stdout.trim())
            }
            Ok(output) => {
                let message = describe_failure(command, &output);
                tracing::debug!("Command failed: {}", message);
                ExecutionOutcome::failure(message)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                ExecutionOutcome::failure(format!("command not found: {}", self.shell))
            }
            Err(e) => ExecutionOutcome::failure(format!(
                "Failed to start {} for {:?}: {}",
                self.shell, command, e
            )),
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

#[async_trait]
impl HostExecutor for ShellExecutor {
    async fn execute(&self, command: &str) -> ExecutionOutcome {
        self.run(command).await
    }
}

fn describe_failure(command: &str, output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let exit = match output.status.code() {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    };

    let mut message = String::new();
    if output.status.code() == Some(COMMAND_NOT_FOUND_EXIT) {
        // The shell's own stderr names the missing program.
        message.push_str("command not found (exit code 127)\n");
    }
    message.push_str(&format!(
        "Command failed: {}\nExit code: {}\nStdout: {}\nStderr: {}",
        command,
        exit,
        stdout.trim(),
        stderr.trim()
    ));
    message
}
