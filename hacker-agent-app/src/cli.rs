use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hacker-agent")]
#[command(version)]
#[command(about = "Turns natural-language requests into shell commands, runs them and retries on failure")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding settings, LLM profiles and the installed-tool list
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Attempts per request before giving up
    #[arg(long, global = true)]
    pub max_retries: Option<usize>,

    /// Name of the LLM profile to use
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Debug logging for the agent crates
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Manage stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Handle a single request and exit
    Run {
        #[arg(required = true, trailing_var_arg = true)]
        request: Vec<String>,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Write settings.yaml with the effective settings if it does not exist
    Init,
    /// Delete all stored LLM profiles
    Reset,
    /// Print settings and LLM profiles
    Show,
}
