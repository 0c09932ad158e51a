pub mod bootstrap;
pub mod builtins;
pub mod cli;
pub mod config;
pub mod repl;
