use hacker_agent_memory::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Unsupported operating system: {0}")]
    UnsupportedOs(String),
    #[error("Invalid package name: {0:?}")]
    InvalidPackage(String),
    #[error("{0}")]
    CommandFailed(String),
    #[error("Registry error: {0}")]
    Store(#[from] StoreError),
}
