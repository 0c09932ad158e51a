use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to list installed packages with {manager}: {reason}")]
    Listing { manager: String, reason: String },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
