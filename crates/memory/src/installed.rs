use crate::store::{JsonFileStore, Persist, StoreError};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Packages this agent has installed on the host, in install order.
///
/// Reads are shared; `add` and `remove` are idempotent and persist before the
/// in-memory list changes.
pub struct InstalledToolRegistry {
    tools: RwLock<Vec<String>>,
    backend: Arc<dyn Persist<Vec<String>>>,
}

impl InstalledToolRegistry {
    pub async fn open(backend: Arc<dyn Persist<Vec<String>>>) -> Result<Self, StoreError> {
        let tools = backend.load().await?.unwrap_or_default();
        tracing::info!("Installed-tool registry loaded with {} entries", tools.len());
        Ok(Self {
            tools: RwLock::new(tools),
            backend,
        })
    }

    pub async fn open_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let backend: Arc<dyn Persist<Vec<String>>> = Arc::new(JsonFileStore::new(path));
        Self::open(backend).await
    }

    pub async fn list(&self) -> Vec<String> {
        self.tools.read().await.clone()
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.tools.read().await.iter().any(|t| t == name)
    }

    /// Returns `false` when `name` was already recorded.
    pub async fn add(&self, name: &str) -> Result<bool, StoreError> {
        let name = validate_name(name)?;
        let mut tools = self.tools.write().await;
        if tools.iter().any(|t| t == name) {
            return Ok(false);
        }

        let mut updated = tools.clone();
        updated.push(name.to_string());
        self.backend.save(&updated).await?;
        *tools = updated;

        tracing::info!("Recorded installed tool: {}", name);
        Ok(true)
    }

    /// Returns `false` when `name` was not recorded.
    pub async fn remove(&self, name: &str) -> Result<bool, StoreError> {
        let name = validate_name(name)?;
        let mut tools = self.tools.write().await;
        if !tools.iter().any(|t| t == name) {
            return Ok(false);
        }

        let updated: Vec<String> = tools.iter().filter(|t| *t != name).cloned().collect();
        self.backend.save(&updated).await?;
        *tools = updated;

        tracing::info!("Removed installed tool: {}", name);
        Ok(true)
    }
}

fn validate_name(name: &str) -> Result<&str, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}
