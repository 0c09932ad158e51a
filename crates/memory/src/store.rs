use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid name: {0:?}")]
    InvalidName(String),
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

/// Narrow persistence seam: whole-value load and save.
#[async_trait]
pub trait Persist<T>: Send + Sync {
    /// `None` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<T>, StoreError>;

    async fn save(&self, value: &T) -> Result<(), StoreError>;
}

/// A single JSON document on disk.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the backing file. Returns whether a file existed.
    pub async fn delete(&self) -> Result<bool, StoreError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::info!("Deleted {:?}", self.path);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl<T> Persist<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self) -> Result<Option<T>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // A corrupt file is treated like a missing one.
        match serde_json::from_str(&content) {
            Ok(value) => {
                tracing::debug!("Loaded {:?}", self.path);
                Ok(Some(value))
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable {:?}: {}", self.path, e);
                Ok(None)
            }
        }
    }

    async fn save(&self, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        let content = serde_json::to_string_pretty(value)?;

        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &self.path).await?;

        tracing::debug!("Saved {:?}", self.path);
        Ok(())
    }
}

/// In-process backend, for tests and ephemeral sessions.
pub struct MemoryStore<T> {
    value: RwLock<Option<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            value: RwLock::new(None),
        }
    }

    pub fn with_value(value: T) -> Self {
        Self {
            value: RwLock::new(Some(value)),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Persist<T> for MemoryStore<T>
where
    T: Clone + Send + Sync,
{
    async fn load(&self) -> Result<Option<T>, StoreError> {
        Ok(self.value.read().await.clone())
    }

    async fn save(&self, value: &T) -> Result<(), StoreError> {
        *self.value.write().await = Some(value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_json_store_lifecycle() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store: JsonFileStore<Vec<String>> =
            JsonFileStore::new(temp_dir.path().join("nested/list.json"));

        assert!(store.load().await.unwrap().is_none());

        store.save(&vec!["nmap".to_string()]).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(vec!["nmap".to_string()]));
        assert!(!temp_dir.path().join("nested/list.tmp").exists());

        assert!(store.delete().await.unwrap());
        assert!(!store.delete().await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_as_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store: JsonFileStore<Vec<String>> = JsonFileStore::new(&path);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::with_value(3u32);
        assert_eq!(store.load().await.unwrap(), Some(3));
        store.save(&4).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(4));
    }
}
