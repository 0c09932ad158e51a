use crate::store::{JsonFileStore, Persist, StoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Connection details for one OpenAI-compatible endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmProfile {
    pub name: String,
    /// API base URL, e.g. `http://localhost:11434/v1`.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model_name: String,
}

impl LlmProfile {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        api_key: Option<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model_name: model_name.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn masked_api_key(&self) -> String {
        match &self.api_key {
            None => "(none)".to_string(),
            Some(key) if key.chars().count() <= 8 => "****".to_string(),
            Some(key) => {
                let tail: String = key
                    .chars()
                    .rev()
                    .take(4)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("****{}", tail)
            }
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::InvalidProfile("name cannot be empty".to_string()));
        }
        if self.model_name.trim().is_empty() {
            return Err(StoreError::InvalidProfile(
                "model name cannot be empty".to_string(),
            ));
        }
        let parsed = url::Url::parse(self.base_url())
            .map_err(|e| StoreError::InvalidProfile(format!("bad url {:?}: {}", self.url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StoreError::InvalidProfile(format!(
                "url must be http or https, got {}",
                parsed.scheme()
            )));
        }
        Ok(())
    }
}

/// Saved LLM profiles, kept in the order they were added.
pub struct ProfileStore {
    profiles: RwLock<Vec<LlmProfile>>,
    backend: Arc<dyn Persist<Vec<LlmProfile>>>,
}

impl ProfileStore {
    pub async fn open(backend: Arc<dyn Persist<Vec<LlmProfile>>>) -> Result<Self, StoreError> {
        let profiles = backend.load().await?.unwrap_or_default();
        tracing::info!("Loaded {} LLM profile(s)", profiles.len());
        Ok(Self {
            profiles: RwLock::new(profiles),
            backend,
        })
    }

    pub async fn open_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let backend: Arc<dyn Persist<Vec<LlmProfile>>> = Arc::new(JsonFileStore::new(path));
        Self::open(backend).await
    }

    pub async fn list(&self) -> Vec<LlmProfile> {
        self.profiles.read().await.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }

    pub async fn find(&self, name: &str) -> Option<LlmProfile> {
        self.profiles
            .read()
            .await
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Add a profile, replacing any existing one with the same name.
    pub async fn add(&self, profile: LlmProfile) -> Result<(), StoreError> {
        profile.validate()?;
        let mut profiles = self.profiles.write().await;

        let mut updated: Vec<LlmProfile> = profiles
            .iter()
            .filter(|p| !p.name.eq_ignore_ascii_case(&profile.name))
            .cloned()
            .collect();
        tracing::info!("Saving LLM profile: {}", profile.name);
        updated.push(profile);

        self.backend.save(&updated).await?;
        *profiles = updated;
        Ok(())
    }

    pub async fn remove(&self, name: &str) -> Result<bool, StoreError> {
        let mut profiles = self.profiles.write().await;
        let updated: Vec<LlmProfile> = profiles
            .iter()
            .filter(|p| !p.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect();
        if updated.len() == profiles.len() {
            return Ok(false);
        }

        self.backend.save(&updated).await?;
        *profiles = updated;
        Ok(true)
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        self.backend.save(&Vec::new()).await?;
        profiles.clear();
        Ok(())
    }
}
