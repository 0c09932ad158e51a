use anyhow::{Context, Result};
use hacker_agent_core::DEFAULT_MAX_RETRIES;
use hacker_agent_executor::DEFAULT_SHELL;
use hacker_agent_providers::{GenerationParams, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = "./hacker-agent";
pub const DATA_DIR_ENV: &str = "HACKER_AGENT_DATA_DIR";
pub const MAX_RETRIES_ENV: &str = "HACKER_AGENT_MAX_RETRIES";

/// Where the agent keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// CLI flag first, then the environment, then the default.
    pub fn resolve(flag: Option<PathBuf>, env: Option<String>) -> Self {
        let root = flag
            .or_else(|| env.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> PathBuf {
        self.root.join("settings.yaml")
    }

    pub fn profiles(&self) -> PathBuf {
        self.root.join("config.json")
    }

    pub fn installed_tools(&self) -> PathBuf {
        self.root.join("installed_tools.json")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub max_retries: usize,
    pub request_timeout_secs: u64,
    pub shell: String,
    #[serde(deserialize_with = "command_params")]
    pub generation: GenerationParams,
    #[serde(deserialize_with = "summary_params")]
    pub summary: GenerationParams,
}

/// A sampling section where every field is optional. Missing fields keep the
/// defaults of the section they appear in.
#[derive(Debug, Deserialize)]
struct ParamsSection {
    temperature: Option<f32>,
    top_p: Option<f32>,
    max_tokens: Option<u32>,
}

impl ParamsSection {
    fn over(self, base: GenerationParams) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature.unwrap_or(base.temperature),
            top_p: self.top_p.unwrap_or(base.top_p),
            max_tokens: self.max_tokens.unwrap_or(base.max_tokens),
        }
    }
}

fn command_params<'de, D: Deserializer<'de>>(d: D) -> Result<GenerationParams, D::Error> {
    Ok(ParamsSection::deserialize(d)?.over(GenerationParams::command()))
}

fn summary_params<'de, D: Deserializer<'de>>(d: D) -> Result<GenerationParams, D::Error> {
    Ok(ParamsSection::deserialize(d)?.over(GenerationParams::summary()))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            shell: DEFAULT_SHELL.to_string(),
            generation: GenerationParams::command(),
            summary: GenerationParams::summary(),
        }
    }
}

impl Settings {
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(MAX_RETRIES_ENV) {
            self.max_retries = value
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive integer", MAX_RETRIES_ENV))?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            anyhow::bail!("max_retries must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }
        if self.shell.trim().is_empty() {
            anyhow::bail!("shell cannot be empty");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
