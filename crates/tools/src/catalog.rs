use crate::error::DiscoveryError;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub tool_name: String,
    pub description: String,
}

impl ToolDefinition {
    pub fn new(tool_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            description: description.into(),
        }
    }

    pub fn generic(tool_name: &str) -> Self {
        Self::new(
            tool_name,
            format!("A common command-line tool for {}.", tool_name),
        )
    }
}

/// Tools found on the host, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCatalog {
    tools: Vec<ToolDefinition>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces an existing entry with the same name.
    pub fn register(&mut self, tool: ToolDefinition) {
        match self.tools.iter_mut().find(|t| t.tool_name == tool.tool_name) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.tool_name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.tool_name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// JSON array with four-space indentation, embedded in the system prompt.
    pub fn to_prompt_json(&self) -> Result<String, DiscoveryError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.tools.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn from_json(json: &str) -> Result<Self, DiscoveryError> {
        Ok(Self {
            tools: serde_json::from_str(json)?,
        })
    }
}

impl FromIterator<ToolDefinition> for ToolCatalog {
    fn from_iter<I: IntoIterator<Item = ToolDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for tool in iter {
            catalog.register(tool);
        }
        catalog
    }
}
