pub mod catalog;
pub mod discovery;
pub mod error;

pub use catalog::{ToolCatalog, ToolDefinition};
pub use discovery::{discover, CORE_TOOLS};
pub use error::DiscoveryError;
