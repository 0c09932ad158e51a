pub mod installed;
pub mod profiles;
pub mod store;

pub use installed::InstalledToolRegistry;
pub use profiles::{LlmProfile, ProfileStore};
pub use store::{JsonFileStore, MemoryStore, Persist, StoreError};
