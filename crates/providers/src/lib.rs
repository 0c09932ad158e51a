pub mod generator;
pub mod openai_compatible;
pub mod prompt;
pub mod summarizer;
pub mod traits;

pub use generator::{parse_reply, LlmCommandGenerator};
pub use openai_compatible::{OpenAICompatibleProvider, DEFAULT_TIMEOUT_SECS};
pub use summarizer::LlmSummarizer;
pub use traits::{GenerationParams, LLMProvider, Message, ProviderError};
