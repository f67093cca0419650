//! Chat-completion client for OpenAI-compatible providers.

pub mod error;
pub mod openai;
pub mod traits;

pub use error::AiError;
pub use openai::OpenAi;
pub use traits::{CompletionAgent, Message, MessageRole};
