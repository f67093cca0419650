use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AiError;

// =============================================================================
// Message Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// =============================================================================
// CompletionAgent Trait
// =============================================================================

/// Anything that turns a single prompt into free text.
#[async_trait]
pub trait CompletionAgent: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;
}
