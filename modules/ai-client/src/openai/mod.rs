mod client;
pub(crate) mod types;

use async_trait::async_trait;

use crate::error::AiError;
use crate::traits::{CompletionAgent, Message};

use client::OpenAiClient;

const DEEPSEEK_API_URL: &str = "https://api.deepseek.com";
const DEEPSEEK_MODEL: &str = "deepseek-chat";
const DEFAULT_MAX_TOKENS: u32 = 1024;

// =============================================================================
// OpenAi Agent
// =============================================================================

/// Agent for any provider speaking the OpenAI chat-completions protocol.
#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    pub(crate) model: String,
    base_url: String,
    max_tokens: u32,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEEPSEEK_API_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// DeepSeek's hosted `deepseek-chat` model.
    pub fn deepseek(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEEPSEEK_MODEL)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn client(&self) -> OpenAiClient {
        OpenAiClient::new(&self.api_key, &self.base_url)
    }

    /// Send a conversation and return the first choice's content.
    pub async fn chat_completion(&self, messages: Vec<Message>) -> Result<String, AiError> {
        let request = types::ChatRequest::new(&self.model)
            .messages(messages)
            .max_tokens(self.max_tokens);

        self.client()
            .chat(&request)
            .await?
            .into_content()
            .ok_or(AiError::EmptyResponse)
    }
}

// =============================================================================
// CompletionAgent Implementation
// =============================================================================

#[async_trait]
impl CompletionAgent for OpenAi {
    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        self.chat_completion(vec![Message::user(prompt)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_new() {
        let ai = OpenAi::new("sk-test", "deepseek-chat");
        assert_eq!(ai.model, "deepseek-chat");
        assert_eq!(ai.api_key, "sk-test");
        assert_eq!(ai.base_url, "https://api.deepseek.com");
        assert_eq!(ai.max_tokens, 1024);
    }

    #[test]
    fn test_openai_with_base_url() {
        let ai = OpenAi::deepseek("sk-test").with_base_url("https://custom.api.com/v1");
        assert_eq!(ai.base_url, "https://custom.api.com/v1");
        assert_eq!(ai.model(), "deepseek-chat");
    }

    #[test]
    fn test_openai_with_max_tokens() {
        let ai = OpenAi::deepseek("sk-test").with_max_tokens(256);
        assert_eq!(ai.max_tokens, 256);
    }
}
