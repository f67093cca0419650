use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("Insufficient balance in the provider account. Please top up.")]
    InsufficientBalance,

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("No response content from provider")]
    EmptyResponse,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}
