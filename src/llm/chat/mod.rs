pub mod huggingface;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;

use self::huggingface::HuggingFaceChatClient;
use super::ProviderConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// `choices[0].message.content`, when the provider sent one.
    pub response: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The provider answered with a non-success status; `body` is its raw text.
    #[error("provider responded with {status}")]
    Upstream { status: StatusCode, body: String },
    #[error("HF_TOKEN is not configured")]
    MissingCredential,
    #[error("invalid provider endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Forwards the caller's `messages` untouched; `None` means the caller sent none.
    async fn complete(&self, messages: Option<&Value>) -> Result<CompletionResponse, RelayError>;

    fn get_model(&self) -> String;
}

pub fn new_client(config: &ProviderConfig) -> Result<Arc<dyn ChatClient>, RelayError> {
    let client = HuggingFaceChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
