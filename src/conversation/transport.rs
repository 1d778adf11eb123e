use async_trait::async_trait;
use log::debug;
use reqwest::Client as HttpClient;
use url::Url;

use crate::models::chat::{ RelayRequest, RelayResponse };

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("relay unreachable: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed relay response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid relay url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[async_trait]
pub trait RelayTransport: Send + Sync {
    async fn send(&self, request: &RelayRequest) -> Result<RelayResponse, TransportError>;
}

/// Talks to a relay over HTTP at `<base>/api/chat`.
pub struct HttpRelayTransport {
    http: HttpClient,
    endpoint: Url,
}

impl HttpRelayTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let endpoint = Url::parse(&format!("{}/api/chat", base_url.trim_end_matches('/')))?;
        Ok(Self {
            http: HttpClient::new(),
            endpoint,
        })
    }
}

#[async_trait]
impl RelayTransport for HttpRelayTransport {
    async fn send(&self, request: &RelayRequest) -> Result<RelayResponse, TransportError> {
        let resp = self.http.post(self.endpoint.clone()).json(request).send().await?;

        // A 500 still carries an envelope, so the status is not inspected.
        let status = resp.status();
        let body = resp.text().await?;
        debug!("Relay answered {} with {} bytes", status, body.len());

        Ok(serde_json::from_str(&body)?)
    }
}
