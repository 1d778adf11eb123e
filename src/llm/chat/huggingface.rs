use async_trait::async_trait;
use log::debug;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE } };
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::{ ChatClient, CompletionResponse, RelayError };
use crate::llm::ProviderConfig;

const COMPLETIONS_ROUTE: &str = "/v1/chat/completions";

pub struct HuggingFaceChatClient {
    http: HttpClient,
    api_key: Option<String>,
    model: String,
    endpoint: Url,
}

#[derive(Serialize)]
struct HfRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    messages: Option<&'a Value>,
}

/// `choices[0].message.content` when it is a string; any other shape counts as no reply.
fn first_choice_content(body: &Value) -> Option<String> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

impl HuggingFaceChatClient {
    pub fn new(
        api_key: Option<String>,
        model: String,
        base_url: &str
    ) -> Result<Self, RelayError> {
        let endpoint = Url::parse(
            &format!("{}{}", base_url.trim_end_matches('/'), COMPLETIONS_ROUTE)
        )?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            api_key,
            model,
            endpoint,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, RelayError> {
        Self::new(config.api_key.clone(), config.model.clone(), &config.base_url)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatClient for HuggingFaceChatClient {
    async fn complete(&self, messages: Option<&Value>) -> Result<CompletionResponse, RelayError> {
        // Checked per call: a relay without a credential still starts and answers with an envelope.
        let api_key = self.api_key.as_deref().ok_or(RelayError::MissingCredential)?;

        let req = HfRequest {
            model: &self.model,
            messages,
        };
        debug!(
            "Forwarding {} message(s) to {}",
            messages.and_then(Value::as_array).map(Vec::len).unwrap_or(0),
            self.endpoint
        );

        let resp = self.http
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&req)
            .send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(RelayError::Upstream { status, body });
        }

        let parsed: Value = serde_json::from_str(&body)?;

        Ok(CompletionResponse { response: first_choice_content(&parsed) })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }
}
