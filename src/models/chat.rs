use serde::{ Serialize, Deserialize };

/// One `{role, content}` pair as the widget sends it. The relay itself never
/// decodes into this type; it passes `messages` on as raw JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    pub messages: Vec<ChatTurn>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayResponse {
    Failure {
        error: String,
        #[serde(default)]
        details: String,
    },
    Reply {
        reply: String,
    },
}

impl RelayResponse {
    pub fn upstream_failure(details: impl Into<String>) -> Self {
        RelayResponse::Failure {
            error: "Failed to fetch from Hugging Face API".to_string(),
            details: details.into(),
        }
    }

    pub fn internal_failure(details: impl Into<String>) -> Self {
        RelayResponse::Failure {
            error: "Internal Server Error".to_string(),
            details: details.into(),
        }
    }

    /// Text the widget shows for this envelope.
    pub fn display_text(&self) -> String {
        match self {
            RelayResponse::Reply { reply } => reply.clone(),
            RelayResponse::Failure { error, details } => {
                if details.is_empty() {
                    format!("Error: {}", error)
                } else {
                    format!("Error: {}", details)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_prefers_details() {
        let parsed: RelayResponse =
            serde_json::from_str(r#"{"error":"Internal Server Error","details":"bad"}"#).unwrap();
        assert_eq!(parsed.display_text(), "Error: bad");
    }

    #[test]
    fn error_envelope_without_details_falls_back_to_error() {
        let parsed: RelayResponse = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(parsed.display_text(), "Error: boom");

        let parsed: RelayResponse =
            serde_json::from_str(r#"{"error":"boom","details":""}"#).unwrap();
        assert_eq!(parsed.display_text(), "Error: boom");
    }

    #[test]
    fn reply_envelope_serializes_flat() {
        let body = serde_json::to_value(RelayResponse::Reply { reply: "hello!".into() }).unwrap();
        assert_eq!(body, serde_json::json!({ "reply": "hello!" }));
    }

    #[test]
    fn envelope_with_neither_field_is_rejected() {
        assert!(serde_json::from_str::<RelayResponse>(r#"{"status":"ok"}"#).is_err());
    }
}
