use crate::llm::chat::{ ChatClient, RelayError };
use crate::models::chat::RelayResponse;
use serde_json::Value;
use std::sync::Arc;
use axum::{
    routing::{ get, post },
    Router,
    body::Bytes,
    extract::State,
    response::{ IntoResponse, Response },
    http::StatusCode,
    Json,
};
use tower_http::cors::{ Any, CorsLayer };
use log::{ info, error, debug };

pub const NO_RESPONSE: &str = "No response generated.";

#[derive(Clone)]
pub struct AppState {
    pub chat_client: Arc<dyn ChatClient>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// The body is taken raw so a malformed payload lands in the same 500 envelope
// as every other failure instead of axum's extractor rejection. `messages` is
// passed on as received, whatever its shape.
async fn chat_handler(State(state): State<AppState>, body: Bytes) -> Response {
    debug!("Relay request of {} bytes", body.len());

    let request: Value = match serde_json::from_slice(&body) {
        Ok(Value::Null) => {
            error!("Server error: request body is null");
            return failure(RelayResponse::internal_failure("request body is null"));
        }
        Ok(v) => v,
        Err(e) => {
            error!("Server error: {}", e);
            return failure(RelayResponse::internal_failure(e.to_string()));
        }
    };
    let messages = request.get("messages");

    info!(
        "Relaying {} message(s) to model {}",
        messages.and_then(Value::as_array).map(Vec::len).unwrap_or(0),
        state.chat_client.get_model()
    );

    match state.chat_client.complete(messages).await {
        Ok(completion) => {
            let reply = completion.response
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| NO_RESPONSE.to_string());
            (StatusCode::OK, Json(RelayResponse::Reply { reply })).into_response()
        }
        Err(RelayError::Upstream { status, body }) => {
            error!("Hugging Face API error ({}): {}", status, body);
            failure(RelayResponse::upstream_failure(body))
        }
        Err(e) => {
            error!("Server error: {}", e);
            failure(RelayResponse::internal_failure(e.to_string()))
        }
    }
}

fn failure(envelope: RelayResponse) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
}
