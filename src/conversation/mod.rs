//! Client-side conversation state for the chat widget.
//!
//! [`Conversation`] is the plain state machine: an append-only message list,
//! the input buffer and the pending flag. [`ConversationStore`] wraps it for
//! async use and owns the round trip to the relay.

pub mod animation;
pub mod message;
pub mod transport;

use log::{ debug, warn };
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::models::chat::{ RelayRequest, RelayResponse };
use animation::AnimationTracker;
use message::{ Message, MessageKind };
use transport::{ RelayTransport, TransportError };

pub const CONNECTION_FALLBACK: &str = "I'm having trouble connecting right now. Please try again.";

#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    input: String,
    pending: bool,
    animations: AnimationTracker,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.pending && !self.input.trim().is_empty()
    }

    /// Starts a turn: appends the user message, clears the input buffer and
    /// enters pending. Returns the full history to send, or `None` when the
    /// text is blank or another turn is still in flight.
    pub fn begin_turn(&mut self, text: &str) -> Option<RelayRequest> {
        let text = text.trim();
        if text.is_empty() || self.pending {
            return None;
        }

        self.append(Message::new(MessageKind::User, text));
        self.input.clear();
        self.pending = true;

        Some(RelayRequest {
            messages: self.messages.iter().map(Message::to_turn).collect(),
        })
    }

    /// [`begin_turn`](Self::begin_turn) on the current input buffer.
    pub fn begin_input(&mut self) -> Option<RelayRequest> {
        let text = std::mem::take(&mut self.input);
        let request = self.begin_turn(&text);
        if request.is_none() {
            self.input = text;
        }
        request
    }

    /// Ends the pending turn with whatever the relay produced.
    pub fn finish_turn(&mut self, outcome: Result<RelayResponse, TransportError>) -> Message {
        let reply = match outcome {
            Ok(envelope) => Message::new(MessageKind::Assistant, envelope.display_text()),
            Err(_) => Message::new(MessageKind::ConnectionError, CONNECTION_FALLBACK),
        };
        self.append(reply.clone());
        self.pending = false;
        reply
    }

    /// Drops every message and the animation bookkeeping. A turn already in
    /// flight is not cancelled; its reply lands in the emptied list.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.animations.clear();
    }

    pub fn is_animating(&self, id: &str) -> bool {
        self.animations.is_animating(id, Instant::now())
    }

    fn append(&mut self, message: Message) {
        self.animations.observe(&message.id, Instant::now());
        self.messages.push(message);
    }
}

/// Shared handle to a [`Conversation`] plus the transport it talks through.
/// The state lock is released while the relay call is awaited.
#[derive(Clone)]
pub struct ConversationStore {
    state: Arc<Mutex<Conversation>>,
    transport: Arc<dyn RelayTransport>,
}

impl ConversationStore {
    pub fn new(transport: Arc<dyn RelayTransport>) -> Self {
        Self {
            state: Arc::new(Mutex::new(Conversation::new())),
            transport,
        }
    }

    /// Runs one full turn. Returns the assistant message, or `None` when the
    /// submission was dropped.
    pub async fn submit(&self, text: &str) -> Option<Message> {
        let request = self.begin_turn(text).await?;
        Some(self.complete_turn(request).await)
    }

    pub async fn submit_input(&self) -> Option<Message> {
        let request = self.begin_input().await?;
        Some(self.complete_turn(request).await)
    }

    pub async fn begin_turn(&self, text: &str) -> Option<RelayRequest> {
        self.state.lock().await.begin_turn(text)
    }

    pub async fn begin_input(&self) -> Option<RelayRequest> {
        self.state.lock().await.begin_input()
    }

    pub async fn complete_turn(&self, request: RelayRequest) -> Message {
        debug!("Sending {} message(s) to the relay", request.messages.len());
        let outcome = self.transport.send(&request).await;
        if let Err(e) = &outcome {
            warn!("Relay call failed: {}", e);
        }
        self.state.lock().await.finish_turn(outcome)
    }

    pub async fn clear(&self) {
        self.state.lock().await.clear();
    }

    pub async fn set_input(&self, text: impl Into<String>) {
        self.state.lock().await.set_input(text);
    }

    pub async fn can_submit(&self) -> bool {
        self.state.lock().await.can_submit()
    }

    pub async fn is_pending(&self) -> bool {
        self.state.lock().await.is_pending()
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.state.lock().await.messages().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use message::Role;

    fn reply(text: &str) -> Result<RelayResponse, TransportError> {
        Ok(RelayResponse::Reply { reply: text.to_string() })
    }

    #[test]
    fn blank_text_is_ignored() {
        let mut conv = Conversation::new();
        assert!(conv.begin_turn("").is_none());
        assert!(conv.begin_turn("   ").is_none());
        assert!(conv.begin_turn("\n\t").is_none());
        assert!(conv.is_empty());
        assert!(!conv.is_pending());
    }

    #[test]
    fn begin_turn_sends_full_history() {
        let mut conv = Conversation::new();
        conv.begin_turn("hi").unwrap();
        conv.finish_turn(reply("hello!"));

        let request = conv.begin_turn("  how are you?  ").unwrap();
        let sent: Vec<(&str, &str)> = request.messages
            .iter()
            .map(|t| (t.role.as_str(), t.content.as_str()))
            .collect();
        assert_eq!(
            sent,
            vec![("user", "hi"), ("assistant", "hello!"), ("user", "how are you?")]
        );
    }

    #[test]
    fn second_submit_while_pending_is_dropped() {
        let mut conv = Conversation::new();
        conv.begin_turn("first").unwrap();
        assert!(conv.is_pending());
        assert!(conv.begin_turn("second").is_none());
        assert_eq!(conv.len(), 1);
    }

    #[test]
    fn error_envelope_becomes_assistant_message() {
        let mut conv = Conversation::new();
        conv.begin_turn("hi").unwrap();
        let msg = conv.finish_turn(
            Ok(RelayResponse::Failure { error: "Internal Server Error".into(), details: "bad".into() })
        );
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "Error: bad");
        assert!(!conv.is_pending());
    }

    #[test]
    fn transport_failure_uses_fallback() {
        let mut conv = Conversation::new();
        conv.begin_turn("hi").unwrap();
        let err = serde_json::from_str::<RelayResponse>("not json").unwrap_err();
        let msg = conv.finish_turn(Err(TransportError::Malformed(err)));
        assert_eq!(msg.content, CONNECTION_FALLBACK);
        assert!(msg.id.starts_with("error-"));
        assert!(!conv.is_pending());
    }

    #[test]
    fn input_buffer_is_cleared_on_submit() {
        let mut conv = Conversation::new();
        conv.set_input("   ");
        assert!(!conv.can_submit());

        conv.set_input("hello");
        assert!(conv.can_submit());

        let text = conv.input().to_string();
        conv.begin_turn(&text).unwrap();
        assert_eq!(conv.input(), "");
        assert!(!conv.can_submit());
    }

    #[test]
    fn begin_input_keeps_buffer_when_rejected() {
        let mut conv = Conversation::new();
        conv.set_input("first");
        assert!(conv.begin_input().is_some());
        assert_eq!(conv.input(), "");

        conv.set_input("second");
        assert!(conv.begin_input().is_none());
        assert_eq!(conv.input(), "second");
        assert_eq!(conv.len(), 1);

        conv.finish_turn(reply("ok"));
        let request = conv.begin_input().unwrap();
        assert_eq!(request.messages.last().unwrap().content, "second");
        assert_eq!(conv.input(), "");
    }

    #[test]
    fn clear_empties_messages_and_animations() {
        let mut conv = Conversation::new();
        conv.begin_turn("hi").unwrap();
        let id = conv.messages()[0].id.clone();
        assert!(conv.is_animating(&id));

        conv.finish_turn(reply("hello!"));
        conv.clear();
        assert!(conv.is_empty());
        assert!(!conv.is_animating(&id));

        conv.clear();
        assert!(conv.is_empty());
    }

    #[test]
    fn clear_during_flight_keeps_pending_until_reply() {
        let mut conv = Conversation::new();
        conv.begin_turn("hi").unwrap();
        conv.clear();
        assert!(conv.is_pending());

        conv.finish_turn(reply("late"));
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages()[0].content, "late");
    }
}
