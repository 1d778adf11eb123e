use chrono::{ DateTime, Local };
use std::fmt;
use uuid::Uuid;

use crate::models::chat::ChatTurn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Label shown next to a message bubble.
    pub fn speaker(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "AI",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which path produced a message; only used to prefix its id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    User,
    Assistant,
    ConnectionError,
}

impl MessageKind {
    fn prefix(&self) -> &'static str {
        match self {
            MessageKind::User => "user",
            MessageKind::Assistant => "assistant",
            MessageKind::ConnectionError => "error",
        }
    }

    fn role(&self) -> Role {
        match self {
            MessageKind::User => Role::User,
            MessageKind::Assistant | MessageKind::ConnectionError => Role::Assistant,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id: format!("{}-{}", kind.prefix(), Uuid::new_v4()),
            role: kind.role(),
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    /// The `{role, content}` projection sent to the relay.
    pub fn to_turn(&self) -> ChatTurn {
        ChatTurn {
            role: self.role.as_str().to_string(),
            content: self.content.clone(),
        }
    }
}

pub fn format_time(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ids_carry_kind_prefix_and_are_unique() {
        let a = Message::new(MessageKind::User, "hi");
        let b = Message::new(MessageKind::User, "hi");
        let c = Message::new(MessageKind::ConnectionError, "oops");

        assert!(a.id.starts_with("user-"));
        assert!(c.id.starts_with("error-"));
        assert_ne!(a.id, b.id);
        assert_eq!(c.role, Role::Assistant);
    }

    #[test]
    fn projection_strips_id_and_timestamp() {
        let msg = Message::new(MessageKind::Assistant, "hello!");
        let turn = msg.to_turn();
        assert_eq!(turn, ChatTurn { role: "assistant".into(), content: "hello!".into() });
    }

    #[test]
    fn time_is_hours_and_minutes() {
        let ts = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 42).unwrap();
        assert_eq!(format_time(&ts), "07:05");
    }
}
