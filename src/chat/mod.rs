pub mod controller;
pub mod simulator;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only conversation history for the session.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("A reply is still pending")]
    Busy,
}

impl Serialize for ChatError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_keeps_creation_order() {
        let mut log = MessageLog::default();
        log.push(Message::new(Role::User, "first"));
        log.push(Message::new(Role::Bot, "second"));

        let texts: Vec<_> = log.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
        assert!(log.messages()[0].timestamp <= log.messages()[1].timestamp);
    }

    #[test]
    fn message_ids_are_unique() {
        let ids: std::collections::HashSet<_> = (0..64)
            .map(|_| Message::new(Role::User, "same text").id)
            .collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn role_serializes_lowercase() {
        let msg = Message::new(Role::Bot, "hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "bot");
        assert_eq!(json["text"], "hi");
    }
}
