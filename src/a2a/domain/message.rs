//! Ad-hoc agent-to-agent message record.

use super::{AgentId, MessageId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an ad-hoc message exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Message initiated by the sending agent.
    Request,
    /// Reply produced by the receiving agent.
    Response,
}

impl MessageKind {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Response => "response",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A message exchanged directly between two agents outside any plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct A2aMessage {
    message_id: MessageId,
    from_agent_id: AgentId,
    to_agent_id: AgentId,
    content: String,
    kind: MessageKind,
    sent_at: DateTime<Utc>,
}

impl A2aMessage {
    /// Creates a request message.
    #[must_use]
    pub fn request(
        from_agent_id: AgentId,
        to_agent_id: AgentId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self::new(from_agent_id, to_agent_id, content, MessageKind::Request, clock)
    }

    /// Creates the reply to `request`, addressed back to its sender.
    #[must_use]
    pub fn reply_to(request: &Self, content: impl Into<String>, clock: &impl Clock) -> Self {
        Self::new(
            request.to_agent_id.clone(),
            request.from_agent_id.clone(),
            content,
            MessageKind::Response,
            clock,
        )
    }

    fn new(
        from_agent_id: AgentId,
        to_agent_id: AgentId,
        content: impl Into<String>,
        kind: MessageKind,
        clock: &impl Clock,
    ) -> Self {
        Self {
            message_id: MessageId::new(),
            from_agent_id,
            to_agent_id,
            content: content.into(),
            kind,
            sent_at: clock.utc(),
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn message_id(&self) -> MessageId {
        self.message_id
    }

    /// Returns the sender.
    #[must_use]
    pub const fn from_agent_id(&self) -> &AgentId {
        &self.from_agent_id
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn to_agent_id(&self) -> &AgentId {
        &self.to_agent_id
    }

    /// Returns the message content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the message direction.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns the send timestamp.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }
}
