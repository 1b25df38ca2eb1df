//! Ad-hoc agent-to-agent messaging with a bounded history.

use crate::a2a::{
    domain::{A2aMessage, A2aMessageRequest, AgentId},
    ports::{AgentClient, AgentClientError, AgentDirectory, DirectoryLookupError},
};
use mockable::Clock;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

/// Messaging limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessengerConfig {
    /// Number of messages retained; the oldest are evicted first.
    pub history_capacity: usize,
    /// Deadline for one `POST /a2a/message` call.
    pub message_timeout: Duration,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            history_capacity: 100,
            message_timeout: Duration::from_secs(30),
        }
    }
}

/// Errors returned when a message cannot be exchanged.
#[derive(Debug, Clone, Error)]
pub enum MessagingError {
    /// The message body is blank.
    #[error("message content must not be empty")]
    EmptyContent,

    /// The sender and recipient are the same agent.
    #[error("agent {0} cannot message itself")]
    SelfAddressed(AgentId),

    /// The recipient could not be resolved.
    #[error(transparent)]
    Lookup(#[from] DirectoryLookupError),

    /// The message could not be delivered.
    #[error(transparent)]
    Delivery(#[from] AgentClientError),

    /// The recipient answered with an error status.
    #[error("agent {agent} rejected the message: {reason}")]
    Rejected {
        /// Recipient.
        agent: AgentId,
        /// Reply text returned by the recipient.
        reason: String,
    },
}

/// Sends messages between registered agents and keeps the recent exchange.
pub struct A2aMessenger<D, A, C>
where
    D: AgentDirectory,
    A: AgentClient,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    client: Arc<A>,
    clock: Arc<C>,
    config: MessengerConfig,
    history: Mutex<VecDeque<A2aMessage>>,
}

impl<D, A, C> A2aMessenger<D, A, C>
where
    D: AgentDirectory,
    A: AgentClient,
    C: Clock + Send + Sync,
{
    /// Creates a messenger.
    #[must_use]
    pub fn new(directory: Arc<D>, client: Arc<A>, clock: Arc<C>, config: MessengerConfig) -> Self {
        Self {
            directory,
            client,
            clock,
            config,
            history: Mutex::new(VecDeque::new()),
        }
    }

    /// Sends `content` from one agent to another and returns the reply.
    ///
    /// The request is recorded in the history even when delivery fails; the
    /// reply is recorded only on success.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError`] when the content is blank, the recipient
    /// cannot be resolved or reached, or the recipient reports an error.
    pub async fn send(
        &self,
        from: &AgentId,
        to: &AgentId,
        content: &str,
    ) -> Result<A2aMessage, MessagingError> {
        let body = content.trim();
        if body.is_empty() {
            return Err(MessagingError::EmptyContent);
        }
        if from == to {
            return Err(MessagingError::SelfAddressed(from.clone()));
        }

        let endpoint = self.directory.resolve(to).await?;
        let request = A2aMessage::request(from.clone(), to.clone(), body, self.clock.as_ref());
        self.record(request.clone());

        tracing::debug!(from_agent = %from, to_agent = %to, "sending A2A message");
        let wire = A2aMessageRequest::new(from.as_str(), body);
        let reply = self
            .client
            .send_message(&endpoint, &wire, self.config.message_timeout)
            .await
            .inspect_err(|err| {
                tracing::warn!(from_agent = %from, to_agent = %to, error = %err, "A2A message failed");
            })?;

        if !reply.status.is_success() {
            return Err(MessagingError::Rejected {
                agent: to.clone(),
                reason: reply.response,
            });
        }

        let response = A2aMessage::reply_to(&request, reply.response, self.clock.as_ref());
        self.record(response.clone());
        Ok(response)
    }

    /// Returns the retained messages, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<A2aMessage> {
        self.history
            .lock()
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns the retained messages exchanged between two agents.
    #[must_use]
    pub fn conversation(&self, first: &AgentId, second: &AgentId) -> Vec<A2aMessage> {
        self.history()
            .into_iter()
            .filter(|message| {
                let (from, to) = (message.from_agent_id(), message.to_agent_id());
                (from == first && to == second) || (from == second && to == first)
            })
            .collect()
    }

    fn record(&self, message: A2aMessage) {
        let Ok(mut history) = self.history.lock() else {
            return;
        };
        if self.config.history_capacity == 0 {
            return;
        }
        while history.len() >= self.config.history_capacity {
            history.pop_front();
        }
        history.push_back(message);
    }
}
