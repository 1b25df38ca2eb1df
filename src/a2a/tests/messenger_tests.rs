//! Unit tests for ad-hoc agent messaging.

use crate::a2a::{
    adapters::InMemoryAgentNetwork,
    domain::{
        A2aMessageRequest, A2aReply, AgentEndpoint, AgentId, CapabilityAdvertisement,
        ExecuteRequest, ExecuteResponse, HealthResponse, MessageKind, ResponseStatus,
    },
    ports::{AgentDirectory, AgentHandler, DirectoryLookupError},
    services::{A2aMessenger, MessagingError, MessengerConfig},
};
use crate::test_support::ManualClock;
use async_trait::async_trait;
use mockall::{mock, predicate::eq};
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

mock! {
    Directory {}

    #[async_trait]
    impl AgentDirectory for Directory {
        async fn resolve(&self, id: &AgentId) -> Result<AgentEndpoint, DirectoryLookupError>;
    }
}

/// Replies with a fixed status, echoing the message.
struct Responder {
    status: ResponseStatus,
}

#[async_trait]
impl AgentHandler for Responder {
    async fn health(&self) -> HealthResponse {
        HealthResponse::new("healthy", "responder")
    }

    async fn capabilities(&self) -> CapabilityAdvertisement {
        CapabilityAdvertisement {
            agent_id: None,
            agent_name: "responder".to_owned(),
            capabilities: Vec::new(),
            description: String::new(),
            status: None,
        }
    }

    async fn execute(&self, request: ExecuteRequest) -> ExecuteResponse {
        ExecuteResponse::success(request.input, Vec::new(), Duration::ZERO)
    }

    async fn receive_message(&self, request: A2aMessageRequest) -> A2aReply {
        A2aReply::new(format!("re: {}", request.message), self.status)
    }
}

fn id(value: &str) -> AgentId {
    AgentId::new(value).expect("valid agent id")
}

fn writer_endpoint() -> AgentEndpoint {
    AgentEndpoint::new("http://writer.local").expect("valid endpoint")
}

fn messenger(
    status: ResponseStatus,
    config: MessengerConfig,
) -> A2aMessenger<MockDirectory, InMemoryAgentNetwork, ManualClock> {
    let mut directory = MockDirectory::new();
    directory
        .expect_resolve()
        .with(eq(id("writer-agent")))
        .returning(|_| Ok(writer_endpoint()));
    directory
        .expect_resolve()
        .returning(|unknown| Err(DirectoryLookupError::NotFound(unknown.clone())));

    let network = InMemoryAgentNetwork::new();
    network
        .mount(writer_endpoint(), Arc::new(Responder { status }))
        .expect("mount responder");

    A2aMessenger::new(
        Arc::new(directory),
        Arc::new(network),
        Arc::new(ManualClock::starting()),
        config,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delivered_message_records_request_and_reply() {
    let messenger = messenger(ResponseStatus::Success, MessengerConfig::default());

    let reply = messenger
        .send(&id("math-agent"), &id("writer-agent"), "  is 345 right?  ")
        .await
        .expect("delivered");

    assert_eq!(reply.content(), "re: is 345 right?");
    let history = messenger.history();
    assert_eq!(history.len(), 2);
    let request = history.first().expect("request recorded");
    assert_eq!(request.kind(), MessageKind::Request);
    assert_eq!(request.content(), "is 345 right?");
    assert_eq!(
        messenger
            .conversation(&id("writer-agent"), &id("math-agent"))
            .len(),
        2
    );
}

#[rstest]
#[case("")]
#[case("  \n")]
#[tokio::test(flavor = "multi_thread")]
async fn blank_content_is_rejected(#[case] content: &str) {
    let messenger = messenger(ResponseStatus::Success, MessengerConfig::default());

    let result = messenger
        .send(&id("math-agent"), &id("writer-agent"), content)
        .await;

    assert!(matches!(result, Err(MessagingError::EmptyContent)));
    assert!(messenger.history().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn agent_cannot_message_itself() {
    let messenger = messenger(ResponseStatus::Success, MessengerConfig::default());

    let result = messenger
        .send(&id("writer-agent"), &id("writer-agent"), "hello me")
        .await;

    assert!(matches!(
        result,
        Err(MessagingError::SelfAddressed(agent)) if agent == id("writer-agent")
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unresolved_recipient_is_a_lookup_error() {
    let messenger = messenger(ResponseStatus::Success, MessengerConfig::default());

    let result = messenger
        .send(&id("math-agent"), &id("ghost-agent"), "anyone there?")
        .await;

    assert!(matches!(
        result,
        Err(MessagingError::Lookup(DirectoryLookupError::NotFound(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn error_reply_is_a_rejection_and_only_the_request_is_kept() {
    let messenger = messenger(ResponseStatus::Error, MessengerConfig::default());

    let result = messenger
        .send(&id("math-agent"), &id("writer-agent"), "please fail")
        .await;

    match result {
        Err(MessagingError::Rejected { agent, reason }) => {
            assert_eq!(agent, id("writer-agent"));
            assert_eq!(reason, "re: please fail");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(messenger.history().len(), 1);
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(3, 3)]
#[tokio::test(flavor = "multi_thread")]
async fn history_is_bounded(#[case] capacity: usize, #[case] retained: usize) {
    let config = MessengerConfig {
        history_capacity: capacity,
        ..MessengerConfig::default()
    };
    let messenger = messenger(ResponseStatus::Success, config);

    for content in ["one", "two"] {
        messenger
            .send(&id("math-agent"), &id("writer-agent"), content)
            .await
            .expect("delivered");
    }

    let history = messenger.history();
    assert_eq!(history.len(), retained);
    if let Some(newest) = history.last() {
        assert_eq!(newest.content(), "re: two");
    }
}
