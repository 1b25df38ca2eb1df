//! In-memory integration tests for ad-hoc agent-to-agent messaging.

use super::helpers::{
    agent_id, discover, endpoint, math_agent, mount, network, orchestrator, writer_agent,
};
use baton::a2a::{
    adapters::InMemoryAgentNetwork,
    domain::{A2aMessage, MessageKind},
    ports::DirectoryLookupError,
    services::{MessagingError, MessengerConfig},
};
use baton::inference::adapters::ScriptedInference;
use baton::orchestration::OrchestratorConfig;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn peers_exchange_messages_through_the_registry(network: InMemoryAgentNetwork) {
    mount(&network, math_agent());
    let writer = mount(&network, writer_agent());
    let baton = orchestrator(&network, &ScriptedInference::new(), OrchestratorConfig::default());
    discover(&baton, &["math-agent", "writer-agent"]).await;
    let (math_id, writer_id) = (agent_id("math-agent"), agent_id("writer-agent"));

    let reply = baton
        .messenger()
        .send(&math_id, &writer_id, "Explain why 15 * 23 = 345")
        .await
        .expect("message should be delivered");

    assert_eq!(reply.kind(), MessageKind::Response);
    assert_eq!(reply.to_agent_id(), &math_id);
    assert!(reply.content().contains("[message from agent math-agent]"));

    let history = baton.messenger().history();
    let kinds: Vec<MessageKind> = history.iter().map(A2aMessage::kind).collect();
    assert_eq!(kinds, vec![MessageKind::Request, MessageKind::Response]);

    let inbox = writer.inbox();
    assert_eq!(inbox.len(), 2);
    assert!(inbox.iter().any(|message| message.from_agent_id() == &math_id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_recipient_is_rejected(network: InMemoryAgentNetwork) {
    mount(&network, math_agent());
    let baton = orchestrator(&network, &ScriptedInference::new(), OrchestratorConfig::default());
    discover(&baton, &["math-agent"]).await;

    let result = baton
        .messenger()
        .send(&agent_id("math-agent"), &agent_id("ghost-agent"), "hello")
        .await;

    assert!(matches!(
        result,
        Err(MessagingError::Lookup(DirectoryLookupError::NotFound(_)))
    ));
    assert!(baton.messenger().history().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn undeliverable_request_stays_in_history(network: InMemoryAgentNetwork) {
    mount(&network, math_agent());
    mount(&network, writer_agent());
    let baton = orchestrator(&network, &ScriptedInference::new(), OrchestratorConfig::default());
    discover(&baton, &["math-agent", "writer-agent"]).await;
    network
        .set_http_error(&endpoint("writer-agent"), 502)
        .expect("inject fault");

    let result = baton
        .messenger()
        .send(&agent_id("math-agent"), &agent_id("writer-agent"), "ping")
        .await;

    assert!(matches!(result, Err(MessagingError::Delivery(_))));
    let history = baton.messenger().history();
    assert_eq!(history.len(), 1);
    assert_eq!(
        history.first().map(A2aMessage::kind),
        Some(MessageKind::Request)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_keeps_only_the_newest_messages(network: InMemoryAgentNetwork) {
    mount(&network, math_agent());
    mount(&network, writer_agent());
    let config = OrchestratorConfig {
        messenger: MessengerConfig {
            history_capacity: 3,
            ..MessengerConfig::default()
        },
        ..OrchestratorConfig::default()
    };
    let baton = orchestrator(&network, &ScriptedInference::new(), config);
    discover(&baton, &["math-agent", "writer-agent"]).await;
    let (math_id, writer_id) = (agent_id("math-agent"), agent_id("writer-agent"));

    for content in ["first", "second"] {
        baton
            .messenger()
            .send(&math_id, &writer_id, content)
            .await
            .expect("message should be delivered");
    }

    let history = baton.messenger().history();
    assert_eq!(history.len(), 3);
    let oldest = history.first().expect("oldest retained message");
    assert_eq!(oldest.kind(), MessageKind::Response);
}
