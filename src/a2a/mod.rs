//! Agent-to-agent (A2A) protocol.
//!
//! Every agent serves four JSON routes: `GET /health`, `GET /capabilities`,
//! `POST /execute` and `POST /a2a/message`. The orchestrator side talks to
//! them through [`ports::AgentClient`]; agent processes implement
//! [`ports::AgentHandler`], for example with [`services::AgentRuntime`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
