//! Scripted inference backend for tests and offline demos.

use crate::inference::ports::{
    GenerationConstraints, InferenceError, InferencePort, InferenceResult,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = Arc<dyn Fn(&str) -> InferenceResult<String> + Send + Sync>;

/// A queued scripted reply.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Answer immediately with the text.
    Text(String),
    /// Answer with the text after a delay.
    Delayed(Duration, String),
    /// Fail with the error.
    Failure(InferenceError),
}

/// In-memory inference backend.
///
/// Queued replies are served first, in order. Once the queue is drained the
/// responder (if any) computes the reply from the prompt; without one the
/// backend reports [`InferenceError::Unavailable`]. Every prompt received is
/// recorded.
#[derive(Clone, Default)]
pub struct ScriptedInference {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Default)]
struct ScriptState {
    queue: VecDeque<ScriptedReply>,
    responder: Option<Responder>,
    prompts: Vec<String>,
}

impl ScriptedInference {
    /// Creates a backend with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend whose replies are computed from each prompt.
    #[must_use]
    pub fn with_responder(
        responder: impl Fn(&str) -> InferenceResult<String> + Send + Sync + 'static,
    ) -> Self {
        let backend = Self::new();
        backend.update(|state| state.responder = Some(Arc::new(responder)));
        backend
    }

    /// Creates a backend that always answers with `text`.
    #[must_use]
    pub fn constant(text: impl Into<String>) -> Self {
        let reply: String = text.into();
        Self::with_responder(move |_| Ok(reply.clone()))
    }

    /// Queues an immediate text reply.
    #[must_use]
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(ScriptedReply::Text(text.into()))
    }

    /// Queues a delayed text reply.
    #[must_use]
    pub fn delayed_reply(self, delay: Duration, text: impl Into<String>) -> Self {
        self.push(ScriptedReply::Delayed(delay, text.into()))
    }

    /// Queues a failure.
    #[must_use]
    pub fn failure(self, error: InferenceError) -> Self {
        self.push(ScriptedReply::Failure(error))
    }

    /// Queues an arbitrary reply.
    #[must_use]
    pub fn push(self, reply: ScriptedReply) -> Self {
        self.update(|state| state.queue.push_back(reply));
        self
    }

    /// Returns every prompt received so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.prompts.clone())
            .unwrap_or_default()
    }

    /// Returns the number of generation calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.lock().map(|state| state.prompts.len()).unwrap_or_default()
    }

    fn update(&self, change: impl FnOnce(&mut ScriptState)) {
        if let Ok(mut state) = self.state.lock() {
            change(&mut state);
        }
    }

    fn next_reply(&self, prompt: &str) -> InferenceResult<ScriptedReply> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| InferenceError::Unavailable(err.to_string()))?;
        state.prompts.push(prompt.to_owned());

        if let Some(reply) = state.queue.pop_front() {
            return Ok(reply);
        }

        let responder = state
            .responder
            .clone()
            .ok_or_else(|| InferenceError::Unavailable("script exhausted".to_owned()))?;
        drop(state);

        Ok(match responder(prompt) {
            Ok(text) => ScriptedReply::Text(text),
            Err(err) => ScriptedReply::Failure(err),
        })
    }
}

#[async_trait]
impl InferencePort for ScriptedInference {
    async fn generate(
        &self,
        prompt: &str,
        _constraints: GenerationConstraints,
    ) -> InferenceResult<String> {
        match self.next_reply(prompt)? {
            ScriptedReply::Text(text) => Ok(text),
            ScriptedReply::Delayed(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            ScriptedReply::Failure(err) => Err(err),
        }
    }
}
