use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{LlmError, ModelClient};

/// Deterministic `ModelClient` for tests: replays canned replies in order and
/// records every (system, prompt) pair it receives.
#[derive(Default)]
pub struct StubModel {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(String, String)>>,
    fallback: Option<String>,
}

impl StubModel {
    /// Answers every call with the same reply.
    pub fn replying(reply: &str) -> Self {
        Self {
            fallback: Some(reply.to_string()),
            ..Self::default()
        }
    }

    /// Answers calls with `replies` in order, then fails.
    pub fn sequence(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            ..Self::default()
        }
    }

    /// Fails every call as if the API returned no content.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<(String, String)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ModelClient for StubModel {
    async fn complete_json(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.fallback.clone())
            .ok_or(LlmError::EmptyContent)
    }
}
