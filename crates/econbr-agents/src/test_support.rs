//! Scripted mocks for the chat model, tools and agents.
//!
//! Used by unit tests here and by the scenario suite in `tests/`. Every mock
//! counts its calls so tests can assert that the cache really short-circuits
//! external work.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use econbr_models::Intent;
use econbr_tools::{Tool, ToolError};

use crate::agent::AssistantAgent;
use crate::chat::ChatModel;
use crate::error::AgentError;

/// Chat model that replays a fixed sequence of turns.
pub struct MockChatModel {
    responses: Mutex<Vec<String>>,
    repeat: Option<String>,
    requests: Mutex<Vec<String>>,
    calls: AtomicUsize,
    fail: bool,
}

impl MockChatModel {
    /// Replays `turns` in order; panics if asked for more.
    pub fn scripted(turns: &[&str]) -> Self {
        Self {
            responses: Mutex::new(turns.iter().rev().map(|t| t.to_string()).collect()),
            repeat: None,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// Returns the same turn forever.
    pub fn repeating(turn: &str) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            repeat: Some(turn.to_string()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// Fails every call with a provider error.
    pub fn failing() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            repeat: None,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The user payload of every request received, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(&self, _system: &str, user: &str) -> Result<String, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(user.to_string());

        if self.fail {
            return Err(AgentError::Provider("mock provider failure".to_string()));
        }
        if let Some(turn) = &self.repeat {
            return Ok(turn.clone());
        }
        self.responses
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| AgentError::Provider("mock script exhausted".to_string()))
    }
}

/// Tool that returns a canned observation.
pub struct MockTool {
    name: String,
    response: String,
    last_input: Mutex<Option<String>>,
    calls: AtomicUsize,
    fail: bool,
}

impl MockTool {
    pub fn new(name: &str, response: &str) -> Self {
        Self {
            name: name.to_string(),
            response: response.to_string(),
            last_input: Mutex::new(None),
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing(name: &str) -> Self {
        let mut tool = Self::new(name, "");
        tool.fail = true;
        tool
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<String> {
        self.last_input.lock().unwrap().clone()
    }
}

#[async_trait]
impl Tool for MockTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "mock tool"
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(input.to_string());

        if self.fail {
            return Err(ToolError::InvalidResponse("mock tool failure".to_string()));
        }
        Ok(self.response.clone())
    }
}

/// Agent that returns a canned answer without touching any model.
pub struct MockAgent {
    name: String,
    intent: Intent,
    answer: String,
    calls: AtomicUsize,
    fail: bool,
}

impl MockAgent {
    pub fn new(name: &str, intent: Intent, answer: &str) -> Self {
        Self {
            name: name.to_string(),
            intent,
            answer: answer.to_string(),
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    pub fn failing(name: &str, intent: Intent) -> Self {
        let mut agent = Self::new(name, intent, "");
        agent.fail = true;
        agent
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssistantAgent for MockAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn intent(&self) -> Intent {
        self.intent
    }

    async fn answer(&self, _query: &str) -> Result<String, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AgentError::Provider("mock agent failure".to_string()));
        }
        Ok(self.answer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_model_replays_in_order() {
        let chat = MockChatModel::scripted(&["primeiro", "segundo"]);
        assert_eq!(chat.complete("s", "a").await.unwrap(), "primeiro");
        assert_eq!(chat.complete("s", "b").await.unwrap(), "segundo");
        assert_eq!(chat.call_count(), 2);
        assert_eq!(chat.requests(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn exhausted_script_is_a_provider_error() {
        let chat = MockChatModel::scripted(&[]);
        assert!(chat.complete("s", "u").await.is_err());
    }

    #[tokio::test]
    async fn mock_agent_counts_calls() {
        let agent = MockAgent::new("research_agent", Intent::Research, "resposta");
        agent.answer("q").await.unwrap();
        agent.answer("q").await.unwrap();
        assert_eq!(agent.call_count(), 2);
    }
}
