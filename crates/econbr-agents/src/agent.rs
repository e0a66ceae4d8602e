use std::sync::Arc;

use async_trait::async_trait;
use econbr_models::Intent;
use econbr_tools::Tool;
use tracing::{debug, warn};

use crate::chat::ChatModel;
use crate::error::AgentError;
use crate::parser::{parse_react_step, ReactStep};
use crate::prompts::specialist_system_prompt;

/// A specialized agent that can answer one category of query.
/// Mockable for testing the orchestrator without a live model.
#[async_trait]
pub trait AssistantAgent: Send + Sync {
    fn name(&self) -> &str;
    fn intent(&self) -> Intent;

    async fn answer(&self, query: &str) -> Result<String, AgentError>;
}

/// An agent that drives a ReAct loop against the chat model.
///
/// Each round sends the system prompt plus the growing scratchpad, parses the
/// model turn, and either runs the requested tool (feeding the result back as
/// an observation) or returns the final answer. Tool failures and unknown
/// tool names become observations the model can recover from; an unparseable
/// turn is treated as the final answer.
pub struct ReactAgent {
    name: String,
    intent: Intent,
    chat: Arc<dyn ChatModel>,
    tools: Vec<Arc<dyn Tool>>,
    max_iterations: u32,
}

impl ReactAgent {
    pub fn new(
        name: impl Into<String>,
        intent: Intent,
        chat: Arc<dyn ChatModel>,
        tools: Vec<Arc<dyn Tool>>,
        max_iterations: u32,
    ) -> Self {
        Self {
            name: name.into(),
            intent,
            chat,
            tools,
            max_iterations,
        }
    }

    fn system_prompt(&self) -> String {
        let tools_block = self
            .tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n");
        let tool_names = self
            .tools
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ");
        specialist_system_prompt(self.intent, &tools_block, &tool_names)
    }

    async fn observe(&self, tool_name: &str, input: &str) -> String {
        match self.tools.iter().find(|t| t.name() == tool_name) {
            Some(tool) => match tool.invoke(input).await {
                Ok(output) => output,
                Err(e) => {
                    warn!(agent = %self.name, tool = tool_name, error = %e, "tool failed");
                    format!("Erro na ferramenta {tool_name}: {e}. Tente outra abordagem.")
                }
            },
            None => {
                let available = self
                    .tools
                    .iter()
                    .map(|t| t.name())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Ferramenta desconhecida '{tool_name}'. Disponíveis: {available}")
            }
        }
    }
}

#[async_trait]
impl AssistantAgent for ReactAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn intent(&self) -> Intent {
        self.intent
    }

    async fn answer(&self, query: &str) -> Result<String, AgentError> {
        let system = self.system_prompt();
        let mut scratchpad = String::new();

        for round in 0..self.max_iterations {
            let user = format!("Question: {query}\nThought:{scratchpad}");
            let turn = self.chat.complete(&system, &user).await?;

            match parse_react_step(&turn) {
                Some(ReactStep::FinalAnswer(answer)) => {
                    debug!(agent = %self.name, round, "final answer");
                    return Ok(answer);
                }
                Some(ReactStep::Action { tool, input }) => {
                    debug!(agent = %self.name, round, tool = %tool, "tool round");
                    let observation = self.observe(&tool, &input).await;
                    scratchpad.push_str(&format!(
                        " {}\nObservation: {}\nThought:",
                        turn.trim(),
                        observation.trim()
                    ));
                }
                None => {
                    // The model dropped out of the format; take the text as
                    // the answer rather than failing the query.
                    debug!(agent = %self.name, round, "unstructured turn taken as answer");
                    return Ok(turn.trim().to_string());
                }
            }
        }

        Err(AgentError::IterationLimit(self.max_iterations))
    }
}
