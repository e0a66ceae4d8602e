//! econbr - assistente multi-agente para economia brasileira
//!
//! A CLI assistant that routes Portuguese questions about Brazilian
//! economics, charts and weather to specialized LLM agents backed by
//! external tools, with a TTL cache in front of the whole pipeline.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use econbr::models::EconbrConfig;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = EconbrConfig::from_env()?;
//! let assistant = econbr::build_assistant(&config)?;
//! let answer = assistant.process("Qual o PIB do Brasil?").await;
//! println!("{}", answer.reply.content);
//! # Ok(())
//! # }
//! ```

pub use econbr_agents as agents;
pub use econbr_cache as cache;
pub use econbr_models as models;
pub use econbr_tools as tools;

pub mod commands;
pub mod presentation;

use std::sync::Arc;
use std::time::Duration;

use econbr_agents::{AssistantAgent, ChatClient, ChatModel, Orchestrator, ReactAgent, Router};
use econbr_cache::AnswerCache;
use econbr_models::{EconbrConfig, Intent};
use econbr_tools::toolset_for;

/// Build the full assistant from configuration: chat client, the three
/// specialist agents with their toolsets, router and answer cache.
pub fn build_assistant(config: &EconbrConfig) -> Result<Orchestrator, anyhow::Error> {
    let http = reqwest::Client::builder().build()?;
    let request_timeout = Duration::from_secs(config.model.request_timeout_seconds);

    let chat: Arc<dyn ChatModel> =
        Arc::new(ChatClient::new(http.clone(), config.model.clone()));

    let agents: Vec<Arc<dyn AssistantAgent>> = Intent::PRIORITY
        .into_iter()
        .map(|intent| {
            let tools = toolset_for(intent, &http, request_timeout);
            Arc::new(ReactAgent::new(
                format!("{intent}_agent"),
                intent,
                Arc::clone(&chat),
                tools,
                config.agents.max_iterations,
            )) as Arc<dyn AssistantAgent>
        })
        .collect();

    let cache = Arc::new(AnswerCache::new(
        config.cache.max_capacity,
        Duration::from_secs(config.cache.ttl_minutes * 60),
    ));

    Ok(Orchestrator::new(
        agents,
        Router::with_chat_fallback(chat),
        cache,
        config.agents.clone(),
    ))
}
