use std::sync::Arc;
use std::time::{Duration, Instant};

use econbr_cache::{answer_cache_key, AnswerCache};
use econbr_models::config::AgentsConfig;
use econbr_models::AssistantReply;
use econbr_tools::validate::answer_is_presentable;
use tracing::{info, warn};

use crate::agent::AssistantAgent;
use crate::error::AgentError;
use crate::router::Router;

/// Cache key namespace for consolidated answers.
const CACHE_NAMESPACE: &str = "system";

/// A processed query: the reply plus whether it came from the cache.
#[derive(Clone)]
pub struct RoutedAnswer {
    pub reply: Arc<AssistantReply>,
    pub cache_hit: bool,
}

/// Coordinates one query end to end: cache → route → agent → validate →
/// cache → reply.
///
/// Never returns an error: every failure mode degrades into an apology reply
/// so the CLI loop survives anything a query throws at it.
pub struct Orchestrator {
    agents: Vec<Arc<dyn AssistantAgent>>,
    router: Router,
    cache: Arc<AnswerCache>,
    config: AgentsConfig,
}

impl Orchestrator {
    pub fn new(
        agents: Vec<Arc<dyn AssistantAgent>>,
        router: Router,
        cache: Arc<AnswerCache>,
        config: AgentsConfig,
    ) -> Self {
        Self {
            agents,
            router,
            cache,
            config,
        }
    }

    /// The answer cache, exposed for the CLI `cache` commands.
    pub fn cache(&self) -> &Arc<AnswerCache> {
        &self.cache
    }

    pub async fn process(&self, query: &str) -> RoutedAnswer {
        let start = Instant::now();
        let key = answer_cache_key(CACHE_NAMESPACE, query);

        if let Some(reply) = self.cache.get(&key).await {
            info!(%key, "answer served from cache");
            return RoutedAnswer {
                reply,
                cache_hit: true,
            };
        }

        let decision = self.router.route(query).await;
        info!(
            intent = %decision.intent,
            confidence = decision.classification.confidence,
            reason = %decision.reason,
            "query routed"
        );

        let agent = self
            .agents
            .iter()
            .find(|a| a.intent() == decision.intent);

        let timeout = Duration::from_secs(self.config.agent_timeout_seconds);
        let outcome: Result<String, AgentError> = match agent {
            Some(agent) => match tokio::time::timeout(timeout, agent.answer(query)).await {
                Ok(result) => result,
                Err(_) => Err(AgentError::Timeout(self.config.agent_timeout_seconds)),
            },
            None => Err(AgentError::Provider(format!(
                "no agent registered for intent {}",
                decision.intent
            ))),
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        let reply = match outcome {
            Ok(content) if answer_is_presentable(&content) => {
                let reply = AssistantReply::answered(
                    query,
                    decision.intent,
                    content,
                    decision.classification,
                    elapsed_ms,
                );
                self.cache.put(key, reply.clone()).await;
                info!(agent = %decision.intent, elapsed_ms, "query answered");
                reply
            }
            Ok(_) => {
                warn!(agent = %decision.intent, "answer failed validation, not cached");
                AssistantReply::apology(query, decision.intent, decision.classification, elapsed_ms)
            }
            Err(e) => {
                warn!(agent = %decision.intent, error = %e, elapsed_ms, "agent failed");
                AssistantReply::apology(query, decision.intent, decision.classification, elapsed_ms)
            }
        };

        RoutedAnswer {
            reply: Arc::new(reply),
            cache_hit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockAgent;
    use econbr_models::Intent;

    fn orchestrator_with(
        agents: Vec<Arc<dyn AssistantAgent>>,
        cache_ttl: Duration,
    ) -> Orchestrator {
        Orchestrator::new(
            agents,
            Router::new(),
            Arc::new(AnswerCache::new(100, cache_ttl)),
            AgentsConfig::default(),
        )
    }

    #[tokio::test]
    async fn routes_to_the_matching_agent() {
        let research = Arc::new(MockAgent::new(
            "research_agent",
            Intent::Research,
            "O PIB foi de R$ 10,9 trilhões.",
        ));
        let weather = Arc::new(MockAgent::new(
            "weather_agent",
            Intent::Weather,
            "28°C em Recife.",
        ));
        let orchestrator = orchestrator_with(
            vec![
                research.clone() as Arc<dyn AssistantAgent>,
                weather.clone() as Arc<dyn AssistantAgent>,
            ],
            Duration::from_secs(60),
        );

        let answer = orchestrator.process("Como está o clima em Recife?").await;

        assert_eq!(answer.reply.agent, Intent::Weather);
        assert_eq!(answer.reply.content, "28°C em Recife.");
        assert!(answer.reply.success);
        assert!(!answer.cache_hit);
        assert_eq!(weather.call_count(), 1);
        assert_eq!(research.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_agent_degrades_to_apology() {
        // Only a research agent registered; weather queries have nowhere to go.
        let research = Arc::new(MockAgent::new("research_agent", Intent::Research, "ok"));
        let orchestrator = orchestrator_with(
            vec![research as Arc<dyn AssistantAgent>],
            Duration::from_secs(60),
        );

        let answer = orchestrator.process("clima em Manaus").await;
        assert!(!answer.reply.success);
    }

    #[tokio::test]
    async fn failed_agent_is_an_apology_and_not_cached() {
        let failing = Arc::new(MockAgent::failing("research_agent", Intent::Research));
        let orchestrator = orchestrator_with(
            vec![failing.clone() as Arc<dyn AssistantAgent>],
            Duration::from_secs(60),
        );

        let first = orchestrator.process("PIB do Brasil").await;
        assert!(!first.reply.success);
        assert!(first.reply.content.contains("Não foi possível"));

        // A second identical query hits the agent again: nothing was cached.
        let second = orchestrator.process("PIB do Brasil").await;
        assert!(!second.cache_hit);
        assert_eq!(failing.call_count(), 2);
    }

    #[tokio::test]
    async fn unpresentable_answer_is_not_cached() {
        let placeholder = Arc::new(MockAgent::new(
            "research_agent",
            Intent::Research,
            "Resposta não disponível",
        ));
        let orchestrator = orchestrator_with(
            vec![placeholder.clone() as Arc<dyn AssistantAgent>],
            Duration::from_secs(60),
        );

        let answer = orchestrator.process("PIB do Brasil").await;
        assert!(!answer.reply.success);

        orchestrator.process("PIB do Brasil").await;
        assert_eq!(placeholder.call_count(), 2);
    }
}
