use std::sync::Arc;

use econbr_models::{Intent, QueryClassification};
use tracing::{debug, warn};

use crate::chat::ChatModel;
use crate::classifier::QueryClassifier;
use crate::parser::parse_route;
use crate::prompts::router_system_prompt;

/// Below this heuristic confidence the router consults the LLM, when one is
/// attached.
const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.35;

/// How a query was routed, with the supporting classification.
#[derive(Debug, Clone)]
pub struct RoutingDecision {
    pub intent: Intent,
    pub classification: QueryClassification,
    /// True when the LLM router prompt decided, not the heuristics.
    pub consulted_model: bool,
    pub reason: String,
}

/// Selects the agent for a query: keyword heuristics first, the router
/// prompt as a fallback for low-confidence queries.
pub struct Router {
    classifier: QueryClassifier,
    chat: Option<Arc<dyn ChatModel>>,
    confidence_threshold: f32,
}

impl Router {
    /// Heuristic-only router.
    pub fn new() -> Self {
        Self {
            classifier: QueryClassifier::new(),
            chat: None,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }

    /// Router that consults `chat` when the heuristics are unsure.
    pub fn with_chat_fallback(chat: Arc<dyn ChatModel>) -> Self {
        Self {
            chat: Some(chat),
            ..Self::new()
        }
    }

    pub fn with_threshold(mut self, confidence_threshold: f32) -> Self {
        self.confidence_threshold = confidence_threshold;
        self
    }

    pub async fn route(&self, query: &str) -> RoutingDecision {
        let classification = self.classifier.classify(query);

        let confident = classification.confidence >= self.confidence_threshold;
        let chat = match &self.chat {
            Some(chat) if !confident => chat,
            _ => {
                debug!(
                    intent = %classification.intent,
                    confidence = classification.confidence,
                    "heuristic routing"
                );
                return RoutingDecision {
                    intent: classification.intent,
                    reason: "palavras-chave".to_string(),
                    consulted_model: false,
                    classification,
                };
            }
        };

        // Low confidence: ask the model, keep the heuristic answer when the
        // call or the directive parse fails.
        match chat.complete(router_system_prompt(), query).await {
            Ok(turn) => match parse_route(&turn) {
                Some(intent) => {
                    debug!(%intent, "model routing");
                    let mut classification = classification;
                    classification.intent = intent;
                    RoutingDecision {
                        intent,
                        classification,
                        consulted_model: true,
                        reason: "diretiva do modelo".to_string(),
                    }
                }
                None => {
                    warn!("router turn had no ROUTE directive, keeping heuristic");
                    RoutingDecision {
                        intent: classification.intent,
                        reason: "palavras-chave (diretiva ilegível)".to_string(),
                        consulted_model: true,
                        classification,
                    }
                }
            },
            Err(e) => {
                warn!(error = %e, "router call failed, keeping heuristic");
                RoutingDecision {
                    intent: classification.intent,
                    reason: "palavras-chave (roteador indisponível)".to_string(),
                    consulted_model: false,
                    classification,
                }
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
