use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classification::QueryClassification;
use crate::intent::Intent;

/// The consolidated answer produced for one user query.
///
/// This is what gets cached and what the CLI renders. Immutable once built;
/// a cache hit hands back the stored reply unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantReply {
    pub id: Uuid,
    pub query: String,
    /// Which agent produced the answer.
    pub agent: Intent,
    pub content: String,
    pub analysis: QueryClassification,
    /// False for the apology reply substituted on agent failure.
    pub success: bool,
    pub processing_time_ms: u64,
    pub answered_at: DateTime<Utc>,
}

impl AssistantReply {
    pub fn answered(
        query: &str,
        agent: Intent,
        content: String,
        analysis: QueryClassification,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.to_string(),
            agent,
            content,
            analysis,
            success: true,
            processing_time_ms,
            answered_at: Utc::now(),
        }
    }

    /// The generic apology substituted when an agent fails or its output
    /// does not pass validation. Never cached.
    pub fn apology(
        query: &str,
        agent: Intent,
        analysis: QueryClassification,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.to_string(),
            agent,
            content: format!(
                "Não foi possível obter os dados para '{query}'. \
                 Tente uma pergunta mais específica ou simples."
            ),
            analysis,
            success: false,
            processing_time_ms,
            answered_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_analysis() -> QueryClassification {
        QueryClassification {
            intent: Intent::Research,
            confidence: 0.8,
            entities: vec!["Brasília".to_string()],
            keywords: vec!["pib".to_string()],
        }
    }

    #[test]
    fn roundtrip_reply() {
        let reply = AssistantReply::answered(
            "Qual o PIB do Brasil?",
            Intent::Research,
            "O PIB do Brasil em 2023 foi de R$ 10,9 trilhões (IBGE).".to_string(),
            sample_analysis(),
            1_200,
        );

        let json = serde_json::to_string(&reply).unwrap();
        let back: AssistantReply = serde_json::from_str(&json).unwrap();
        assert_eq!(reply, back);
        assert!(back.success);
    }

    #[test]
    fn apology_is_marked_unsuccessful() {
        let reply = AssistantReply::apology(
            "PIB de Marte",
            Intent::Research,
            sample_analysis(),
            30_000,
        );

        assert!(!reply.success);
        assert!(reply.content.contains("PIB de Marte"));
        assert!(reply.content.contains("Não foi possível"));
    }
}
