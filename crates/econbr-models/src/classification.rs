use serde::{Deserialize, Serialize};

use crate::intent::Intent;

/// Result of analyzing a user query before routing.
///
/// Produced per query by the heuristic classifier, consumed by the router
/// and echoed back in the final reply. Not persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryClassification {
    pub intent: Intent,
    /// 0.0 to 1.0: share of keyword matches belonging to the winning intent.
    pub confidence: f32,
    /// Brazilian locations mentioned in the query.
    pub entities: Vec<String>,
    /// Economic keywords found in the query.
    pub keywords: Vec<String>,
}

impl QueryClassification {
    /// Fallback classification when nothing matches: research, zero confidence.
    pub fn default_research() -> Self {
        Self {
            intent: Intent::Research,
            confidence: 0.0,
            entities: Vec::new(),
            keywords: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_classification() {
        let classification = QueryClassification {
            intent: Intent::Chart,
            confidence: 0.67,
            entities: vec!["São Paulo".to_string()],
            keywords: vec!["pib".to_string()],
        };

        let json = serde_json::to_string(&classification).unwrap();
        let back: QueryClassification = serde_json::from_str(&json).unwrap();
        assert_eq!(classification, back);
    }

    #[test]
    fn default_is_research_with_zero_confidence() {
        let fallback = QueryClassification::default_research();
        assert_eq!(fallback.intent, Intent::Research);
        assert_eq!(fallback.confidence, 0.0);
        assert!(fallback.entities.is_empty());
    }
}
