//! Heuristic query classification.
//!
//! Scores the query against per-intent keyword patterns. No LLM pre-call,
//! no network, no latency; always produces a best-effort intent.

use econbr_models::geography::MAJOR_CITIES;
use econbr_models::{Intent, QueryClassification};
use once_cell::sync::Lazy;
use regex::Regex;

/// Keyword patterns per intent, matched case-insensitively against the query.
static INTENT_PATTERNS: Lazy<Vec<(Intent, Vec<Regex>)>> = Lazy::new(|| {
    let compile = |patterns: &[&str]| -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| Regex::new(p).expect("static classifier pattern"))
            .collect()
    };

    vec![
        (
            Intent::Weather,
            compile(&[
                r"\b(clima|tempo|temperatura|chuva|sol|vento)\b",
                r"\b(previsão|meteorol\w*|°c|celsius|fahrenheit)\b",
                r"\b(quente|frio|nublado|ensolarado)\b",
            ]),
        ),
        (
            Intent::Chart,
            compile(&[
                r"\b(gráfico|chart|plotar|visualiz\w*|diagram\w*)\b",
                r"\b(histórico|evolução|tendência|comparar)\b",
                r"\b(linha|barras|pizza|scatter)\b",
            ]),
        ),
        (
            Intent::Research,
            compile(&[
                r"\b(pib|economia|dados|estatística)\b",
                r"\b(município|cidade|estado|região)\b",
                r"\b(ibge|banco\s+central|bcb)\b",
            ]),
        ),
    ]
});

/// Economic keywords surfaced in the classification for display.
const ECONOMIC_KEYWORDS: &[&str] = &[
    "pib",
    "economia",
    "renda",
    "população",
    "desenvolvimento",
    "crescimento",
    "investimento",
    "emprego",
    "inflação",
];

/// Keyword-scoring classifier over the three intents.
pub struct QueryClassifier;

impl QueryClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a query.
    ///
    /// Confidence is the winning intent's share of all pattern matches.
    /// Ties resolve in `Intent::PRIORITY` order; no matches at all defaults
    /// to research with zero confidence.
    pub fn classify(&self, query: &str) -> QueryClassification {
        let lower = query.to_lowercase();

        let mut best = Intent::Research;
        let mut best_score = 0usize;
        let mut total_score = 0usize;

        // INTENT_PATTERNS is already in priority order, so a strict `>`
        // keeps the earlier intent on ties.
        for (intent, patterns) in INTENT_PATTERNS.iter() {
            let score: usize = patterns.iter().map(|p| p.find_iter(&lower).count()).sum();
            total_score += score;
            if score > best_score {
                best_score = score;
                best = *intent;
            }
        }

        let confidence = if total_score == 0 {
            0.0
        } else {
            best_score as f32 / total_score as f32
        };

        QueryClassification {
            intent: if best_score == 0 { Intent::Research } else { best },
            confidence,
            entities: extract_entities(&lower),
            keywords: extract_keywords(&lower),
        }
    }
}

impl Default for QueryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_entities(lower_query: &str) -> Vec<String> {
    MAJOR_CITIES
        .iter()
        .filter(|(needle, _)| lower_query.contains(needle))
        .map(|(_, display)| (*display).to_string())
        .collect()
}

fn extract_keywords(lower_query: &str) -> Vec<String> {
    ECONOMIC_KEYWORDS
        .iter()
        .filter(|k| lower_query.contains(*k))
        .map(|k| (*k).to_string())
        .collect()
}
