use serde::{Deserialize, Serialize};

/// The three specialized agents a query can be routed to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Research,
    Chart,
    Weather,
}

impl Intent {
    /// All intents in routing-priority order (ties resolve to the earliest).
    pub const PRIORITY: [Intent; 3] = [Intent::Weather, Intent::Chart, Intent::Research];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Research => "research",
            Intent::Chart => "chart",
            Intent::Weather => "weather",
        }
    }

    /// Parse an intent name as emitted by the router prompt (`ROUTE: weather`).
    pub fn parse(s: &str) -> Option<Intent> {
        match s.trim().to_lowercase().as_str() {
            "research" | "pesquisa" => Some(Intent::Research),
            "chart" | "grafico" | "gráfico" => Some(Intent::Chart),
            "weather" | "clima" => Some(Intent::Weather),
            _ => None,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
