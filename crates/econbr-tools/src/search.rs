use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use crate::error::ToolError;
use crate::tool::Tool;

const DUCKDUCKGO_URL: &str = "https://api.duckduckgo.com/";

/// Search-term expansions applied before hitting the engine. The first
/// matching term wins.
const QUERY_ENHANCEMENTS: &[(&str, &str)] = &[
    ("pib", "PIB Brasil dados oficiais IBGE"),
    ("economia", "economia brasileira dados oficiais"),
    ("município", "município Brasil dados IBGE"),
    ("municipio", "município Brasil dados IBGE"),
    ("cidade", "cidade Brasil economia PIB"),
    ("clima", "clima tempo Brasil INMET"),
    ("temperatura", "temperatura clima Brasil"),
];

/// Restrict results to official sources.
const RELIABLE_SOURCES: &str = "site:ibge.gov.br OR site:bcb.gov.br OR site:gov.br";

/// Web search via the DuckDuckGo instant-answer API.
pub struct WebSearchTool {
    client: reqwest::Client,
    timeout: Duration,
    base_url: String,
}

impl WebSearchTool {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            base_url: DUCKDUCKGO_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Busca na web por informações atualizadas (economia, clima, notícias)"
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let enhanced = enhance_search_query(input);
        debug!(query = %enhanced, "web search");

        let response: InstantAnswer = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", enhanced.as_str()),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let body = response.render();
        if body.is_empty() {
            return Ok(format_search_results(
                "Nenhum resultado direto encontrado. Tente termos mais específicos.",
                input,
            ));
        }
        Ok(format_search_results(&body, input))
    }
}

#[derive(Debug, Deserialize, Default)]
struct InstantAnswer {
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "AbstractSource", default)]
    abstract_source: String,
    #[serde(rename = "Answer", default)]
    answer: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize, Default)]
struct RelatedTopic {
    #[serde(rename = "Text", default)]
    text: String,
    #[serde(rename = "FirstURL", default)]
    first_url: String,
}

impl InstantAnswer {
    /// Abstract first, then direct answer, then up to five related topics.
    fn render(&self) -> String {
        let mut lines = Vec::new();

        if !self.abstract_text.is_empty() {
            if self.abstract_source.is_empty() {
                lines.push(self.abstract_text.clone());
            } else {
                lines.push(format!("{} (fonte: {})", self.abstract_text, self.abstract_source));
            }
        }
        if !self.answer.is_empty() {
            lines.push(self.answer.clone());
        }
        for topic in self.related_topics.iter().filter(|t| !t.text.is_empty()).take(5) {
            if topic.first_url.is_empty() {
                lines.push(format!("• {}", topic.text));
            } else {
                lines.push(format!("• {} ({})", topic.text, topic.first_url));
            }
        }

        lines.join("\n")
    }
}

/// Expand the query with domain terms and pin it to official sources.
pub fn enhance_search_query(query: &str) -> String {
    let query_lower = query.to_lowercase();
    let mut enhanced = query.to_string();

    for (term, enhancement) in QUERY_ENHANCEMENTS {
        if query_lower.contains(term) {
            enhanced = format!("{enhanced} {enhancement}");
            break;
        }
    }

    format!("{enhanced} {RELIABLE_SOURCES}")
}

fn format_search_results(results: &str, original_query: &str) -> String {
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        "🔍 RESULTADOS DA BUSCA - {timestamp}\n\
         Query: {original_query}\n\n\
         {results}\n\n\
         💡 DICA: Verifique sempre a data e fonte das informações encontradas."
    )
}
