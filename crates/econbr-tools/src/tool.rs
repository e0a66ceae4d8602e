use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use econbr_models::Intent;

use crate::bcb::BcbSeriesTool;
use crate::error::ToolError;
use crate::ibge::IbgeDataTool;
use crate::python::PythonReplTool;
use crate::search::WebSearchTool;
use crate::weather::WeatherTool;

/// A stateless wrapper around an external capability (search, sandbox, API).
///
/// `invoke` takes the agent-supplied input line and returns text the agent
/// reads back as an observation. Mockable for testing.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    /// One-line description shown to the model in the tool roster.
    fn description(&self) -> &str;

    async fn invoke(&self, input: &str) -> Result<String, ToolError>;
}

/// Build the toolset wired to each agent.
///
/// research → web search + IBGE + BCB; chart → Python sandbox;
/// weather → web search + weather API.
pub fn toolset_for(
    intent: Intent,
    client: &reqwest::Client,
    request_timeout: Duration,
) -> Vec<Arc<dyn Tool>> {
    match intent {
        Intent::Research => vec![
            Arc::new(WebSearchTool::new(client.clone(), request_timeout)) as Arc<dyn Tool>,
            Arc::new(IbgeDataTool::new(client.clone(), request_timeout)),
            Arc::new(BcbSeriesTool::new(client.clone(), request_timeout)),
        ],
        Intent::Chart => vec![Arc::new(PythonReplTool::new(request_timeout)) as Arc<dyn Tool>],
        Intent::Weather => vec![
            Arc::new(WebSearchTool::new(client.clone(), request_timeout)) as Arc<dyn Tool>,
            Arc::new(WeatherTool::new(client.clone(), request_timeout)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn research_agent_gets_data_tools() {
        let client = reqwest::Client::new();
        let tools = toolset_for(Intent::Research, &client, Duration::from_secs(10));
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(names, ["web_search", "ibge_data", "bcb_series"]);
    }

    #[test]
    fn chart_agent_gets_only_the_sandbox() {
        let client = reqwest::Client::new();
        let tools = toolset_for(Intent::Chart, &client, Duration::from_secs(10));
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(names, ["python_repl"]);
    }

    #[test]
    fn weather_agent_gets_search_and_weather() {
        let client = reqwest::Client::new();
        let tools = toolset_for(Intent::Weather, &client, Duration::from_secs(10));
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(names, ["web_search", "open_meteo"]);
    }
}
