//! End-to-end orchestration scenarios with scripted models and agents.

use std::sync::Arc;
use std::time::Duration;

use econbr_agents::test_support::{MockAgent, MockChatModel, MockTool};
use econbr_agents::{AssistantAgent, Orchestrator, ReactAgent, Router};
use econbr_cache::AnswerCache;
use econbr_models::config::AgentsConfig;
use econbr_models::Intent;
use econbr_tools::Tool;

fn three_mock_agents() -> (Arc<MockAgent>, Arc<MockAgent>, Arc<MockAgent>) {
    (
        Arc::new(MockAgent::new(
            "research_agent",
            Intent::Research,
            "O PIB do Brasil em 2023 foi de R$ 10,9 trilhões (IBGE).",
        )),
        Arc::new(MockAgent::new(
            "chart_agent",
            Intent::Chart,
            "Gráfico salvo em pib_brasil.png com a evolução de 2019 a 2023.",
        )),
        Arc::new(MockAgent::new(
            "weather_agent",
            Intent::Weather,
            "Temperatura em São Paulo: 22°C, céu nublado.",
        )),
    )
}

fn orchestrator(
    agents: Vec<Arc<dyn AssistantAgent>>,
    ttl: Duration,
) -> Orchestrator {
    Orchestrator::new(
        agents,
        Router::new(),
        Arc::new(AnswerCache::new(100, ttl)),
        AgentsConfig::default(),
    )
}

#[tokio::test]
async fn each_keyword_reaches_its_agent() {
    let (research, chart, weather) = three_mock_agents();
    let orchestrator = orchestrator(
        vec![
            research.clone() as Arc<dyn AssistantAgent>,
            chart.clone() as Arc<dyn AssistantAgent>,
            weather.clone() as Arc<dyn AssistantAgent>,
        ],
        Duration::from_secs(60),
    );

    let reply = orchestrator.process("Gráfico do PIB dos últimos 5 anos").await;
    assert_eq!(reply.reply.agent, Intent::Chart);

    let reply = orchestrator.process("Como está o clima em São Paulo?").await;
    assert_eq!(reply.reply.agent, Intent::Weather);

    let reply = orchestrator.process("Dados de economia do IBGE").await;
    assert_eq!(reply.reply.agent, Intent::Research);

    assert_eq!(chart.call_count(), 1);
    assert_eq!(weather.call_count(), 1);
    assert_eq!(research.call_count(), 1);
}

#[tokio::test]
async fn repeat_query_within_ttl_skips_the_agent() {
    let (research, chart, weather) = three_mock_agents();
    let orchestrator = orchestrator(
        vec![
            research.clone() as Arc<dyn AssistantAgent>,
            chart as Arc<dyn AssistantAgent>,
            weather as Arc<dyn AssistantAgent>,
        ],
        Duration::from_secs(60),
    );

    let first = orchestrator.process("Qual o PIB do Brasil?").await;
    assert!(!first.cache_hit);

    // Same normalized text: different casing and spacing.
    let second = orchestrator.process("  qual  o PIB   do brasil? ").await;
    assert!(second.cache_hit);
    assert_eq!(second.reply.content, first.reply.content);
    // The stored reply is handed back, not a rebuilt one.
    assert!(Arc::ptr_eq(&first.reply, &second.reply));

    assert_eq!(research.call_count(), 1);
}

#[tokio::test]
async fn expired_entry_reaches_the_agent_again() {
    let (research, chart, weather) = three_mock_agents();
    let orchestrator = orchestrator(
        vec![
            research.clone() as Arc<dyn AssistantAgent>,
            chart as Arc<dyn AssistantAgent>,
            weather as Arc<dyn AssistantAgent>,
        ],
        Duration::from_millis(50),
    );

    orchestrator.process("Qual o PIB do Brasil?").await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let after_ttl = orchestrator.process("Qual o PIB do Brasil?").await;
    assert!(!after_ttl.cache_hit);
    assert_eq!(research.call_count(), 2);
}

#[tokio::test]
async fn distinct_queries_do_not_share_entries() {
    let (research, chart, weather) = three_mock_agents();
    let orchestrator = orchestrator(
        vec![
            research.clone() as Arc<dyn AssistantAgent>,
            chart as Arc<dyn AssistantAgent>,
            weather as Arc<dyn AssistantAgent>,
        ],
        Duration::from_secs(60),
    );

    orchestrator.process("PIB do Brasil").await;
    let other = orchestrator.process("inflação no Brasil").await;

    assert!(!other.cache_hit);
    assert_eq!(research.call_count(), 2);
}

#[tokio::test]
async fn cache_clear_forces_a_fresh_answer() {
    let (research, chart, weather) = three_mock_agents();
    let orchestrator = orchestrator(
        vec![
            research.clone() as Arc<dyn AssistantAgent>,
            chart as Arc<dyn AssistantAgent>,
            weather as Arc<dyn AssistantAgent>,
        ],
        Duration::from_secs(60),
    );

    orchestrator.process("PIB do Brasil").await;
    orchestrator.cache().clear().await;

    let info = orchestrator.cache().info().await;
    assert_eq!(info.entries, 0);

    let fresh = orchestrator.process("PIB do Brasil").await;
    assert!(!fresh.cache_hit);
    assert_eq!(research.call_count(), 2);
}

#[tokio::test]
async fn failure_replies_carry_the_classification() {
    let failing = Arc::new(MockAgent::failing("weather_agent", Intent::Weather));
    let orchestrator = orchestrator(
        vec![failing as Arc<dyn AssistantAgent>],
        Duration::from_secs(60),
    );

    let answer = orchestrator.process("Temperatura em Curitiba hoje").await;

    assert!(!answer.reply.success);
    assert_eq!(answer.reply.agent, Intent::Weather);
    assert!(answer
        .reply
        .analysis
        .entities
        .contains(&"Curitiba".to_string()));
}

#[tokio::test]
async fn react_agent_round_trip_through_the_orchestrator() {
    // Full stack minus HTTP: scripted chat model + mock search tool.
    let chat = Arc::new(MockChatModel::scripted(&[
        "Thought: preciso de dados oficiais\n\
         Action: web_search\n\
         Action Input: PIB Brasil 2023 IBGE",
        "Thought: agora sei a resposta\n\
         Final Answer: O PIB do Brasil em 2023 foi de R$ 10,9 trilhões, segundo o IBGE.",
    ]));
    let search = Arc::new(MockTool::new(
        "web_search",
        "PIB 2023: R$ 10,9 trilhões (fonte: IBGE)",
    ));
    let agent = Arc::new(ReactAgent::new(
        "research_agent",
        Intent::Research,
        chat.clone(),
        vec![search.clone() as Arc<dyn Tool>],
        20,
    ));

    let orchestrator = orchestrator(
        vec![agent as Arc<dyn AssistantAgent>],
        Duration::from_secs(60),
    );

    let answer = orchestrator.process("Qual o PIB do Brasil em 2023?").await;
    assert!(answer.reply.success);
    assert!(answer.reply.content.contains("R$ 10,9 trilhões"));
    assert_eq!(chat.call_count(), 2);
    assert_eq!(search.call_count(), 1);

    // Cached: the model is not consulted again.
    let again = orchestrator.process("Qual o PIB do Brasil em 2023?").await;
    assert!(again.cache_hit);
    assert_eq!(chat.call_count(), 2);
}
