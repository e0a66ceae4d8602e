use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal configuration problems detected at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Token de API não configurado. Configure GITHUB_TOKEN ou OPENAI_API_KEY \
         nas variáveis de ambiente."
    )]
    MissingToken,

    #[error("Valor inválido para {var}: '{value}'")]
    InvalidValue { var: String, value: String },
}

/// Top-level configuration, read once at startup from the environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EconbrConfig {
    pub model: ModelConfig,
    pub cache: CacheConfig,
    pub agents: AgentsConfig,
    pub debug_mode: bool,
    pub log_level: String,
}

/// Chat-completions endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// API token. `GITHUB_TOKEN` takes precedence over `OPENAI_API_KEY`.
    #[serde(skip_serializing, default)]
    pub api_token: String,
    pub endpoint: String,
    pub name: String,
    pub temperature: f32,
    /// Timeout for each HTTP request in seconds.
    pub request_timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            endpoint: "https://models.github.ai/inference".to_string(),
            name: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            request_timeout_seconds: 10,
        }
    }
}

/// Configuration for the answer cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// TTL for cached answers in minutes.
    pub ttl_minutes: u64,
    /// Maximum number of entries kept in memory.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: 30,
            max_capacity: 10_000,
        }
    }
}

/// Configuration for agent execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentsConfig {
    /// Total timeout for a single agent run in seconds.
    pub agent_timeout_seconds: u64,
    /// Maximum ReAct tool rounds per query.
    pub max_iterations: u32,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            agent_timeout_seconds: 30,
            max_iterations: 20,
        }
    }
}

impl EconbrConfig {
    /// Build the configuration from environment variables.
    ///
    /// Fails fast when no API token is present or a numeric variable does
    /// not parse; every other variable falls back to its default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env), with an injectable variable
    /// source so startup behavior is testable without touching process state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup("GITHUB_TOKEN")
            .or_else(|| lookup("OPENAI_API_KEY"))
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let mut model = ModelConfig {
            api_token,
            ..ModelConfig::default()
        };
        if let Some(endpoint) = lookup("MODEL_ENDPOINT") {
            model.endpoint = endpoint;
        }
        if let Some(name) = lookup("MODEL_NAME") {
            model.name = name;
        }
        model.temperature = parsed(&lookup, "MODEL_TEMPERATURE", model.temperature)?;
        model.request_timeout_seconds =
            parsed(&lookup, "REQUEST_TIMEOUT", model.request_timeout_seconds)?;

        let mut cache = CacheConfig::default();
        cache.ttl_minutes = parsed(&lookup, "CACHE_TTL_MINUTES", cache.ttl_minutes)?;

        let mut agents = AgentsConfig::default();
        agents.agent_timeout_seconds =
            parsed(&lookup, "AGENT_TIMEOUT", agents.agent_timeout_seconds)?;
        agents.max_iterations = parsed(&lookup, "MAX_ITERATIONS", agents.max_iterations)?;

        let debug_mode = lookup("DEBUG_MODE")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            model,
            cache,
            agents,
            debug_mode,
            log_level,
        })
    }
}

fn parsed<T, F>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn missing_both_tokens_is_a_config_error() {
        let result = EconbrConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingToken)));
    }

    #[test]
    fn github_token_is_enough() {
        let config =
            EconbrConfig::from_lookup(lookup_from(&[("GITHUB_TOKEN", "ghp_x")])).unwrap();
        assert_eq!(config.model.api_token, "ghp_x");
        assert_eq!(config.model.name, "gpt-4o-mini");
        assert_eq!(config.agents.agent_timeout_seconds, 30);
        assert_eq!(config.agents.max_iterations, 20);
        assert_eq!(config.model.request_timeout_seconds, 10);
        assert_eq!(config.cache.ttl_minutes, 30);
    }

    #[test]
    fn openai_key_is_the_fallback_token() {
        let config =
            EconbrConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-x")])).unwrap();
        assert_eq!(config.model.api_token, "sk-x");
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let result = EconbrConfig::from_lookup(lookup_from(&[("GITHUB_TOKEN", "  ")]));
        assert!(matches!(result, Err(ConfigError::MissingToken)));
    }

    #[test]
    fn overrides_are_applied() {
        let config = EconbrConfig::from_lookup(lookup_from(&[
            ("GITHUB_TOKEN", "t"),
            ("MODEL_NAME", "gpt-4o"),
            ("MODEL_ENDPOINT", "https://api.openai.com/v1"),
            ("AGENT_TIMEOUT", "45"),
            ("MAX_ITERATIONS", "5"),
            ("CACHE_TTL_MINUTES", "10"),
            ("DEBUG_MODE", "true"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.model.name, "gpt-4o");
        assert_eq!(config.model.endpoint, "https://api.openai.com/v1");
        assert_eq!(config.agents.agent_timeout_seconds, 45);
        assert_eq!(config.agents.max_iterations, 5);
        assert_eq!(config.cache.ttl_minutes, 10);
        assert!(config.debug_mode);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn malformed_number_is_rejected_with_variable_name() {
        let result = EconbrConfig::from_lookup(lookup_from(&[
            ("GITHUB_TOKEN", "t"),
            ("AGENT_TIMEOUT", "abc"),
        ]));
        match result {
            Err(ConfigError::InvalidValue { var, value }) => {
                assert_eq!(var, "AGENT_TIMEOUT");
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn api_token_is_not_serialized() {
        let model = ModelConfig {
            api_token: "secret".to_string(),
            ..ModelConfig::default()
        };
        let json = serde_json::to_string(&model).unwrap();
        assert!(!json.contains("secret"));
    }
}
