use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::ToolError;
use crate::tool::Tool;

const BCB_BASE_URL: &str = "https://api.bcb.gov.br/dados/serie";

/// Friendly names for the series codes the agents reach for most.
const SERIES_NAMES: &[(&str, &str)] = &[
    ("4", "PIB - Produto Interno Bruto"),
    ("433", "IPCA - Índice de Preços ao Consumidor Amplo"),
    ("1178", "Taxa Selic"),
    ("12", "Taxa de Câmbio"),
];

/// One observation of a Banco Central SGS time series.
#[derive(Debug, Deserialize)]
struct SgsObservation {
    data: String,
    valor: String,
}

/// Banco Central SGS time-series wrapper.
///
/// Input: `<código> [dataInicial] [dataFinal]` with dates as dd/mm/yyyy,
/// e.g. `433 01/01/2023 31/12/2023`.
pub struct BcbSeriesTool {
    client: reqwest::Client,
    timeout: Duration,
    base_url: String,
}

impl BcbSeriesTool {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            base_url: BCB_BASE_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }
}

#[async_trait]
impl Tool for BcbSeriesTool {
    fn name(&self) -> &str {
        "bcb_series"
    }

    fn description(&self) -> &str {
        "Séries temporais do Banco Central (informe o código, ex: 433 para IPCA, 1178 para Selic)"
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let mut parts = input.split_whitespace();
        let code = parts.next().unwrap_or_default();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ToolError::InvalidResponse(format!(
                "código de série inválido: '{code}'"
            )));
        }

        let mut params: Vec<(&str, &str)> = vec![("formato", "json")];
        let start = parts.next();
        let end = parts.next();
        if let Some(start) = start {
            params.push(("dataInicial", start));
        }
        if let Some(end) = end {
            params.push(("dataFinal", end));
        }

        let url = format!("{}/bcdata.sgs.{code}/dados", self.base_url);
        debug!(%url, "BCB request");

        let observations: Vec<SgsObservation> = self
            .client
            .get(&url)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if observations.is_empty() {
            return Ok("Nenhum dado encontrado para os parâmetros especificados.".to_string());
        }

        Ok(format!(
            "Dados do Banco Central obtidos:\n{}",
            format_series(code, &observations)
        ))
    }
}

/// Trailing ten observations under a friendly series header.
fn format_series(code: &str, observations: &[SgsObservation]) -> String {
    let series_name = SERIES_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("Série {code}"));

    let shown = &observations[observations.len().saturating_sub(10)..];

    let mut lines = vec![format!("📊 {series_name}\n")];
    for obs in shown {
        // SGS returns decimal strings; normalize the ones that parse.
        match obs.valor.parse::<Decimal>() {
            Ok(value) => lines.push(format!("{}: {}", obs.data, value)),
            Err(_) => lines.push(format!("{}: {}", obs.data, obs.valor)),
        }
    }

    if observations.len() > 10 {
        lines.push(format!(
            "\n(Mostrando últimos 10 de {} registros)",
            observations.len()
        ));
    }

    lines.join("\n")
}
