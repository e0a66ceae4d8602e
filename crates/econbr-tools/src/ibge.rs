use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::ToolError;
use crate::tool::Tool;

const IBGE_BASE_URL: &str = "https://servicodados.ibge.gov.br/api";

/// Official IBGE statistics API passthrough.
///
/// The agent supplies an endpoint path such as `/v1/localidades/municipios`;
/// list payloads are condensed to the first ten entries.
pub struct IbgeDataTool {
    client: reqwest::Client,
    timeout: Duration,
    base_url: String,
}

impl IbgeDataTool {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            base_url: IBGE_BASE_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }
}

#[async_trait]
impl Tool for IbgeDataTool {
    fn name(&self) -> &str {
        "ibge_data"
    }

    fn description(&self) -> &str {
        "Consulta as APIs oficiais do IBGE (informe o caminho, ex: /v1/localidades/municipios)"
    }

    async fn invoke(&self, input: &str) -> Result<String, ToolError> {
        let endpoint = input.trim();
        if endpoint.is_empty() || !endpoint.starts_with('/') {
            return Err(ToolError::InvalidResponse(format!(
                "endpoint IBGE inválido: '{endpoint}' (esperado um caminho começando com '/')"
            )));
        }

        let url = format!("{}{endpoint}", self.base_url);
        debug!(%url, "IBGE request");

        let data: serde_json::Value = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match &data {
            serde_json::Value::Array(items) if !items.is_empty() => Ok(format!(
                "Dados do IBGE obtidos com sucesso:\n{}",
                format_ibge_list(items)
            )),
            _ => Ok(format!(
                "Dados obtidos: {}",
                serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string())
            )),
        }
    }
}

/// Bullet list of `nome` fields, with microrregião when present; capped at 10.
fn format_ibge_list(items: &[serde_json::Value]) -> String {
    let mut lines = Vec::new();

    for item in items.iter().take(10) {
        let nome = item
            .get("nome")
            .and_then(|n| n.as_str())
            .unwrap_or("N/A");
        match item
            .get("microrregiao")
            .and_then(|m| m.get("nome"))
            .and_then(|n| n.as_str())
        {
            Some(micro) => lines.push(format!("• {nome} (Microrregião: {micro})")),
            None => lines.push(format!("• {nome}")),
        }
    }

    let mut result = lines.join("\n");
    if items.len() > 10 {
        result.push_str(&format!("\n\n... e mais {} resultados", items.len() - 10));
    }
    result
}
