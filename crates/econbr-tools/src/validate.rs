//! Sanity checks applied to data coming back from tools and agents before it
//! is shown to the user or cached.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Placeholder strings an LLM run can degrade into; never worth caching.
const EMPTY_ANSWERS: &[&str] = &[
    "resposta não disponível",
    "agent stopped due to iteration limit",
    "agent stopped due to max iterations",
];

/// Whether a free-text answer has enough substance to present and cache.
pub fn answer_is_presentable(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.len() < 3 {
        return false;
    }
    let lower = trimmed.to_lowercase();
    !EMPTY_ANSWERS.iter().any(|p| lower.contains(p))
}

/// Validate a structured economic record (`value`, `date`, `source`).
///
/// Returns the list of problems found; empty means valid.
pub fn validate_economic_record(record: &serde_json::Value) -> Vec<String> {
    let mut problems = Vec::new();

    for field in ["value", "date", "source"] {
        if record.get(field).is_none() {
            problems.push(format!("Campo obrigatório ausente: {field}"));
        }
    }

    if let Some(value) = record.get("value") {
        match numeric_value(value) {
            Some(v) if v < Decimal::ZERO => {
                problems.push("Valor econômico negativo pode indicar erro".to_string());
            }
            Some(_) => {}
            None => problems.push("Valor não é numérico válido".to_string()),
        }
    }

    if let Some(date) = record.get("date").and_then(|d| d.as_str()) {
        let parsed = if date.contains('/') {
            NaiveDate::parse_from_str(date, "%d/%m/%Y")
        } else {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
        };
        if parsed.is_err() {
            problems.push("Formato de data inválido".to_string());
        }
    }

    problems
}

/// Validate a series of chart points (objects with `x` and `y`).
pub fn validate_chart_points(points: &[serde_json::Value]) -> Vec<String> {
    let mut problems = Vec::new();

    if points.len() < 2 {
        problems.push("Dados insuficientes para gráfico (mínimo 2 pontos)".to_string());
    }

    for (i, point) in points.iter().enumerate() {
        match point.as_object() {
            Some(obj) => {
                if !obj.contains_key("x") || !obj.contains_key("y") {
                    problems.push(format!("Ponto {i} sem coordenadas 'x' ou 'y'"));
                }
            }
            None => problems.push(format!("Ponto {i} não é um objeto válido")),
        }
    }

    problems
}

fn numeric_value(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => n.to_string().parse().ok(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
