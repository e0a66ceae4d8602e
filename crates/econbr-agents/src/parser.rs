//! Parsing of LLM turns: ReAct steps and router directives.

use econbr_models::Intent;
use once_cell::sync::Lazy;
use regex::Regex;

/// `Action: <tool>` line. The word boundary keeps `Action Input:` and words
/// like "interaction" from matching.
static ACTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bAction\s*:\s*([^\n]+)").expect("static regex"));

/// `Action Input:` up to a hallucinated `Observation:` line or the end of
/// the turn; inputs may span lines (Python code does).
static ACTION_INPUT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\bAction\s+Input\s*:\s*(.*?)(?:\n\s*(?:Observation|Final\s+Answer)\s*:|\z)")
        .expect("static regex")
});

/// `Final Answer: ...` or the uppercase `FINAL ANSWER - ...` variant.
static FINAL_ANSWER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\bFinal\s+Answer\s*[:\-]?\s*(.*)\z").expect("static regex"));

/// `ROUTE: <intent>` directive from the router prompt.
static ROUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bROUTE\s*:\s*(\w+)").expect("static regex"));

/// One parsed model turn in the ReAct loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactStep {
    /// The model wants a tool invoked.
    Action { tool: String, input: String },
    /// The model produced its final answer.
    FinalAnswer(String),
}

/// Parse a model turn into a ReAct step.
///
/// When both an action and a final answer appear, the earlier marker wins.
/// Returns `None` for a turn with neither (or an action without input),
/// which callers treat as free-form text.
pub fn parse_react_step(text: &str) -> Option<ReactStep> {
    let action = ACTION_RE.captures(text);
    let final_answer = FINAL_ANSWER_RE.captures(text);

    match (action, final_answer) {
        (Some(action), Some(answer)) if marker_start(&action) < marker_start(&answer) => {
            action_step(text, &action)
        }
        (Some(action), None) => action_step(text, &action),
        (_, Some(answer)) => Some(ReactStep::FinalAnswer(answer[1].trim().to_string())),
        (None, None) => None,
    }
}

/// Extract the intent from a router directive like `ROUTE: weather - motivo`.
pub fn parse_route(text: &str) -> Option<Intent> {
    let captures = ROUTE_RE.captures(text)?;
    Intent::parse(&captures[1])
}

fn marker_start(captures: &regex::Captures) -> usize {
    captures.get(0).map(|m| m.start()).unwrap_or(usize::MAX)
}

fn action_step(text: &str, action: &regex::Captures) -> Option<ReactStep> {
    let tool = action[1].trim().to_string();
    if tool.is_empty() {
        return None;
    }
    let input = ACTION_INPUT_RE.captures(text)?[1].trim().to_string();
    Some(ReactStep::Action { tool, input })
}
