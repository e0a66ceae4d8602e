//! Interactive command taxonomy: everything that is not a recognized command
//! is a query for the agents.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Help,
    Status,
    CacheClear,
    CacheInfo,
    ClearScreen,
    Quit,
    Query(&'a str),
}

/// Parse one line of user input. Returns `None` for blank lines.
pub fn parse(input: &str) -> Option<Command<'_>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_lowercase();
    let command = match lower.as_str() {
        "help" | "ajuda" => Command::Help,
        "status" | "info" => Command::Status,
        "clear" | "limpar" => Command::ClearScreen,
        "quit" | "exit" | "sair" => Command::Quit,
        _ if lower.starts_with("cache") => {
            if lower.contains("clear") || lower.contains("limpar") {
                Command::CacheClear
            } else {
                Command::CacheInfo
            }
        }
        _ => Command::Query(trimmed),
    };

    Some(command)
}
