use clap::Parser;
use colored::Colorize;
use econbr::commands::{parse, Command};
use econbr::models::EconbrConfig;
use econbr::presentation;
use econbr_agents::Orchestrator;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "econbr", about = "Assistente multi-agente para economia brasileira")]
struct Cli {
    /// Output the reply as JSON (single-question mode only)
    #[arg(long)]
    json: bool,

    /// Ask a single question and exit; leave empty for the interactive prompt
    #[arg(num_args = 0..)]
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading any configuration.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match EconbrConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "❌".red());
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let assistant = econbr::build_assistant(&config)?;

    if !cli.query.is_empty() {
        let query = cli.query.join(" ");
        let answer = assistant.process(&query).await;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&*answer.reply)?);
        } else {
            println!("{}", presentation::format_reply(&answer));
        }
        return Ok(());
    }

    run_repl(&config, &assistant).await
}

/// RUST_LOG wins; otherwise DEBUG_MODE / LOG_LEVEL decide. Logs go to
/// stderr so stdout stays clean for answers.
fn init_logging(config: &EconbrConfig) {
    let default_level = if config.debug_mode {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_repl(config: &EconbrConfig, assistant: &Orchestrator) -> anyhow::Result<()> {
    println!("{}", presentation::banner());
    println!("\n💬 Digite suas perguntas (ou 'help' para ajuda, 'quit' para sair)");

    let mut editor = DefaultEditor::new()?;
    let prompt = format!("\n{} ", "🔮 Você:".bold());

    loop {
        match editor.readline(&prompt) {
            Ok(line) => {
                let Some(command) = parse(&line) else {
                    continue;
                };
                let _ = editor.add_history_entry(&line);

                match command {
                    Command::Help => println!("{}", presentation::help_text()),
                    Command::Status => println!("{}", presentation::status_text(config)),
                    Command::CacheClear => {
                        assistant.cache().clear().await;
                        println!("✅ Cache limpo com sucesso!");
                    }
                    Command::CacheInfo => {
                        let info = assistant.cache().info().await;
                        println!("{}", presentation::cache_info_text(&info));
                    }
                    Command::ClearScreen => {
                        presentation::clear_screen();
                        println!("{}", presentation::banner());
                    }
                    Command::Quit => {
                        println!("{}", presentation::goodbye());
                        break;
                    }
                    Command::Query(query) => {
                        println!("🔍 Processando: {query}");
                        let answer = assistant.process(query).await;
                        println!("{}", presentation::format_reply(&answer));
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", presentation::goodbye());
                break;
            }
            Err(e) => {
                eprintln!("{} {e}", "❌ Erro inesperado:".red());
                break;
            }
        }
    }

    Ok(())
}
