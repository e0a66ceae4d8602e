//! Terminal presentation: banner, result blocks, help and status text.
//! Purely cosmetic; no business logic.

use colored::Colorize;
use econbr_agents::RoutedAnswer;
use econbr_cache::CacheInfo;
use econbr_models::EconbrConfig;

const LINE_WIDTH: usize = 80;

pub fn banner() -> String {
    let rule = "=".repeat(LINE_WIDTH);
    format!(
        "\n{rule}\n\
         🤖 {}\n\
         {rule}\n\
         Agentes especializados: 🔍 Pesquisa Econômica | 📊 Gráficos | 🌤️ Clima\n\
         {rule}",
        "ECONBR - SISTEMA MULTI-AGENTE PARA ECONOMIA BRASILEIRA".bold()
    )
}

pub fn help_text() -> String {
    format!(
        "\n📖 {}\n\n\
         🔍 TIPOS DE CONSULTA:\n\
         • Pesquisa: 'PIB Brasil 2023', 'População de São Paulo'\n\
         • Gráficos: 'Gráfico do PIB dos últimos 5 anos'\n\
         • Clima: 'Temperatura em Brasília hoje'\n\n\
         ⚙️  COMANDOS:\n\
         • help/ajuda - mostra esta ajuda\n\
         • status/info - status do sistema\n\
         • cache clear - limpa o cache de respostas\n\
         • cache info - informações do cache\n\
         • clear/limpar - limpa a tela\n\
         • quit/exit/sair - encerra o assistente\n\n\
         💡 Para respostas mais rápidas, faça perguntas específicas e diretas.",
        "AJUDA".bold()
    )
}

pub fn status_text(config: &EconbrConfig) -> String {
    format!(
        "\n📊 {}\n\
         🤖 Modelo: {}\n\
         🔗 Endpoint: {}\n\
         ⏱️  Timeout por agente: {}s\n\
         🔄 Máximo de iterações: {}\n\
         📡 Timeout de requisição: {}s\n\
         🗄️  Cache: TTL de {} minutos",
        "STATUS DO SISTEMA".bold(),
        config.model.name,
        config.model.endpoint,
        config.agents.agent_timeout_seconds,
        config.agents.max_iterations,
        config.model.request_timeout_seconds,
        config.cache.ttl_minutes
    )
}

pub fn cache_info_text(info: &CacheInfo) -> String {
    let mut lines = vec![
        "🗄️  Informações do cache:".to_string(),
        format!("   • Respostas em cache: {}", info.entries),
        format!("   • TTL: {} minutos", info.ttl.as_secs() / 60),
    ];
    if let Some(oldest) = info.oldest {
        lines.push(format!(
            "   • Mais antiga: {}",
            oldest.format("%Y-%m-%d %H:%M:%S")
        ));
    }
    if let Some(newest) = info.newest {
        lines.push(format!(
            "   • Mais recente: {}",
            newest.format("%Y-%m-%d %H:%M:%S")
        ));
    }
    lines.join("\n")
}

/// Render a processed query: the answer block plus per-query statistics.
pub fn format_reply(answer: &RoutedAnswer) -> String {
    let rule = "=".repeat(60);
    let reply = &answer.reply;
    let mut out = String::new();

    if answer.cache_hit {
        out.push_str("⚡ Resultado encontrado no cache!\n");
    }

    out.push_str(&format!("\n{rule}\n📊 RESULTADOS\n{rule}\n"));
    out.push_str(&format!(
        "\n🤖 {}:\n{}\n{}\n",
        reply.agent.to_string().to_uppercase().bold(),
        "-".repeat(40),
        wrap_text(&reply.content, LINE_WIDTH)
    ));

    out.push_str(&format!("\n{rule}\n📈 ESTATÍSTICAS\n{rule}\n"));
    out.push_str(&format!(
        "⏱️  Tempo de processamento: {:.2}s\n",
        reply.processing_time_ms as f64 / 1000.0
    ));
    out.push_str(&format!("🎯 Agente usado: {}\n", reply.agent));
    out.push_str(&format!("🧠 Intenção detectada: {}\n", reply.analysis.intent));
    out.push_str(&format!("🎭 Confiança: {:.2}\n", reply.analysis.confidence));
    if !reply.analysis.entities.is_empty() {
        out.push_str(&format!(
            "🏷️  Entidades: {}\n",
            reply.analysis.entities.join(", ")
        ));
    }

    if reply.processing_time_ms > 20_000 {
        out.push_str(
            "\n💡 Dica: para respostas mais rápidas, faça perguntas mais específicas\n",
        );
    }

    out
}

pub fn goodbye() -> String {
    "\n👋 Obrigado por usar o econbr! Até a próxima! 🚀".to_string()
}

/// Wrap long lines at word boundaries; existing line breaks are kept.
pub fn wrap_text(text: &str, width: usize) -> String {
    let mut wrapped = Vec::new();

    for line in text.lines() {
        if line.chars().count() <= width {
            wrapped.push(line.to_string());
            continue;
        }

        let mut current = String::new();
        for word in line.split_whitespace() {
            if !current.is_empty()
                && current.chars().count() + 1 + word.chars().count() > width
            {
                wrapped.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            wrapped.push(current);
        }
    }

    wrapped.join("\n")
}

/// ANSI clear-screen; the caller reprints the banner afterwards.
pub fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}
