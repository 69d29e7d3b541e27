mod cli;
mod dotenv;
mod logging;
mod repl;

use std::process::ExitCode;
use std::sync::Arc;

use coursemate_ai::{ClaudeClient, ClaudeConfig};
use coursemate_common::CoursemateError;
use coursemate_config::CoursemateConfig;
use coursemate_rag::RagSystem;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

use crate::repl::Command;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before anything reads the environment
    let dotenv_vars = dotenv::load();

    let args = cli::parse();

    let config_result = coursemate_config::load_config_from(args.config.as_deref());
    let level = config_result
        .as_ref()
        .map(|config| config.logging.level)
        .unwrap_or_default();
    logging::init(args.log_level.as_deref(), level);

    info!("Coursemate v{} starting...", env!("CARGO_PKG_VERSION"));
    if dotenv_vars > 0 {
        info!(count = dotenv_vars, "Loaded variables from .env");
    }

    let config = config_result.unwrap_or_else(|e| {
        warn!("Config load failed, using defaults: {e}");
        CoursemateConfig::default()
    });

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: cli::Args, config: CoursemateConfig) -> Result<(), CoursemateError> {
    let claude = ClaudeConfig::from_env()
        .and_then(ClaudeClient::new)
        .map_err(|e| CoursemateError::Ai(e.to_string()))?;
    let rag = RagSystem::new(&config, Arc::new(claude))
        .map_err(|e| CoursemateError::Other(e.to_string()))?;
    info!(model = %config.ai.model, "RAG system ready");

    if args.clear {
        rag.clear_all_data().await?;
    }

    if let Some(path) = args.catalog.as_ref().or(config.search.catalog_path.as_ref()) {
        match rag.load_catalog(path).await {
            Ok(summary) => info!(
                added = summary.courses_added,
                skipped = summary.courses_skipped,
                "Catalog ready"
            ),
            Err(e) => warn!("Failed to load catalog {}: {e}", path.display()),
        }
    }

    if let Some(question) = args.query.as_deref() {
        let outcome = rag.query(question, None).await;
        println!("{}", repl::render_outcome(&outcome));
        return Ok(());
    }

    interactive(&rag).await
}

async fn interactive(rag: &RagSystem) -> Result<(), CoursemateError> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session_id = rag.new_session();

    stdout.write_all(format!("{}\n", repl::HELP).as_bytes()).await?;
    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let reply = match repl::parse_line(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Help => repl::HELP.to_string(),
            Command::NewSession => {
                rag.clear_session(&session_id);
                session_id = rag.new_session();
                format!("Started {session_id}")
            }
            Command::Courses => repl::render_analytics(&rag.course_analytics().await),
            Command::Ask(question) => {
                let outcome = rag.query(&question, Some(&session_id)).await;
                repl::render_outcome(&outcome)
            }
        };
        stdout.write_all(format!("{reply}\n").as_bytes()).await?;
    }

    let (calls, usage) = rag.generator().usage();
    info!(
        calls,
        input_tokens = usage.input_tokens,
        output_tokens = usage.output_tokens,
        "Shutdown complete"
    );
    Ok(())
}
