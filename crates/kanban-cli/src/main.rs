mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use kanban_core::KanbanError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("KANBAN_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .init();
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        let message = match e.downcast_ref::<KanbanError>() {
            Some(kanban_error) => kanban_error.user_message(),
            None => e.to_string(),
        };
        output::output_error(&message);
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "kanban", &mut std::io::stdout());
        return Ok(());
    }

    let ctx = CliContext::new(&cli, cli.command.assume_yes())?;

    match cli.command {
        Commands::Show(args) => handlers::show::handle(&ctx, args).await?,
        Commands::Board(board_cmd) => handlers::board::handle(&ctx, board_cmd.action).await?,
        Commands::Task(task_cmd) => handlers::task::handle(&ctx, task_cmd.action).await?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}
