use clap::Parser;
use owo_colors::{OwoColorize, Style};
use projector_core::db;
use projector_core::error::CoreError;
use projector_core::repository::{RepositoryConfig, SqliteRepository};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log_level);

    let result = match cli.command {
        cli::Commands::Init => commands::init::init(&config.database_path).await,
        command => run(command, &config).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

async fn run(command: cli::Commands, config: &config::Config) -> anyhow::Result<()> {
    let db_pool = db::establish_connection(&config.database_path).await?;
    debug!(path = %config.database_path.display(), "database opened");

    let repository = SqliteRepository::new(
        db_pool,
        RepositoryConfig {
            allow_past_due: config.allow_past_due,
        },
    );

    match command {
        cli::Commands::Init => commands::init::init(&config.database_path).await,
        cli::Commands::Add(command) => commands::add::add_occurrence(&repository, command).await,
        cli::Commands::List(command) => {
            commands::list::list_occurrences(&repository, command).await
        }
        cli::Commands::Do(command) => commands::r#do::do_occurrence(&repository, command).await,
        cli::Commands::Show(command) => {
            commands::show::show_occurrence(&repository, command).await
        }
        cli::Commands::Delete(command) => {
            commands::delete::delete_occurrence(&repository, command).await
        }
        cli::Commands::Project(command) => {
            commands::project::project_command(&repository, command).await
        }
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::AmbiguousId(occurrences) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, name) in occurrences {
                    eprintln!("  {} ({})", id.yellow(), name);
                }
            }
            CoreError::Validation(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::Database(e) => {
                eprintln!("{} Database error: {}", "Error:".style(error_style), e);
            }
            CoreError::Migration(e) => {
                eprintln!("{} Migration failed: {}", "Error:".style(error_style), e);
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), core_error),
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
