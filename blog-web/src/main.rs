use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use blog_web::infrastructure::logging::init_logging;
use blog_web::{AppState, Database, Settings, run_http};

#[derive(Debug, Parser)]
#[command(name = "blog-web", version, about = "Блог с регистрацией, сессиями и постами")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Запуск HTTP сервера (по умолчанию).
    Serve,
    /// Пересоздание схемы БД. Все данные будут удалены.
    InitDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let database = Database::new(&settings.database_url)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let state = AppState::new(database, &settings);
            run_http(&settings, state).await?;
        }
        Command::InitDb => {
            database
                .init_schema()
                .await
                .context("failed to initialize the database")?;
            println!("Initialized the database.");
        }
    }

    Ok(())
}
