use clap::{Parser, Subcommand};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use beer_stock_api::{
    config,
    db::{establish_connection_with_config, DbConfig},
    migrator::Migrator,
};

/// Applies or reverts the beer stock schema
#[derive(Debug, Parser)]
#[command(name = "migration", version, about)]
struct Cli {
    /// Overrides the configured database URL (falls back to DATABASE_URL)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending migrations (default)
    Up {
        /// Number of migrations to apply
        #[arg(short, long)]
        steps: Option<u32>,
    },
    /// Revert applied migrations
    Down {
        /// Number of migrations to revert
        #[arg(short, long, default_value_t = 1)]
        steps: u32,
    },
    /// Print applied and pending migrations
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut db_config = match cli.database_url {
        Some(url) => DbConfig {
            url,
            ..Default::default()
        },
        None => DbConfig::from(&config::load_config()?),
    };
    db_config.max_connections = db_config.max_connections.min(5);
    db_config.min_connections = db_config.min_connections.min(db_config.max_connections);

    info!("Starting database migration");

    let db = establish_connection_with_config(&db_config).await?;

    match cli.command.unwrap_or(Command::Up { steps: None }) {
        Command::Up { steps } => {
            Migrator::up(&db, steps).await?;
            info!("Migration completed successfully");
        }
        Command::Down { steps } => {
            Migrator::down(&db, Some(steps)).await?;
            info!(steps, "Migrations reverted");
        }
        Command::Status => Migrator::status(&db).await?,
    }

    Ok(())
}
