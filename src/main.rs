//! Mudemy server binary
//!
//! Runs the REST API, applies database migrations and loads demo data.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mudemy_api::{ApiServer, ApiServerConfig};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

/// Mudemy - online course marketplace backend
#[derive(Parser, Debug)]
#[command(name = "mudemy")]
#[command(about = "Mudemy - online course marketplace backend")]
#[command(version, long_version = LONG_VERSION)]
struct Cli {
    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Database connection URL
    #[arg(
        long,
        global = true,
        env = "MUDEMY_DATABASE_URL",
        default_value = "sqlite://mudemy.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply migrations and serve the REST API
    Serve {
        /// Address to bind the API server
        #[arg(long, env = "MUDEMY_BIND", default_value = "127.0.0.1:8000")]
        bind: SocketAddr,

        /// Secret used to sign session tokens
        #[arg(long, env = "MUDEMY_JWT_SECRET", hide_env_values = true)]
        jwt_secret: String,

        /// Session lifetime in hours
        #[arg(long, env = "MUDEMY_SESSION_HOURS", default_value = "24")]
        session_hours: i64,

        /// Allowed CORS origins (comma separated, default: any localhost origin)
        #[arg(long, env = "MUDEMY_CORS_ORIGINS", value_delimiter = ',')]
        cors_origins: Vec<String>,

        /// Disable CORS headers entirely
        #[arg(long)]
        no_cors: bool,
    },

    /// Apply pending database migrations and exit
    Migrate,

    /// Load demo users and courses into an empty database
    Seed,
}

/// Setup logging with the specified filter
fn setup_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

async fn open_database(url: &str) -> Result<sea_orm::DatabaseConnection> {
    let db = mudemy_db::connect(url)
        .await
        .with_context(|| format!("Failed to connect to database {url}"))?;
    mudemy_db::migrate(&db)
        .await
        .context("Failed to run database migrations")?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli.log_level);

    match cli.command {
        Commands::Serve {
            bind,
            jwt_secret,
            session_hours,
            cors_origins,
            no_cors,
        } => {
            info!("Mudemy {} starting...", LONG_VERSION);

            if session_hours < 1 {
                anyhow::bail!("Session lifetime must be at least one hour");
            }

            let db = open_database(&cli.database_url).await?;

            let cors_origins: Vec<String> = cors_origins
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();

            let config = ApiServerConfig {
                bind_addr: bind,
                enable_cors: !no_cors,
                cors_origins: (!cors_origins.is_empty()).then_some(cors_origins),
                jwt_secret,
                session_hours,
            };

            let server = tokio::spawn(ApiServer::new(config, db).start());

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Received Ctrl+C, shutting down...");
                }
                result = server => {
                    match result {
                        Ok(Ok(())) => info!("API server stopped"),
                        Ok(Err(e)) => {
                            error!("API server error: {:#}", e);
                            return Err(e);
                        }
                        Err(e) => {
                            error!("API server task panicked: {}", e);
                            return Err(e.into());
                        }
                    }
                }
            }

            info!("Mudemy stopped");
            Ok(())
        }
        Commands::Migrate => {
            open_database(&cli.database_url).await?;
            info!("Migrations applied to {}", cli.database_url);
            Ok(())
        }
        Commands::Seed => {
            let db = open_database(&cli.database_url).await?;
            let summary = mudemy_db::seed::seed_demo_data(&db)
                .await
                .context("Failed to seed demo data")?;

            if summary.users > 0 {
                info!(
                    "Demo accounts admin, tutor and student use password {}",
                    mudemy_db::seed::DEMO_PASSWORD
                );
            }
            Ok(())
        }
    }
}
