use agency::db::{init_db, reset_db, seed_db, verify_integrity};
use agency::{api, config::Config, Repository};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;

/// Club and player registry for the agency.
#[derive(Debug, Parser)]
#[command(name = "agency", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default).
    Serve {
        /// Apply fixture data before listening.
        #[arg(long)]
        seed: bool,
    },
    /// Create the schema.
    Migrate {
        /// Drop both tables first.
        #[arg(long)]
        reset: bool,
    },
    /// Load the fixture clubs and players; already-present ids are skipped.
    Seed,
    /// Check foreign keys and id sequences; exits 1 when inconsistent.
    Verify,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    match run(cli.command.unwrap_or(Command::Serve { seed: false }), config).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command completed but reported failure.
async fn run(command: Command, config: Config) -> anyhow::Result<bool> {
    let database_url = config.active_database_url().to_string();
    let pool = init_db(&database_url)
        .await
        .with_context(|| format!("failed to initialize database at {}", database_url))?;

    match command {
        Command::Serve { seed } => {
            if seed {
                seed_db(&pool).await.context("failed to seed database")?;
            }

            tracing::info!(
                environment = ?config.environment,
                issuer = %config.auth.issuer(),
                audience = %config.auth.audience,
                algorithms = ?config.auth.algorithms,
                "Auth settings loaded"
            );

            let repo = Arc::new(Repository::new(pool));
            let app = api::create_router(api::AppState::new(repo));

            let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind to {}", addr))?;

            tracing::info!("Server listening on {}", addr);

            axum::serve(listener, app).await.context("server error")?;
            Ok(true)
        }
        Command::Migrate { reset } => {
            if reset {
                reset_db(&pool).await.context("failed to reset database")?;
            }
            println!("Schema ready at {}", database_url);
            Ok(true)
        }
        Command::Seed => {
            let outcome = seed_db(&pool).await.context("failed to seed database")?;
            println!(
                "Inserted {} club(s) and {} player(s)",
                outcome.clubs_inserted, outcome.players_inserted
            );
            Ok(true)
        }
        Command::Verify => {
            let report = verify_integrity(&pool)
                .await
                .context("integrity check failed to run")?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(report.is_consistent())
        }
    }
}
