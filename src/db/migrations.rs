//! Database migrations and initialization.

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Initialize the SQLite database with schema and pragmas.
///
/// `database_url` is either a `sqlite:` URL or a plain filesystem path.
/// The database file is created if it does not exist.
pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = connect_options(database_url)?;

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }));

    // Every connection to `:memory:` is its own database; pin a single one for the pool's life.
    if database_url.contains(":memory:") {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options.connect_with(options).await?;

    run_migrations(&pool).await?;

    info!("Database initialized successfully at {}", database_url);
    Ok(pool)
}

fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    if database_url.starts_with("sqlite:") {
        return Ok(SqliteConnectOptions::from_str(database_url)?.create_if_missing(true));
    }

    if let Some(parent) = Path::new(database_url).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    Ok(SqliteConnectOptions::new()
        .filename(database_url)
        .create_if_missing(true))
}

/// Run all database migrations. Safe to re-run against an existing store.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");

    for statement in SCHEMA_SQL.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
        }
    }

    info!("Migrations completed successfully");
    Ok(())
}

/// Drop both tables, sequences included, and re-create them empty.
pub async fn reset_db(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Dropping clubs and players tables");

    let mut tx = pool.begin().await?;
    sqlx::query("DROP TABLE IF EXISTS players")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DROP TABLE IF EXISTS clubs")
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    run_migrations(pool).await
}

/// Configure SQLite pragmas for optimal performance and reliability.
async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Row;

    // players.club_id is only enforced while this is on
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut *conn)
        .await?;

    // journal_mode returns the actual mode set; must use fetch to get result
    let row = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    let journal_mode: String = row.get(0);
    tracing::debug!("SQLite journal_mode set to: {}", journal_mode);

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
