//! Fixture data: 3 clubs and 9 players.

use sqlx::sqlite::SqlitePool;
use tracing::info;

const CLUBS_SEED_SQL: &str = include_str!("seed_clubs.sql");
const PLAYERS_SEED_SQL: &str = include_str!("seed_players.sql");

/// Rows actually written by one `seed_db` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedOutcome {
    pub clubs_inserted: u64,
    pub players_inserted: u64,
}

/// Apply the fixture rows in one transaction.
///
/// Rows carry explicit ids and skip on id conflict, so running this against
/// an already-seeded store inserts nothing.
///
/// # Errors
/// Returns an error if the transaction fails.
pub async fn seed_db(pool: &SqlitePool) -> Result<SeedOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let clubs = sqlx::query(CLUBS_SEED_SQL).execute(&mut *tx).await?;
    let players = sqlx::query(PLAYERS_SEED_SQL).execute(&mut *tx).await?;

    tx.commit().await?;

    let outcome = SeedOutcome {
        clubs_inserted: clubs.rows_affected(),
        players_inserted: players.rows_affected(),
    };
    info!(
        clubs = outcome.clubs_inserted,
        players = outcome.players_inserted,
        "Seed data applied"
    );
    Ok(outcome)
}
