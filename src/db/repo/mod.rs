//! Repository layer for database operations.
//!
//! This module provides the `Repository` struct for all database operations.
//! Methods are organized across submodules by entity:
//! - `clubs.rs` - Club reads, writes and search
//! - `players.rs` - Player reads, writes, search and per-club listing

mod clubs;
mod players;

use sqlx::sqlite::SqlitePool;
use thiserror::Error;

/// Rows per page for every paginated listing.
pub const PAGE_SIZE: i64 = 10;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("Foreign key constraint failed: {0}")]
    ForeignKey(String),
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation()
                || db_err.message().contains("FOREIGN KEY constraint failed")
            {
                return RepoError::ForeignKey(db_err.message().to_string());
            }
        }
        RepoError::Database(err)
    }
}

/// Repository for database operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip to the store; backs `/ready`.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// LIMIT/OFFSET for a 1-based page number.
fn page_bounds(page: u32) -> (i64, i64) {
    let page = i64::from(page.max(1));
    (PAGE_SIZE, (page - 1) * PAGE_SIZE)
}

/// Case-insensitive substring match on names. Folding happens here because
/// SQLite's `LIKE` only folds ASCII letters.
fn name_matches(name: &str, folded_term: &str) -> bool {
    name.to_lowercase().contains(folded_term)
}

/// Cut one page out of an id-ordered list; returns the page and the full length.
fn paginate<T>(items: Vec<T>, page: u32) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let (limit, offset) = page_bounds(page);
    let page = items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();
    (page, total)
}
