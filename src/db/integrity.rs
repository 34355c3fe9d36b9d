//! Data-integrity checks over a live store.

use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::warn;

/// Snapshot of the invariants that tie players, clubs and their id sequences together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub club_count: i64,
    pub player_count: i64,
    pub max_club_id: Option<i64>,
    pub max_player_id: Option<i64>,
    pub clubs_sequence: i64,
    pub players_sequence: i64,
    /// Player ids whose `club_id` matches no club.
    pub orphaned_players: Vec<i64>,
    /// Rows reported by `PRAGMA foreign_key_check`.
    pub foreign_key_violations: usize,
}

impl IntegrityReport {
    pub fn is_consistent(&self) -> bool {
        self.problems().is_empty()
    }

    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !self.orphaned_players.is_empty() {
            problems.push(format!(
                "players reference missing clubs: {:?}",
                self.orphaned_players
            ));
        }
        if self.foreign_key_violations > 0 {
            problems.push(format!(
                "foreign_key_check reported {} violation(s)",
                self.foreign_key_violations
            ));
        }
        if let Some(max) = self.max_club_id {
            if self.clubs_sequence < max {
                problems.push(format!(
                    "clubs sequence {} is behind max id {}",
                    self.clubs_sequence, max
                ));
            }
        }
        if let Some(max) = self.max_player_id {
            if self.players_sequence < max {
                problems.push(format!(
                    "players sequence {} is behind max id {}",
                    self.players_sequence, max
                ));
            }
        }

        problems
    }
}

/// Inspect the store and report on foreign keys and sequence state.
///
/// # Errors
/// Returns an error if any inspection query fails.
pub async fn verify_integrity(pool: &SqlitePool) -> Result<IntegrityReport, sqlx::Error> {
    let (club_count, max_club_id): (i64, Option<i64>) =
        sqlx::query_as("SELECT COUNT(*), MAX(id) FROM clubs")
            .fetch_one(pool)
            .await?;
    let (player_count, max_player_id): (i64, Option<i64>) =
        sqlx::query_as("SELECT COUNT(*), MAX(id) FROM players")
            .fetch_one(pool)
            .await?;

    let clubs_sequence = sequence_value(pool, "clubs").await?;
    let players_sequence = sequence_value(pool, "players").await?;

    let orphaned_players = sqlx::query(
        r#"
        SELECT p.id
        FROM players p
        LEFT JOIN clubs c ON c.id = p.club_id
        WHERE p.club_id IS NOT NULL AND c.id IS NULL
        ORDER BY p.id ASC
        "#,
    )
    .fetch_all(pool)
    .await?
    .iter()
    .map(|row| row.try_get::<i64, _>("id"))
    .collect::<Result<Vec<_>, _>>()?;

    let foreign_key_violations = sqlx::query("PRAGMA foreign_key_check")
        .fetch_all(pool)
        .await?
        .len();

    let report = IntegrityReport {
        club_count,
        player_count,
        max_club_id,
        max_player_id,
        clubs_sequence,
        players_sequence,
        orphaned_players,
        foreign_key_violations,
    };

    for problem in report.problems() {
        warn!("Integrity check failed: {}", problem);
    }

    Ok(report)
}

/// Current high-water mark of a table's AUTOINCREMENT sequence; 0 before the first insert.
async fn sequence_value(pool: &SqlitePool, table: &str) -> Result<i64, sqlx::Error> {
    let seq: Option<(i64,)> = sqlx::query_as("SELECT seq FROM sqlite_sequence WHERE name = ?")
        .bind(table)
        .fetch_optional(pool)
        .await?;
    Ok(seq.map(|(s,)| s).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_db, seed_db};
    use tempfile::TempDir;

    async fn fresh_pool() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir
            .path()
            .join("agency.db")
            .to_string_lossy()
            .to_string();
        let pool = init_db(&db_path).await.expect("init_db failed");
        (pool, temp_dir)
    }

    #[tokio::test]
    async fn test_empty_store_is_consistent() {
        let (pool, _temp) = fresh_pool().await;

        let report = verify_integrity(&pool).await.unwrap();
        assert!(report.is_consistent());
        assert_eq!(report.club_count, 0);
        assert_eq!(report.max_club_id, None);
        assert_eq!(report.clubs_sequence, 0);
    }

    #[tokio::test]
    async fn test_seeded_store_report() {
        let (pool, _temp) = fresh_pool().await;
        seed_db(&pool).await.unwrap();

        let report = verify_integrity(&pool).await.unwrap();
        assert_eq!(
            report,
            IntegrityReport {
                club_count: 3,
                player_count: 9,
                max_club_id: Some(3),
                max_player_id: Some(9),
                clubs_sequence: 3,
                players_sequence: 9,
                orphaned_players: vec![],
                foreign_key_violations: 0,
            }
        );
        assert!(report.is_consistent());
    }

    #[tokio::test]
    async fn test_orphan_detected_when_constraint_bypassed() {
        let (pool, _temp) = fresh_pool().await;
        seed_db(&pool).await.unwrap();

        let mut conn = pool.acquire().await.unwrap();
        sqlx::query("PRAGMA foreign_keys = OFF")
            .execute(&mut *conn)
            .await
            .unwrap();
        sqlx::query("INSERT INTO players (name, club_id) VALUES ('Ghost', 999)")
            .execute(&mut *conn)
            .await
            .unwrap();
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&mut *conn)
            .await
            .unwrap();
        drop(conn);

        let report = verify_integrity(&pool).await.unwrap();
        assert_eq!(report.orphaned_players, vec![10]);
        assert_eq!(report.foreign_key_violations, 1);
        assert!(!report.is_consistent());
        assert_eq!(report.problems().len(), 2);
    }

    #[test]
    fn test_sequence_behind_max_id_is_a_problem() {
        let report = IntegrityReport {
            club_count: 3,
            player_count: 0,
            max_club_id: Some(3),
            max_player_id: None,
            clubs_sequence: 2,
            players_sequence: 0,
            orphaned_players: vec![],
            foreign_key_violations: 0,
        };
        assert_eq!(
            report.problems(),
            vec!["clubs sequence 2 is behind max id 3".to_string()]
        );
    }
}
