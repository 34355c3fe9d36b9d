//! Player operations for the repository.

use super::{name_matches, page_bounds, paginate, RepoError, Repository};
use crate::domain::{Club, NewPlayer, Player, PlayerPatch};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

fn player_from_row(row: &SqliteRow) -> Result<Player, sqlx::Error> {
    Ok(Player {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        value: row.try_get("value")?,
        club_id: row.try_get("club_id")?,
    })
}

impl Repository {
    /// One page of players ordered by id.
    pub async fn list_players(&self, page: u32) -> Result<Vec<Player>, RepoError> {
        let (limit, offset) = page_bounds(page);
        let rows = sqlx::query(
            r#"
            SELECT id, name, value, club_id
            FROM players
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(player_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn count_players(&self) -> Result<i64, RepoError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM players")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Case-insensitive substring search on name. Returns the page and the total match count.
    pub async fn search_players(
        &self,
        term: &str,
        page: u32,
    ) -> Result<(Vec<Player>, i64), RepoError> {
        let folded_term = term.to_lowercase();

        let rows = sqlx::query("SELECT id, name, value, club_id FROM players ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        let mut matches = Vec::new();
        for row in &rows {
            let player = player_from_row(row)?;
            if name_matches(&player.name, &folded_term) {
                matches.push(player);
            }
        }

        Ok(paginate(matches, page))
    }

    /// A club together with all of its players, ordered by id.
    ///
    /// # Errors
    /// Returns `RepoError::NotFound` if the club does not exist.
    pub async fn players_for_club(&self, club_id: i64) -> Result<(Club, Vec<Player>), RepoError> {
        let club = self.get_club(club_id).await?;

        let rows = sqlx::query(
            r#"
            SELECT id, name, value, club_id
            FROM players
            WHERE club_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await?;

        let players = rows
            .iter()
            .map(player_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((club, players))
    }

    /// # Errors
    /// Returns `RepoError::NotFound` if no player has this id.
    pub async fn get_player(&self, id: i64) -> Result<Player, RepoError> {
        let row = sqlx::query("SELECT id, name, value, club_id FROM players WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "player",
                id,
            })?;
        Ok(player_from_row(&row)?)
    }

    /// # Errors
    /// Returns `RepoError::ForeignKey` if `club_id` names a club that does not exist.
    pub async fn insert_player(&self, new_player: &NewPlayer) -> Result<Player, RepoError> {
        let result = sqlx::query("INSERT INTO players (name, value, club_id) VALUES (?, ?, ?)")
            .bind(&new_player.name)
            .bind(new_player.value.as_deref())
            .bind(new_player.club_id)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        info!(player_id = id, club_id = ?new_player.club_id, "Player created");

        Ok(Player {
            id,
            name: new_player.name.clone(),
            value: new_player.value.clone(),
            club_id: new_player.club_id,
        })
    }

    /// Apply a partial update inside a transaction and return the stored result.
    pub async fn update_player(&self, id: i64, patch: &PlayerPatch) -> Result<Player, RepoError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT id, name, value, club_id FROM players WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(RepoError::NotFound {
                entity: "player",
                id,
            })?;
        let mut player = player_from_row(&row)?;
        patch.apply(&mut player);

        sqlx::query("UPDATE players SET name = ?, value = ?, club_id = ? WHERE id = ?")
            .bind(&player.name)
            .bind(player.value.as_deref())
            .bind(player.club_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(player_id = id, "Player updated");
        Ok(player)
    }

    pub async fn delete_player(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound {
                entity: "player",
                id,
            });
        }

        info!(player_id = id, "Player deleted");
        Ok(())
    }
}
