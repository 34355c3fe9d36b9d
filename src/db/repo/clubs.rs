//! Club operations for the repository.

use super::{name_matches, page_bounds, paginate, RepoError, Repository};
use crate::domain::{Club, ClubPatch, NewClub};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

fn club_from_row(row: &SqliteRow) -> Result<Club, sqlx::Error> {
    Ok(Club {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        asset: row.try_get("asset")?,
    })
}

impl Repository {
    /// One page of clubs ordered by id.
    pub async fn list_clubs(&self, page: u32) -> Result<Vec<Club>, RepoError> {
        let (limit, offset) = page_bounds(page);
        let rows = sqlx::query(
            r#"
            SELECT id, name, category, asset
            FROM clubs
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
            .map(club_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn count_clubs(&self) -> Result<i64, RepoError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM clubs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Case-insensitive substring search on name. Returns the page and the total match count.
    pub async fn search_clubs(&self, term: &str, page: u32) -> Result<(Vec<Club>, i64), RepoError> {
        let folded_term = term.to_lowercase();

        let rows = sqlx::query("SELECT id, name, category, asset FROM clubs ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        let mut matches = Vec::new();
        for row in &rows {
            let club = club_from_row(row)?;
            if name_matches(&club.name, &folded_term) {
                matches.push(club);
            }
        }

        Ok(paginate(matches, page))
    }

    /// # Errors
    /// Returns `RepoError::NotFound` if no club has this id.
    pub async fn get_club(&self, id: i64) -> Result<Club, RepoError> {
        let row = sqlx::query("SELECT id, name, category, asset FROM clubs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound { entity: "club", id })?;
        Ok(club_from_row(&row)?)
    }

    pub async fn insert_club(&self, new_club: &NewClub) -> Result<Club, RepoError> {
        let result = sqlx::query("INSERT INTO clubs (name, category, asset) VALUES (?, ?, ?)")
            .bind(&new_club.name)
            .bind(new_club.category.as_deref())
            .bind(new_club.asset.as_deref())
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        info!(club_id = id, "Club created");

        Ok(Club {
            id,
            name: new_club.name.clone(),
            category: new_club.category.clone(),
            asset: new_club.asset.clone(),
        })
    }

    /// Apply a partial update inside a transaction and return the stored result.
    pub async fn update_club(&self, id: i64, patch: &ClubPatch) -> Result<Club, RepoError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT id, name, category, asset FROM clubs WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(RepoError::NotFound { entity: "club", id })?;
        let mut club = club_from_row(&row)?;
        patch.apply(&mut club);

        sqlx::query("UPDATE clubs SET name = ?, category = ?, asset = ? WHERE id = ?")
            .bind(&club.name)
            .bind(club.category.as_deref())
            .bind(club.asset.as_deref())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(club_id = id, "Club updated");
        Ok(club)
    }

    /// # Errors
    /// Returns `RepoError::ForeignKey` while any player still references the club.
    pub async fn delete_club(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM clubs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound { entity: "club", id });
        }

        info!(club_id = id, "Club deleted");
        Ok(())
    }
}
