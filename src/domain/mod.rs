//! Domain types for the agency: clubs, players and their write-side shapes.
//!
//! This module provides:
//! - `Club` / `Player` read models as stored
//! - `NewClub` / `NewPlayer` insert payloads
//! - `ClubPatch` / `PlayerPatch` partial updates with explicit null handling
//! - Name validation shared by every write path

pub mod club;
pub mod player;

pub use club::{Club, ClubPatch, NewClub};
pub use player::{NewPlayer, Player, PlayerPatch};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{entity} name must not be blank")]
    BlankName { entity: &'static str },
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub(crate) fn validate_name(entity: &'static str, name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::BlankName { entity });
    }
    Ok(())
}
