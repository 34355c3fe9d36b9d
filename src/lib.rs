pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;

pub use config::{AuthSettings, Config, Environment};
pub use db::{init_db, seed_db, verify_integrity, IntegrityReport, RepoError, Repository};
pub use domain::{Club, ClubPatch, NewClub, NewPlayer, Player, PlayerPatch};
pub use error::AppError;
