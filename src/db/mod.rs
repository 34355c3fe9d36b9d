//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization, migrations and reset
//! - Fixture seeding
//! - Integrity verification of foreign keys and id sequences
//! - Repository layer for database operations

pub mod integrity;
pub mod migrations;
pub mod repo;
pub mod seed;

pub use integrity::{verify_integrity, IntegrityReport};
pub use migrations::{init_db, reset_db, run_migrations};
pub use repo::{RepoError, Repository, PAGE_SIZE};
pub use seed::{seed_db, SeedOutcome};
