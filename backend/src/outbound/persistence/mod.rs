//! Mission persistence adapters.
//!
//! Two implementations of [`MissionRepository`](crate::domain::ports::MissionRepository)
//! live here: a PostgreSQL adapter built on Diesel with async support through
//! `diesel-async` and `bb8` pooling, and a process-local in-memory store used
//! when no database URL is configured.
//!
//! Diesel row structs (`models.rs`) and the table definition (`schema.rs`)
//! are internal; only domain types cross the module boundary.
//!
//! # Example
//!
//! ```ignore
//! use mission_board::outbound::persistence::{DbPool, DieselMissionRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/missions")).await?;
//! let repo = DieselMissionRepository::new(pool);
//! ```

mod diesel_mission_repository;
mod error_mapping;
mod in_memory_mission_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_mission_repository::DieselMissionRepository;
pub use in_memory_mission_repository::InMemoryMissionRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
