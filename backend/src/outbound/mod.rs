//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL and in-memory mission repositories
//! - **notifier**: HTTP relay and log-only notifiers
//! - **calendar**: in-memory meeting calendar
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod calendar;
pub mod notifier;
pub mod persistence;
