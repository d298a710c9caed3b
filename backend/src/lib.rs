//! Mission board backend: a group task tracker with deadline reminders.
//!
//! The [`domain`] module holds the mission model, the authorization guard,
//! the services and the deadline notification engine. [`inbound`] exposes
//! them over HTTP; [`outbound`] implements the storage, notification and
//! calendar ports.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub mod test_support;
