//! Diesel and pool error mapping for the mission repository.

use tracing::debug;

use crate::domain::ports::MissionRepositoryError;

use super::pool::PoolError;

/// Pool failures mean the store is unreachable.
pub(crate) fn map_pool_error(error: PoolError) -> MissionRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    MissionRepositoryError::connection(message)
}

/// Map Diesel failures without leaking SQL text into domain errors.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> MissionRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => MissionRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            MissionRepositoryError::connection("database connection closed")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            MissionRepositoryError::query("mission violates a table constraint")
        }
        DieselError::DatabaseError(_, _) => MissionRepositoryError::query("database error"),
        DieselError::QueryBuilderError(_) => {
            MissionRepositoryError::query("database query error")
        }
        _ => MissionRepositoryError::query("database error"),
    }
}
