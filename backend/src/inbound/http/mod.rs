//! HTTP inbound adapter exposing the mission board commands.

pub mod caller;
pub mod error;
pub mod health;
pub mod meetings;
pub mod missions;
pub mod request_span;
pub mod state;

pub use error::ApiResult;

use actix_web::{Scope, web};

/// The versioned API scope with every command handler registered.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(missions::add_mission)
        .service(missions::list_missions)
        .service(missions::complete_mission)
        .service(missions::update_status)
        .service(meetings::schedule_meeting)
        .service(meetings::list_meetings)
}
