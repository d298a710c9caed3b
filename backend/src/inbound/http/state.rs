//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{MeetingCommand, MeetingQuery, MissionCommand, MissionQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub missions: Arc<dyn MissionCommand>,
    pub missions_query: Arc<dyn MissionQuery>,
    pub meetings: Arc<dyn MeetingCommand>,
    pub meetings_query: Arc<dyn MeetingQuery>,
}

impl HttpState {
    /// Bundle the driving ports handlers resolve through `web::Data`.
    pub fn new(
        missions: Arc<dyn MissionCommand>,
        missions_query: Arc<dyn MissionQuery>,
        meetings: Arc<dyn MeetingCommand>,
        meetings_query: Arc<dyn MeetingQuery>,
    ) -> Self {
        Self {
            missions,
            missions_query,
            meetings,
            meetings_query,
        }
    }
}
