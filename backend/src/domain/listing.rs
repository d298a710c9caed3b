//! Text rendering for mission listings.

use pagination::PagedView;

use crate::domain::{Mission, format_deadline};

/// Message shown when a listing has no rows.
pub const EMPTY_LISTING: &str = "Nothing to do!";

/// One listing line: `#<id> — <description> → <assignee>` plus markers.
pub fn render_mission_row(mission: &Mission) -> String {
    let mut row = format!(
        "#{} — {} → <@{}>",
        mission.id(),
        mission.description(),
        mission.assignee()
    );
    if let Some(deadline) = mission.deadline() {
        row.push_str(&format!(" (deadline: {})", format_deadline(deadline)));
    }
    if mission.is_done() {
        row.push_str(" ✅");
    } else {
        row.push_str(&format!(" [{}]", mission.status()));
    }
    row
}

/// Render the current page, or [`EMPTY_LISTING`] for an empty snapshot.
pub fn render_listing(view: &PagedView<Mission>) -> String {
    if view.total() == 0 {
        return EMPTY_LISTING.to_owned();
    }
    view.render_with(render_mission_row)
}
