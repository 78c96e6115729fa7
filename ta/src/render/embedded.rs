//! Embedded fragment templates
//!
//! Compiled into the binary from `fragments/*.hbs`.

use tracing::debug;

/// Ticket cards for `#ticketsContainer`, with the empty-state card
pub const TICKET_LIST: &str = include_str!("../../fragments/ticket-list.hbs");

/// Stat cards for `#dashboardStats`
pub const DASHBOARD_STATS: &str = include_str!("../../fragments/dashboard-stats.hbs");

/// Get the embedded fragment by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "ticket-list" => Some(TICKET_LIST),
        "dashboard-stats" => Some(DASHBOARD_STATS),
        _ => None,
    }
}
