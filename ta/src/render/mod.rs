//! HTML fragments re-rendered after state changes
//!
//! Handlebars escapes every interpolated value, so ticket text typed by the
//! user never reaches the page as markup.

mod embedded;

pub use embedded::get_embedded;

use chrono::{DateTime, Local};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use crate::error::RenderError;
use crate::tickets::{Ticket, TicketStats};

const TICKET_LIST: &str = "ticket-list";
const DASHBOARD_STATS: &str = "dashboard-stats";

/// Display form of a ticket for the list fragment
#[derive(Debug, Serialize)]
struct TicketCard<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    status: &'static str,
    status_label: &'static str,
    created: String,
}

impl<'a> From<&'a Ticket> for TicketCard<'a> {
    fn from(ticket: &'a Ticket) -> Self {
        Self {
            id: &ticket.id,
            title: &ticket.title,
            description: &ticket.description,
            status: ticket.status.as_str(),
            status_label: ticket.status.label(),
            created: format_timestamp(ticket.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
struct TicketListContext<'a> {
    tickets: Vec<TicketCard<'a>>,
}

/// Local date-time for an epoch-millisecond timestamp
pub fn format_timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Renders the embedded fragments
pub struct Renderer {
    hbs: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut hbs = Handlebars::new();
        for name in [TICKET_LIST, DASHBOARD_STATS] {
            if let Some(template) = get_embedded(name) {
                hbs.register_template_string(name, template)?;
            }
        }
        Ok(Self { hbs })
    }

    /// Content of `#ticketsContainer`
    pub fn tickets(&self, tickets: &[Ticket]) -> Result<String, RenderError> {
        debug!(count = tickets.len(), "Renderer::tickets: called");
        let context = TicketListContext {
            tickets: tickets.iter().map(TicketCard::from).collect(),
        };
        Ok(self.hbs.render(TICKET_LIST, &context)?)
    }

    /// Content of `#dashboardStats`
    pub fn stats(&self, stats: &TicketStats) -> Result<String, RenderError> {
        debug!(?stats, "Renderer::stats: called");
        Ok(self.hbs.render(DASHBOARD_STATS, stats)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tickets::TicketStatus;

    fn ticket(id: &str, title: &str, status: TicketStatus) -> Ticket {
        Ticket {
            id: id.to_string(),
            title: title.to_string(),
            status,
            description: "details".to_string(),
            created_at: 1_700_000_000_000,
            updated_at: None,
        }
    }

    #[test]
    fn test_empty_list_renders_placeholder() {
        let renderer = Renderer::new().unwrap();
        let html = renderer.tickets(&[]).unwrap();
        assert!(html.contains("No tickets yet"));
        assert!(!html.contains("data-action"));
    }

    #[test]
    fn test_cards_carry_ids_and_badges() {
        let renderer = Renderer::new().unwrap();
        let html = renderer
            .tickets(&[ticket("t_2", "Second", TicketStatus::InProgress), ticket("t_1", "First", TicketStatus::Open)])
            .unwrap();

        assert!(html.contains("data-id=\"t_2\""));
        assert!(html.contains("class=\"status-in_progress\">in progress<"));
        assert!(html.find("Second").unwrap() < html.find("First").unwrap());
        assert!(html.contains("Created: "));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let renderer = Renderer::new().unwrap();
        let html = renderer
            .tickets(&[ticket("t_1", "<script>alert(1)</script>", TicketStatus::Open)])
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_stats_render_counts() {
        let renderer = Renderer::new().unwrap();
        let html = renderer
            .stats(&TicketStats {
                total: 7,
                open: 3,
                resolved: 2,
            })
            .unwrap();
        assert!(html.contains(">7<"));
        assert!(html.contains(">3<"));
        assert!(html.contains(">2<"));
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(i64::MAX), "");
        assert!(!format_timestamp(0).is_empty());
    }
}
