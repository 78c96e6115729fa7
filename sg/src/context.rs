//! Data handed to every page template

use serde::Serialize;
use ticketapp::{DomIds, Page, TicketStatus};
use tracing::debug;

pub const APP_NAME: &str = "TicketApp";
pub const STYLESHEET_HREF: &str = "/assets/css/style.css";
pub const SCRIPT_SRC: &str = "/assets/js/app.js";

/// Location of the client script inside an assets directory
pub const SCRIPT_ASSET: &str = "js/app.js";

/// Canonical route of every page, for links
#[derive(Debug, Clone, Serialize)]
pub struct Routes {
    pub landing: &'static str,
    pub login: &'static str,
    pub signup: &'static str,
    pub dashboard: &'static str,
    pub tickets: &'static str,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            landing: Page::Landing.route(),
            login: Page::Login.route(),
            signup: Page::Signup.route(),
            dashboard: Page::Dashboard.route(),
            tickets: Page::Tickets.route(),
        }
    }
}

/// One `<option>` of the status select
#[derive(Debug, Clone, Serialize)]
pub struct StatusOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Context for rendering a page template
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub app_name: &'static str,
    /// Page name, used as a CSS hook on `<main>`
    pub page: String,
    pub title: &'static str,
    pub route: &'static str,
    /// Renders the protected marker on the page root
    pub protected: bool,
    pub not_found: bool,
    pub dom: DomIds,
    pub routes: Routes,
    pub statuses: Vec<StatusOption>,
    pub description_max_len: usize,
    pub stylesheet: &'static str,
    /// Only set when the build ships a client script
    pub script: Option<&'static str>,
}

impl PageContext {
    pub fn new(page: Page, description_max_len: usize) -> Self {
        debug!(?page, %description_max_len, "PageContext::new: called");
        Self {
            app_name: APP_NAME,
            page: page.to_string(),
            title: page.title(),
            route: page.route(),
            protected: page.is_protected(),
            not_found: page == Page::NotFound,
            dom: DomIds::default(),
            routes: Routes::default(),
            statuses: TicketStatus::ALL
                .iter()
                .map(|status| StatusOption {
                    value: status.as_str(),
                    label: status.label(),
                })
                .collect(),
            description_max_len,
            stylesheet: STYLESHEET_HREF,
            script: None,
        }
    }

    /// Reference the client script from the page
    pub fn with_script(mut self) -> Self {
        self.script = Some(SCRIPT_SRC);
        self
    }
}
