//! Element identifiers shared between page templates and the client state module
//!
//! Templates must render these verbatim; the site compiler passes
//! [`DomIds`] into every page context so both sides read the same table.

use serde::Serialize;

pub const LOGIN_FORM: &str = "loginForm";
pub const SIGNUP_FORM: &str = "signupForm";
pub const TICKET_FORM: &str = "ticketForm";
pub const TICKETS_CONTAINER: &str = "ticketsContainer";
pub const DASHBOARD_STATS: &str = "dashboardStats";
pub const NAV_GUEST: &str = "nav-guest";
pub const NAV_AUTH: &str = "nav-auth";
pub const LOGOUT_BTN: &str = "logoutBtn";
pub const RESET_TICKET: &str = "resetTicket";

/// Attribute marking a page root that requires a session (`data-protected="true"`)
pub const PROTECTED_ATTR: &str = "data-protected";

/// Attribute naming header links (`data-nav="tickets"`, `data-nav="dashboard"`)
pub const NAV_ATTR: &str = "data-nav";
pub const NAV_TICKETS: &str = "tickets";
pub const NAV_DASHBOARD: &str = "dashboard";

/// Inline error slots on the auth forms
pub const EMAIL_ERROR: &str = "emailError";
pub const PASSWORD_ERROR: &str = "passwordError";
pub const CONFIRM_ERROR: &str = "confirmError";

/// The identifier table in template-friendly form
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DomIds {
    pub login_form: &'static str,
    pub signup_form: &'static str,
    pub ticket_form: &'static str,
    pub tickets_container: &'static str,
    pub dashboard_stats: &'static str,
    pub nav_guest: &'static str,
    pub nav_auth: &'static str,
    pub logout_btn: &'static str,
    pub reset_ticket: &'static str,
    pub protected_attr: &'static str,
    pub nav_attr: &'static str,
    pub nav_tickets: &'static str,
    pub nav_dashboard: &'static str,
    pub email_error: &'static str,
    pub password_error: &'static str,
    pub confirm_error: &'static str,
}

impl Default for DomIds {
    fn default() -> Self {
        Self {
            login_form: LOGIN_FORM,
            signup_form: SIGNUP_FORM,
            ticket_form: TICKET_FORM,
            tickets_container: TICKETS_CONTAINER,
            dashboard_stats: DASHBOARD_STATS,
            nav_guest: NAV_GUEST,
            nav_auth: NAV_AUTH,
            logout_btn: LOGOUT_BTN,
            reset_ticket: RESET_TICKET,
            protected_attr: PROTECTED_ATTR,
            nav_attr: NAV_ATTR,
            nav_tickets: NAV_TICKETS,
            nav_dashboard: NAV_DASHBOARD,
            email_error: EMAIL_ERROR,
            password_error: PASSWORD_ERROR,
            confirm_error: CONFIRM_ERROR,
        }
    }
}
