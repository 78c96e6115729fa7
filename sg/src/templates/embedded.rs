//! Embedded templates
//!
//! Compiled into the binary from the .hbs files under `templates/`.

use tracing::debug;

/// Page shell; pages render into it as a partial block
pub const LAYOUT: &str = include_str!("../../templates/layout.hbs");

/// Site header with both navigation groups
pub const HEADER: &str = include_str!("../../templates/header.hbs");

pub const LANDING: &str = include_str!("../../templates/pages/landing.hbs");
pub const AUTH_LOGIN: &str = include_str!("../../templates/pages/auth-login.hbs");
pub const AUTH_SIGNUP: &str = include_str!("../../templates/pages/auth-signup.hbs");
pub const DASHBOARD: &str = include_str!("../../templates/pages/dashboard.hbs");
pub const TICKETS: &str = include_str!("../../templates/pages/tickets.hbs");

/// Default stylesheet, written unless the assets directory brings its own
pub const STYLESHEET: &str = include_str!("../../assets/css/style.css");

/// Get the embedded template by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    let content = match name {
        "layout" => LAYOUT,
        "header" => HEADER,
        "pages/landing" => LANDING,
        "pages/auth-login" => AUTH_LOGIN,
        "pages/auth-signup" => AUTH_SIGNUP,
        "pages/dashboard" => DASHBOARD,
        "pages/tickets" => TICKETS,
        _ => {
            debug!("get_embedded: no match found");
            return None;
        }
    };
    Some(content)
}
