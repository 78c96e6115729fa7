//! Known pages and their routes
//!
//! One table shared by the site compiler (which template, which output file)
//! and the header state machine (which page is showing).

use std::fmt;

use serde::Serialize;
use tracing::debug;

/// A page of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Landing,
    Login,
    Signup,
    Dashboard,
    Tickets,
    NotFound,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Self::Landing,
        Self::Login,
        Self::Signup,
        Self::Dashboard,
        Self::Tickets,
        Self::NotFound,
    ];

    /// Resolve a request path. Trailing slashes are ignored; anything
    /// unrecognised is [`Page::NotFound`].
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        let page = match path {
            "" | "/index.php" | "/index.html" => Self::Landing,
            "/auth/login" | "/login.html" => Self::Login,
            "/auth/signup" | "/signup.html" => Self::Signup,
            "/dashboard" | "/dashboard/index.php" | "/dashboard.html" => Self::Dashboard,
            "/tickets" | "/tickets/index.php" | "/tickets.html" => Self::Tickets,
            _ => Self::NotFound,
        };
        debug!(%path, ?page, "Page::from_path: resolved");
        page
    }

    /// Canonical route
    pub fn route(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/auth/login",
            Self::Signup => "/auth/signup",
            Self::Dashboard => "/dashboard",
            Self::Tickets => "/tickets",
            Self::NotFound => "/404",
        }
    }

    /// Template rendered for this page; the 404 page reuses the landing template
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Landing | Self::NotFound => "pages/landing",
            Self::Login => "pages/auth-login",
            Self::Signup => "pages/auth-signup",
            Self::Dashboard => "pages/dashboard",
            Self::Tickets => "pages/tickets",
        }
    }

    /// File written by the site compiler
    pub fn output_file(&self) -> &'static str {
        match self {
            Self::Landing => "index.html",
            Self::Login => "login.html",
            Self::Signup => "signup.html",
            Self::Dashboard => "dashboard.html",
            Self::Tickets => "tickets.html",
            Self::NotFound => "404.html",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Landing => "TicketApp",
            Self::Login => "Log in",
            Self::Signup => "Sign up",
            Self::Dashboard => "Dashboard",
            Self::Tickets => "Tickets",
            Self::NotFound => "Page not found",
        }
    }

    /// Pages that require a valid session
    pub fn is_protected(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Tickets)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Landing => "landing",
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Dashboard => "dashboard",
            Self::Tickets => "tickets",
            Self::NotFound => "not-found",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_known_routes() {
        assert_eq!(Page::from_path("/"), Page::Landing);
        assert_eq!(Page::from_path(""), Page::Landing);
        assert_eq!(Page::from_path("/auth/login"), Page::Login);
        assert_eq!(Page::from_path("/auth/signup/"), Page::Signup);
        assert_eq!(Page::from_path("/dashboard/"), Page::Dashboard);
        assert_eq!(Page::from_path("/dashboard/index.php"), Page::Dashboard);
        assert_eq!(Page::from_path("/tickets"), Page::Tickets);
        assert_eq!(Page::from_path("/tickets.html?x=1"), Page::Tickets);
    }

    #[test]
    fn test_from_path_landing_aliases_and_repeated_slashes() {
        assert_eq!(Page::from_path("/index.php"), Page::Landing);
        assert_eq!(Page::from_path("/index.php?next=1"), Page::Landing);
        assert_eq!(Page::from_path("//"), Page::Landing);
        assert_eq!(Page::from_path("/tickets///"), Page::Tickets);
        assert_eq!(Page::from_path("/auth/login//#top"), Page::Login);
    }

    #[test]
    fn test_from_path_unknown_is_not_found() {
        assert_eq!(Page::from_path("/admin"), Page::NotFound);
        assert_eq!(Page::from_path("/tickets/42"), Page::NotFound);
    }

    #[test]
    fn test_routes_round_trip() {
        for page in Page::ALL.into_iter().filter(|p| *p != Page::NotFound) {
            assert_eq!(Page::from_path(page.route()), page);
        }
    }

    #[test]
    fn test_protected_pages() {
        let protected: Vec<Page> = Page::ALL.into_iter().filter(Page::is_protected).collect();
        assert_eq!(protected, vec![Page::Dashboard, Page::Tickets]);
    }

    #[test]
    fn test_output_files_are_distinct() {
        let mut files: Vec<&str> = Page::ALL.iter().map(Page::output_file).collect();
        files.sort();
        files.dedup();
        assert_eq!(files.len(), Page::ALL.len());
    }
}
