//! Header visibility state machine
//!
//! Two states, driven entirely by the stored session. Inside the
//! authenticated state the current page decides which nav link is hidden.

use serde::Serialize;
use tracing::debug;

use crate::page::Page;
use crate::session::Session;

/// Whether the visitor has a valid session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderState {
    Guest,
    Authenticated,
}

/// Events that move the header between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderEvent {
    SessionValidated,
    LoggedOut,
    Expired,
}

impl HeaderState {
    pub fn from_session(session: Option<&Session>, now_ms: i64) -> Self {
        match session {
            Some(session) if session.is_valid(now_ms) => Self::Authenticated,
            _ => Self::Guest,
        }
    }

    pub fn on(self, event: HeaderEvent) -> Self {
        let next = match event {
            HeaderEvent::SessionValidated => Self::Authenticated,
            HeaderEvent::LoggedOut | HeaderEvent::Expired => Self::Guest,
        };
        debug!(from = ?self, ?event, to = ?next, "HeaderState::on: transition");
        next
    }

    /// Element visibility for this state on `page`
    pub fn view(self, page: Page) -> HeaderView {
        match self {
            Self::Guest => HeaderView {
                state: self,
                nav_guest: Display::Flex,
                nav_auth: Display::None,
                logout_btn: Display::None,
                tickets_link: Display::None,
                dashboard_link: Display::None,
            },
            Self::Authenticated => HeaderView {
                state: self,
                nav_guest: Display::None,
                nav_auth: Display::Flex,
                logout_btn: Display::InlineBlock,
                tickets_link: if page == Page::Tickets {
                    Display::None
                } else {
                    Display::InlineBlock
                },
                dashboard_link: if page == Page::Dashboard {
                    Display::None
                } else {
                    Display::InlineBlock
                },
            },
        }
    }
}

/// CSS `display` value applied to a header element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    None,
    Flex,
    InlineBlock,
}

impl Display {
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Flex => "flex",
            Self::InlineBlock => "inline-block",
        }
    }

    pub fn is_visible(&self) -> bool {
        *self != Self::None
    }
}

/// Visibility of every header element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub state: HeaderState,
    pub nav_guest: Display,
    pub nav_auth: Display,
    pub logout_btn: Display,
    /// Link inside the auth nav with `data-nav="tickets"`
    pub tickets_link: Display,
    /// Link inside the auth nav with `data-nav="dashboard"`
    pub dashboard_link: Display,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires: Option<i64>) -> Session {
        Session {
            email: "a@b.co".to_string(),
            token: "tok".to_string(),
            expires,
        }
    }

    #[test]
    fn test_state_from_session() {
        assert_eq!(HeaderState::from_session(None, 0), HeaderState::Guest);
        assert_eq!(
            HeaderState::from_session(Some(&session(Some(10))), 5),
            HeaderState::Authenticated
        );
        assert_eq!(HeaderState::from_session(Some(&session(Some(10))), 10), HeaderState::Guest);
        assert_eq!(
            HeaderState::from_session(Some(&session(None)), i64::MAX),
            HeaderState::Authenticated
        );
    }

    #[test]
    fn test_transitions() {
        let state = HeaderState::Guest.on(HeaderEvent::SessionValidated);
        assert_eq!(state, HeaderState::Authenticated);
        assert_eq!(state.on(HeaderEvent::LoggedOut), HeaderState::Guest);
        assert_eq!(state.on(HeaderEvent::Expired), HeaderState::Guest);
    }

    #[test]
    fn test_guest_view_hides_auth_nav() {
        let view = HeaderState::Guest.view(Page::Dashboard);
        assert_eq!(view.nav_guest, Display::Flex);
        assert_eq!(view.nav_auth, Display::None);
        assert!(!view.logout_btn.is_visible());
    }

    #[test]
    fn test_authenticated_view_per_page() {
        let dashboard = HeaderState::Authenticated.view(Page::Dashboard);
        assert!(!dashboard.dashboard_link.is_visible());
        assert!(dashboard.tickets_link.is_visible());

        let tickets = HeaderState::Authenticated.view(Page::Tickets);
        assert!(tickets.dashboard_link.is_visible());
        assert!(!tickets.tickets_link.is_visible());

        let landing = HeaderState::Authenticated.view(Page::Landing);
        assert!(landing.dashboard_link.is_visible());
        assert!(landing.tickets_link.is_visible());
        assert_eq!(landing.nav_guest, Display::None);
        assert_eq!(landing.nav_auth.as_css(), "flex");
        assert_eq!(landing.logout_btn.as_css(), "inline-block");
    }
}
