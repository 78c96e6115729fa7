//! Page controller
//!
//! Each handler corresponds to one user action on a page. Instead of touching
//! a document, it returns an [`Outcome`] describing what the page should do:
//! show a toast, show or clear inline errors, refill the ticket form, swap in
//! a re-rendered fragment, or redirect after a delay.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::config::{Config, UiConfig};
use crate::error::RenderError;
use crate::header::{HeaderState, HeaderView};
use crate::page::Page;
use crate::render::Renderer;
use crate::session::SessionStore;
use crate::storage::KeyValueStore;
use crate::tickets::TicketStore;
use crate::toast::Toast;
use crate::validation::{self, FieldErrors, LoginForm, SignupForm, TicketForm};

pub const MSG_LOGIN_OK: &str = "Login successful";
pub const MSG_SIGNUP_OK: &str = "Account created";
pub const MSG_AUTH_FAILED: &str = "Failed to sign in. Please retry.";
pub const MSG_LOGGED_OUT: &str = "Logged out";
pub const MSG_SESSION_EXPIRED: &str = "Your session has expired — please log in again.";
pub const MSG_TICKET_CREATED: &str = "Ticket created";
pub const MSG_TICKET_UPDATED: &str = "Ticket updated";
pub const MSG_TICKET_DELETED: &str = "Ticket deleted";
pub const MSG_TICKET_NOT_FOUND: &str = "Ticket not found";
pub const MSG_SAVE_FAILED: &str = "Failed to save ticket. Please retry.";
pub const MSG_DELETE_FAILED: &str = "Failed to delete ticket. Please retry.";

/// Toast duration for the session-expired notice
const EXPIRED_TOAST_MS: u64 = 4000;

/// Toast duration for the logout notice
const LOGOUT_TOAST_MS: u64 = 1200;

/// Navigate to `to` after `delay_ms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub to: String,
    pub delay_ms: u64,
}

impl Redirect {
    pub fn new(page: Page, delay_ms: u64) -> Self {
        Self {
            to: page.route().to_string(),
            delay_ms,
        }
    }
}

/// What the page should do after a handler runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub toast: Option<Toast>,
    pub redirect: Option<Redirect>,
    /// Inline errors to show; an empty set clears them
    pub errors: FieldErrors,
    /// New contents of `#ticketForm`
    pub form: Option<TicketForm>,
    /// New contents of `#ticketsContainer`
    pub tickets_html: Option<String>,
}

impl Outcome {
    fn invalid(errors: FieldErrors) -> Self {
        Self {
            errors,
            ..Default::default()
        }
    }

    fn toast(toast: Toast) -> Self {
        Self {
            toast: Some(toast),
            ..Default::default()
        }
    }

    fn with_redirect(mut self, redirect: Redirect) -> Self {
        self.redirect = Some(redirect);
        self
    }

    /// No toast, redirect, errors or page changes
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Everything a page does when it first loads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLoad {
    pub page: Page,
    pub header: HeaderView,
    /// Expired-session handling on protected pages
    pub guard: Outcome,
    /// `#ticketsContainer` on the tickets page
    pub tickets_html: Option<String>,
    /// `#dashboardStats` on the dashboard
    pub stats_html: Option<String>,
}

/// The client state module: session simulation, ticket CRUD and rendering
pub struct App {
    sessions: SessionStore,
    tickets: TicketStore,
    renderer: Renderer,
    clock: Arc<dyn Clock>,
    ui: UiConfig,
    description_max_len: usize,
}

impl App {
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, config: &Config) -> Result<Self, RenderError> {
        Ok(Self {
            sessions: SessionStore::with_ttl(kv.clone(), config.session.ttl_ms),
            tickets: TicketStore::new(kv),
            renderer: Renderer::new()?,
            clock,
            ui: config.ui.clone(),
            description_max_len: config.tickets.description_max_len,
        })
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn tickets(&self) -> &TicketStore {
        &self.tickets
    }

    fn now(&self) -> i64 {
        self.clock.now_ms()
    }

    // --- Auth forms ---

    pub fn login(&self, form: &LoginForm) -> Outcome {
        debug!(email = %form.email, "App::login: called");
        match validation::validate_login(form) {
            Ok(credentials) => self.start_session(&credentials.email, MSG_LOGIN_OK),
            Err(errors) => Outcome::invalid(errors),
        }
    }

    pub fn signup(&self, form: &SignupForm) -> Outcome {
        debug!(email = %form.email, "App::signup: called");
        match validation::validate_signup(form) {
            Ok(credentials) => self.start_session(&credentials.email, MSG_SIGNUP_OK),
            Err(errors) => Outcome::invalid(errors),
        }
    }

    fn start_session(&self, email: &str, message: &str) -> Outcome {
        match self.sessions.start(email, self.now()) {
            Ok(_) => Outcome::toast(Toast::success(message).with_duration(self.ui.short_toast_ms))
                .with_redirect(Redirect::new(Page::Dashboard, self.ui.redirect_delay_ms)),
            Err(e) => {
                error!("Failed to store session: {}", e);
                Outcome::toast(Toast::error(MSG_AUTH_FAILED))
            }
        }
    }

    pub fn logout(&self) -> Outcome {
        if let Err(e) = self.sessions.clear() {
            warn!("Failed to clear session: {}", e);
        }
        info!("Logged out");
        Outcome::toast(Toast::info(MSG_LOGGED_OUT).with_duration(LOGOUT_TOAST_MS))
            .with_redirect(Redirect::new(Page::Landing, self.ui.redirect_delay_ms))
    }

    // --- Page load ---

    pub fn header_state(&self) -> HeaderState {
        HeaderState::from_session(self.sessions.get().as_ref(), self.now())
    }

    /// Header visibility for the page at `path`
    pub fn header(&self, path: &str) -> HeaderView {
        self.header_state().view(Page::from_path(path))
    }

    /// Send visitors without a valid session away from protected pages
    pub fn guard(&self, page: Page) -> Outcome {
        if !page.is_protected() || self.sessions.current(self.now()).is_some() {
            return Outcome::default();
        }

        info!(%page, "No valid session on protected page");
        if let Err(e) = self.sessions.clear() {
            warn!("Failed to clear session: {}", e);
        }
        Outcome::toast(Toast::error(MSG_SESSION_EXPIRED).with_duration(EXPIRED_TOAST_MS))
            .with_redirect(Redirect::new(Page::Login, self.ui.guard_redirect_delay_ms))
    }

    /// Guard, header and page fragments for the page at `path`
    pub fn load_page(&self, path: &str) -> PageLoad {
        let page = Page::from_path(path);
        debug!(%path, %page, "App::load_page: called");

        let guard = self.guard(page);
        let header = self.header_state().view(page);
        let leaving = guard.redirect.is_some();

        let tickets_html = (page == Page::Tickets && !leaving)
            .then(|| self.rendered_tickets())
            .flatten();
        let stats_html = (page == Page::Dashboard && !leaving)
            .then(|| self.rendered_stats())
            .flatten();

        PageLoad {
            page,
            header,
            guard,
            tickets_html,
            stats_html,
        }
    }

    // --- Tickets ---

    /// Create or update from the ticket form. Nothing is stored unless the
    /// form validates.
    pub fn submit_ticket(&self, form: &TicketForm) -> Outcome {
        let valid = match validation::validate_ticket(form, self.description_max_len) {
            Ok(valid) => valid,
            Err(errors) => {
                debug!(errors = errors.len(), "App::submit_ticket: invalid form");
                return Outcome::invalid(errors);
            }
        };

        let now = self.now();
        let (saved, message, form) = match &valid.ticket_id {
            Some(id) => (
                self.tickets.update(id, valid.to_changes(), now).map(|_| ()),
                MSG_TICKET_UPDATED,
                None,
            ),
            None => (
                self.tickets.create(valid.to_new_ticket(), now).map(|_| ()),
                MSG_TICKET_CREATED,
                Some(TicketForm::default()),
            ),
        };

        match saved {
            Ok(()) => Outcome {
                toast: Some(Toast::success(message).with_duration(self.ui.short_toast_ms)),
                form,
                tickets_html: self.rendered_tickets(),
                ..Default::default()
            },
            Err(e) => {
                error!("Failed to save ticket: {}", e);
                Outcome::toast(Toast::error(MSG_SAVE_FAILED))
            }
        }
    }

    /// Fill the ticket form from a stored ticket
    pub fn edit_ticket(&self, id: &str) -> Outcome {
        match self.tickets.get(id) {
            Some(ticket) => Outcome {
                form: Some(TicketForm {
                    ticket_id: Some(ticket.id),
                    title: ticket.title,
                    status: ticket.status.as_str().to_string(),
                    description: ticket.description,
                }),
                ..Default::default()
            },
            None => Outcome::toast(Toast::error(MSG_TICKET_NOT_FOUND)),
        }
    }

    pub fn delete_ticket(&self, id: &str) -> Outcome {
        match self.tickets.delete(id) {
            Ok(_) => Outcome {
                toast: Some(Toast::success(MSG_TICKET_DELETED)),
                tickets_html: self.rendered_tickets(),
                ..Default::default()
            },
            Err(e) => {
                error!("Failed to delete ticket: {}", e);
                Outcome::toast(Toast::error(MSG_DELETE_FAILED))
            }
        }
    }

    pub fn tickets_fragment(&self) -> Result<String, RenderError> {
        self.renderer.tickets(&self.tickets.list())
    }

    pub fn stats_fragment(&self) -> Result<String, RenderError> {
        self.renderer.stats(&self.tickets.stats())
    }

    fn rendered_tickets(&self) -> Option<String> {
        self.tickets_fragment()
            .map_err(|e| warn!("Failed to render tickets: {}", e))
            .ok()
    }

    fn rendered_stats(&self) -> Option<String> {
        self.stats_fragment()
            .map_err(|e| warn!("Failed to render stats: {}", e))
            .ok()
    }
}
