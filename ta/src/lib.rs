//! ticketapp - ticket tracker demo backed by a local key-value store
//!
//! A ticket tracker with no server behind it. Login state and tickets are
//! serialized JSON under two fixed keys of a key-value store, the shape of
//! browser local storage. Passwords are checked for shape only and the
//! session token is never verified by anything but its own expiry.
//!
//! # Storage keys
//!
//! ```text
//! ticketapp_session   {"email": "...", "token": "...", "expires": 1700000000000}
//! ticketapp_tickets   [{"id": "t_1700000000000", "title": "...", "status": "open", ...}, ...]
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ticketapp::{App, Config, MemoryStore, SystemClock, TicketForm};
//!
//! let app = App::new(Arc::new(MemoryStore::new()), Arc::new(SystemClock), &Config::default())?;
//! let outcome = app.submit_ticket(&TicketForm {
//!     title: "Printer jammed".into(),
//!     status: "open".into(),
//!     ..Default::default()
//! });
//! ```
//!
//! # Modules
//!
//! - [`storage`] - key-value trait with memory and JSON-file backends
//! - [`session`] - simulated session
//! - [`tickets`] - ticket CRUD
//! - [`header`] - header visibility state machine
//! - [`validation`] - form models and checks
//! - [`app`] - page controller tying it together

pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod dom;
pub mod error;
pub mod header;
pub mod page;
pub mod render;
pub mod session;
pub mod storage;
pub mod tickets;
pub mod toast;
pub mod validation;

pub use app::{App, Outcome, PageLoad, Redirect};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use dom::DomIds;
pub use error::{ParseStatusError, RenderError, StoreError, StoreResult};
pub use header::{Display, HeaderEvent, HeaderState, HeaderView};
pub use page::Page;
pub use render::Renderer;
pub use session::{SESSION_KEY, Session, SessionStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use tickets::{NewTicket, TICKETS_KEY, Ticket, TicketChanges, TicketStats, TicketStatus, TicketStore};
pub use toast::{Toast, ToastKind};
pub use validation::{Field, FieldErrors, LoginForm, SignupForm, TicketForm};
