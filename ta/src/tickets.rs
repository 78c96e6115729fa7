//! Ticket collection
//!
//! Tickets are stored as one JSON array under [`TICKETS_KEY`], newest first.
//! Every operation reads the whole array, changes it and writes it back.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ParseStatusError, StoreResult};
use crate::storage::KeyValueStore;

/// Storage key holding the serialized ticket array
pub const TICKETS_KEY: &str = "ticketapp_tickets";

/// Prefix of generated ticket identifiers
pub const TICKET_ID_PREFIX: &str = "t_";

/// Ticket status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [Self::Open, Self::InProgress, Self::Closed];

    /// Wire value, as stored and as used in form `<option>` values
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }

    /// Human label for badges
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in progress",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// A stored ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub status: TicketStatus,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fields supplied when creating a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub status: TicketStatus,
    pub description: String,
}

/// Fields merged into an existing ticket; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketChanges {
    pub title: Option<String>,
    pub status: Option<TicketStatus>,
    pub description: Option<String>,
}

impl Ticket {
    fn apply(&mut self, changes: TicketChanges, now_ms: i64) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        self.updated_at = Some(now_ms);
    }
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub resolved: usize,
}

impl TicketStats {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        Self {
            total: tickets.len(),
            open: tickets.iter().filter(|t| t.status == TicketStatus::Open).count(),
            resolved: tickets.iter().filter(|t| t.status == TicketStatus::Closed).count(),
        }
    }
}

/// CRUD over the ticket array
#[derive(Clone)]
pub struct TicketStore {
    kv: Arc<dyn KeyValueStore>,
}

impl TicketStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// All tickets, newest first. Missing or unreadable data yields an empty list.
    pub fn list(&self) -> Vec<Ticket> {
        let raw = match self.kv.get_item(TICKETS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read tickets: {}", e);
                return Vec::new();
            }
        };

        let records = match serde_json::from_str::<Option<Vec<serde_json::Value>>>(&raw) {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                warn!("Ignoring malformed ticket list: {}", e);
                return Vec::new();
            }
        };

        // One bad record must not cost the rest of the collection
        records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<Ticket>(record) {
                Ok(ticket) => Some(ticket),
                Err(e) => {
                    warn!("Skipping unreadable ticket record: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Replace the whole collection
    pub fn save(&self, tickets: &[Ticket]) -> StoreResult<()> {
        let value = serde_json::to_string(tickets)?;
        self.kv.set_item(TICKETS_KEY, &value)
    }

    pub fn get(&self, id: &str) -> Option<Ticket> {
        self.list().into_iter().find(|t| t.id == id)
    }

    /// Create a ticket stamped at `now_ms` and put it first
    pub fn create(&self, new: NewTicket, now_ms: i64) -> StoreResult<Ticket> {
        let mut tickets = self.list();
        let ticket = Ticket {
            id: unused_id(&tickets, now_ms),
            title: new.title,
            status: new.status,
            description: new.description,
            created_at: now_ms,
            updated_at: None,
        };

        tickets.insert(0, ticket.clone());
        self.save(&tickets)?;
        info!(id = %ticket.id, status = %ticket.status, "Ticket created");
        Ok(ticket)
    }

    /// Merge `changes` into the ticket with `id` and stamp `updatedAt`.
    /// An unknown id leaves the collection untouched.
    pub fn update(&self, id: &str, changes: TicketChanges, now_ms: i64) -> StoreResult<Vec<Ticket>> {
        let mut tickets = self.list();
        match tickets.iter_mut().find(|t| t.id == id) {
            Some(ticket) => {
                ticket.apply(changes, now_ms);
                self.save(&tickets)?;
                info!(%id, "Ticket updated");
            }
            None => debug!(%id, "TicketStore::update: no such ticket"),
        }
        Ok(tickets)
    }

    /// Remove the ticket with `id`. An unknown id leaves the collection untouched.
    pub fn delete(&self, id: &str) -> StoreResult<Vec<Ticket>> {
        let mut tickets = self.list();
        let before = tickets.len();
        tickets.retain(|t| t.id != id);

        if tickets.len() != before {
            self.save(&tickets)?;
            info!(%id, "Ticket deleted");
        } else {
            debug!(%id, "TicketStore::delete: no such ticket");
        }
        Ok(tickets)
    }

    pub fn stats(&self) -> TicketStats {
        TicketStats::from_tickets(&self.list())
    }
}

/// `t_<millis>`, bumping the millisecond part while it collides
fn unused_id(tickets: &[Ticket], now_ms: i64) -> String {
    let mut stamp = now_ms;
    loop {
        let id = format!("{}{}", TICKET_ID_PREFIX, stamp);
        if !tickets.iter().any(|t| t.id == id) {
            return id;
        }
        stamp += 1;
    }
}
