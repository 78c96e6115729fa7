//! Error types for the ticketapp library

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a key-value backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store file {path} is not a key-value map: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while rendering HTML fragments
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid fragment template: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Failed to render fragment: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// A status string outside the fixed ticket enumeration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown ticket status: {0}")]
pub struct ParseStatusError(pub String);
