//! Page templates
//!
//! Templates resolve from an optional override directory first and fall
//! back to the copies embedded in the binary.

pub mod embedded;
mod loader;

pub use loader::{PARTIALS, TemplateLoader, TemplateSource};
