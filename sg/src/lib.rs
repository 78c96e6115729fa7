//! sitegen - static site compiler for ticketapp
//!
//! Renders each [`ticketapp::Page`] through handlebars into a flat directory
//! of HTML files. Templates share one layout and one header partial; any of
//! them can be overridden from a directory of `<name>.hbs` files.
//!
//! # Output
//!
//! ```text
//! dist/
//!   index.html  login.html  signup.html  dashboard.html  tickets.html  404.html
//!   assets/css/style.css
//! ```

pub mod assets;
pub mod cli;
pub mod compiler;
pub mod context;
pub mod error;
pub mod templates;

pub use compiler::{BuildReport, CompiledPage, SiteCompiler};
pub use context::PageContext;
pub use error::{SiteError, SiteResult};
pub use templates::{TemplateLoader, TemplateSource};
