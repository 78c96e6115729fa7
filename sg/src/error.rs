//! Site compiler error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading templates or writing the site
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    #[error("Templates directory does not exist: {}", path.display())]
    TemplatesDirMissing { path: PathBuf },

    #[error("Failed to read template {}: {source}", path.display())]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template {name} does not compile: {source}")]
    Template {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("Failed to render {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("Failed to walk assets: {0}")]
    Walk(#[from] walkdir::Error),
}

impl SiteError {
    pub fn template(name: &str, source: handlebars::TemplateError) -> Self {
        Self::Template {
            name: name.to_string(),
            source: Box::new(source),
        }
    }

    pub fn render(name: &str, source: handlebars::RenderError) -> Self {
        Self::Render {
            name: name.to_string(),
            source: Box::new(source),
        }
    }
}

pub type SiteResult<T> = Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_not_found_display() {
        let err = SiteError::TemplateNotFound {
            name: "pages/nope".to_string(),
        };
        assert_eq!(err.to_string(), "Template not found: pages/nope");
    }

    #[test]
    fn test_missing_dir_display() {
        let err = SiteError::TemplatesDirMissing {
            path: PathBuf::from("/no/such/dir"),
        };
        assert!(err.to_string().contains("/no/such/dir"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SiteError = io.into();
        assert!(matches!(err, SiteError::Io(_)));
    }
}
