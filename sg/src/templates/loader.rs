//! Template loader
//!
//! Registers the shared partials and every page template with one
//! handlebars registry.

use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use ticketapp::Page;
use tracing::{debug, info};

use super::embedded;
use crate::context::PageContext;
use crate::error::{SiteError, SiteResult};

/// Partials every page may include
pub const PARTIALS: [&str; 2] = ["layout", "header"];

/// Where a template's source came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Override(PathBuf),
    Embedded,
}

/// Loads, compiles and renders page templates
pub struct TemplateLoader {
    hbs: Handlebars<'static>,
    /// Override directory laid out as `<name>.hbs`, e.g. `pages/tickets.hbs`
    user_dir: Option<PathBuf>,
}

impl TemplateLoader {
    /// Create a loader, compiling every template up front
    pub fn new(user_dir: Option<&Path>) -> SiteResult<Self> {
        debug!(?user_dir, "TemplateLoader::new: called");
        if let Some(dir) = user_dir
            && !dir.is_dir()
        {
            return Err(SiteError::TemplatesDirMissing { path: dir.to_path_buf() });
        }

        let mut loader = Self {
            hbs: Handlebars::new(),
            user_dir: user_dir.map(Path::to_path_buf),
        };
        loader.register_all()?;
        Ok(loader)
    }

    /// Create a loader that only uses embedded templates
    pub fn embedded_only() -> SiteResult<Self> {
        Self::new(None)
    }

    /// Resolve where `name` would be loaded from
    pub fn source(&self, name: &str) -> SiteResult<TemplateSource> {
        if let Some(dir) = &self.user_dir {
            let path = dir.join(format!("{}.hbs", name));
            if path.is_file() {
                return Ok(TemplateSource::Override(path));
            }
        }
        if embedded::get_embedded(name).is_some() {
            return Ok(TemplateSource::Embedded);
        }
        Err(SiteError::TemplateNotFound { name: name.to_string() })
    }

    fn load_template(&self, name: &str) -> SiteResult<String> {
        match self.source(name)? {
            TemplateSource::Override(path) => {
                debug!(?path, "TemplateLoader::load_template: found override");
                std::fs::read_to_string(&path).map_err(|source| SiteError::ReadTemplate { path, source })
            }
            TemplateSource::Embedded => {
                debug!(%name, "TemplateLoader::load_template: using embedded");
                embedded::get_embedded(name)
                    .map(str::to_string)
                    .ok_or_else(|| SiteError::TemplateNotFound { name: name.to_string() })
            }
        }
    }

    fn register_all(&mut self) -> SiteResult<()> {
        for name in PARTIALS {
            let content = self.load_template(name)?;
            self.hbs
                .register_partial(name, content)
                .map_err(|e| SiteError::template(name, e))?;
        }

        for page in Page::ALL {
            let name = page.template_name();
            if self.hbs.has_template(name) {
                continue;
            }
            let content = self.load_template(name)?;
            self.hbs
                .register_template_string(name, content)
                .map_err(|e| SiteError::template(name, e))?;
        }

        info!("Registered {} templates", self.hbs.get_templates().len());
        Ok(())
    }

    /// Render the template for `page`
    pub fn render(&self, page: Page, context: &PageContext) -> SiteResult<String> {
        let name = page.template_name();
        debug!(%name, ?page, "TemplateLoader::render: called");
        self.hbs.render(name, context).map_err(|e| SiteError::render(name, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn ctx(page: Page) -> PageContext {
        PageContext::new(page, 2000)
    }

    #[test]
    fn test_embedded_pages_render() {
        let loader = TemplateLoader::embedded_only().unwrap();
        for page in Page::ALL {
            let html = loader.render(page, &ctx(page)).unwrap();
            assert!(html.starts_with("<!DOCTYPE html>"), "{} lacks the layout", page);
            assert!(html.contains("id=\"nav-guest\""));
            assert!(html.contains("id=\"nav-auth\""));
            assert!(html.contains("id=\"logoutBtn\""));
        }
    }

    #[test]
    fn test_protected_marker_only_on_protected_pages() {
        let loader = TemplateLoader::embedded_only().unwrap();
        for page in Page::ALL {
            let html = loader.render(page, &ctx(page)).unwrap();
            assert_eq!(html.contains("data-protected=\"true\""), page.is_protected(), "{}", page);
        }
    }

    #[test]
    fn test_tickets_page_elements() {
        let loader = TemplateLoader::embedded_only().unwrap();
        let html = loader.render(Page::Tickets, &ctx(Page::Tickets)).unwrap();
        assert!(html.contains("id=\"ticketForm\""));
        assert!(html.contains("name=\"ticketId\""));
        assert!(html.contains("id=\"ticketsContainer\""));
        assert!(html.contains("id=\"resetTicket\""));
        assert!(html.contains("<option value=\"in_progress\">in progress</option>"));
        assert!(html.contains("maxlength=\"2000\""));
    }

    #[test]
    fn test_not_found_page_reuses_landing() {
        let loader = TemplateLoader::embedded_only().unwrap();
        let html = loader.render(Page::NotFound, &ctx(Page::NotFound)).unwrap();
        assert!(html.contains("Page not found"));
        assert!(!html.contains("class=\"features\""));
    }

    #[test]
    fn test_override_wins_over_embedded() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("pages")).unwrap();
        fs::write(
            temp.path().join("pages/dashboard.hbs"),
            "{{#> layout}}<p>custom {{title}}</p>{{/layout}}",
        )
        .unwrap();

        let loader = TemplateLoader::new(Some(temp.path())).unwrap();
        assert_eq!(
            loader.source("pages/dashboard").unwrap(),
            TemplateSource::Override(temp.path().join("pages/dashboard.hbs"))
        );
        assert_eq!(loader.source("pages/tickets").unwrap(), TemplateSource::Embedded);

        let html = loader.render(Page::Dashboard, &ctx(Page::Dashboard)).unwrap();
        assert!(html.contains("<p>custom Dashboard</p>"));
        assert!(html.contains("id=\"nav-auth\""));
    }

    #[test]
    fn test_broken_override_fails_to_compile() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("header.hbs"), "{{#if broken}}unclosed").unwrap();

        let result = TemplateLoader::new(Some(temp.path()));
        assert!(matches!(result, Err(SiteError::Template { .. })));
    }

    #[test]
    fn test_missing_override_dir() {
        let result = TemplateLoader::new(Some(Path::new("/definitely/not/here")));
        assert!(matches!(result, Err(SiteError::TemplatesDirMissing { .. })));
    }

    #[test]
    fn test_unknown_template_not_found() {
        let loader = TemplateLoader::embedded_only().unwrap();
        assert!(matches!(
            loader.source("pages/unknown"),
            Err(SiteError::TemplateNotFound { .. })
        ));
    }
}
