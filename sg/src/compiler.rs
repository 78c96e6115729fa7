//! Site compiler
//!
//! Renders every known page to `<out>/<page>.html` and lays the assets
//! down next to them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use ticketapp::Page;
use ticketapp::validation::DEFAULT_DESCRIPTION_MAX_LEN;
use tracing::{debug, info};

use crate::assets::copy_assets;
use crate::context::{PageContext, SCRIPT_ASSET};
use crate::error::SiteResult;
use crate::templates::{TemplateLoader, embedded};

/// Assets land under this directory of the output
pub const ASSETS_SUBDIR: &str = "assets";

const STYLESHEET_PATH: &str = "css/style.css";

/// One written page
#[derive(Debug, Clone, Serialize)]
pub struct CompiledPage {
    pub page: Page,
    pub route: &'static str,
    pub template: &'static str,
    pub output: PathBuf,
    pub bytes: usize,
}

/// Summary of a build
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub out_dir: PathBuf,
    pub pages: Vec<CompiledPage>,
    pub assets: usize,
}

/// Compiles the page templates into a static site
pub struct SiteCompiler {
    loader: TemplateLoader,
    out_dir: PathBuf,
    assets_dir: Option<PathBuf>,
    description_max_len: usize,
}

impl SiteCompiler {
    pub fn new(loader: TemplateLoader, out_dir: impl Into<PathBuf>) -> Self {
        let out_dir = out_dir.into();
        debug!(?out_dir, "SiteCompiler::new: called");
        Self {
            loader,
            out_dir,
            assets_dir: None,
            description_max_len: DEFAULT_DESCRIPTION_MAX_LEN,
        }
    }

    /// Copy this directory into `<out>/assets`
    pub fn with_assets(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(dir.into());
        self
    }

    pub fn with_description_max_len(mut self, max_len: usize) -> Self {
        self.description_max_len = max_len;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Whether the assets directory provides the client script
    pub fn ships_script(&self) -> bool {
        self.assets_dir
            .as_ref()
            .is_some_and(|dir| dir.join(SCRIPT_ASSET).is_file())
    }

    /// Render one page without writing it
    pub fn render_page(&self, page: Page) -> SiteResult<String> {
        let mut context = PageContext::new(page, self.description_max_len);
        if self.ships_script() {
            context = context.with_script();
        } else {
            debug!(?page, "SiteCompiler::render_page: no client script, omitting tag");
        }
        self.loader.render(page, &context)
    }

    /// Render and write every page, then copy assets
    pub fn build(&self) -> SiteResult<BuildReport> {
        debug!(out_dir = ?self.out_dir, "SiteCompiler::build: called");
        fs::create_dir_all(&self.out_dir)?;

        let mut pages = Vec::with_capacity(Page::ALL.len());
        for page in Page::ALL {
            let html = self.render_page(page)?;
            let output = self.out_dir.join(page.output_file());
            fs::write(&output, &html)?;
            info!("Compiled {} -> {}", page.template_name(), output.display());
            pages.push(CompiledPage {
                page,
                route: page.route(),
                template: page.template_name(),
                output,
                bytes: html.len(),
            });
        }

        let assets = self.write_assets()?;
        Ok(BuildReport {
            out_dir: self.out_dir.clone(),
            pages,
            assets,
        })
    }

    fn write_assets(&self) -> SiteResult<usize> {
        let dest = self.out_dir.join(ASSETS_SUBDIR);
        let mut written = match &self.assets_dir {
            Some(dir) => copy_assets(dir, &dest)?,
            None => 0,
        };

        let stylesheet = dest.join(STYLESHEET_PATH);
        if !stylesheet.exists() {
            if let Some(parent) = stylesheet.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&stylesheet, embedded::STYLESHEET)?;
            debug!(?stylesheet, "SiteCompiler::write_assets: wrote default stylesheet");
            written += 1;
        }
        Ok(written)
    }
}
