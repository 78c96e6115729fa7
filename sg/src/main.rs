//! sitegen CLI

use std::io;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::debug;

use sitegen::cli::{Cli, Command};
use sitegen::{SiteCompiler, TemplateLoader};
use ticketapp::{Config, Page};

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    debug!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Build { templates, out, assets } => {
            let templates = templates.or(config.site.templates_dir.clone());
            let out = out.unwrap_or_else(|| config.site.out_dir.clone());
            let assets = assets.or(config.site.assets_dir.clone());

            let loader = TemplateLoader::new(templates.as_deref()).context("Failed to load templates")?;
            let mut compiler =
                SiteCompiler::new(loader, &out).with_description_max_len(config.tickets.description_max_len);
            if let Some(assets) = assets {
                compiler = compiler.with_assets(assets);
            }

            let report = compiler.build().context(format!("Failed to build site into {}", out.display()))?;
            for compiled in &report.pages {
                println!(
                    "{} {:<13} -> {} ({} bytes)",
                    "✓".green(),
                    compiled.route,
                    compiled.output.display(),
                    compiled.bytes
                );
            }
            println!(
                "Built {} pages and {} assets into {}",
                report.pages.len(),
                report.assets,
                report.out_dir.display().to_string().cyan()
            );
            Ok(())
        }
        Command::Render { path, templates } => {
            let templates = templates.or(config.site.templates_dir.clone());
            let loader = TemplateLoader::new(templates.as_deref()).context("Failed to load templates")?;
            let mut compiler = SiteCompiler::new(loader, &config.site.out_dir)
                .with_description_max_len(config.tickets.description_max_len);
            if let Some(assets) = config.site.assets_dir.clone() {
                compiler = compiler.with_assets(assets);
            }
            print!("{}", compiler.render_page(Page::from_path(&path))?);
            Ok(())
        }
        Command::Pages { json } => {
            if json {
                let pages: Vec<_> = Page::ALL
                    .iter()
                    .map(|page| {
                        serde_json::json!({
                            "page": page,
                            "route": page.route(),
                            "template": page.template_name(),
                            "output": page.output_file(),
                            "protected": page.is_protected(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&pages)?);
            } else {
                for page in Page::ALL {
                    let marker = if page.is_protected() { "protected".yellow() } else { "".normal() };
                    println!(
                        "{:<10} {:<13} {:<18} {:<15} {}",
                        page.to_string(),
                        page.route(),
                        page.template_name(),
                        page.output_file(),
                        marker
                    );
                }
            }
            Ok(())
        }
        Command::Route { path } => {
            let page = Page::from_path(&path);
            println!("{} {} {}", page, page.route(), page.output_file());
            Ok(())
        }
    }
}
