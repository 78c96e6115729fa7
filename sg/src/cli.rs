//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sitegen - compiles the ticketapp pages into static HTML
#[derive(Parser, Debug)]
#[command(
    name = "sg",
    author,
    version,
    about = "Compiles the ticketapp page templates into a static site",
    long_about = None
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render every page into the output directory
    Build {
        /// Template override directory
        #[arg(short, long)]
        templates: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Static assets to copy under <out>/assets
        #[arg(short, long)]
        assets: Option<PathBuf>,
    },

    /// Render one page to stdout
    Render {
        /// Request path, e.g. /auth/login
        path: String,

        /// Template override directory
        #[arg(short, long)]
        templates: Option<PathBuf>,
    },

    /// List pages with their routes and output files
    Pages {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a request path to a page
    Route {
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["sg", "build", "--out", "site", "-a", "public"]).unwrap();
        match cli.command {
            Command::Build { templates, out, assets } => {
                assert!(templates.is_none());
                assert_eq!(out, Some(PathBuf::from("site")));
                assert_eq!(assets, Some(PathBuf::from("public")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_route_requires_path() {
        assert!(Cli::try_parse_from(["sg", "route"]).is_err());
    }
}
