//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// ticketapp - ticket tracker demo backed by a local key-value file
#[derive(Parser, Debug)]
#[command(
    name = "ta",
    author,
    version,
    about = "Ticket tracker demo whose sessions and tickets live in a local key-value file",
    long_about = None
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage file (overrides the configured one)
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in (starts a simulated session)
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Create an account (starts a simulated session)
    Signup {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Password confirmation (defaults to the password)
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Clear the session
    Logout,

    /// Show the current session
    Whoami,

    /// Load a page: guard, header and fragments
    Open {
        /// Request path, e.g. /dashboard
        #[arg(default_value = "/")]
        path: String,
    },

    /// Manage tickets
    Ticket {
        #[command(subcommand)]
        command: TicketCommand,
    },

    /// Show dashboard counters
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum TicketCommand {
    /// List tickets, newest first
    List,

    /// Show one ticket
    Show {
        #[arg(required = true)]
        id: String,
    },

    /// Create a ticket
    Create {
        #[arg(short, long)]
        title: String,

        /// open, in_progress or closed
        #[arg(short = 'S', long, default_value = "open")]
        status: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Edit a ticket; omitted fields keep their current value
    Update {
        #[arg(required = true)]
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short = 'S', long)]
        status: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a ticket
    Delete {
        #[arg(required = true)]
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Output format for command results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
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
    fn test_parse_ticket_create() {
        let cli = Cli::try_parse_from(["ta", "--store", "/tmp/s.json", "ticket", "create", "-t", "Printer"]).unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/s.json")));
        match cli.command {
            Command::Ticket {
                command: TicketCommand::Create { title, status, .. },
            } => {
                assert_eq!(title, "Printer");
                assert_eq!(status, "open");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
