//! ticketapp CLI
//!
//! Drives the page controller from a terminal. The storage file plays the
//! role of the browser's local storage.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use tracing::{debug, info};

use ticketapp::cli::{Cli, Command, OutputFormat, TicketCommand};
use ticketapp::render::format_timestamp;
use ticketapp::{
    App, Clock, Config, FileStore, LoginForm, Outcome, PageLoad, SignupForm, SystemClock, Ticket, TicketForm, ToastKind,
};

fn setup_logging(verbose: bool) -> Result<()> {
    // Logs go to stderr so command output stays clean on stdout
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
    let store_path = cli.store.clone().unwrap_or_else(|| config.storage.path.clone());
    let store = FileStore::open(&store_path).context(format!("Failed to open store {}", store_path.display()))?;
    info!("ticketapp using store {}", store_path.display());

    let app = App::new(Arc::new(store), Arc::new(SystemClock), &config).context("Failed to load fragment templates")?;
    let format = cli.format;

    match cli.command {
        Command::Login { email, password } => finish(app.login(&LoginForm { email, password }), format),
        Command::Signup {
            email,
            password,
            confirm,
        } => {
            let confirm_password = confirm.unwrap_or_else(|| password.clone());
            finish(
                app.signup(&SignupForm {
                    email,
                    password,
                    confirm_password,
                }),
                format,
            )
        }
        Command::Logout => finish(app.logout(), format),
        Command::Whoami => cmd_whoami(&app, format),
        Command::Open { path } => cmd_open(&app, &path, format),
        Command::Ticket { command } => cmd_ticket(&app, command, format),
        Command::Stats => cmd_stats(&app, format),
    }
}

/// Print an outcome; forms with errors and failed actions exit non-zero
fn finish(outcome: Outcome, format: OutputFormat) -> Result<()> {
    print_outcome(&outcome, format)?;

    if !outcome.errors.is_empty() {
        return Err(eyre!("Form has {} invalid field(s)", outcome.errors.len()));
    }
    if let Some(toast) = &outcome.toast
        && toast.kind == ToastKind::Error
    {
        return Err(eyre!("{}", toast.message));
    }
    Ok(())
}

fn print_outcome(outcome: &Outcome, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    if let Some(toast) = &outcome.toast {
        let message = match toast.kind {
            ToastKind::Success => format!("{} {}", "✓".green(), toast.message),
            ToastKind::Info => format!("{} {}", "i".cyan(), toast.message),
            ToastKind::Error => format!("{} {}", "✗".red(), toast.message.red()),
        };
        println!("{}", message);
    }
    for (field, message) in outcome.errors.iter() {
        println!("  {}: {}", field.to_string().yellow(), message.red());
    }
    if let Some(redirect) = &outcome.redirect {
        println!(
            "{}",
            format!("→ {} after {}ms", redirect.to, redirect.delay_ms).dimmed()
        );
    }
    Ok(())
}

fn cmd_whoami(app: &App, format: OutputFormat) -> Result<()> {
    let session = app.sessions().current(SystemClock.now_ms());
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&session)?),
        OutputFormat::Text => match session {
            Some(session) => {
                println!("{}", session.email.cyan());
                if let Some(expires) = session.expires {
                    println!("  expires: {}", format_timestamp(expires));
                }
            }
            None => println!("Not logged in"),
        },
    }
    Ok(())
}

fn cmd_open(app: &App, path: &str, format: OutputFormat) -> Result<()> {
    let load = app.load_page(path);
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&load)?);
        return Ok(());
    }

    print_page_load(&load);
    print_outcome(&load.guard, format)
}

fn print_page_load(load: &PageLoad) {
    println!("Page: {} ({})", load.page.to_string().cyan(), load.page.route());

    let header = &load.header;
    println!("Header: {:?}", header.state);
    let rows = [
        ("nav-guest", header.nav_guest),
        ("nav-auth", header.nav_auth),
        ("logoutBtn", header.logout_btn),
        ("tickets link", header.tickets_link),
        ("dashboard link", header.dashboard_link),
    ];
    for (name, display) in rows {
        let css = display.as_css();
        let css = if display.is_visible() { css.green() } else { css.dimmed() };
        println!("  {:<15} {}", name, css);
    }

    if let Some(html) = &load.stats_html {
        println!("#dashboardStats:\n{}", html.trim());
    }
    if let Some(html) = &load.tickets_html {
        println!("#ticketsContainer:\n{}", html.trim());
    }
}

fn cmd_ticket(app: &App, command: TicketCommand, format: OutputFormat) -> Result<()> {
    match command {
        TicketCommand::List => {
            let tickets = app.tickets().list();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tickets)?),
                OutputFormat::Text if tickets.is_empty() => println!("No tickets yet"),
                OutputFormat::Text => tickets.iter().for_each(print_ticket_line),
            }
            Ok(())
        }
        TicketCommand::Show { id } => {
            let ticket = app
                .tickets()
                .get(&id)
                .ok_or_else(|| eyre!("Ticket not found: {}", id))?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ticket)?),
                OutputFormat::Text => print_ticket_detail(&ticket),
            }
            Ok(())
        }
        TicketCommand::Create {
            title,
            status,
            description,
        } => finish(
            app.submit_ticket(&TicketForm {
                ticket_id: None,
                title,
                status,
                description,
            }),
            format,
        ),
        TicketCommand::Update {
            id,
            title,
            status,
            description,
        } => {
            let loaded = app.edit_ticket(&id);
            let Some(mut form) = loaded.form.clone() else {
                return finish(loaded, format);
            };
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(status) = status {
                form.status = status;
            }
            if let Some(description) = description {
                form.description = description;
            }
            finish(app.submit_ticket(&form), format)
        }
        TicketCommand::Delete { id, yes } => {
            if !yes && !confirm("Delete this ticket? This action cannot be undone.")? {
                println!("Cancelled");
                return Ok(());
            }
            finish(app.delete_ticket(&id), format)
        }
    }
}

fn cmd_stats(app: &App, format: OutputFormat) -> Result<()> {
    let stats = app.tickets().stats();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => {
            println!("Total tickets:    {}", stats.total);
            println!("Open tickets:     {}", stats.open.to_string().green());
            println!("Resolved tickets: {}", stats.resolved.to_string().dimmed());
        }
    }
    Ok(())
}

fn print_ticket_line(ticket: &Ticket) {
    println!(
        "{}  {:<12} {}",
        ticket.id.yellow(),
        format!("[{}]", ticket.status.label()),
        ticket.title
    );
}

fn print_ticket_detail(ticket: &Ticket) {
    println!("{} {}", ticket.id.yellow(), ticket.title);
    println!("  status:  {}", ticket.status.label());
    println!("  created: {}", format_timestamp(ticket.created_at));
    if let Some(updated) = ticket.updated_at {
        println!("  updated: {}", format_timestamp(updated));
    }
    if !ticket.description.is_empty() {
        println!();
        println!("{}", ticket.description);
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
