//! On This Day CLI - historical events, births and deaths for any calendar day
//!
//! This is the command-line interface for On This Day. It provides a
//! user-friendly interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands, ShowArgs};
use crate::commands::{browse, counts, misc, show};
use crate::config::ViewMode;
use crate::ui::{print_error, OutputRequest, UiContext};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        let request = OutputRequest {
            no_color: cli.no_color,
            ascii: cli.ascii,
            ..OutputRequest::default()
        };
        let ui_ctx = UiContext::from_env(request, ViewMode::default());
        let (message, hint) = errors::describe(&e);
        print_error(&ui_ctx, &message, hint.as_deref());
        std::process::exit(errors::exit_code(&e));
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "onthisday={level},onthisday_core={level}",
            level = default_level
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    // Completions need neither config nor network
    if let Some(Commands::Completions(args)) = &cli.command {
        return misc::handle_completions(args);
    }

    let ctx = AppContext::new(cli)?;
    match &cli.command {
        Some(Commands::Show(args)) => show::handle_show(&ctx, args),
        Some(Commands::Counts(args)) => counts::handle_counts(&ctx, args),
        Some(Commands::Browse(args)) => browse::handle_browse(&ctx, args),
        Some(Commands::Completions(_)) => Ok(()),
        None => show::handle_show(&ctx, &ShowArgs::default()),
    }
}
