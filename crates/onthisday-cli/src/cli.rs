use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use onthisday_core::{SortDirection, SortKey, SortOrder, VERSION};

use crate::config::ViewMode;
use crate::helpers::parsing::Category;

/// On This Day - historical events, births and deaths for any calendar day
#[derive(Parser)]
#[command(name = "onthisday")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the "on this day" service
    #[arg(long, global = true, env = "ONTHISDAY_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols and table borders only
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Column to sort results by
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Year,
    Text,
}

impl SortArg {
    pub fn order(self, descending: bool) -> SortOrder {
        let key = match self {
            SortArg::Year => SortKey::Year,
            SortArg::Text => SortKey::Text,
        };
        let direction = if descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        SortOrder::new(key, direction)
    }
}

/// Arguments for the `show` command
#[derive(Args, Default)]
pub struct ShowArgs {
    /// Date to show (e.g. "September 25", "9/25", "today"); defaults to today
    #[arg(value_name = "DATE")]
    pub date: Option<String>,

    /// Category to show (events, births, deaths, all)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub category: Option<Category>,

    /// Only show events whose text contains this (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Layout of the result list
    #[arg(long, value_enum)]
    pub view: Option<ViewMode>,

    /// Sort results
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Reverse the sort order
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Show per-category totals
    #[arg(long, overrides_with = "no_totals")]
    pub totals: bool,

    /// Hide per-category totals
    #[arg(long, overrides_with = "totals")]
    pub no_totals: bool,
}

impl ShowArgs {
    /// Explicit totals preference, if either flag was given.
    pub fn totals_override(&self) -> Option<bool> {
        if self.totals {
            Some(true)
        } else if self.no_totals {
            Some(false)
        } else {
            None
        }
    }
}

/// Arguments for the `counts` command
#[derive(Args)]
pub struct CountsArgs {
    /// Date to count (defaults to today)
    #[arg(value_name = "DATE")]
    pub date: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `browse` command
#[derive(Args)]
pub struct BrowseArgs {
    /// Date to open (defaults to today)
    #[arg(value_name = "DATE")]
    pub date: Option<String>,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show events, births or deaths for a date
    Show(ShowArgs),

    /// Show per-category totals for a date
    Counts(CountsArgs),

    /// Browse interactively: change date, category and search without refetching
    Browse(BrowseArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
