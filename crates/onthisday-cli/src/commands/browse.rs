//! Interactive browsing over the session cache.
//!
//! A `Selection` holds what the user is looking at. Every change re-derives
//! the list from the cache; only a date change can trigger a fetch, and only
//! when that date is not cached yet.

use std::io::{Lines, StdinLock};

use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use onthisday_core::query::sort_events;
use onthisday_core::{AppState, DateKey, Event, SortDirection, SortKey, SortOrder};

use crate::app::{AppContext, Settings};
use crate::cli::BrowseArgs;
use crate::config::ViewMode;
use crate::constants::APP_NAME;
use crate::errors::{describe, CliError};
use crate::helpers::{parse_date, parse_output_format, Category};
use crate::output::{print_event_list, Listing};
use crate::ui::{badge, divider, hint, kv, print, print_error, Badge, UiContext};

const HELP: &str = "\
Commands:
  date <date>            switch day (e.g. \"date 9/25\", \"date today\")
  type <category|all>    events, births, deaths or all
  search <text>          filter by text (case-insensitive)
  clear                  clear the search
  view grid|table        change layout
  sort year|text [desc]  sort the list; \"sort off\" restores source order
  totals                 toggle per-category totals
  dates                  list cached dates
  help                   show this help
  quit                   leave";

/// What the user is currently looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub date: DateKey,
    pub category: Category,
    pub search: String,
    pub view: ViewMode,
    pub sort: Option<SortOrder>,
    pub show_totals: bool,
}

impl Selection {
    pub fn new(date: DateKey, view: ViewMode, settings: &Settings) -> Self {
        Self {
            date,
            category: settings.default_category,
            search: String::new(),
            view,
            sort: None,
            show_totals: settings.show_totals,
        }
    }

    /// Apply a command that only changes the selection.
    ///
    /// Returns `false` for commands that need the session (date changes,
    /// listings, help, quit), which the caller handles.
    pub fn apply(&mut self, command: &BrowseCommand) -> bool {
        match command {
            BrowseCommand::Type(category) => self.category = *category,
            BrowseCommand::Search(text) => self.search = text.clone(),
            BrowseCommand::Clear => self.search.clear(),
            BrowseCommand::View(view) => self.view = *view,
            BrowseCommand::Sort(order) => self.sort = *order,
            BrowseCommand::Totals => self.show_totals = !self.show_totals,
            BrowseCommand::Redraw => {}
            BrowseCommand::Date(_)
            | BrowseCommand::Dates
            | BrowseCommand::Help
            | BrowseCommand::Quit => return false,
        }
        true
    }

    /// Derive the visible list from the cache.
    pub fn events(&self, state: &AppState) -> Vec<Event> {
        let mut events = state.data_for(self.category.event_type(), Some(self.date), &self.search);
        if let Some(order) = self.sort {
            sort_events(&mut events, order);
        }
        events
    }
}

/// One line typed at the browse prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Date(DateKey),
    Type(Category),
    Search(String),
    Clear,
    View(ViewMode),
    Sort(Option<SortOrder>),
    Totals,
    Dates,
    Help,
    Quit,
    /// Empty line
    Redraw,
}

/// Parse a prompt line.
pub fn parse_command(line: &str) -> Result<BrowseCommand, CliError> {
    let trimmed = line.trim();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Ok(BrowseCommand::Redraw),
        "date" | "d" => {
            if rest.is_empty() {
                return Err(CliError::invalid_input("Usage: date <date>"));
            }
            DateKey::parse(rest)
                .map(BrowseCommand::Date)
                .map_err(|e| CliError::invalid_input(e.to_string()))
        }
        "type" | "t" => rest
            .parse::<Category>()
            .map(BrowseCommand::Type)
            .map_err(|e| CliError::invalid_input(e.to_string())),
        "search" | "s" | "/" => {
            if rest.is_empty() {
                Ok(BrowseCommand::Clear)
            } else {
                Ok(BrowseCommand::Search(rest.to_string()))
            }
        }
        "clear" => Ok(BrowseCommand::Clear),
        "view" | "v" => match rest.to_ascii_lowercase().as_str() {
            "grid" => Ok(BrowseCommand::View(ViewMode::Grid)),
            "table" => Ok(BrowseCommand::View(ViewMode::Table)),
            _ => Err(CliError::invalid_input("Usage: view grid|table")),
        },
        "sort" => parse_sort(rest),
        "totals" => Ok(BrowseCommand::Totals),
        "dates" => Ok(BrowseCommand::Dates),
        "help" | "?" => Ok(BrowseCommand::Help),
        "quit" | "q" | "exit" => Ok(BrowseCommand::Quit),
        other => Err(CliError::invalid_input(format!(
            "Unknown command: {}",
            other
        ))),
    }
}

fn parse_sort(rest: &str) -> Result<BrowseCommand, CliError> {
    let mut parts = rest.split_whitespace().map(|part| part.to_ascii_lowercase());
    let key = match parts.next().as_deref() {
        Some("off") | Some("none") => return Ok(BrowseCommand::Sort(None)),
        Some("year") => SortKey::Year,
        Some("text") => SortKey::Text,
        _ => return Err(CliError::invalid_input("Usage: sort year|text [desc]")),
    };
    let direction = match parts.next().as_deref() {
        None | Some("asc") => SortDirection::Ascending,
        Some("desc") => SortDirection::Descending,
        Some(_) => return Err(CliError::invalid_input("Usage: sort year|text [desc]")),
    };
    Ok(BrowseCommand::Sort(Some(SortOrder::new(key, direction))))
}

/// Where prompt lines come from: a dialoguer prompt on a terminal, plain
/// stdin lines otherwise.
enum LineInput {
    Prompt(ColorfulTheme),
    Piped(Lines<StdinLock<'static>>),
}

impl LineInput {
    fn new(ui: &UiContext) -> Self {
        if ui.is_interactive() {
            LineInput::Prompt(ColorfulTheme::default())
        } else {
            LineInput::Piped(std::io::stdin().lines())
        }
    }

    /// Next line, or `None` at end of input.
    fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        match self {
            LineInput::Prompt(theme) => {
                let line: String = Input::with_theme(&*theme)
                    .with_prompt(APP_NAME)
                    .allow_empty(true)
                    .interact_text()?;
                Ok(Some(line))
            }
            LineInput::Piped(lines) => Ok(lines.next().transpose()?),
        }
    }
}

pub fn handle_browse(ctx: &AppContext, args: &BrowseArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;
    let ui = ctx.ui_context(false, format, None);

    let date = parse_date(args.date.as_deref(), ctx.state().default_date())?;
    ctx.fetch_day(&ui, date)?;

    let mut selection = Selection::new(date, ui.view, ctx.settings());
    let initial = (selection.view, selection.show_totals);
    let mut input = LineInput::new(&ui);

    render(ctx, &ui, &selection);
    if ui.is_interactive() {
        print(&ui, &hint(&ui, "type `help` for commands, `quit` to leave"));
    }

    while let Some(line) = input.next_line()? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                print_error(&ui, &err.to_string(), Some("Type `help` for commands."));
                continue;
            }
        };
        tracing::debug!(?command, "browse command");

        if selection.apply(&command) {
            render(ctx, &ui, &selection);
            continue;
        }
        match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => print(&ui, HELP),
            BrowseCommand::Dates => {
                let dates: Vec<String> = ctx
                    .state()
                    .cached_dates()
                    .iter()
                    .map(DateKey::to_string)
                    .collect();
                print(&ui, &kv(&ui, "Cached", &dates.join(", ")));
            }
            BrowseCommand::Date(date) => match ctx.fetch_day(&ui, date) {
                Ok(_) => {
                    selection.date = date;
                    render(ctx, &ui, &selection);
                }
                Err(err) => {
                    let (message, error_hint) = describe(&err);
                    print_error(&ui, &message, error_hint.as_deref());
                }
            },
            _ => {}
        }
    }

    if (selection.view, selection.show_totals) != initial {
        match ctx.save_preferences(selection.view, selection.show_totals) {
            Ok(()) if !ctx.quiet() => {
                print(&ui, &badge(&ui, Badge::Ok, "Preferences saved"));
            }
            Ok(()) => {}
            Err(err) => {
                tracing::warn!(error = %err, "could not save preferences");
                eprintln!("{}", badge(&ui, Badge::Warn, "Preferences were not saved"));
            }
        }
    }
    Ok(())
}

fn render(ctx: &AppContext, ui: &UiContext, selection: &Selection) {
    let state = ctx.state();
    let events = selection.events(state);
    let listing = Listing {
        date: selection.date,
        category: selection.category,
        search: &selection.search,
        events: &events,
        view: selection.view,
        totals: selection
            .show_totals
            .then(|| state.totals_for(Some(selection.date))),
    };
    print(ui, &divider(ui));
    print_event_list(ui, &listing, ctx.quiet());
}
