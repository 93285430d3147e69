//! Text, card and table output formatting for events.

use onthisday_core::{CategoryTotals, DateKey, Event, EventType};

use crate::config::ViewMode;
use crate::constants::TITLE;
use crate::helpers::Category;
use crate::ui::format::{plural, single_line, truncate, wrap};
use crate::ui::render::grid_columns;
use crate::ui::theme::{styled, styles, symbols};
use crate::ui::{
    badge, blank_line, card_grid, header, kv, print, simple_table, table, Badge, Column, UiContext,
};

/// Longest link title shown on a card.
const LINK_TITLE_MAX: usize = 40;

/// List title, e.g. "On This Day - Births"; "On This Day" for all categories.
pub fn list_title(category: Category) -> String {
    match category.event_type() {
        Some(kind) => format!("{} - {}", TITLE, kind.label()),
        None => TITLE.to_string(),
    }
}

/// Render one event as a card: year, wrapped text and related links.
pub fn event_card(ctx: &UiContext, event: &Event, width: usize) -> String {
    let mut lines = Vec::new();
    let arrow = symbols::LINK.get(ctx.unicode);

    if ctx.mode.is_pretty() {
        lines.push(styled(&event.year, styles::bold(), ctx.color));
        lines.extend(wrap(&single_line(&event.text), width));
        for link in &event.links {
            let title = truncate(&link.title, LINK_TITLE_MAX, ctx.unicode);
            lines.push(styled(
                &format!("{} {}", arrow, title),
                styles::accent(),
                ctx.color,
            ));
        }
    } else {
        lines.push(format!("{}\t{}", event.year, single_line(&event.text)));
        for link in &event.links {
            lines.push(format!("  {} {} {}", arrow, link.title, link.url));
        }
    }

    lines.join("\n")
}

/// Related links for a table row: one arrow-prefixed title per line when
/// pretty, space-separated URLs when plain.
fn link_cell(ctx: &UiContext, event: &Event) -> String {
    if ctx.mode.is_pretty() {
        let arrow = symbols::LINK.get(ctx.unicode);
        event
            .links
            .iter()
            .map(|link| format!("{} {}", arrow, truncate(&link.title, LINK_TITLE_MAX, ctx.unicode)))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        event
            .links
            .iter()
            .map(|link| link.url.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Render a result list in the requested layout.
pub fn render_events(ctx: &UiContext, events: &[Event], view: ViewMode) -> String {
    match view {
        ViewMode::Grid => {
            let columns = grid_columns(ctx.width);
            // Border and padding take roughly four columns per card.
            let card_width = (ctx.width / columns).saturating_sub(4).max(16);
            let cards: Vec<String> = events
                .iter()
                .map(|event| event_card(ctx, event, card_width))
                .collect();
            card_grid(ctx, &cards)
        }
        ViewMode::Table => {
            let columns = [Column::new("Year"), Column::new("Title"), Column::new("Links")];
            let rows: Vec<Vec<String>> = events
                .iter()
                .map(|event| {
                    vec![
                        event.year.clone(),
                        single_line(&event.text),
                        link_cell(ctx, event),
                    ]
                })
                .collect();
            table(ctx, &columns, &rows)
        }
    }
}

/// One-line per-category totals.
///
/// Pretty mode: "Events: 5  Births: 3  Deaths: 1  Total: 9"
/// Plain mode: "events=5 births=3 deaths=1 total=9"
pub fn render_totals(ctx: &UiContext, totals: &CategoryTotals) -> String {
    let mut parts: Vec<String> = EventType::ALL
        .iter()
        .map(|kind| kv(ctx, kind.label(), &totals.get(*kind).to_string()))
        .collect();
    parts.push(kv(ctx, "Total", &totals.total().to_string()));
    let separator = if ctx.mode.is_pretty() { "  " } else { " " };
    parts.join(separator)
}

/// Category/Count table for the `counts` command.
pub fn render_counts(ctx: &UiContext, totals: &CategoryTotals) -> String {
    if !ctx.mode.is_pretty() {
        let mut lines: Vec<String> = EventType::ALL
            .iter()
            .map(|kind| format!("{}={}", kind.label().to_lowercase(), totals.get(*kind)))
            .collect();
        lines.push(format!("total={}", totals.total()));
        return lines.join("\n");
    }

    let columns = [Column::new("Category"), Column::new("Count")];
    let mut rows: Vec<Vec<String>> = EventType::ALL
        .iter()
        .map(|kind| vec![kind.label().to_string(), totals.get(*kind).to_string()])
        .collect();
    rows.push(vec!["Total".to_string(), totals.total().to_string()]);
    simple_table(ctx, &columns, &rows)
}

/// Summary line under a list, e.g. "3 events matching \"moon\"".
pub fn result_summary(ctx: &UiContext, count: usize, search: &str) -> String {
    let trimmed = search.trim();
    if ctx.mode.is_pretty() {
        let base = plural(count, "event");
        let line = if trimmed.is_empty() {
            base
        } else {
            format!("{} matching \"{}\"", base, trimmed)
        };
        styled(&line, styles::dim(), ctx.color)
    } else if trimmed.is_empty() {
        format!("count={}", count)
    } else {
        format!("count={} search={}", count, trimmed)
    }
}

/// A derived result list and how to present it.
pub struct Listing<'a> {
    pub date: DateKey,
    pub category: Category,
    pub search: &'a str,
    pub events: &'a [Event],
    pub view: ViewMode,
    /// Shown under the list when present
    pub totals: Option<CategoryTotals>,
}

/// Print a listing: title, list (or an empty notice), summary and totals.
///
/// Quiet mode prints the list only.
pub fn print_event_list(ctx: &UiContext, listing: &Listing<'_>, quiet: bool) {
    if !quiet {
        let date = listing.date.to_string();
        print(ctx, &header(ctx, &list_title(listing.category), Some(&date)));
        blank_line(ctx);
    }

    if listing.events.is_empty() {
        if ctx.mode.is_pretty() && !quiet {
            print(ctx, &badge(ctx, Badge::Info, "No events found"));
        }
    } else {
        print(ctx, &render_events(ctx, listing.events, listing.view));
    }

    if quiet {
        return;
    }
    blank_line(ctx);
    print(
        ctx,
        &result_summary(ctx, listing.events.len(), listing.search),
    );
    if let Some(totals) = &listing.totals {
        print(ctx, &render_totals(ctx, totals));
    }
}
