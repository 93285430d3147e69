use onthisday_core::query::sort_events;
use onthisday_core::{DateKey, Day};

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::errors::CliError;
use crate::helpers::{parse_date, parse_output_format};
use crate::output::{print_event_list, show_json, Listing};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;
    let ui = ctx.ui_context(args.json, format, args.view);
    let settings = ctx.settings();

    let date = parse_date(args.date.as_deref(), ctx.state().default_date())?;
    let category = args.category.unwrap_or(settings.default_category);
    let show_totals = args.totals_override().unwrap_or(settings.show_totals);
    let search = args.search.clone().unwrap_or_default();

    let day = ctx.fetch_day(&ui, date)?;
    ensure_has_data(&day, date)?;

    let state = ctx.state();
    let mut events = state.data_for(category.event_type(), Some(date), &search);
    if let Some(sort) = args.sort {
        sort_events(&mut events, sort.order(args.desc));
    }
    if let Some(limit) = args.limit {
        events.truncate(limit);
    }
    let totals = state.totals_for(Some(date));
    tracing::debug!(date = %date, category = %category, matched = events.len(), "derived list");

    if ui.mode.is_json() {
        let doc = show_json(date, category, &search, &events, &totals);
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let listing = Listing {
        date,
        category,
        search: &search,
        events: &events,
        view: ui.view,
        totals: show_totals.then_some(totals),
    };
    print_event_list(&ui, &listing, ctx.quiet());
    Ok(())
}

/// A day with no entries in any category is reported as not found.
pub fn ensure_has_data(day: &Day, date: DateKey) -> anyhow::Result<()> {
    if day.total() == 0 {
        return Err(CliError::not_found(
            format!("No events recorded for {}", date),
            "Try another date.",
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_day_is_not_found() {
        let day = Day::new("February_30", HashMap::new());
        let err = ensure_has_data(&day, DateKey::new(2, 30)).unwrap_err();
        assert!(err.to_string().contains("No events recorded for February 30"));
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::NotFound { .. })
        ));
    }
}
