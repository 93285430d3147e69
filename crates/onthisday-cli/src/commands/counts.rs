use crate::app::AppContext;
use crate::cli::CountsArgs;
use crate::constants::TITLE;
use crate::helpers::{parse_date, parse_output_format};
use crate::output::{counts_json, render_counts};
use crate::ui::{blank_line, header, print};

use super::show::ensure_has_data;

pub fn handle_counts(ctx: &AppContext, args: &CountsArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;
    let ui = ctx.ui_context(args.json, format, None);

    let date = parse_date(args.date.as_deref(), ctx.state().default_date())?;
    let day = ctx.fetch_day(&ui, date)?;
    ensure_has_data(&day, date)?;

    let totals = ctx.state().totals_for(Some(date));

    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&counts_json(date, &totals))?);
        return Ok(());
    }

    if !ctx.quiet() {
        let title = format!("{} - Counts", TITLE);
        print(&ui, &header(&ui, &title, Some(&date.to_string())));
        blank_line(&ui);
    }
    print(&ui, &render_counts(&ui, &totals));
    Ok(())
}
