//! UI primitives for the On This Day CLI.
//!
//! This module provides:
//! - **Context**: Terminal detection plus output mode and list layout resolution
//! - **Theme**: Badge tokens, color styles, symbols
//! - **Render**: Tables, card grids, headers, hints, errors
//! - **Progress**: Loading spinner
//! - **Format**: Text shaping for cards (wrap, truncate)
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{UiContext, header, table, Column};
//!
//! let ui = ctx.ui_context(args.json, format, args.view);
//!
//! if ui.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//!
//! println!("{}", header(&ui, "On This Day - Births", Some("September 25")));
//! println!("{}", table(&ui, &columns, &rows));
//! ```

mod context;
pub mod format;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::{OutputMode, OutputRequest, UiContext};
pub use theme::Badge;

pub use render::{
    badge, blank_line, card_grid, divider, header, hint, kv, print, print_error, simple_table,
    table, Column,
};

pub use progress::Spinner;
