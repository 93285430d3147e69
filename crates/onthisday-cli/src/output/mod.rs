//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying events
//! in various formats (JSON, cards, table, plain text).

mod json;
mod text;

// Re-export public API
pub use json::{counts_json, show_json};
pub use text::{print_event_list, render_counts, Listing};
