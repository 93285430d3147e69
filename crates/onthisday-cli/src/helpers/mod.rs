//! Input and parsing helper functions for the CLI.

pub mod parsing;

// Re-export public API
pub use parsing::{parse_date, parse_output_format, Category, OutputFormat};
