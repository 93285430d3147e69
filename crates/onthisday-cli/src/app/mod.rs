//! Application-level utilities for the On This Day CLI.
//!
//! This module provides:
//! - Config path resolution and settings precedence
//! - The per-invocation context holding the session cache

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::Settings;
