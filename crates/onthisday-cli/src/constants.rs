//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and clap usage errors)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (config file, a day with no recorded events).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// The remote service could not be reached.
    pub const NETWORK: i32 = 5;

    /// The remote service answered with an error status.
    pub const BAD_RESPONSE: i32 = 6;

    /// The remote service answered with a malformed payload.
    pub const DECODE: i32 = 7;

    /// Generic failure.
    pub const FAILURE: i32 = 1;
}

/// Program name used in headers, completions and the config directory.
pub const APP_NAME: &str = "onthisday";

/// Title shown above result lists.
pub const TITLE: &str = "On This Day";
