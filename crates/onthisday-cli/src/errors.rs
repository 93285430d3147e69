//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI. Errors raised by the
//! core library are mapped here too, so `main` has a single place to turn
//! any failure into a message, a hint and an exit code.

use std::fmt;

use onthisday_core::OnThisDayError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config file, a day with no data)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\nHint: {}", message, hint)
            }
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for a core error.
pub fn core_exit_code(err: &OnThisDayError) -> i32 {
    match err {
        OnThisDayError::Network(_) => exit_codes::NETWORK,
        OnThisDayError::BadResponse { .. } => exit_codes::BAD_RESPONSE,
        OnThisDayError::Decode(_) => exit_codes::DECODE,
        OnThisDayError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        OnThisDayError::Cancelled => exit_codes::FAILURE,
    }
}

/// Exit code for any error returned by a command handler.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    if let Some(core) = err.downcast_ref::<OnThisDayError>() {
        return core_exit_code(core);
    }
    exit_codes::FAILURE
}

/// Split an error into the message shown to the user and an optional hint.
///
/// Explicit `Hint:` lines embedded in the message win; otherwise core errors
/// get a contextual hint.
pub fn describe(err: &anyhow::Error) -> (String, Option<String>) {
    let text = format!("{}", err);
    if let Some(idx) = text.find("\nHint: ") {
        let message = text[..idx].to_string();
        let hint = text[idx + "\nHint: ".len()..].to_string();
        return (message, Some(hint));
    }
    let hint = err.downcast_ref::<OnThisDayError>().and_then(core_hint);
    (text, hint.map(String::from))
}

fn core_hint(err: &OnThisDayError) -> Option<&'static str> {
    match err {
        OnThisDayError::Network(_) => {
            Some("Check your connection, or point --base-url at a reachable service.")
        }
        OnThisDayError::BadResponse { status: 404 } => {
            Some("The service has no page for that date. Check the month and day.")
        }
        OnThisDayError::BadResponse { .. } => Some("The service may be down. Try again later."),
        OnThisDayError::Decode(_) => {
            Some("The service answered with an unexpected payload. Is --base-url correct?")
        }
        OnThisDayError::InvalidInput(_) => Some("Run `onthisday --help` for accepted formats."),
        OnThisDayError::Cancelled => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_exit_codes() {
        assert_eq!(
            CliError::not_found("missing", "hint").exit_code(),
            exit_codes::NOT_FOUND
        );
        assert_eq!(
            CliError::invalid_input("bad").exit_code(),
            exit_codes::INVALID_INPUT
        );
    }

    #[test]
    fn test_core_errors_map_to_distinct_codes() {
        let cases = [
            (OnThisDayError::Network("refused".into()), 5),
            (OnThisDayError::BadResponse { status: 404 }, 6),
            (OnThisDayError::Decode("eof".into()), 7),
            (OnThisDayError::InvalidInput("13/40".into()), 4),
        ];
        for (err, code) in cases {
            assert_eq!(exit_code(&anyhow::Error::new(err)), code);
        }
    }

    #[test]
    fn test_unknown_error_is_generic_failure() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(exit_code(&err), exit_codes::FAILURE);
    }

    #[test]
    fn test_describe_splits_embedded_hint() {
        let err = anyhow::Error::new(CliError::not_found("No config", "Create one"));
        let (message, hint) = describe(&err);
        assert_eq!(message, "No config");
        assert_eq!(hint.as_deref(), Some("Create one"));
    }

    #[test]
    fn test_describe_adds_core_hint() {
        let err = anyhow::Error::new(OnThisDayError::BadResponse { status: 404 });
        let (message, hint) = describe(&err);
        assert!(message.contains("404"));
        assert!(hint.unwrap().contains("no page"));
    }
}
