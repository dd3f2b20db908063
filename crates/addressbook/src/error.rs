//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable
//! help text and exit codes.

use miette::Diagnostic;
use thiserror::Error;

use addressbook_config::ConfigError;
use addressbook_core::{CoreError, ErrorKind, FormError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Form errors ──────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(addressbook::validation))]
    Validation { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(addressbook::not_found),
        help("Run: addressbook {hint}")
    )]
    NotFound { message: String, hint: String },

    #[error("{message}")]
    #[diagnostic(
        code(addressbook::network),
        help(
            "Check that the address API is reachable.\n\
             Base URL: {base_url}"
        )
    )]
    Network { message: String, base_url: String },

    // ── Storage ──────────────────────────────────────────────────────
    #[error("Could not access the address book: {message}")]
    #[diagnostic(
        code(addressbook::storage),
        help("Check permissions of the data directory or pass --data-dir.")
    )]
    Storage { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No address API base URL configured")]
    #[diagnostic(
        code(addressbook::no_base_url),
        help(
            "Pass --base-url, set ADDRESSBOOK_BASE_URL, or run:\n\
             addressbook config init --base-url <URL>\n\
             Config file: {path}"
        )
    )]
    NoBaseUrl { path: String },

    #[error(transparent)]
    #[diagnostic(code(addressbook::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(addressbook::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("Several addresses match; choose one with --address")]
    #[diagnostic(
        code(addressbook::ambiguous),
        help("Run: addressbook find --postcode {postcode} --house-number {house_number}")
    )]
    AmbiguousAddress {
        postcode: String,
        house_number: String,
    },

    #[error("Prompt failed: {0}")]
    #[diagnostic(code(addressbook::prompt))]
    Prompt(#[from] dialoguer::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::AmbiguousAddress { .. } => exit_code::USAGE,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Network { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }

    /// Translate the error shown on the form.
    pub fn from_form(err: &FormError, base_url: &str) -> Self {
        match err.kind {
            ErrorKind::Validation => Self::Validation {
                message: err.message.clone(),
            },
            ErrorKind::NotFound => Self::NotFound {
                message: err.message.clone(),
                hint: "find --postcode <P> --house-number <N>".into(),
            },
            ErrorKind::Network => Self::Network {
                message: err.message.clone(),
                base_url: base_url.to_owned(),
            },
            ErrorKind::Storage | ErrorKind::Serialization => Self::Storage {
                message: err.message.clone(),
            },
            ErrorKind::Config => Self::Validation {
                message: err.message.clone(),
            },
        }
    }
}

// ── CoreError / ConfigError → CliError mapping ───────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } | CoreError::Config { message } => {
                CliError::Validation { message }
            }
            CoreError::NotFound { message } => CliError::NotFound {
                message,
                hint: "list".into(),
            },
            CoreError::Network { message } => CliError::Network {
                message,
                base_url: "(unknown)".into(),
            },
            CoreError::Storage { message } | CoreError::Serialization { message } => {
                CliError::Storage { message }
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingBaseUrl => CliError::NoBaseUrl {
                path: addressbook_config::config_path().display().to_string(),
            },
            other => CliError::Config(other),
        }
    }
}
