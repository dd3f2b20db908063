// ── Core error types ──
//
// User-facing errors from addressbook-core. Consumers never see HTTP
// status codes or JSON parse failures directly: the
// `From<addressbook_api::Error>` impl collapses transport-layer errors into
// the two network messages shown to the user.

use strum::Display;
use thiserror::Error;

/// Messages surfaced in the form's error field.
pub mod messages {
    pub const POST_CODE_MANDATORY: &str = "Post Code is mandatory";
    pub const HOUSE_NUMBER_MANDATORY: &str = "House Number is mandatory";
    pub const NOT_NUMERIC: &str = "Post Code and House Number must be valid numbers";
    pub const FETCH_FAILED: &str = "Failed to fetch addresses";
    pub const FETCH_UNAVAILABLE: &str =
        "Something went wrong while fetching addresses. Try again later!";
    pub const NAMES_MANDATORY: &str = "First name and last name fields mandatory!";
    pub const NO_ADDRESS_SELECTED: &str =
        "No address selected, try to select an address or find one if you haven't";
    pub const SELECTED_NOT_FOUND: &str = "Selected address not found";
}

/// Coarse error category, used for diagnostics and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    #[strum(serialize = "ValidationError")]
    Validation,
    #[strum(serialize = "NetworkError")]
    Network,
    #[strum(serialize = "NotFoundError")]
    NotFound,
    #[strum(serialize = "StorageError")]
    Storage,
    #[strum(serialize = "SerializationError")]
    Serialization,
    #[strum(serialize = "ConfigError")]
    Config,
}

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Form / lookup errors (shown verbatim to the user) ────────────
    /// User input failed local checks; never reaches the network.
    #[error("{message}")]
    Validation { message: String },

    /// The lookup request failed or returned a non-success status.
    #[error("{message}")]
    Network { message: String },

    /// A referenced address id is missing from the current results.
    #[error("{message}")]
    NotFound { message: String },

    // ── Persistence errors ───────────────────────────────────────────
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Network { .. } => ErrorKind::Network,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Storage { .. } => ErrorKind::Storage,
            Self::Serialization { .. } => ErrorKind::Serialization,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// The human-readable message stored in the form's error field.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<addressbook_api::Error> for CoreError {
    fn from(err: addressbook_api::Error) -> Self {
        match err {
            addressbook_api::Error::Status { .. } => CoreError::network(messages::FETCH_FAILED),
            addressbook_api::Error::Transport(_)
            | addressbook_api::Error::Tls(_)
            | addressbook_api::Error::Deserialization { .. } => {
                CoreError::network(messages::FETCH_UNAVAILABLE)
            }
            addressbook_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::storage(err.to_string())
    }
}
