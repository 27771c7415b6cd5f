//! Error types for the collection client.

use thiserror::Error;

/// Result type alias using the crate-wide error type.
pub type Result<T> = std::result::Result<T, CollectError>;

/// Top-level error for a collection run.
///
/// Each stage surfaces its own typed error; this enum is the convergence
/// point the binary reports from. Nothing is recovered below it; the
/// binary's sole recovery is a formatted message and a non-zero exit.
#[derive(Error, Debug)]
pub enum CollectError {
    /// Configuration could not be loaded
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// User input failed validation
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The gateway rejected a call or returned a malformed response
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Polling ended without a terminal status
    #[error(transparent)]
    Poll(#[from] PollError),
}

/// Startup configuration errors. Fatal, never retried.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The credential is missing or empty
    #[error("API_KEY environment variable is required")]
    MissingApiKey,
}

/// Rejections produced by the input validation layer.
///
/// Raised before any network call; the only side effect of validation is
/// one of these values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("phone number cannot be empty")]
    PhoneEmpty,

    #[error("phone number too short (minimum {min} digits)")]
    PhoneTooShort { min: usize },

    #[error("invalid phone number format (should start with 237 or 6)")]
    PhoneBadPrefix,

    #[error("amount cannot be empty")]
    AmountEmpty,

    #[error("invalid amount format: must be a number")]
    AmountNotNumeric,

    #[error("amount must be greater than zero")]
    AmountNotPositive,

    #[error("description cannot be empty")]
    DescriptionEmpty,

    #[error("description too long (maximum {max} characters)")]
    DescriptionTooLong { max: usize },
}

/// Errors from the gateway client.
///
/// Only transport failures (`Http`, `Transport`) are ever retried, and
/// only inside the client's bounded retry loop. Application-level error
/// responses surface as `Api` and are final.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Non-2xx response, carrying the status code and whatever message
    /// field the body provided
    #[error("gateway error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// 2xx initiate response without a usable transaction reference
    #[error("gateway returned no transaction reference: {message}")]
    MissingReference { message: String },

    /// 2xx body that did not decode as the expected JSON shape
    #[error("malformed gateway response: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport failure from the HTTP client
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure from a non-reqwest client
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// Terminal failures of a polling session.
#[derive(Error, Debug)]
pub enum PollError {
    /// Attempt or deadline budget exhausted before a terminal status
    #[error("transaction timed out after {attempts} status checks")]
    Timeout { attempts: u32 },

    /// External cancellation fired mid-session
    #[error("status polling cancelled")]
    Cancelled,

    /// A status check failed; fatal to the whole poll
    #[error("failed to check transaction status: {0}")]
    Gateway(#[from] GatewayError),
}
