//! Mobile money collection client.
//!
//! Submits a payment collection request to a remote gateway and polls for
//! its terminal status under a bounded time budget with cooperative
//! cancellation.
//!
//! The crate is a library plus a small interactive binary: validation,
//! the gateway client, and the polling state machine all live here so
//! they can be exercised without the terminal surface. The only trait
//! seam is [`http::HttpClient`]; everything above it is deterministic and
//! tested against [`http::MockHttpClient`].

pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod logging;
pub mod poll;
pub mod prompt;
pub mod validate;

// Re-export commonly used types
pub use collect::{CollectOutcome, collect};
pub use config::Config;
pub use error::{CollectError, ConfigError, GatewayError, PollError, Result, ValidationError};
pub use gateway::{GatewayClient, PaymentRequest, TransactionReference, TransactionStatus};
pub use http::{HttpClient, HttpResponse, MockHttpClient, ReqwestHttpClient};
pub use poll::{PollConfig, Poller, TerminalOutcome};
