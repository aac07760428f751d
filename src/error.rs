//! Custom error types for the stoploss data layer
//!
//! Provides structured, typed errors instead of generic Box<dyn Error>

use std::path::PathBuf;

use thiserror::Error;

use crate::constants::messages;

/// Failures while fetching or decoding a stoploss payload.
///
/// None of these escape `StoplossDataClient`; they are folded into
/// `StoplossResult::Failure` using their `Display` text.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    /// Failure reported by a non-reqwest transport
    #[error("{0}")]
    Transport(String),

    #[error("Request failed with status code {status}")]
    Http { status: u16 },

    #[error("{0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Unexpected payload shape: {0}")]
    UnexpectedShape(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{}", messages::INVALID_RESPONSE_FORMAT)]
    EmptyResponse,
}

/// Formatter misuse
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FormatError {
    #[error("Cannot format non-finite value {0}")]
    NonFinite(f64),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl FetchError {
    /// Message shown to callers, falling back to a generic text when the
    /// underlying error renders empty.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            messages::FETCH_FALLBACK.to_string()
        } else {
            msg
        }
    }
}
