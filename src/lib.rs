//! Stoploss viz - data layer for the stoploss strategy charts
//!
//! This library fetches stoploss simulation results from the upstream cloud
//! function, normalizes its non-standard JSON into a uniform result, and
//! formats numbers into compact chart labels.

pub mod api;
pub mod charts;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatter;
pub mod shaping;
pub mod stoploss;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{ConfigError, FetchError, FormatError};
pub use formatter::format_large_number;
pub use stoploss::{StoplossDataClient, StoplossQueryParams, StoplossResult};
