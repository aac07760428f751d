//! Application-wide constants
//!
//! Endpoint paths, request defaults and the formatter's tier table live here
//! so the rest of the crate never repeats a literal.

/// Upstream endpoint constants
pub mod endpoint {
    /// Cloud function host serving the stoploss simulations
    pub const DEFAULT_BASE_URL: &str = "https://us-central1-tradestream-cloud.cloudfunctions.net";

    /// Path of the simulation endpoint, relative to the base URL
    pub const STOPLOSS_PATH: &str = "stoploss-optimizooor";

    /// Used when a request omits `uid`
    pub const DEFAULT_UID: &str = "test_data";

    /// Used when a request omits `session_id`
    pub const DEFAULT_SESSION_ID: &str = "session12394";
}

/// Messages surfaced in `StoplossResult::Failure`
pub mod messages {
    pub const INVALID_RESPONSE_FORMAT: &str = "Invalid response format";
    pub const FETCH_FALLBACK: &str = "Failed to fetch stoploss data";
}

/// Magnitude formatting tiers
pub mod tiers {
    pub const BILLION: f64 = 1_000_000_000.0;
    pub const MILLION: f64 = 1_000_000.0;
    pub const THOUSAND: f64 = 1_000.0;

    /// Fractional digits kept for K/M/B labels
    pub const SCALED_DECIMALS: usize = 1;

    /// Fractional digits kept below one thousand
    pub const UNSCALED_DECIMALS: usize = 2;
}

/// Server and config defaults
pub mod server {
    pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
    pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
    pub const CONFIG_PATH_ENV: &str = "STOPLOSS_CONFIG";
    pub const BASE_URL_ENV: &str = "STOPLOSS_BASE_URL";
    pub const BIND_ADDR_ENV: &str = "STOPLOSS_BIND_ADDR";
}

/// Logging event names for structured logging
pub mod events {
    pub const STOPLOSS_REQUEST: &str = "stoploss_request";
    pub const STOPLOSS_LOADED: &str = "stoploss_loaded";
    pub const STOPLOSS_FAILED: &str = "stoploss_failed";
    pub const EMPTY_RESPONSE: &str = "empty_response";
    pub const NAN_SANITIZED: &str = "nan_sanitized";
}
