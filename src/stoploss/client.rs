use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::constants::{endpoint::STOPLOSS_PATH, events};
use crate::error::FetchError;

use super::{
    sanitize::{count_nan_tokens, sanitize_nan},
    transport::{HttpTransport, StoplossTransport},
    types::{StoplossQueryParams, StoplossResult},
};

/// Fetches simulation results for a session and folds every transport and
/// payload failure into a [`StoplossResult`].
#[derive(Clone)]
pub struct StoplossDataClient {
    base_url: String,
    transport: Arc<dyn StoplossTransport>,
}

impl StoplossDataClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn StoplossTransport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    /// Client backed by a default reqwest transport.
    pub fn with_http(base_url: impl Into<String>) -> Self {
        Self::new(base_url, Arc::new(HttpTransport::default()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base_url>/stoploss-optimizooor`, tolerant of a trailing slash on the base.
    pub fn endpoint_url(&self) -> Result<Url, FetchError> {
        let mut base = Url::parse(&self.base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(STOPLOSS_PATH)?)
    }

    /// Fetch stoploss data; `None` uses the default test session.
    ///
    /// Never fails: callers branch on `success`.
    pub async fn get_stoploss_data(&self, params: Option<StoplossQueryParams>) -> StoplossResult {
        let params = params.unwrap_or_default();

        match self.fetch(&params).await {
            Ok(data) => {
                info!(
                    event = events::STOPLOSS_LOADED,
                    uid = %params.uid,
                    session_id = %params.session_id,
                    "Loaded {} stoploss records",
                    data.len()
                );
                StoplossResult::Success { data }
            }
            Err(FetchError::EmptyResponse) => {
                warn!(
                    event = events::EMPTY_RESPONSE,
                    uid = %params.uid,
                    session_id = %params.session_id,
                    "Stoploss endpoint returned no body"
                );
                StoplossResult::Failure {
                    error: FetchError::EmptyResponse.to_string(),
                }
            }
            Err(e) => {
                error!(
                    event = events::STOPLOSS_FAILED,
                    uid = %params.uid,
                    session_id = %params.session_id,
                    "Error fetching stoploss data: {:?}",
                    e
                );
                StoplossResult::Failure {
                    error: e.user_message(),
                }
            }
        }
    }

    async fn fetch(&self, params: &StoplossQueryParams) -> Result<Vec<Value>, FetchError> {
        let url = self.endpoint_url()?;
        debug!(
            event = events::STOPLOSS_REQUEST,
            "GET {} uid={} session_id={}", url, params.uid, params.session_id
        );

        let body = self
            .transport
            .get_text(url.as_str(), &params.as_query())
            .await?
            .ok_or(FetchError::EmptyResponse)?;

        let replaced = count_nan_tokens(&body);
        if replaced > 0 {
            debug!(event = events::NAN_SANITIZED, "Replaced {} NaN tokens", replaced);
        }

        let parsed: Value = serde_json::from_str(&sanitize_nan(&body))?;
        extract_data(parsed)
    }
}

/// Pull the `data` sequence out of a parsed payload.
///
/// Missing, null or falsy `data` (and non-object documents) yield an empty
/// sequence; a truthy non-array `data` is a shape error.
pub fn extract_data(parsed: Value) -> Result<Vec<Value>, FetchError> {
    let Value::Object(mut doc) = parsed else {
        return Ok(Vec::new());
    };

    match doc.remove("data") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(records)) => Ok(records),
        Some(other) if is_falsy(&other) => Ok(Vec::new()),
        Some(other) => Err(FetchError::UnexpectedShape(format!(
            "`data` should be an array, got {}",
            json_kind(&other)
        ))),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
