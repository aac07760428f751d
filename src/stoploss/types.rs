use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::endpoint::{DEFAULT_SESSION_ID, DEFAULT_UID};

/// Identifies a simulation session on the upstream service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoplossQueryParams {
    #[serde(default = "default_uid")]
    pub uid: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

fn default_uid() -> String {
    DEFAULT_UID.to_string()
}

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_string()
}

impl Default for StoplossQueryParams {
    fn default() -> Self {
        Self {
            uid: default_uid(),
            session_id: default_session_id(),
        }
    }
}

impl StoplossQueryParams {
    pub fn new(uid: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            session_id: session_id.into(),
        }
    }

    /// Query pairs in the order the upstream expects them.
    pub fn as_query(&self) -> [(&'static str, &str); 2] {
        [("uid", &self.uid), ("session_id", &self.session_id)]
    }
}

/// Outcome of a stoploss fetch. Exactly one of `data` / `error` exists.
///
/// Serializes to `{"success":true,"data":[...]}` or
/// `{"success":false,"error":"..."}` for the chart front-end.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "ResultEnvelope", try_from = "ResultEnvelope")]
pub enum StoplossResult {
    Success { data: Vec<Value> },
    Failure { error: String },
}

impl StoplossResult {
    pub fn is_success(&self) -> bool {
        matches!(self, StoplossResult::Success { .. })
    }

    pub fn data(&self) -> Option<&[Value]> {
        match self {
            StoplossResult::Success { data } => Some(data),
            StoplossResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            StoplossResult::Success { .. } => None,
            StoplossResult::Failure { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<Vec<Value>, String> {
        match self {
            StoplossResult::Success { data } => Ok(data),
            StoplossResult::Failure { error } => Err(error),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ResultEnvelope {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<StoplossResult> for ResultEnvelope {
    fn from(result: StoplossResult) -> Self {
        match result {
            StoplossResult::Success { data } => ResultEnvelope {
                success: true,
                data: Some(data),
                error: None,
            },
            StoplossResult::Failure { error } => ResultEnvelope {
                success: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<ResultEnvelope> for StoplossResult {
    type Error = String;

    fn try_from(envelope: ResultEnvelope) -> Result<Self, Self::Error> {
        match (envelope.success, envelope.data, envelope.error) {
            (true, data, None) => Ok(StoplossResult::Success {
                data: data.unwrap_or_default(),
            }),
            (false, None, Some(error)) => Ok(StoplossResult::Failure { error }),
            (true, _, Some(_)) => Err("successful result must not carry an error".to_string()),
            (false, _, _) => Err("failed result must carry only an error".to_string()),
        }
    }
}
