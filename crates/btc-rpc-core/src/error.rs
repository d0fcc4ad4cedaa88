use std::fmt;

use serde::Deserialize;

use crate::rpc::RawResponse;

/// HTTP status recorded when a failure carries no usable status line.
pub const DEFAULT_STATUS_CODE: u16 = 500;

/// Node error code recorded when none could be read from a response body.
pub const DEFAULT_ERROR_CODE: i64 = -99;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The node answered, but the call failed (error status or a non-null
    /// `error` member in the JSON-RPC envelope).
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// No response was received: timeout, refused or reset connection.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// Success status but the body is not a JSON-RPC envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(RpcError),

    #[error("invalid `{method}` result: {source}")]
    InvalidResult {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    /// The structured RPC error behind this failure, if the node produced a
    /// response at all.
    pub fn rpc_error(&self) -> Option<&RpcError> {
        match self {
            CoreError::Rpc(err) | CoreError::MalformedResponse(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, CoreError::Transport { source, .. } if source.is_timeout())
    }
}

// ==============================================================================
// RpcError
// ==============================================================================

/// A failed JSON-RPC call as reported by the node.
///
/// All four fields are always populated. Values that cannot be derived fall
/// back to [`DEFAULT_STATUS_CODE`], [`DEFAULT_ERROR_CODE`] and the caller's
/// own `message` respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcError {
    message: String,
    status_code: u16,
    error_code: i64,
    error_msg: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorObject>,
}

#[derive(Deserialize)]
struct ErrorObject {
    code: i64,
    message: String,
}

impl RpcError {
    /// An error with every optional field left at its default.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_parts(message, None, None, None)
    }

    /// Build an error from explicit fields. Omitted fields take their
    /// defaults; `error_msg` defaults to `message`.
    pub fn from_parts(
        message: impl Into<String>,
        status_code: Option<u16>,
        error_code: Option<i64>,
        error_msg: Option<String>,
    ) -> Self {
        let message = message.into();
        let error_msg = error_msg.unwrap_or_else(|| message.clone());
        Self {
            message,
            status_code: status_code.unwrap_or(DEFAULT_STATUS_CODE),
            error_code: error_code.unwrap_or(DEFAULT_ERROR_CODE),
            error_msg,
        }
    }

    /// Build an error from a raw node response.
    ///
    /// Reads `{"error": {"code": <int>, "message": <string>}}` from the body.
    /// Missing, empty or malformed bodies keep the defaults, so `message`
    /// survives as `error_msg`. Never fails.
    pub fn from_response(message: impl Into<String>, response: &RawResponse) -> Self {
        let status_code = Some(response.status_code().unwrap_or(DEFAULT_STATUS_CODE));
        match response.body().and_then(parse_error_object) {
            Some(parsed) => {
                Self::from_parts(message, status_code, Some(parsed.code), Some(parsed.message))
            }
            None => Self::from_parts(message, status_code, None, None),
        }
    }

    /// The caller-side description of what was attempted.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Numeric code reported by the node, e.g. `-32601` for an unknown method.
    pub fn error_code(&self) -> i64 {
        self.error_code
    }

    /// Message reported by the node.
    pub fn error_msg(&self) -> &str {
        &self.error_msg
    }
}

fn parse_error_object(body: &[u8]) -> Option<ErrorObject> {
    serde_json::from_slice::<ErrorEnvelope>(body).ok()?.error
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.error_msg == self.message {
            write!(f, "{}", self.message)?;
        } else {
            write!(f, "{}: {}", self.message, self.error_msg)?;
        }
        write!(f, " (status {}, code {})", self.status_code, self.error_code)
    }
}

impl std::error::Error for RpcError {}
