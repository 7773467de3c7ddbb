//! Error types returned by the client.
//!
//! Every failure is surfaced to the caller as exactly one [`OaikitError`] variant. Nothing is
//! retried or swallowed: encoding problems are reported before any network activity, transport
//! problems are passed through from `reqwest` unchanged, and non-success responses become an
//! [`ApiError`].

use reqwest::StatusCode;

use super::*;

/// Type reported for error bodies that are not the API's error envelope.
pub const UNKNOWN_ERROR_TYPE: &str = "unknown";

#[derive(Debug, thiserror::Error)]
pub enum OaikitError {
    /// The payload could not be serialized. Nothing was sent.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Connection, timeout, cancellation or body-read failure.
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    /// A `200 OK` body did not match the expected result type.
    #[error("decoding response: {0}")]
    Decoding(#[source] serde_json::Error),

    /// The API answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("configuration: {0}")]
    Config(String),
}

impl OaikitError {
    /// True when the transport gave up because the configured timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, OaikitError::Transport(e) if e.is_timeout())
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            OaikitError::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Error reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("openai: {message} ({error_type})")]
pub struct ApiError {
    pub status_code: u16,
    pub message: String,
    /// The envelope's `type` field.
    pub error_type: String,
}

/// Failure while turning a payload into a request body.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("formdata: value must be a record")]
    NotARecord,

    #[error("formdata: unsupported field kind `{kind}` for field `{field}`")]
    Unsupported {
        field: &'static str,
        kind: &'static str,
    },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("formdata: {0}")]
    Custom(String),
}

impl EncodingError {
    pub(crate) fn unsupported(kind: &'static str) -> Self {
        EncodingError::Unsupported { field: "", kind }
    }

    /// Attach the field name to an error raised while encoding that field's value.
    pub(crate) fn in_field(self, name: &'static str) -> Self {
        match self {
            EncodingError::Unsupported { kind, .. } => EncodingError::Unsupported { field: name, kind },
            other => other,
        }
    }
}

impl serde::ser::Error for EncodingError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        EncodingError::Custom(msg.to_string())
    }
}

// This represents how the OpenAI API returns an error for a failed request.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
}

/// Build the [`ApiError`] for a non-success response. Bodies that are not the error envelope
/// are reported verbatim with the `"unknown"` type.
pub(crate) fn handle_request_fail(body: &[u8], status_code: StatusCode) -> ApiError {
    // The `error` object must be present: `{}` or `{"error":null}` are reported verbatim rather
    // than as an empty message.
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => ApiError {
            status_code: status_code.as_u16(),
            message: envelope.error.message.unwrap_or_default(),
            error_type: envelope.error.error_type.unwrap_or_default(),
        },
        Err(e) => {
            tracing::trace!(error = %e, "error body is not an api error envelope");
            ApiError {
                status_code: status_code.as_u16(),
                message: String::from_utf8_lossy(body).into_owned(),
                error_type: UNKNOWN_ERROR_TYPE.to_string(),
            }
        }
    }
}
