//! Error models reported by the InfluxDB API.
//!
//! InfluxDB reports application-level failures as small JSON documents. Most
//! endpoints use the standard [`ErrorBody`] shape; the write endpoint uses
//! [`LineProtocolError`] and [`LineProtocolLengthError`] for some statuses.
//!
//! Every field may be absent: only the document structure has to match.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Accessors shared by every decoded error model.
pub trait ErrorModel {
    /// Machine-readable error code (e.g. `"not found"`).
    fn code(&self) -> &str;

    /// Human-readable message, empty when the server did not send one.
    fn message(&self) -> &str;

    /// Replace the human-readable message.
    fn set_message(&mut self, message: String);
}

/// The standard `{code, message}` error document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code, one of the `CODE_*` constants for well-behaved servers.
    #[serde(default)]
    pub code: String,
    /// Message is a human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Describes the logical code operation during error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
    /// Stack of errors that occurred during processing of the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

impl ErrorBody {
    /// Internal server error.
    pub const CODE_INTERNAL_ERROR: &'static str = "internal error";
    /// Resource not found.
    pub const CODE_NOT_FOUND: &'static str = "not found";
    /// Resource already exists.
    pub const CODE_CONFLICT: &'static str = "conflict";
    /// Invalid request.
    pub const CODE_INVALID: &'static str = "invalid";
    /// Request could not be processed.
    pub const CODE_UNPROCESSABLE_ENTITY: &'static str = "unprocessable entity";
    /// A required value is empty.
    pub const CODE_EMPTY_VALUE: &'static str = "empty value";
    /// Service unavailable.
    pub const CODE_UNAVAILABLE: &'static str = "unavailable";
    /// Access forbidden.
    pub const CODE_FORBIDDEN: &'static str = "forbidden";
    /// Rate limited.
    pub const CODE_TOO_MANY_REQUESTS: &'static str = "too many requests";
    /// Missing or invalid credentials.
    pub const CODE_UNAUTHORIZED: &'static str = "unauthorized";
    /// Method not allowed on this resource.
    pub const CODE_METHOD_NOT_ALLOWED: &'static str = "method not allowed";
    /// Request body too large.
    pub const CODE_REQUEST_TOO_LARGE: &'static str = "request too large";
    /// Unsupported request media type.
    pub const CODE_UNSUPPORTED_MEDIA_TYPE: &'static str = "unsupported media type";
}

impl ErrorModel for ErrorBody {
    fn code(&self) -> &str {
        &self.code
    }

    fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message.as_deref().filter(|m| !m.is_empty());
        match (message, self.err.as_deref()) {
            (Some(message), Some(err)) => write!(f, "{message}: {err}"),
            (Some(message), None) => f.write_str(message),
            (None, Some(err)) => f.write_str(err),
            (None, None) => write!(f, "<{}>", self.code),
        }
    }
}

/// Error returned by the write endpoint when line protocol cannot be parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineProtocolError {
    /// Code is the machine-readable error code.
    #[serde(default)]
    pub code: String,
    /// Message is a human-readable message.
    #[serde(default)]
    pub message: String,
    /// Op describes the logical code operation during error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
    /// Err is a stack of errors that occurred during processing of the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
    /// First line in the request body that contains malformed data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<i32>,
}

impl ErrorModel for LineProtocolError {
    fn code(&self) -> &str {
        &self.code
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn set_message(&mut self, message: String) {
        self.message = message;
    }
}

impl fmt::Display for LineProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(line) = self.line {
            write!(f, " (line {line})")?;
        }
        Ok(())
    }
}

/// Error returned by the write endpoint when the request body exceeds the size limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineProtocolLengthError {
    /// Code is the machine-readable error code.
    #[serde(default)]
    pub code: String,
    /// Message is a human-readable message.
    #[serde(default)]
    pub message: String,
}

impl ErrorModel for LineProtocolLengthError {
    fn code(&self) -> &str {
        &self.code
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn set_message(&mut self, message: String) {
        self.message = message;
    }
}

impl fmt::Display for LineProtocolLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A decoded server error, whichever shape the endpoint declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDetail {
    /// The standard error document.
    Standard(ErrorBody),
    /// Malformed line protocol (write endpoint).
    LineProtocol(LineProtocolError),
    /// Request body too large (write endpoint).
    LineProtocolLength(LineProtocolLengthError),
}

impl ErrorDetail {
    fn model(&self) -> &dyn ErrorModel {
        match self {
            Self::Standard(model) => model,
            Self::LineProtocol(model) => model,
            Self::LineProtocolLength(model) => model,
        }
    }

    fn model_mut(&mut self) -> &mut dyn ErrorModel {
        match self {
            Self::Standard(model) => model,
            Self::LineProtocol(model) => model,
            Self::LineProtocolLength(model) => model,
        }
    }
}

impl ErrorModel for ErrorDetail {
    fn code(&self) -> &str {
        self.model().code()
    }

    fn message(&self) -> &str {
        self.model().message()
    }

    fn set_message(&mut self, message: String) {
        self.model_mut().set_message(message);
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard(model) => fmt::Display::fmt(model, f),
            Self::LineProtocol(model) => fmt::Display::fmt(model, f),
            Self::LineProtocolLength(model) => fmt::Display::fmt(model, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_lenient_decode() {
        let body: ErrorBody = serde_json::from_str("{}").expect("empty object");
        assert_eq!(body, ErrorBody::default());
        assert_eq!(body.to_string(), "<>");

        let body: ErrorBody =
            serde_json::from_str(r#"{"code":"not found","message":"bucket not found"}"#)
                .expect("decode");
        assert_eq!(body.code(), ErrorBody::CODE_NOT_FOUND);
        assert_eq!(body.message(), "bucket not found");
    }

    #[test]
    fn error_body_display() {
        let mut body = ErrorBody {
            code: ErrorBody::CODE_INVALID.to_string(),
            ..ErrorBody::default()
        };
        assert_eq!(body.to_string(), "<invalid>");

        body.err = Some("parse failure".to_string());
        assert_eq!(body.to_string(), "parse failure");

        body.set_message("bad request".to_string());
        assert_eq!(body.to_string(), "bad request: parse failure");

        body.err = None;
        assert_eq!(body.to_string(), "bad request");
    }

    #[test]
    fn line_protocol_error_display() {
        let err: LineProtocolError = serde_json::from_str(
            r#"{"code":"invalid","message":"unable to parse 'cpu value=': missing field value","line":3}"#,
        )
        .expect("decode");
        assert_eq!(
            err.to_string(),
            "unable to parse 'cpu value=': missing field value (line 3)"
        );
    }

    #[test]
    fn detail_delegates_to_model() {
        let mut detail = ErrorDetail::LineProtocolLength(LineProtocolLengthError {
            code: "invalid".to_string(),
            message: "too large".to_string(),
        });
        assert_eq!(detail.code(), "invalid");
        assert_eq!(detail.message(), "too large");

        detail.set_message("413: too large".to_string());
        assert_eq!(detail.to_string(), "413: too large");
    }
}
