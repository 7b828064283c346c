//! Structured error for failed API calls.
//!
//! [`ApiError::build`] turns a non-success response into a single error value:
//! the message always starts with the service's [`ScopePrefix`] and the status
//! line, followed by either the server's own message (when the body decodes
//! into the endpoint's error model) or the decode failure.

use std::fmt;

use bytes::Bytes;
use derive_more::Display;

use crate::{ErrorDetail, ErrorDispatch, ErrorModel};

/// Response header carrying the server build flavor (`OSS` or `Cloud`).
pub const BUILD_HEADER: &str = "X-Influxdb-Build";

/// Marks a service whose calls only make sense against one InfluxDB flavor.
///
/// The prefix is purely diagnostic: it is prepended to error messages so
/// that a failure against the wrong flavor is easy to recognise.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScopePrefix {
    /// No prefix.
    #[default]
    #[display("")]
    None,
    /// Only valid against InfluxDB OSS.
    #[display("InfluxDB OSS-only command failed: ")]
    OssOnly,
    /// Only valid against InfluxDB Cloud.
    #[display("InfluxDB Cloud-only command failed: ")]
    CloudOnly,
}

/// What the envelope builder needs to know about a failed response.
#[derive(Debug, Clone)]
pub struct ErrorContext<'a> {
    /// HTTP status code.
    pub status: u16,
    /// Full, decompressed response body.
    pub body: Bytes,
    /// Declared `Content-Type`, if any.
    pub content_type: Option<&'a str>,
    /// Scope prefix of the calling service.
    pub scope: ScopePrefix,
    /// Value of the [`BUILD_HEADER`] response header, if any.
    pub build_version: Option<&'a str>,
}

/// Error for a call that completed with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: u16,
    body: Bytes,
    message: String,
    build_version: Option<String>,
    detail: Option<ErrorDetail>,
}

impl ApiError {
    /// Build the error for a failed response.
    ///
    /// The endpoint's dispatch table selects which error model the body is
    /// decoded into. Decoding failures are folded into the message.
    #[must_use]
    pub fn build(context: ErrorContext<'_>, dispatch: &ErrorDispatch) -> Self {
        let ErrorContext {
            status,
            body,
            content_type,
            scope,
            build_version,
        } = context;

        let base = format!("{scope}{}", status_line(status));
        let (message, detail) = match dispatch.shape_for(status).decode(&body, content_type) {
            Ok(mut detail) => {
                let message = format!("{base}: {}", detail.message());
                detail.set_message(message);
                (base, Some(detail))
            }
            Err(err) => (format!("{base}: {err}"), None),
        };

        Self {
            status,
            body,
            message,
            build_version: build_version.map(str::to_string),
            detail,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Raw response body, unmodified.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Scope prefix and status line, plus the decode failure when no model
    /// could be decoded.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Server build flavor reported with the response.
    #[must_use]
    pub fn build_version(&self) -> Option<&str> {
        self.build_version.as_deref()
    }

    /// Decoded server error model.
    #[must_use]
    pub const fn detail(&self) -> Option<&ErrorDetail> {
        self.detail.as_ref()
    }

    /// Mutable access to the decoded server error model.
    pub fn detail_mut(&mut self) -> Option<&mut ErrorDetail> {
        self.detail.as_mut()
    }

    /// Consume the error, returning the decoded model.
    #[must_use]
    pub fn into_detail(self) -> Option<ErrorDetail> {
        self.detail
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => fmt::Display::fmt(detail, f),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiError {}

fn status_line(status: u16) -> String {
    match http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
    {
        Some(reason) => format!("{status} {reason}"),
        None => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;
    use crate::{ErrorShape, StatusMatch};

    fn context(status: u16, body: &'static [u8], scope: ScopePrefix) -> ErrorContext<'static> {
        ErrorContext {
            status,
            body: Bytes::from_static(body),
            content_type: Some("application/json; charset=utf-8"),
            scope,
            build_version: None,
        }
    }

    #[test]
    fn scope_prefix_display() {
        check!(ScopePrefix::None.to_string() == "");
        check!(ScopePrefix::OssOnly.to_string() == "InfluxDB OSS-only command failed: ");
        check!(ScopePrefix::CloudOnly.to_string() == "InfluxDB Cloud-only command failed: ");
    }

    #[test]
    fn status_line_uses_canonical_reason() {
        check!(status_line(404) == "404 Not Found");
        check!(status_line(413) == "413 Payload Too Large");
        check!(status_line(599) == "599");
    }

    #[test]
    fn decoded_model_oss_only() {
        let err = ApiError::build(
            context(
                404,
                br#"{"code":"not found","message":"bucket not found"}"#,
                ScopePrefix::OssOnly,
            ),
            &ErrorDispatch::STANDARD,
        );

        let message = err.to_string();
        check!(message.contains("InfluxDB OSS-only command failed"));
        check!(message.contains("bucket not found"));
        check!(message == "InfluxDB OSS-only command failed: 404 Not Found: bucket not found");

        let_assert!(Some(ErrorDetail::Standard(model)) = err.detail());
        check!(model.code == "not found");
        check!(err.message() == "InfluxDB OSS-only command failed: 404 Not Found");
    }

    #[test]
    fn decoded_model_cloud_only() {
        let err = ApiError::build(
            context(
                401,
                br#"{"code":"unauthorized","message":"unauthorized access"}"#,
                ScopePrefix::CloudOnly,
            ),
            &ErrorDispatch::STANDARD,
        );
        check!(
            err.to_string()
                == "InfluxDB Cloud-only command failed: 401 Unauthorized: unauthorized access"
        );
    }

    #[test]
    fn invalid_json_keeps_raw_body() {
        let err = ApiError::build(
            context(400, b"not json", ScopePrefix::None),
            &ErrorDispatch::STANDARD,
        );

        let message = err.to_string();
        check!(message.starts_with("400 Bad Request: "));
        check!(message.contains("JSON deserialization error"));
        check!(err.body().as_ref() == b"not json");
        check!(err.detail().is_none());
    }

    #[test]
    fn non_json_content_type() {
        let err = ApiError::build(
            ErrorContext {
                content_type: Some("text/html"),
                ..context(502, b"<html>bad gateway</html>", ScopePrefix::None)
            },
            &ErrorDispatch::STANDARD,
        );
        check!(err.to_string() == r#"502 Bad Gateway: undefined response type "text/html""#);
        check!(err.detail().is_none());
    }

    #[test]
    fn empty_body_never_panics() {
        let err = ApiError::build(
            ErrorContext {
                content_type: None,
                ..context(500, b"", ScopePrefix::OssOnly)
            },
            &ErrorDispatch::STANDARD,
        );
        check!(err.to_string().starts_with("InfluxDB OSS-only command failed: 500"));
        check!(err.body().is_empty());
    }

    #[test]
    fn dispatch_selects_line_protocol_shape() {
        const WRITE: ErrorDispatch = ErrorDispatch::new(&[
            (StatusMatch::Exact(400), ErrorShape::LineProtocol),
            (StatusMatch::Exact(413), ErrorShape::LineProtocolLength),
        ]);

        let err = ApiError::build(
            context(
                400,
                br#"{"code":"invalid","message":"unable to parse 'cpu'","line":1}"#,
                ScopePrefix::None,
            ),
            &WRITE,
        );
        let_assert!(Some(ErrorDetail::LineProtocol(model)) = err.detail());
        check!(model.line == Some(1));
        check!(err.to_string() == "400 Bad Request: unable to parse 'cpu' (line 1)");

        let err = ApiError::build(
            context(413, br#"{"code":"invalid","message":"too large"}"#, ScopePrefix::None),
            &WRITE,
        );
        let_assert!(Some(ErrorDetail::LineProtocolLength(_)) = err.detail());

        let err = ApiError::build(
            context(401, br#"{"code":"unauthorized"}"#, ScopePrefix::None),
            &WRITE,
        );
        let_assert!(Some(ErrorDetail::Standard(_)) = err.detail());
        check!(err.to_string() == "401 Unauthorized: ");
    }

    #[test]
    fn build_version_and_message_mutation() {
        let mut err = ApiError::build(
            ErrorContext {
                build_version: Some("OSS"),
                ..context(422, br#"{"code":"invalid","message":"bad"}"#, ScopePrefix::None)
            },
            &ErrorDispatch::STANDARD,
        );
        check!(err.build_version() == Some("OSS"));

        let_assert!(Some(detail) = err.detail_mut());
        detail.set_message("rewritten".to_string());
        check!(err.to_string() == "rewritten");
        check!(err.into_detail().is_some());
    }
}
