//! Body serialization utilities.

use std::io::Write;

use bytes::Bytes;
use flate2::{Compression, write::GzEncoder};

use crate::{Error, Result};

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Plain text content type (`text/plain; charset=utf-8`), used for line protocol.
    PlainText,
    /// Binary content type (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::PlainText => "text/plain; charset=utf-8",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns `true` if a `Content-Type` value designates a JSON document.
///
/// Accepts `application/json`, `text/json` and structured syntax suffixes such
/// as `application/vnd.influx+json`. Parameters (`; charset=utf-8`) are ignored.
///
/// ```
/// use influxdb_api_core::is_json;
///
/// assert!(is_json("application/json; charset=utf-8"));
/// assert!(is_json("application/vnd.influx+json"));
/// assert!(!is_json("text/plain"));
/// ```
#[must_use]
pub fn is_json(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };
    let subtype = subtype.to_ascii_lowercase();
    let kind_ok = kind.eq_ignore_ascii_case("application") || kind.eq_ignore_ascii_case("text");
    kind_ok && (subtype == "json" || (subtype.starts_with("vnd.") && subtype.ends_with("+json")))
}

/// Decode a response body according to its declared content type.
///
/// # Errors
///
/// Returns [`Error::UnsupportedContentType`] if the content type is missing or
/// is not JSON, and a JSON deserialization error if the body does not match `T`.
pub fn decode<T: serde::de::DeserializeOwned>(body: &[u8], content_type: Option<&str>) -> Result<T> {
    match content_type {
        Some(content_type) if is_json(content_type) => from_json(body),
        other => Err(Error::UnsupportedContentType(
            other.unwrap_or_default().to_string(),
        )),
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use influxdb_api_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Bucket { name: String }
///
/// let bucket = Bucket { name: "telemetry".to_string() };
/// let bytes = to_json(&bucket).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"telemetry"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to a query string.
///
/// Uses `serde_html_form` which supports `Vec<T>` for repeated query parameters
/// (e.g., `?id=a&id=b`).
///
/// # Errors
///
/// Returns an error if query serialization fails.
///
/// # Example
///
/// ```
/// use influxdb_api_core::to_query_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct List {
///     org: String,
///     #[serde(skip_serializing_if = "Option::is_none")]
///     limit: Option<u32>,
/// }
///
/// let list = List { org: "acme".to_string(), limit: Some(20) };
/// let query = to_query_string(&list).expect("serialize");
/// assert_eq!(query, "org=acme&limit=20");
/// ```
pub fn to_query_string<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_html_form::to_string(value).map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so that the error message includes the exact
/// path to the field that failed to deserialize.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails.
///
/// # Example
///
/// ```
/// use influxdb_api_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Bucket { name: String }
///
/// let bytes = br#"{"name":"telemetry"}"#;
/// let bucket: Bucket = from_json(bytes).expect("deserialize");
/// assert_eq!(bucket, Bucket { name: "telemetry".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Compress a request body with gzip.
///
/// # Errors
///
/// Returns an error if the encoder fails.
pub fn gzip(bytes: &[u8]) -> Result<Bytes> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len() / 2), Compression::default());
    encoder
        .write_all(bytes)
        .and_then(|()| encoder.finish())
        .map(Bytes::from)
        .map_err(|e| Error::invalid_request(format!("gzip compression failed: {e}")))
}
