//! Endpoint path templates.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped in a substituted path segment.
///
/// Unreserved characters (`A-Z a-z 0-9 - . _ ~`) are kept as is.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

/// A path with `{name}` placeholders, such as `/api/v2/buckets/{bucketID}`.
///
/// The template itself is kept around after expansion so that logs can name
/// the endpoint without the identifiers it was called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathTemplate(&'static str);

impl PathTemplate {
    /// Create a new path template.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    /// Get the template string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Substitute placeholders, percent-encoding each value as one path segment.
    ///
    /// Placeholders without a value are left untouched.
    ///
    /// ```
    /// use influxdb_api_core::PathTemplate;
    ///
    /// let template = PathTemplate::new("/api/v2/buckets/{bucketID}");
    /// assert_eq!(template.expand(&[("bucketID", "a b/c")]), "/api/v2/buckets/a%20b%2Fc");
    /// ```
    #[must_use]
    pub fn expand<K, V>(&self, params: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        params.iter().fold(self.0.to_string(), |path, (name, value)| {
            let placeholder = format!("{{{}}}", name.as_ref());
            let encoded = utf8_percent_encode(value.as_ref(), PATH_SEGMENT_ENCODE_SET).to_string();
            path.replace(&placeholder, &encoded)
        })
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PathTemplate {
    fn as_ref(&self) -> &str {
        self.0
    }
}
