//! Declarative description of one API call.
//!
//! An [`Endpoint`] gathers everything needed to issue a request and
//! interpret its failure: method, path template and parameters, query,
//! headers, body, and the [`ErrorDispatch`] table used when the call fails.
//!
//! ```
//! use influxdb_api_core::{Endpoint, Method, PathTemplate};
//!
//! let base = url::Url::parse("http://localhost:8086").unwrap();
//! let request = Endpoint::new(Method::Get, PathTemplate::new("/api/v2/buckets/{bucketID}"))
//!     .path_param("bucketID", "0a1b2c")
//!     .into_request(&base)
//!     .unwrap();
//!
//! assert_eq!(request.url().as_str(), "http://localhost:8086/api/v2/buckets/0a1b2c");
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use url::Url;

use crate::{
    ContentType, ErrorDispatch, Method, PathTemplate, Request, Result, gzip, to_json,
    to_query_string,
};

/// One API call, ready to be turned into a [`Request`].
#[derive(Debug, Clone)]
pub struct Endpoint {
    method: Method,
    path: PathTemplate,
    path_params: Vec<(&'static str, String)>,
    query: Vec<(String, String)>,
    headers: HashMap<String, String>,
    body: Option<Bytes>,
    compress: bool,
    dispatch: ErrorDispatch,
}

impl Endpoint {
    /// New endpoint with the standard error table.
    #[must_use]
    pub fn new(method: Method, path: PathTemplate) -> Self {
        Self {
            method,
            path,
            path_params: Vec::new(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
            compress: false,
            dispatch: ErrorDispatch::STANDARD,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Unexpanded path template.
    #[must_use]
    pub const fn path(&self) -> PathTemplate {
        self.path
    }

    /// Error table for failed calls.
    #[must_use]
    pub const fn dispatch(&self) -> &ErrorDispatch {
        &self.dispatch
    }

    /// Substitute `{name}` in the path template.
    #[must_use]
    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append a query parameter when a value is present.
    #[must_use]
    pub fn query_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Append the fields of a struct as query parameters.
    ///
    /// `None` fields are skipped when the struct uses
    /// `#[serde(skip_serializing_if = "Option::is_none")]`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::QuerySerialization`] if the value cannot be
    /// encoded as a query string.
    pub fn query_params<T: serde::Serialize>(mut self, params: &T) -> Result<Self> {
        let encoded = to_query_string(params)?;
        self.query.extend(
            url::form_urlencoded::parse(encoded.as_bytes())
                .map(|(name, value)| (name.into_owned(), value.into_owned())),
        );
        Ok(self)
    }

    /// Set a request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::JsonSerialization`] if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> Result<Self> {
        let body = to_json(value)?;
        Ok(self.body(ContentType::Json, body))
    }

    /// Set a plain text body.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.body(ContentType::PlainText, Bytes::from(text.into()))
    }

    /// Set a raw body with its content type.
    #[must_use]
    pub fn body(mut self, content_type: ContentType, body: impl Into<Bytes>) -> Self {
        self.headers
            .insert("Content-Type".to_string(), content_type.as_str().to_string());
        self.body = Some(body.into());
        self
    }

    /// Gzip-compress the request body and announce it with `Content-Encoding`.
    #[must_use]
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Use a dedicated error table.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: ErrorDispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Build the request against a server base URL.
    ///
    /// Any path on the base URL is kept as a prefix.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidRequest`] if the base URL cannot carry a
    /// path, or a compression error from [`gzip`].
    pub fn into_request(self, base: &Url) -> Result<Request<Bytes>> {
        if base.cannot_be_a_base() {
            return Err(crate::Error::invalid_request(format!(
                "{base} cannot be used as a base URL"
            )));
        }

        let mut url = base.clone();
        let path = self.path.expand(&self.path_params);
        url.set_path(&format!("{}{path}", base.path().trim_end_matches('/')));
        url.set_query(None);

        let mut headers = self.headers;
        let body = match self.body {
            Some(body) if self.compress => {
                headers.insert("Content-Encoding".to_string(), "gzip".to_string());
                Some(gzip(&body)?)
            }
            body => body,
        };

        let builder = Request::builder(self.method, url)
            .query_pairs(self.query)
            .headers(headers);
        Ok(match body {
            Some(body) => builder.body(body),
            None => builder,
        }
        .build())
    }
}
