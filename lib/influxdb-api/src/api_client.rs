//! Typed calls against one InfluxDB server.
//!
//! [`ApiClient`] pairs any [`HttpClient`] with a base URL and runs every call
//! through the same steps: build the request from an [`Endpoint`], execute it,
//! then hand the raw response to [`process_response`] so that compressed
//! bodies and failed statuses are handled uniformly.

use std::collections::HashMap;

use bytes::Bytes;
use tracing::debug;
use url::Url;

use crate::{Endpoint, Error, HttpClient, Response, Result, ScopePrefix, process_response};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("influxdb-api/", env!("CARGO_PKG_VERSION"));

/// InfluxDB API client over a pluggable transport.
///
/// ```ignore
/// use influxdb_api::{ApiClient, HyperClient};
///
/// let client = ApiClient::new(HyperClient::new(), "http://localhost:8086")?
///     .with_header("Authorization", "Token my-token");
/// ```
#[derive(Debug)]
pub struct ApiClient<C> {
    client: C,
    base_url: Url,
    headers: HashMap<String, String>,
    user_agent: String,
    scope: ScopePrefix,
}

impl<C: Clone> Clone for ApiClient<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            headers: self.headers.clone(),
            user_agent: self.user_agent.clone(),
            scope: self.scope,
        }
    }
}

impl<C> ApiClient<C> {
    /// Create a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(client: C, base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref()).map_err(Error::InvalidUrl)?;
        Ok(Self::with_url(client, base_url))
    }

    /// Create a client with a pre-parsed URL.
    #[must_use]
    pub fn with_url(client: C, base_url: Url) -> Self {
        Self {
            client,
            base_url,
            headers: HashMap::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            scope: ScopePrefix::None,
        }
    }

    /// Add a header sent with every request, such as `Authorization`.
    ///
    /// Headers set on an [`Endpoint`] take precedence.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Prefix error messages with the given scope.
    #[must_use]
    pub fn with_scope(mut self, scope: ScopePrefix) -> Self {
        self.scope = scope;
        self
    }

    /// Server base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Scope prefix applied to error messages.
    #[must_use]
    pub const fn scope(&self) -> ScopePrefix {
        self.scope
    }

    /// Configured `User-Agent`.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Get a reference to the inner HTTP client.
    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.client
    }

    /// Consume the wrapper and return the inner HTTP client.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.client
    }
}

impl<C: HttpClient> ApiClient<C> {
    /// Execute an endpoint and return the decoded response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the server answers with a status of `300`
    /// or above, or a transport or body error.
    pub async fn send(&self, endpoint: Endpoint) -> Result<Response<Bytes>> {
        let method = endpoint.method();
        let path = endpoint.path();
        let dispatch = *endpoint.dispatch();

        let mut request = endpoint.into_request(&self.base_url)?;
        for (name, value) in &self.headers {
            if request.header(name).is_none() {
                request.headers_mut().insert(name.clone(), value.clone());
            }
        }
        if request.header("user-agent").is_none() {
            request
                .headers_mut()
                .insert("User-Agent".to_string(), self.user_agent.clone());
        }

        debug!(%method, %path, url = %request.url(), "calling InfluxDB API");
        let response = self.client.execute(request).await?;

        process_response(response, self.scope, &dispatch).inspect_err(|err| {
            if let Error::Api(api_error) = err {
                debug!(
                    %method,
                    %path,
                    status = api_error.status(),
                    build = api_error.build_version().unwrap_or_default(),
                    "InfluxDB API call failed"
                );
            }
        })
    }

    /// Execute an endpoint and decode its body by content type.
    ///
    /// # Errors
    ///
    /// Same as [`Self::send`], plus decoding errors.
    pub async fn call<T: serde::de::DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T> {
        self.send(endpoint).await?.decode()
    }

    /// Execute an endpoint whose success body carries nothing of interest.
    ///
    /// # Errors
    ///
    /// Same as [`Self::send`].
    pub async fn call_empty(&self, endpoint: Endpoint) -> Result<()> {
        self.send(endpoint).await.map(drop)
    }
}
