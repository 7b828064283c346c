//! HTTP transport built on hyper-util.
//!
//! [`HyperClient`] hands back bodies exactly as they came off the wire. It
//! never adds `Accept-Encoding` and never inflates a response: a gzip body
//! keeps its `Content-Encoding` header and is left to
//! [`influxdb_api_core::process_response`].

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use tower::Layer;
use tower::util::BoxCloneService;
use tower_service::Service;

use crate::{Error, Request, Response, Result, middleware::LoggingLayer};

/// Type-erased transport stack that layers wrap.
///
/// Responses flowing through it still carry the encoded body.
pub type BoxedService = BoxCloneService<Request<Bytes>, Response<Bytes>, Error>;

/// Future returned by the transport stack.
pub type ServiceFuture = Pin<Box<dyn Future<Output = Result<Response<Bytes>>> + Send + 'static>>;

type LayerFn = Arc<dyn Fn(BoxedService) -> BoxedService + Send + Sync>;

#[derive(Debug, Clone, Copy)]
struct Settings {
    timeout: Duration,
    connect_timeout: Duration,
    pool_idle_per_host: usize,
    pool_idle_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

/// Layered stack shared by every clone of a [`HyperClient`].
///
/// `BoxCloneService` is not `Sync`, so each call takes its own copy of the
/// stack; the lock is held only for that clone.
#[derive(Clone)]
struct SharedStack(Arc<Mutex<BoxedService>>);

impl SharedStack {
    fn new(stack: BoxedService) -> Self {
        Self(Arc::new(Mutex::new(stack)))
    }

    fn dispatch(&self, request: Request<Bytes>) -> ServiceFuture {
        let mut stack = self.0.lock().unwrap_or_else(PoisonError::into_inner).clone();
        Box::pin(async move { stack.call(request).await })
    }
}

/// rustls with the Mozilla roots; plain `http://` stays allowed for a local
/// OSS server.
fn connector(connect_timeout: Duration) -> HttpsConnector<HttpConnector> {
    let roots: rustls::RootCertStore = webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();
    let tls = rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_connect_timeout(Some(connect_timeout));

    HttpsConnectorBuilder::new()
        .with_tls_config(tls)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(http)
}

/// Bottom of the stack: one round trip, body buffered as received.
#[derive(Clone)]
struct WireService {
    client: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    timeout: Duration,
}

impl WireService {
    fn new(settings: &Settings) -> Self {
        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(settings.pool_idle_timeout)
            .pool_max_idle_per_host(settings.pool_idle_per_host)
            .build(connector(settings.connect_timeout));

        Self {
            client,
            timeout: settings.timeout,
        }
    }

    fn to_hyper(request: Request<Bytes>) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, headers, body) = request.into_parts();

        headers
            .iter()
            .fold(
                http::Request::builder()
                    .method(http::Method::from(method))
                    .uri(url.as_str()),
                |builder, (name, value)| builder.header(name.as_str(), value.as_str()),
            )
            .body(body.map_or_else(Full::default, Full::new))
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    /// Flattens the wire headers. A repeated header keeps its first value,
    /// and values that are not visible ASCII are skipped.
    fn wire_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        let mut flat = HashMap::with_capacity(headers.keys_len());
        for (name, value) in headers {
            if let Ok(value) = value.to_str() {
                flat.entry(name.to_string())
                    .or_insert_with(|| value.to_string());
            }
        }
        flat
    }

    async fn round_trip(self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        let request = Self::to_hyper(request)?;

        let response = tokio::time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Self::classify)?;

        let status = response.status().as_u16();
        let headers = Self::wire_headers(response.headers());
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        Ok(Response::new(status, headers, body))
    }

    #[allow(clippy::needless_pass_by_value)]
    fn classify(err: hyper_util::client::legacy::Error) -> Error {
        let message = err.to_string();
        if !err.is_connect()
            && ["ssl", "tls", "certificate"]
                .iter()
                .any(|needle| message.contains(needle))
        {
            Error::tls(message)
        } else {
            Error::connection(message)
        }
    }
}

impl Service<Request<Bytes>> for WireService {
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = ServiceFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        Box::pin(self.clone().round_trip(request))
    }
}

/// Pooled HTTP/1.1 and HTTP/2 transport for [`crate::ApiClient`].
///
/// ```ignore
/// use std::time::Duration;
/// use influxdb_api::{ApiClient, HyperClient};
///
/// let http = HyperClient::builder()
///     .timeout(Duration::from_secs(10))
///     .with_logging()
///     .build();
/// let client = ApiClient::new(http, "http://localhost:8086")?;
/// ```
#[derive(Clone)]
pub struct HyperClient {
    stack: SharedStack,
    settings: Settings,
}

impl std::fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClient")
            .field("timeout", &self.settings.timeout)
            .field("connect_timeout", &self.settings.connect_timeout)
            .finish_non_exhaustive()
    }
}

impl HyperClient {
    /// Client with default timeouts and no middleware.
    #[must_use]
    pub fn new() -> Self {
        HyperClientBuilder::default().build()
    }

    /// Start configuring a client.
    #[must_use]
    pub fn builder() -> HyperClientBuilder {
        HyperClientBuilder::default()
    }

    /// Deadline for one exchange, up to the response head.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.settings.timeout
    }

    /// TCP connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.settings.connect_timeout
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl influxdb_api_core::HttpClient for HyperClient {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.stack.dispatch(request).await
    }
}

/// Builder for [`HyperClient`]. Unset settings keep their defaults: 30s
/// request timeout, 10s connect timeout, 32 idle connections per host kept
/// for 90s.
#[derive(Default)]
pub struct HyperClientBuilder {
    settings: Settings,
    layers: Vec<LayerFn>,
}

impl std::fmt::Debug for HyperClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperClientBuilder")
            .field("settings", &self.settings)
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl HyperClientBuilder {
    /// Deadline for one exchange, up to the response head.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// TCP connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.settings.connect_timeout = timeout;
        self
    }

    /// Maximum idle connections kept per host.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.settings.pool_idle_per_host = count;
        self
    }

    /// How long an idle connection is kept.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.settings.pool_idle_timeout = timeout;
        self
    }

    /// Wrap the transport in a Tower layer. The first layer added sits
    /// closest to the wire.
    ///
    /// A layer sees the response before the pipeline runs: the body is still
    /// encoded and a failed status is still a plain response.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxedService> + Send + Sync + 'static,
        L::Service: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<Request<Bytes>>>::Future: Send,
    {
        self.layers
            .push(Arc::new(move |stack| BoxCloneService::new(layer.layer(stack))));
        self
    }

    /// One info line per exchange.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Debug logging with request headers and body details.
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> HyperClient {
        let wire: BoxedService = BoxCloneService::new(WireService::new(&self.settings));
        let stack = self.layers.iter().fold(wire, |stack, layer| layer(stack));

        HyperClient {
            stack: SharedStack::new(stack),
            settings: self.settings,
        }
    }
}
