//! Client for a subset of the InfluxDB v2 HTTP API.
//!
//! Every call goes through the same response pipeline: a gzip-encoded body is
//! inflated transparently, and a failed status becomes an [`ApiError`] whose
//! message names the status, the server's own explanation and, for services
//! marked `only_oss()` or `only_cloud()`, the flavor the command targets.
//!
//! # Example
//!
//! ```ignore
//! use influxdb_api::prelude::*;
//! use influxdb_api::models::{BucketTarget, ListBucketsParams};
//!
//! let client = ApiClient::new(HyperClient::new(), "http://localhost:8086")?
//!     .with_header("Authorization", "Token my-token");
//!
//! let buckets = client.buckets().list(&ListBucketsParams::default()).await?;
//!
//! client
//!     .write()
//!     .post_write(&BucketTarget::named("acme", "telemetry"), "cpu usage=0.5", WriteOptions::default())
//!     .await?;
//! ```

mod api_client;
mod client;
pub mod middleware;
pub mod models;
pub mod prelude;
mod services;

pub use api_client::{ApiClient, DEFAULT_USER_AGENT};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use services::{
    BucketsApi, DeleteApi, HealthApi, SetupApi, WRITE_ERRORS, WriteApi, WriteOptions,
};

pub use tower;

pub use influxdb_api_core::{
    ApiError, BUILD_HEADER, ContentType, Endpoint, Error, ErrorBody, ErrorContext, ErrorDetail,
    ErrorDispatch, ErrorModel, ErrorShape, HttpClient, LineProtocolError, LineProtocolLengthError,
    Method, PathTemplate, Request, RequestBuilder, Response, ResponseStream, Result, ScopePrefix,
    StatusMatch, decode, from_json, gunzip_if_needed, gzip, is_json, process_response, read_body,
    to_json, to_query_string,
};

pub use influxdb_api_core::{StatusCode, header};

pub use url;
