//! Core types for the InfluxDB v2 API client.
//!
//! This crate holds the transport-independent part of the client:
//! - [`Method`], [`Request`] and [`Response`] - HTTP message types
//! - [`Endpoint`] and [`PathTemplate`] - declarative description of one API call
//! - [`HttpClient`] - the transport seam
//! - [`gunzip_if_needed`] - response body normalization
//! - [`ApiError`], [`ScopePrefix`] and [`ErrorDispatch`] - error envelopes for failed calls
//! - [`process_response`] - the pipeline step tying the above together
//! - [`Error`] and [`Result`] - error handling
//! - [`StatusCode`] and [`header`] - re-exported from the `http` crate

mod api_error;
mod body;
mod client;
mod endpoint;
mod error;
mod error_dispatch;
mod gunzip;
mod method;
mod models;
mod path_template;
mod pipeline;
pub mod prelude;
mod request;
mod response;

pub use api_error::{ApiError, BUILD_HEADER, ErrorContext, ScopePrefix};
pub use body::{ContentType, decode, from_json, gzip, is_json, to_json, to_query_string};
pub use client::HttpClient;
pub use endpoint::Endpoint;
pub use error::{Error, Result};
pub use error_dispatch::{ErrorDispatch, ErrorShape, StatusMatch};
pub use gunzip::{ResponseStream, gunzip_if_needed, read_body};
pub use method::Method;
pub use models::{ErrorBody, ErrorDetail, ErrorModel, LineProtocolError, LineProtocolLengthError};
pub use path_template::PathTemplate;
pub use pipeline::process_response;
pub use request::{Request, RequestBuilder};
pub use response::Response;

pub use http::{StatusCode, header};
