//! Prelude module for convenient imports.
//!
//! ```ignore
//! use influxdb_api_core::prelude::*;
//! ```

pub use crate::{
    ApiError, ContentType, Endpoint, Error, ErrorDetail, ErrorDispatch, ErrorModel, HttpClient,
    Method, PathTemplate, Request, Response, Result, ScopePrefix,
};
