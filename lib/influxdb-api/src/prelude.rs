//! Prelude module for convenient imports.
//!
//! ```ignore
//! use influxdb_api::prelude::*;
//! ```

pub use crate::{
    ApiClient, ApiError, BucketsApi, DeleteApi, Error, ErrorDetail, ErrorModel,
    HealthApi, HttpClient, HyperClient, Result, ScopePrefix, SetupApi, StatusCode, WriteApi,
    WriteOptions,
};
