//! Tower middleware for [`crate::HyperClient`].
//!
//! Layers wrap the transport and see raw responses: a gzip body is still
//! compressed at this point.
//!
//! ```ignore
//! use influxdb_api::HyperClient;
//! use influxdb_api::middleware::LoggingLayer;
//!
//! let client = HyperClient::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

pub use tower::{Layer, ServiceBuilder};
