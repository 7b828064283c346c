use crate::models::{BucketTarget, WritePrecision};
use crate::{
    Endpoint, ErrorDispatch, ErrorShape, HttpClient, Method, PathTemplate, Result, StatusMatch,
};

/// Error table of the write endpoint.
///
/// `400` carries a line-protocol error pointing at the offending line and
/// `413` a length error. Any other status uses the standard document.
pub const WRITE_ERRORS: ErrorDispatch = ErrorDispatch::new(&[
    (StatusMatch::Exact(400), ErrorShape::LineProtocol),
    (StatusMatch::Exact(413), ErrorShape::LineProtocolLength),
]);

/// Options of a write call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Timestamp precision of the points.
    pub precision: WritePrecision,
    /// Gzip-compress the request body.
    pub gzip: bool,
}

api_service! {
    /// Line protocol writes.
    WriteApi
}

impl<C: HttpClient> WriteApi<C> {
    /// `POST /api/v2/write`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails. A rejected line surfaces as
    /// [`crate::ErrorDetail::LineProtocol`], an oversized body as
    /// [`crate::ErrorDetail::LineProtocolLength`].
    pub async fn post_write(
        &self,
        target: &BucketTarget,
        lines: impl Into<String>,
        options: WriteOptions,
    ) -> Result<()> {
        let endpoint = Endpoint::new(Method::Post, PathTemplate::new("/api/v2/write"))
            .query_params(target)?
            .query("precision", options.precision.to_string())
            .text(lines)
            .compress(options.gzip)
            .with_dispatch(WRITE_ERRORS);
        self.client.call_empty(endpoint).await
    }
}
