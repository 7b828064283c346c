//! Response processing shared by every endpoint.

use bytes::{Buf, Bytes};

use crate::{
    ApiError, ErrorContext, ErrorDispatch, Response, Result, ScopePrefix, gunzip_if_needed,
    read_body,
};

/// Turn a raw transport response into a decoded body or an [`ApiError`].
///
/// The body is decompressed when the server gzip-encoded it, then read in
/// full. A status of `300` or above becomes [`crate::Error::Api`]; otherwise
/// the response is returned with the decoded body. `Content-Encoding: gzip`
/// is removed once the body has been inflated; any other encoding is kept.
///
/// # Errors
///
/// Returns [`crate::Error::Decompression`] or [`crate::Error::BodyRead`] when
/// the body cannot be decoded, and [`crate::Error::Api`] for a failed call.
pub fn process_response(
    response: Response<Bytes>,
    scope: ScopePrefix,
    dispatch: &ErrorDispatch,
) -> Result<Response<Bytes>> {
    let response = gunzip_if_needed(response.map_body(Buf::reader))?;
    let (status, mut headers, stream) = response.into_parts();
    if stream.is_decompressing() {
        headers.retain(|name, _| !name.eq_ignore_ascii_case("content-encoding"));
    }
    let body = read_body(stream)?;
    let response = Response::new(status, headers, body);

    if status < 300 {
        return Ok(response);
    }

    let context = ErrorContext {
        status,
        body: response.body().clone(),
        content_type: response.content_type(),
        scope,
        build_version: response.build_version(),
    };
    Err(ApiError::build(context, dispatch).into())
}
