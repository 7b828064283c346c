//! Response body normalization.
//!
//! InfluxDB may answer with `Content-Encoding: gzip`. [`gunzip_if_needed`]
//! hides that from callers: the returned body yields the logical payload
//! whatever the wire encoding, inflating lazily as it is read.
//!
//! Only the exact token `gzip` triggers decompression. Other encodings, lists
//! such as `gzip, identity` and other spellings such as `GZIP` are passed
//! through untouched.

use std::io::{self, BufReader, Read};

use bytes::Bytes;
use flate2::bufread::GzDecoder;

use crate::{Error, Response, Result};

type GzipBody<B> = GzDecoder<BufReader<B>>;

/// A response body, decompressed on the fly when the server gzip-encoded it.
///
/// The stream owns the underlying body; dropping it releases the body.
pub enum ResponseStream<B> {
    /// Body passed through as received.
    Identity(B),
    /// Body inflated while read.
    Gzip(GzipBody<B>),
}

impl<B> ResponseStream<B> {
    /// Returns `true` if reads go through the gzip decoder.
    #[must_use]
    pub const fn is_decompressing(&self) -> bool {
        matches!(self, Self::Gzip(_))
    }

    /// Give back the underlying body.
    ///
    /// For a gzip stream, bytes already consumed by the decoder are lost.
    #[must_use]
    pub fn into_inner(self) -> B {
        match self {
            Self::Identity(body) => body,
            Self::Gzip(decoder) => decoder.into_inner().into_inner(),
        }
    }
}

impl<B> std::fmt::Debug for ResponseStream<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity(_) => f.write_str("ResponseStream::Identity"),
            Self::Gzip(_) => f.write_str("ResponseStream::Gzip"),
        }
    }
}

impl<B: Read> Read for ResponseStream<B> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Identity(body) => body.read(buf),
            Self::Gzip(decoder) => decoder.read(buf),
        }
    }
}

/// Wrap the response body in a gzip decoder if the server compressed it.
///
/// The whole gzip header, optional fields included, is parsed eagerly; the
/// payload is inflated as it is read.
///
/// # Errors
///
/// Returns [`Error::Decompression`] if the body announces `gzip` but does not
/// start with a valid gzip header. The body is dropped before returning.
pub fn gunzip_if_needed<B: Read>(response: Response<B>) -> Result<Response<ResponseStream<B>>> {
    let gzipped = response.header("content-encoding") == Some("gzip");
    let (status, headers, body) = response.into_parts();

    let stream = if gzipped {
        ResponseStream::Gzip(open_gzip(body)?)
    } else {
        ResponseStream::Identity(body)
    };

    Ok(Response::new(status, headers, stream))
}

fn open_gzip<B: Read>(body: B) -> Result<GzipBody<B>> {
    let mut decoder = GzDecoder::new(BufReader::new(body));
    if decoder.header().is_some() {
        return Ok(decoder);
    }

    // The decoder keeps the header error and yields it on the first read.
    let message = match decoder.read(&mut []) {
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => "unexpected EOF",
        _ => "invalid header",
    };
    drop(decoder);
    Err(Error::Decompression(message.to_string()))
}

/// Read a body stream to the end.
///
/// # Errors
///
/// Returns [`Error::BodyRead`] if the stream fails, including gzip data
/// found corrupt mid-stream.
pub fn read_body<R: Read>(mut stream: R) -> Result<Bytes> {
    let mut buffer = Vec::new();
    stream.read_to_end(&mut buffer).map_err(Error::BodyRead)?;
    Ok(Bytes::from(buffer))
}
