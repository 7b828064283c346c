//! Status-code driven selection of the error model to decode.
//!
//! Most endpoints report failures with the standard error document. A few
//! declare alternate shapes for specific statuses: the write endpoint answers
//! `400` with a line-protocol error and `413` with a length error. Each
//! endpoint carries an [`ErrorDispatch`] table; the first row whose
//! [`StatusMatch`] accepts the status wins, and [`ErrorShape::Standard`] is
//! used when no row matches.

use crate::{
    ErrorBody, ErrorDetail, LineProtocolError, LineProtocolLengthError, Result, body::decode,
};

/// Predicate on an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusMatch {
    /// Exactly this status.
    Exact(u16),
    /// Any status in the inclusive range.
    Range(u16, u16),
    /// Any status.
    Any,
}

impl StatusMatch {
    /// Returns `true` if `status` satisfies the predicate.
    #[must_use]
    pub const fn matches(self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == expected,
            Self::Range(low, high) => low <= status && status <= high,
            Self::Any => true,
        }
    }
}

/// Error document shape to decode a failed response into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorShape {
    /// [`ErrorBody`], the `{code, message}` document.
    #[default]
    Standard,
    /// [`LineProtocolError`].
    LineProtocol,
    /// [`LineProtocolLengthError`].
    LineProtocolLength,
}

impl ErrorShape {
    /// Decode `body` into this shape using the declared content type.
    pub fn decode(self, body: &[u8], content_type: Option<&str>) -> Result<ErrorDetail> {
        Ok(match self {
            Self::Standard => ErrorDetail::Standard(decode::<ErrorBody>(body, content_type)?),
            Self::LineProtocol => {
                ErrorDetail::LineProtocol(decode::<LineProtocolError>(body, content_type)?)
            }
            Self::LineProtocolLength => ErrorDetail::LineProtocolLength(decode::<
                LineProtocolLengthError,
            >(body, content_type)?),
        })
    }
}

/// Ordered `(status predicate, shape)` table for one endpoint.
///
/// ```
/// use influxdb_api_core::{ErrorDispatch, ErrorShape, StatusMatch};
///
/// const WRITE: ErrorDispatch = ErrorDispatch::new(&[
///     (StatusMatch::Exact(400), ErrorShape::LineProtocol),
///     (StatusMatch::Exact(413), ErrorShape::LineProtocolLength),
/// ]);
///
/// assert_eq!(WRITE.shape_for(400), ErrorShape::LineProtocol);
/// assert_eq!(WRITE.shape_for(401), ErrorShape::Standard);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorDispatch {
    rules: &'static [(StatusMatch, ErrorShape)],
}

impl ErrorDispatch {
    /// Table with no rows: every failure decodes as [`ErrorShape::Standard`].
    pub const STANDARD: Self = Self::new(&[]);

    /// Create a table from ordered rows.
    #[must_use]
    pub const fn new(rules: &'static [(StatusMatch, ErrorShape)]) -> Self {
        Self { rules }
    }

    /// Rows of the table, in evaluation order.
    #[must_use]
    pub const fn rules(&self) -> &'static [(StatusMatch, ErrorShape)] {
        self.rules
    }

    /// Shape to decode a response with the given status into.
    #[must_use]
    pub fn shape_for(&self, status: u16) -> ErrorShape {
        self.rules
            .iter()
            .find(|(predicate, _)| predicate.matches(status))
            .map_or(ErrorShape::Standard, |(_, shape)| *shape)
    }
}

impl Default for ErrorDispatch {
    fn default() -> Self {
        Self::STANDARD
    }
}
