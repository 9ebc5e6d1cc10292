use std::error::Error;
use std::fmt;

/// An invalid `Accept`, `Accept-Charset`, `Accept-Encoding` or
/// `Accept-Language` value, or an invalid `ContentType`.
///
/// A header that fails to parse is rejected as a whole; no partial list
/// of preferences is ever returned alongside this error.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub(crate) inner: accept_parse::ParseError,
}

impl From<accept_parse::ParseError> for ParseError {
    fn from(inner: accept_parse::ParseError) -> ParseError {
        ParseError { inner }
    }
}

impl Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid header value: {}", self.inner)
    }
}

/// Logs a rejected header value and wraps the grammar error.
pub(crate) fn rejected(header: &'static str, inner: accept_parse::ParseError) -> ParseError {
    tracing::debug!(header, error = %inner, "rejected header value");
    ParseError { inner }
}
