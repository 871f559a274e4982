//! Types for error handling.

use std::error::Error as StdError;
use std::fmt;
use std::io;

/// All possible errors that can be returned when describing media or
/// assembling a request for a dispatcher.
///
/// Building form data and calling the [`Media`](crate::Media) methods never
/// fails; errors only occur at the edges where loosely-typed input is turned
/// into the structured types of this crate, or where a request is assembled.
#[derive(Debug)]
pub enum Error {
    /// An attributed media description did not contain a `file` entry.
    MissingFile,
    /// A remote media description did not contain a `url` entry.
    MissingUrl,
    /// A value could not be interpreted as a media source.
    InvalidSource(String),
    /// Validation error when constructing the request.
    InvalidHttpFormat(http::Error),
    /// The request URL could not be parsed.
    InvalidUrl(url::ParseError),
    /// A JSON body could not be serialized.
    Json(serde_json::Error),
    /// An I/O error while reading a media stream.
    Io(io::Error),
}

impl Error {
    pub(crate) fn invalid_source<S: Into<String>>(msg: S) -> Self {
        Error::InvalidSource(msg.into())
    }

    /// Returns true if this error was caused by an I/O failure.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingFile => f.write_str("media description has no `file` entry"),
            Error::MissingUrl => f.write_str("media description has no `url` entry"),
            Error::InvalidSource(msg) => write!(f, "invalid media source: {}", msg),
            Error::InvalidHttpFormat(e) => write!(f, "invalid request: {}", e),
            Error::InvalidUrl(e) => write!(f, "invalid request url: {}", e),
            Error::Json(e) => write!(f, "failed to serialize request body: {}", e),
            Error::Io(e) => write!(f, "media stream error: {}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::InvalidHttpFormat(e) => Some(e),
            Error::InvalidUrl(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

#[doc(hidden)]
impl From<http::Error> for Error {
    fn from(error: http::Error) -> Error {
        Error::InvalidHttpFormat(error)
    }
}

#[doc(hidden)]
impl From<url::ParseError> for Error {
    fn from(error: url::ParseError) -> Error {
        Error::InvalidUrl(error)
    }
}

#[doc(hidden)]
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

#[doc(hidden)]
impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        Error::Io(error)
    }
}

#[doc(hidden)]
impl From<Error> for io::Error {
    fn from(error: Error) -> io::Error {
        match error {
            Error::Io(e) => e,
            e => io::Error::new(io::ErrorKind::Other, e),
        }
    }
}
