use std::io;

use ian_core::status::IanError;
use thiserror::Error;

/// Errors returned by the file-level readers and writers.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Format(#[from] IanError),

    #[error("Input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The format error behind this failure, if any.
    pub fn as_format(&self) -> Option<&IanError> {
        match self {
            Error::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Error::Utf8(e.utf8_error())
    }
}
