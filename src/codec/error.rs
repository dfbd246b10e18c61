use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Leb128Error {
    /// The byte source ran dry before the final group arrived
    UnexpectedEof,
    /// An in-memory buffer ended before the final group
    Truncated { needed: usize, available: usize },
    /// The group cap was reached with the continuation bit still set
    Malformed { groups: usize },
    InvalidOptions(&'static str),
    Io(io::Error),
}

impl fmt::Display for Leb128Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leb128Error::UnexpectedEof =>
                write!(f, "unexpected end of input"),
            Leb128Error::Truncated { needed, available } =>
                write!(f, "truncated varint: needed at least {} bytes, {} available", needed, available),
            Leb128Error::Malformed { groups } =>
                write!(f, "malformed varint: continuation bit still set after {} groups", groups),
            Leb128Error::InvalidOptions(reason) =>
                write!(f, "invalid decode options: {}", reason),
            Leb128Error::Io(e) =>
                write!(f, "byte source failed: {}", e),
        }
    }
}

impl std::error::Error for Leb128Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Leb128Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Leb128Error {
    fn from(e: io::Error) -> Self {
        Leb128Error::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, Leb128Error>;
