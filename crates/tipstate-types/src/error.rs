use std::fmt;

/// Result type for tipstate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared across the tipstate crates
#[derive(Debug)]
pub enum Error {
    /// The snapshot is self-inconsistent (a tip or retip references a URL
    /// absent from the url registry or the claims ledger)
    Consistency(String),

    /// The caller passed input the transformation cannot work with
    /// (missing wrapper metadata, malformed version tags, empty input)
    InputShape(String),

    /// JSON decoding failed
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Consistency(msg) => write!(f, "Consistency error: {}", msg),
            Error::InputShape(msg) => write!(f, "Input shape error: {}", msg),
            Error::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            Error::Consistency(_) | Error::InputShape(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
