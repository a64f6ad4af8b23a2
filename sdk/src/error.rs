use std::path::PathBuf;
use thiserror::Error;

/// The only error that crosses the resolver boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid target {record}: {reason}")]
    InvalidTarget { record: String, reason: String },
}

impl ResolveError {
    #[must_use]
    pub fn invalid_target(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            record: record.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn is_invalid_target(&self) -> bool {
        matches!(self, Self::InvalidTarget { .. })
    }
}

/// Failure of the file stage. Always absorbed by the resolver.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode {origin}: {message}")]
    Decode { origin: String, message: String },

    #[error("{origin}: top-level document is not a mapping")]
    NotAMapping { origin: String },

    #[error("field '{field}' cannot be decoded: {message}")]
    Field { field: String, message: String },
}

impl SourceError {
    #[must_use]
    pub fn decode(origin: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            origin: origin.into(),
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn field(field: impl Into<String>, message: impl ToString) -> Self {
        Self::Field {
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// True when the file simply does not exist.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
