//! Error types shared by the scanner, resolver and placer.

use crate::config::ConfigError;
use std::path::PathBuf;

/// Errors that can occur while sorting a directory.
#[derive(Debug)]
pub enum SortError {
    /// The requested operation is not one of the known strategies.
    InvalidOperation { name: String },
    /// The source folder is missing or is not a directory.
    InvalidSource { path: PathBuf, reason: String },
    /// A filesystem call failed for the given path.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Something already occupies the computed destination path.
    DestinationCollision {
        source: PathBuf,
        destination: PathBuf,
    },
    /// The configuration file could not be loaded or compiled.
    Config(ConfigError),
}

impl SortError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Short label used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidOperation { .. } => "invalid operation",
            Self::InvalidSource { .. } => "invalid source",
            Self::Io { .. } => "io",
            Self::DestinationCollision { .. } => "collision",
            Self::Config(_) => "config",
        }
    }
}

impl std::fmt::Display for SortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOperation { name } => {
                write!(
                    f,
                    "Not a valid operation: '{}' (expected one of: {})",
                    name,
                    crate::strategy::Operation::names().join(", ")
                )
            }
            Self::InvalidSource { path, reason } => {
                write!(f, "Not a valid input folder {}: {}", path.display(), reason)
            }
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::DestinationCollision {
                source,
                destination,
            } => {
                write!(
                    f,
                    "Cannot move {}: {} already exists",
                    source.display(),
                    destination.display()
                )
            }
            Self::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SortError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Result type for sorting operations.
pub type SortResult<T> = Result<T, SortError>;
