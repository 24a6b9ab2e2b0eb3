//! Error types for the file route server

use std::path::PathBuf;

use hyper::StatusCode;
use thiserror::Error;

/// Errors raised while building the startup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration sources could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Source(#[from] ::config::ConfigError),

    /// Host/port pair does not form a socket address
    #[error("Invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Route target is not a usable resource reference
    #[error("Invalid route target '{target}': {source}")]
    InvalidTarget {
        target: String,
        #[source]
        source: ResourceRefError,
    },
}

/// Errors raised while parsing a resource reference
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceRefError {
    #[error("unsupported resource scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("resource path is empty")]
    EmptyPath,
}

/// Errors raised while reading the route target for a request
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ResourceError {
    /// Classify an I/O failure for `path`
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }

    /// HTTP status reported to the caller
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::PermissionDenied { .. } | Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
