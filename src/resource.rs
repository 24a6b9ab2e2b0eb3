//! Resource reference module
//!
//! Parses `resource:file:<path>` references and loads their bytes.
//! Loading always goes to the file system; nothing is cached.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tokio::fs;

use crate::error::{ResourceError, ResourceRefError};

const RESOURCE_PREFIX: &str = "resource:";
const FILE_SCHEME: &str = "file:";

/// A resolvable reference to response content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    /// File on the local file system
    File(PathBuf),
}

impl ResourceRef {
    /// File-system path backing this resource
    pub fn path(&self) -> &Path {
        match self {
            Self::File(path) => path,
        }
    }

    /// Read the full content of the resource
    ///
    /// Single attempt, no retry. Missing files map to
    /// [`ResourceError::NotFound`], everything else to an unreadable error.
    pub async fn load(&self) -> Result<Vec<u8>, ResourceError> {
        let path = self.path();
        fs::read(path)
            .await
            .map_err(|e| ResourceError::from_io(path.to_path_buf(), e))
    }
}

impl FromStr for ResourceRef {
    type Err = ResourceRefError;

    /// Accepts `resource:file:<path>`, `file:<path>` or a bare path
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let rest = match s.strip_prefix(RESOURCE_PREFIX) {
            Some(rest) => {
                if !rest.starts_with(FILE_SCHEME) {
                    let scheme = rest.split(':').next().unwrap_or_default();
                    return Err(ResourceRefError::UnsupportedScheme(scheme.to_string()));
                }
                rest
            }
            None => s,
        };

        let path = rest.strip_prefix(FILE_SCHEME).unwrap_or(rest);
        if path.is_empty() {
            return Err(ResourceRefError::EmptyPath);
        }

        Ok(Self::File(PathBuf::from(path)))
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{RESOURCE_PREFIX}{FILE_SCHEME}{}", path.display()),
        }
    }
}
