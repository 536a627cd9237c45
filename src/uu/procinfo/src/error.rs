// This file is part of the sysmon package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading a pseudo-file
#[derive(Debug, Error)]
pub enum ProcError {
    /// The file could not be opened or read
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file was read but the expected token is absent
    #[error("{}: missing field '{field}'", .path.display())]
    MissingField { path: PathBuf, field: String },
    /// The token is present but cannot be converted
    #[error("{}: invalid value '{value}' for '{field}'", .path.display())]
    InvalidValue {
        path: PathBuf,
        field: String,
        value: String,
    },
}

pub type ProcResult<T> = Result<T, ProcError>;

impl ProcError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn missing(path: &Path, field: impl Into<String>) -> Self {
        Self::MissingField {
            path: path.to_path_buf(),
            field: field.into(),
        }
    }

    pub(crate) fn invalid(path: &Path, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            path: path.to_path_buf(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// The file this error refers to
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::MissingField { path, .. }
            | Self::InvalidValue { path, .. } => path,
        }
    }

    /// `true` when the file itself does not exist, e.g. the process exited
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}
