//! Error types for spew.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Top-level result type for spew operations.
pub type Result<T> = std::result::Result<T, SpewError>;

/// Top-level error type for spew.
///
/// Variants that name a destination carry the path that was being produced,
/// so callers can report it without re-resolving. Destination-side failures
/// and content-source failures never share a variant.
#[derive(Debug, Error)]
pub enum SpewError {
    #[error("unable to map source path to an output file: \"{}\"", path.display())]
    InvalidPath { path: PathBuf },

    #[error("unable to make directories for file: \"{}\"", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing output to file: \"{}\"", path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The content stream failed while it was being copied. The reader's own
    /// error is carried unmodified.
    #[error(transparent)]
    Content(io::Error),

    #[error("unable to output JSON to file: \"{}\"", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidOption { name: String, value: String },

    #[error("config error in \"{}\": {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl SpewError {
    /// Whether the failure happened on the output side (directories, content
    /// file, or metadata file).
    pub fn is_sink_error(&self) -> bool {
        matches!(
            self,
            Self::CreateDirectory { .. } | Self::Sink { .. } | Self::Metadata { .. }
        )
    }

    /// Whether the failure came from the caller-supplied content stream.
    pub fn is_content_error(&self) -> bool {
        matches!(self, Self::Content(_))
    }

    /// The path the failing operation was working on, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InvalidPath { path }
            | Self::CreateDirectory { path, .. }
            | Self::Sink { path, .. }
            | Self::Metadata { path, .. }
            | Self::Config { path, .. } => Some(path),
            Self::Content(_) | Self::InvalidOption { .. } => None,
        }
    }
}
