//! The contract every output sink implements.

use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::metadata::Metadata;

/// Persists the text and metadata extracted from one source document.
///
/// Implementations hold only read-mostly configuration, so a single spewer
/// can be shared by several extraction workers. Two writes that resolve to
/// the same destination are not coordinated; the last one wins.
pub trait Spewer: Send + Sync {
    /// Write the content read from `content` and the given metadata for the
    /// document at `path`.
    ///
    /// `content` is consumed to its end but stays owned by the caller, who is
    /// responsible for closing it.
    ///
    /// # Errors
    ///
    /// Returns a sink-side [`SpewError`](crate::SpewError) when the
    /// destination cannot be produced, or [`SpewError::Content`](crate::SpewError::Content)
    /// carrying the reader's error untouched when `content` fails.
    fn write(&self, path: &Path, metadata: &Metadata, content: &mut dyn Read) -> Result<()>;

    /// Release any resources held by the sink.
    fn close(&mut self) -> Result<()>;
}
