//! Mapping source documents to output files.
//!
//! The output tree mirrors the source tree under a root directory. A source
//! at `/a/b/doc.pdf` with extension `txt` and root `/out` produces:
//! ```text
//! /out/a/b/doc.pdf.txt    content
//! /out/a/b/doc.pdf.json   metadata
//! ```

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use spew_core::error::SpewError;

/// Destination paths for one source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Source path joined onto the output root, before any suffix.
    pub base: PathBuf,
    /// Where content is written: `base` plus the output extension, if any.
    pub content: PathBuf,
    /// Where metadata is written: always `base` plus `.json`.
    pub metadata: PathBuf,
}

/// Trim an extension and map empty or all-whitespace values to `None`.
pub fn normalize_extension(extension: Option<&str>) -> Option<String> {
    extension
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
}

/// Resolve the output paths for `source` under `output_root`.
///
/// Absolute sources lose their root and are joined like relative ones, so
/// nothing is ever written outside `output_root`. The extension goes through
/// [`normalize_extension`]; an empty one leaves the content path unsuffixed. `..` segments can only
/// climb back up segments the source itself added.
///
/// # Errors
///
/// Returns [`SpewError::InvalidPath`] if `source` leaves nothing to join
/// (empty, `/`, or only `..` segments).
pub fn resolve(
    source: &Path,
    output_root: &Path,
    extension: Option<&str>,
) -> Result<OutputPaths, SpewError> {
    let relative = contained(source);
    if relative.as_os_str().is_empty() {
        return Err(SpewError::InvalidPath {
            path: source.to_path_buf(),
        });
    }

    let base = output_root.join(relative);
    let content = match normalize_extension(extension) {
        Some(ext) => with_suffix(&base, &ext),
        None => base.clone(),
    };
    let metadata = with_suffix(&base, "json");

    Ok(OutputPaths {
        base,
        content,
        metadata,
    })
}

/// Strip roots and prefixes, drop `.`, and resolve `..` lexically without
/// ever popping past the start.
fn contained(source: &Path) -> PathBuf {
    let mut relative = PathBuf::new();
    for component in source.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                relative.pop();
            }
            Component::Normal(segment) => relative.push(segment),
        }
    }
    relative
}

fn with_suffix(base: &Path, extension: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}
