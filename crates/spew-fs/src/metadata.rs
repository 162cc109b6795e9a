//! JSON metadata output.
//!
//! Metadata is written as one pretty-printed object of string fields, in the
//! metadata's own order, followed by a single newline:
//! ```json
//! {
//!   "title": "Report",
//!   "author": "J. Doe"
//! }
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use spew_core::error::SpewError;
use spew_core::metadata::Metadata;
use tracing::info;

/// Render metadata exactly as [`write_metadata`] stores it.
///
/// # Errors
///
/// Returns the serializer's error if `metadata` cannot be rendered.
pub fn to_json_string(metadata: &Metadata) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(metadata)?;
    json.push('\n');
    Ok(json)
}

/// Write metadata as JSON to `destination`, replacing any existing file.
///
/// # Errors
///
/// Returns [`SpewError::Metadata`] if the file cannot be created or written.
pub fn write_metadata(destination: &Path, metadata: &Metadata) -> Result<(), SpewError> {
    info!(path = %destination.display(), "outputting metadata to file");

    let file = File::create(destination).map_err(|source| SpewError::Metadata {
        path: destination.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    write_json(&mut writer, metadata)
        .and_then(|()| writer.flush())
        .map_err(|source| SpewError::Metadata {
            path: destination.to_path_buf(),
            source,
        })
}

fn write_json<W: Write>(writer: &mut W, metadata: &Metadata) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, metadata)?;
    writer.write_all(b"\n")
}
