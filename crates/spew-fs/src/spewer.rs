//! Filesystem spewer.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use spew_core::error::SpewError;
use spew_core::metadata::Metadata;
use spew_core::options::{OutputEncoding, OutputFormat, SpewerOptions};
use spew_core::spewer::Spewer;

use crate::copy::copy_text;
use crate::metadata::write_metadata;
use crate::path::{self, OutputPaths};
use crate::tagged::TaggedWriter;

/// Extension used for content when neither a format nor an explicit
/// extension says otherwise.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Writes extracted content and metadata into a directory tree that mirrors
/// the source paths.
///
/// Writes are not atomic: a failure part-way through leaves whatever was
/// already written in place.
#[derive(Debug, Clone)]
pub struct FileSpewer {
    output_directory: PathBuf,
    output_extension: Option<String>,
    output_metadata: bool,
    output_encoding: OutputEncoding,
}

impl FileSpewer {
    /// Create a spewer rooted at `output_directory` with default settings:
    /// `txt` extension, metadata enabled, UTF-8 output.
    pub fn new(output_directory: impl Into<PathBuf>) -> Self {
        Self {
            output_directory: output_directory.into(),
            output_extension: Some(DEFAULT_EXTENSION.to_string()),
            output_metadata: true,
            output_encoding: OutputEncoding::default(),
        }
    }

    /// Create a spewer from options. The output directory defaults to the
    /// current directory; an explicit extension wins over the one implied by
    /// the output format.
    pub fn from_options(options: &SpewerOptions) -> Self {
        let output_directory = options
            .output_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let mut spewer = Self::new(output_directory);
        if options.output_format == Some(OutputFormat::Html) {
            spewer.set_output_extension(Some("html"));
        }
        if let Some(ext) = &options.output_extension {
            spewer.set_output_extension(Some(ext));
        }
        if let Some(enabled) = options.output_metadata {
            spewer.set_output_metadata(enabled);
        }
        if let Some(encoding) = options.output_encoding {
            spewer.set_output_encoding(encoding);
        }
        spewer
    }

    pub fn with_output_extension(mut self, extension: Option<&str>) -> Self {
        self.set_output_extension(extension);
        self
    }

    pub fn with_output_metadata(mut self, enabled: bool) -> Self {
        self.set_output_metadata(enabled);
        self
    }

    pub fn with_output_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.set_output_encoding(encoding);
        self
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn output_extension(&self) -> Option<&str> {
        self.output_extension.as_deref()
    }

    /// Set the content extension. `None`, empty and all-whitespace values
    /// mean content files get no suffix.
    pub fn set_output_extension(&mut self, extension: Option<&str>) {
        self.output_extension = path::normalize_extension(extension);
    }

    pub fn output_metadata(&self) -> bool {
        self.output_metadata
    }

    pub fn set_output_metadata(&mut self, enabled: bool) {
        self.output_metadata = enabled;
    }

    pub fn output_encoding(&self) -> OutputEncoding {
        self.output_encoding
    }

    pub fn set_output_encoding(&mut self, encoding: OutputEncoding) {
        self.output_encoding = encoding;
    }

    /// Where a write for `source` would put its content and metadata.
    ///
    /// # Errors
    ///
    /// Returns [`SpewError::InvalidPath`] if `source` has nothing to mirror.
    pub fn paths_for(&self, source: &Path) -> Result<OutputPaths, SpewError> {
        path::resolve(source, &self.output_directory, self.output_extension())
    }

    /// Copy `content` into `sink`, attributing any failure to one side.
    fn write_content<W: Write>(
        &self,
        destination: &Path,
        sink: W,
        content: &mut dyn Read,
    ) -> Result<u64, SpewError> {
        let mut tagged = TaggedWriter::new(sink);
        let result = copy_text(content, &mut tagged, self.output_encoding.encoding());

        match result {
            Ok(written) => Ok(written),
            Err(err) => match tagged.untag(err) {
                Ok(source) => Err(SpewError::Sink {
                    path: destination.to_path_buf(),
                    source,
                }),
                Err(err) => Err(SpewError::Content(err)),
            },
        }
    }
}

impl Spewer for FileSpewer {
    fn write(
        &self,
        path: &Path,
        metadata: &Metadata,
        content: &mut dyn Read,
    ) -> Result<(), SpewError> {
        let paths = self.paths_for(path)?;

        info!(path = %paths.content.display(), "outputting to file");
        make_parent_dirs(&paths.content)?;

        let mut file = File::create(&paths.content).map_err(|source| SpewError::Sink {
            path: paths.content.clone(),
            source,
        })?;
        let written = self.write_content(&paths.content, &mut file, content)?;
        file.sync_all().map_err(|source| SpewError::Sink {
            path: paths.content.clone(),
            source,
        })?;
        debug!(path = %paths.content.display(), bytes = written, "content written");

        if self.output_metadata {
            write_metadata(&paths.metadata, metadata)?;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), SpewError> {
        Ok(())
    }
}

/// Create every missing ancestor of `file`. Fails only when the parent is
/// still not a directory afterwards, so a concurrent creator is not an error.
fn make_parent_dirs(file: &Path) -> Result<(), SpewError> {
    let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };

    match fs::create_dir_all(parent) {
        Ok(()) => {
            debug!(path = %parent.display(), "output directory ready");
            Ok(())
        }
        Err(_) if parent.is_dir() => Ok(()),
        Err(source) => Err(SpewError::CreateDirectory {
            path: file.to_path_buf(),
            source,
        }),
    }
}
