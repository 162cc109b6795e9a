//! # spew-fs
//!
//! Filesystem output for extracted documents.
//!
//! [`FileSpewer`] mirrors each source path under an output directory and
//! writes two siblings there: the extracted text (with a configurable
//! extension) and the metadata as JSON. Content is copied through a
//! [`TaggedWriter`], so a failure while copying is reported either as a
//! sink error (the output file broke) or passed through untouched as a
//! content error (the caller's stream broke).

pub mod copy;
pub mod metadata;
pub mod path;
pub mod spewer;
pub mod tagged;

pub use path::{normalize_extension, resolve, OutputPaths};
pub use spewer::{FileSpewer, DEFAULT_EXTENSION};
pub use tagged::TaggedWriter;
