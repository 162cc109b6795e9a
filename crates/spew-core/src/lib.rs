//! # spew-core
//!
//! Core types shared by spew output sinks.
//!
//! A spewer is the last stage of a document extraction pipeline: it takes
//! the text and metadata an extractor produced for a source document and
//! persists them somewhere. This crate defines what every sink agrees on:
//! - [`Metadata`]: ordered, multi-valued document attributes
//! - [`Spewer`]: the write/close contract
//! - [`SpewerOptions`] with [`OutputFormat`] and [`OutputEncoding`]
//! - Error model ([`SpewError`])

pub mod error;
pub mod metadata;
pub mod options;
pub mod spewer;

pub use error::{Result, SpewError};
pub use metadata::Metadata;
pub use options::{OutputEncoding, OutputFormat, SpewerOptions};
pub use spewer::Spewer;
