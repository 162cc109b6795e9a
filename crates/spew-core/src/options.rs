//! Output configuration shared by spewers.
//!
//! Options can be read from a TOML file using the same kebab-case keys the
//! command line accepts:
//! ```toml
//! output-directory = "/srv/extract/out"
//! output-format = "html"
//! output-metadata = true
//! output-encoding = "windows-1252"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::error::SpewError;

/// Format the extractor renders content in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

impl FromStr for OutputFormat {
    type Err = SpewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            _ => Err(SpewError::InvalidOption {
                name: "output-format".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = SpewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputFormat> for String {
    fn from(value: OutputFormat) -> Self {
        value.to_string()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Html => f.write_str("html"),
        }
    }
}

/// Character encoding content is written in.
///
/// Resolved from a WHATWG label. Encodings without a byte-oriented encoder
/// (the UTF-16 family) write UTF-8 instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OutputEncoding(&'static Encoding);

impl OutputEncoding {
    /// The encoding bytes are actually produced in.
    pub fn encoding(&self) -> &'static Encoding {
        self.0.output_encoding()
    }

    pub fn name(&self) -> &'static str {
        self.encoding().name()
    }
}

impl Default for OutputEncoding {
    fn default() -> Self {
        Self(encoding_rs::UTF_8)
    }
}

impl FromStr for OutputEncoding {
    type Err = SpewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::for_label(s.trim().as_bytes())
            .map(Self)
            .ok_or_else(|| SpewError::InvalidOption {
                name: "output-encoding".to_string(),
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for OutputEncoding {
    type Error = SpewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputEncoding> for String {
    fn from(value: OutputEncoding) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Construction-time options for a spewer. Unset fields fall back to the
/// spewer's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SpewerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<OutputFormat>,
    /// Overrides the extension implied by `output_format`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_metadata: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_encoding: Option<OutputEncoding>,
}

impl SpewerOptions {
    /// Parse options from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SpewError::Config`] if the text is not valid TOML or holds
    /// unknown keys or bad values.
    pub fn from_toml_str(text: &str) -> Result<Self, SpewError> {
        toml::from_str(text).map_err(|e| SpewError::Config {
            path: PathBuf::from("<inline>"),
            message: e.message().to_string(),
        })
    }

    /// Read options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SpewError::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SpewError> {
        let text = std::fs::read_to_string(path).map_err(|e| SpewError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| SpewError::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Layer `overrides` on top of `self`; every field set in `overrides`
    /// wins.
    pub fn merge(self, overrides: SpewerOptions) -> SpewerOptions {
        SpewerOptions {
            output_directory: overrides.output_directory.or(self.output_directory),
            output_format: overrides.output_format.or(self.output_format),
            output_extension: overrides.output_extension.or(self.output_extension),
            output_metadata: overrides.output_metadata.or(self.output_metadata),
            output_encoding: overrides.output_encoding.or(self.output_encoding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!(" text ".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        let err = "pdf".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, SpewError::InvalidOption { ref name, .. } if name == "output-format"));
    }

    #[test]
    fn output_encoding_resolves_labels() {
        let latin1: OutputEncoding = "iso-8859-1".parse().unwrap();
        assert_eq!(latin1.name(), "windows-1252");
        assert_eq!(OutputEncoding::default().name(), "UTF-8");
        assert!("klingon".parse::<OutputEncoding>().is_err());
    }

    #[test]
    fn utf16_labels_write_utf8() {
        let utf16: OutputEncoding = "utf-16le".parse().unwrap();
        assert_eq!(utf16.encoding(), encoding_rs::UTF_8);
    }

    #[test]
    fn options_parse_from_toml() {
        let options = SpewerOptions::from_toml_str(
            r#"
output-directory = "/srv/out"
output-format = "HTML"
output-metadata = false
output-encoding = "shift_jis"
"#,
        )
        .unwrap();

        assert_eq!(options.output_directory, Some(PathBuf::from("/srv/out")));
        assert_eq!(options.output_format, Some(OutputFormat::Html));
        assert_eq!(options.output_metadata, Some(false));
        assert_eq!(options.output_encoding.unwrap().name(), "Shift_JIS");
        assert!(options.output_extension.is_none());
    }

    #[test]
    fn toml_rejects_unknown_keys_and_bad_values() {
        assert!(SpewerOptions::from_toml_str("output-dir = \"x\"").is_err());
        assert!(SpewerOptions::from_toml_str("output-encoding = \"nope\"").is_err());
        assert!(SpewerOptions::from_toml_str("output-format = \"pdf\"").is_err());
    }

    #[test]
    fn load_reads_file_and_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spew.toml");
        std::fs::write(&path, "output-extension = \"md\"\n").unwrap();

        let options = SpewerOptions::load(&path).unwrap();
        assert_eq!(options.output_extension.as_deref(), Some("md"));

        let missing = dir.path().join("missing.toml");
        let err = SpewerOptions::load(&missing).unwrap_err();
        assert_eq!(err.path(), Some(missing.as_path()));
    }

    #[test]
    fn merge_prefers_overrides() {
        let base = SpewerOptions {
            output_directory: Some(PathBuf::from("base")),
            output_format: Some(OutputFormat::Html),
            output_metadata: Some(false),
            ..Default::default()
        };
        let overrides = SpewerOptions {
            output_directory: Some(PathBuf::from("flag")),
            output_extension: Some("md".to_string()),
            ..Default::default()
        };

        let merged = base.merge(overrides);
        assert_eq!(merged.output_directory, Some(PathBuf::from("flag")));
        assert_eq!(merged.output_format, Some(OutputFormat::Html));
        assert_eq!(merged.output_extension.as_deref(), Some("md"));
        assert_eq!(merged.output_metadata, Some(false));
    }
}
