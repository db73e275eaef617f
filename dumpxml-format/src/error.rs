//! Error types for dumpxml

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which file of a conversion or validation run an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// The JSON data dump being converted or sampled.
    InputJson,
    /// The XML document being written or validated.
    OutputXml,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileRole::InputJson => f.write_str("Input JSON"),
            FileRole::OutputXml => f.write_str("Output XML"),
        }
    }
}

/// dumpxml error types
#[derive(Debug, Error)]
pub enum DumpError {
    /// A file required by the run does not exist.
    #[error("{role} file '{}' not found.", path.display())]
    NotFound {
        /// Which file was missing
        role: FileRole,
        /// Path that was looked up
        path: PathBuf,
    },
    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// XML text could not be parsed.
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] roxmltree::Error),
    /// XML writer reported an error.
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Top-level JSON value is neither an object nor an array.
    #[error("Unsupported document root: expected object or array, found {found}")]
    UnsupportedRoot {
        /// Kind of value found at the root
        found: String,
    },
    /// A JSON key cannot be used as an XML element name.
    #[error("Invalid element name '{name}' at {path}")]
    InvalidElementName {
        /// Offending key
        name: String,
        /// Field path of the key
        path: String,
    },
    /// A string value holds a character XML 1.0 cannot represent.
    #[error("Invalid XML character {character:?} in value at {path}")]
    InvalidCharacter {
        /// Offending character
        character: char,
        /// Field path of the value
        path: String,
    },
    /// The field rule table is misconfigured.
    #[error("Invalid field rule for '{key}': {reason}")]
    InvalidFieldRule {
        /// Key the rule was configured for
        key: String,
        /// Why the rule cannot be used
        reason: String,
    },
    /// I/O operation failed while reading or writing data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DumpError>;
