//! dumpxml Format - Core primitives for JSON data dump to XML conversion
//!
//! This crate provides the building blocks shared by the converter and the
//! validator, with no file I/O. It includes:
//!
//! - Constants (array-field whitelist, root tags, required record fields)
//! - Field rule table deciding how each key's sequence value is emitted
//! - Field paths used in diagnostics
//! - Value kinds and scalar text rendering
//! - Error types

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod path;
pub mod rules;
pub mod types;

// Re-export commonly used types
pub use error::{DumpError, FileRole, Result};
pub use path::{FieldPath, PathSegment};
pub use rules::{FieldRule, FieldRules};
pub use types::{is_valid_element_name, is_xml_char, scalar_text, ValueKind};
