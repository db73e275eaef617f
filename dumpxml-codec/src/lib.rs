//! dumpxml Codec - Transformation, serialization and comparison engines
//!
//! This crate implements the two algorithms that give the converter its
//! behaviour, plus the XML boundary on either side of them:
//!
//! - [`Transformer`]: rewrites a JSON record tree so sequences get container elements
//! - [`XmlDocumentWriter`]: serializes a wrapped document as pretty-printed XML
//! - [`Comparator`]: walks a JSON record and its XML element in lockstep
//! - [`validate_xml_structure`]: document-level presence checks

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod compare;
pub mod mismatch;
pub mod structure;
pub mod transform;
pub mod xml_nav;
pub mod xml_writer;

// Re-export commonly used types
pub use compare::Comparator;
pub use dumpxml_format::{DumpError, FieldPath, FieldRule, FieldRules, Result};
pub use mismatch::{Mismatch, MismatchKind};
pub use structure::{validate_xml_structure, StructureError};
pub use transform::{RootShape, Transformer, WrappedDocument};
pub use xml_writer::{to_xml_string, XmlDocumentWriter};
