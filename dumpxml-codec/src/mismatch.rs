//! Structural mismatch diagnostics

use dumpxml_format::FieldPath;
use std::fmt;

/// What diverged between a JSON value and its XML counterpart
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchKind {
    /// No element exists for a non-null value
    MissingElement {
        /// Element name that was looked up
        name: String,
    },
    /// A pass-through sequence does not match its single bare element
    PassThroughMismatch {
        /// JSON rendering of the whole sequence
        expected: String,
        /// Text of the element, if one was found
        found: Option<String>,
    },
    /// Item count differs from the number of XML elements
    LengthMismatch {
        /// Items in the JSON sequence
        expected: usize,
        /// Elements found
        found: usize,
    },
    /// A wrapper element holds a child with the wrong name
    UnexpectedElement {
        /// Name derived from the wrapped key
        expected: String,
        /// Name found in the document
        found: String,
    },
    /// Scalar text differs
    ValueMismatch {
        /// Text form of the JSON value
        expected: String,
        /// Element text
        found: String,
    },
}

/// A structural divergence located by field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Where in the record the divergence was found
    pub path: FieldPath,
    /// What diverged
    pub kind: MismatchKind,
}

impl Mismatch {
    /// Create a mismatch at `path`
    pub fn new(path: FieldPath, kind: MismatchKind) -> Self {
        Self { path, kind }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MismatchKind::MissingElement { name } => {
                write!(f, "Missing key '{}' in XML at path: {}", name, self.path)
            }
            MismatchKind::PassThroughMismatch { expected, found } => write!(
                f,
                "Mismatch for '{}' at path: {} - Expected: {}, Found: {}",
                self.path.last_key().unwrap_or_default(),
                self.path,
                expected,
                found.as_deref().unwrap_or("None")
            ),
            MismatchKind::LengthMismatch { expected, found } => write!(
                f,
                "List length mismatch at path: {} - Expected: {}, Found: {}",
                self.path, expected, found
            ),
            MismatchKind::UnexpectedElement { expected, found } => write!(
                f,
                "Unexpected element at path: {} - Expected: <{}>, Found: <{}>",
                self.path, expected, found
            ),
            MismatchKind::ValueMismatch { expected, found } => write!(
                f,
                "Mismatch at path: {} - Expected: {}, Found: {}",
                self.path, expected, found
            ),
        }
    }
}

impl std::error::Error for Mismatch {}
