//! Document-level structure checks

use crate::xml_nav::{find_child, find_children};
use dumpxml_format::constants::{RECORDS_TAG, RECORD_TAG};
use roxmltree::Node;
use thiserror::Error;

/// Reasons a converted document fails the structure check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// Root element is not `records`
    #[error("Root element should be '{expected}', found '{found}'")]
    UnexpectedRoot {
        /// Required root tag
        expected: String,
        /// Root tag in the document
        found: String,
    },
    /// A record lacks one of the required fields
    #[error("Required field '{field}' is missing in record {record_index}")]
    MissingRequiredField {
        /// Field that was looked up
        field: String,
        /// Zero-based position of the record under the root
        record_index: usize,
    },
}

/// Check that `root` is a `records` element and that each direct `record`
/// child carries every field in `required_fields`. Presence only; values are
/// not inspected.
pub fn validate_xml_structure<S: AsRef<str>>(
    root: Node<'_, '_>,
    required_fields: &[S],
) -> Result<(), StructureError> {
    let tag = root.tag_name().name();
    if tag != RECORDS_TAG {
        return Err(StructureError::UnexpectedRoot {
            expected: RECORDS_TAG.to_string(),
            found: tag.to_string(),
        });
    }

    for (record_index, record) in find_children(root, RECORD_TAG).into_iter().enumerate() {
        for field in required_fields {
            let field = field.as_ref();
            if find_child(record, field).is_none() {
                return Err(StructureError::MissingRequiredField {
                    field: field.to_string(),
                    record_index,
                });
            }
        }
    }
    Ok(())
}
