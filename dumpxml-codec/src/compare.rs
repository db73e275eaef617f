//! Structural comparison of JSON records against parsed XML
//!
//! The comparator mirrors the transformer's per-key rules, so it knows which
//! XML shape each JSON sequence was serialized into:
//!
//! - wrapped keys: one wrapper element holding one child per item
//! - pass-through keys: a single bare element whose text must equal the only item
//! - everything else: a run of sibling elements repeating the key
//!
//! Comparison stops at the first divergence within a record and reports it as
//! a [`Mismatch`] carrying the field path.

use crate::mismatch::{Mismatch, MismatchKind};
use crate::xml_nav::{element_children, element_text, find_child, find_children, is_blank};
use dumpxml_format::{scalar_text, FieldPath, FieldRule, FieldRules};
use roxmltree::Node;
use serde_json::{Map, Value};

/// Compares JSON values with their XML counterparts under a [`FieldRules`] table
#[derive(Debug, Clone, Copy)]
pub struct Comparator<'r> {
    rules: &'r FieldRules,
}

impl<'r> Comparator<'r> {
    /// Create a comparator for the given rule table
    pub fn new(rules: &'r FieldRules) -> Self {
        Self { rules }
    }

    /// Rule table in use
    pub fn rules(&self) -> &'r FieldRules {
        self.rules
    }

    /// Compare one record object with its `record` element.
    ///
    /// A top-level null field may have no element at all. Below the record
    /// every key needs an element of its name.
    pub fn compare_record(
        &self,
        record: &Map<String, Value>,
        xml: Node<'_, '_>,
    ) -> Result<(), Mismatch> {
        let root = FieldPath::root();
        for (key, value) in record {
            if value.is_null() && find_child(xml, key).is_none() {
                continue;
            }
            self.compare_field(key, value, xml, &root.child(key))?;
        }
        Ok(())
    }

    /// Boolean form of [`Comparator::compare_record`]
    pub fn record_matches(&self, record: &Map<String, Value>, xml: Node<'_, '_>) -> bool {
        self.compare_record(record, xml).is_ok()
    }

    /// Compare `json` with the element found for it, if any.
    ///
    /// Sequences reaching this function are compared against the element
    /// children of `xml`, positionally.
    pub fn compare(
        &self,
        json: &Value,
        xml: Option<Node<'_, '_>>,
        path: &FieldPath,
    ) -> Result<(), Mismatch> {
        match json {
            Value::Null => match xml {
                None => Ok(()),
                Some(node) if is_blank(node) => Ok(()),
                Some(node) => Err(fail(
                    path,
                    MismatchKind::ValueMismatch {
                        expected: "null".to_string(),
                        found: describe(node),
                    },
                )),
            },
            Value::Object(map) => {
                let node = xml.ok_or_else(|| missing(path))?;
                for (key, value) in map {
                    self.compare_field(key, value, node, &path.child(key))?;
                }
                Ok(())
            }
            Value::Array(items) => {
                let node = xml.ok_or_else(|| missing(path))?;
                self.compare_sequence(items, node, None, path)
            }
            scalar => {
                let node = xml.ok_or_else(|| missing(path))?;
                let expected = scalar_text(scalar).unwrap_or_default();
                if element_text(node) == expected {
                    Ok(())
                } else {
                    Err(fail(
                        path,
                        MismatchKind::ValueMismatch {
                            expected,
                            found: describe(node),
                        },
                    ))
                }
            }
        }
    }

    /// Boolean form of [`Comparator::compare`]
    pub fn matches(&self, json: &Value, xml: Option<Node<'_, '_>>, path: &FieldPath) -> bool {
        self.compare(json, xml, path).is_ok()
    }

    fn compare_field(
        &self,
        key: &str,
        value: &Value,
        parent: Node<'_, '_>,
        path: &FieldPath,
    ) -> Result<(), Mismatch> {
        match (value, self.rules.rule_for(key)) {
            (Value::Array(items), FieldRule::PassThrough) => {
                self.compare_pass_through(items, find_child(parent, key), path)
            }
            (Value::Array(items), FieldRule::WrapAsPlural) => {
                let wrapper = find_child(parent, key).ok_or_else(|| missing(path))?;
                self.compare_sequence(items, wrapper, Some(FieldRules::singular(key)), path)
            }
            (Value::Array(items), FieldRule::Default) => {
                self.compare_repeated(items, &find_children(parent, key), path)
            }
            _ => {
                let child = find_child(parent, key).ok_or_else(|| missing(path))?;
                self.compare(value, Some(child), path)
            }
        }
    }

    /// A pass-through sequence is emitted bare, so only a single item can be
    /// recovered from one element. Any other length is a mismatch.
    fn compare_pass_through(
        &self,
        items: &[Value],
        xml: Option<Node<'_, '_>>,
        path: &FieldPath,
    ) -> Result<(), Mismatch> {
        let expected = Value::Array(items.to_vec()).to_string();
        let Some(node) = xml else {
            return Err(fail(
                path,
                MismatchKind::PassThroughMismatch {
                    expected,
                    found: None,
                },
            ));
        };

        let found = element_text(node);
        match items {
            [single] if scalar_text(single).as_deref() == Some(found.as_str()) => Ok(()),
            _ => Err(fail(
                path,
                MismatchKind::PassThroughMismatch {
                    expected,
                    found: Some(found),
                },
            )),
        }
    }

    fn compare_sequence(
        &self,
        items: &[Value],
        xml: Node<'_, '_>,
        expected_tag: Option<&str>,
        path: &FieldPath,
    ) -> Result<(), Mismatch> {
        let children: Vec<Node<'_, '_>> = element_children(xml).collect();
        if children.len() != items.len() {
            return Err(fail(
                path,
                MismatchKind::LengthMismatch {
                    expected: items.len(),
                    found: children.len(),
                },
            ));
        }

        for (idx, (item, child)) in items.iter().zip(children).enumerate() {
            let item_path = path.index(idx);
            if let Some(tag) = expected_tag {
                if child.tag_name().name() != tag {
                    return Err(fail(
                        &item_path,
                        MismatchKind::UnexpectedElement {
                            expected: tag.to_string(),
                            found: child.tag_name().name().to_string(),
                        },
                    ));
                }
            }
            self.compare(item, Some(child), &item_path)?;
        }
        Ok(())
    }

    fn compare_repeated(
        &self,
        items: &[Value],
        nodes: &[Node<'_, '_>],
        path: &FieldPath,
    ) -> Result<(), Mismatch> {
        if nodes.is_empty() && !items.is_empty() {
            return Err(missing(path));
        }
        if nodes.len() != items.len() {
            return Err(fail(
                path,
                MismatchKind::LengthMismatch {
                    expected: items.len(),
                    found: nodes.len(),
                },
            ));
        }
        for (idx, (item, node)) in items.iter().zip(nodes).enumerate() {
            self.compare(item, Some(*node), &path.index(idx))?;
        }
        Ok(())
    }
}

fn fail(path: &FieldPath, kind: MismatchKind) -> Mismatch {
    let mismatch = Mismatch::new(path.clone(), kind);
    tracing::debug!(path = %mismatch.path, "{}", mismatch);
    mismatch
}

fn missing(path: &FieldPath) -> Mismatch {
    fail(
        path,
        MismatchKind::MissingElement {
            name: path.last_key().unwrap_or_default().to_string(),
        },
    )
}

/// Short description of an element for diagnostics
fn describe(node: Node<'_, '_>) -> String {
    let children = element_children(node).count();
    if children > 0 {
        format!("<{}> with {} child elements", node.tag_name().name(), children)
    } else {
        element_text(node)
    }
}
