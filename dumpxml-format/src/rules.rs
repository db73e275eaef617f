//! Per-key rule table for sequence values
//!
//! Whether a sequence is wrapped in a container element, emitted bare, or left
//! in its default repeated-element form is decided by key alone. The same
//! [`FieldRules`] value drives both the transformer and the comparator so the
//! two cannot drift apart.

use crate::constants::{DEFAULT_ARRAY_FIELDS, PASS_THROUGH_FIELD};
use crate::error::{DumpError, Result};
use crate::types::is_valid_element_name;
use std::collections::BTreeSet;

/// How a sequence stored under a key is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Wrap items under `<key><singular>..</singular></key>`, recursing into items
    WrapAsPlural,
    /// Keep items untouched and repeat the key element once per item
    PassThrough,
    /// Leave the sequence as-is
    Default,
}

/// Rule table keyed by field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    array_fields: BTreeSet<String>,
    pass_through: BTreeSet<String>,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            array_fields: DEFAULT_ARRAY_FIELDS.iter().map(|s| s.to_string()).collect(),
            pass_through: BTreeSet::from([PASS_THROUGH_FIELD.to_string()]),
        }
    }
}

impl FieldRules {
    /// Table with no wrapped and no pass-through keys
    pub fn empty() -> Self {
        Self {
            array_fields: BTreeSet::new(),
            pass_through: BTreeSet::new(),
        }
    }

    /// Add a key whose sequences are wrapped
    pub fn with_array_field(mut self, key: impl Into<String>) -> Self {
        self.array_fields.insert(key.into());
        self
    }

    /// Add a key whose sequences are emitted bare
    pub fn with_pass_through_field(mut self, key: impl Into<String>) -> Self {
        self.pass_through.insert(key.into());
        self
    }

    /// Rule applied when `key` holds a sequence. Pass-through keys take precedence.
    pub fn rule_for(&self, key: &str) -> FieldRule {
        if self.pass_through.contains(key) {
            FieldRule::PassThrough
        } else if self.array_fields.contains(key) {
            FieldRule::WrapAsPlural
        } else {
            FieldRule::Default
        }
    }

    /// Child element name for a wrapped key: the key without its last character.
    pub fn singular(key: &str) -> &str {
        match key.char_indices().next_back() {
            Some((idx, _)) => &key[..idx],
            None => key,
        }
    }

    /// Wrapped keys, sorted
    pub fn array_fields(&self) -> impl Iterator<Item = &str> {
        self.array_fields.iter().map(String::as_str)
    }

    /// Pass-through keys, sorted
    pub fn pass_through_fields(&self) -> impl Iterator<Item = &str> {
        self.pass_through.iter().map(String::as_str)
    }

    /// Check that every wrapped key yields usable element names
    pub fn validate(&self) -> Result<()> {
        for key in self.array_fields.iter().chain(self.pass_through.iter()) {
            if !is_valid_element_name(key) {
                return Err(DumpError::InvalidFieldRule {
                    key: key.clone(),
                    reason: "key is not a valid XML element name".to_string(),
                });
            }
        }
        for key in self.array_fields.difference(&self.pass_through) {
            let singular = Self::singular(key);
            if !is_valid_element_name(singular) {
                return Err(DumpError::InvalidFieldRule {
                    key: key.clone(),
                    reason: format!("singular form '{}' is not a valid XML element name", singular),
                });
            }
        }
        Ok(())
    }
}
