//! Record tree transformation
//!
//! The transformer rewrites a parsed JSON tree into the shape the XML writer
//! expects: every whitelisted sequence becomes a one-entry object keyed by the
//! singular form of its field, so it serializes as a wrapper element holding one
//! child per item. The input is borrowed and never modified; the validator
//! compares against that untouched original.

use dumpxml_format::constants::{RECORDS_TAG, RECORD_TAG};
use dumpxml_format::{DumpError, FieldRule, FieldRules, Result, ValueKind};
use serde_json::{Map, Value};

/// Shape of the document root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootShape {
    /// `<records><record/>...</records>`, from an array of records
    Records {
        /// Number of records in the input array
        count: usize,
    },
    /// A lone `<record>`, from a single object
    SingleRecord,
}

impl RootShape {
    /// Number of records the document holds
    pub fn record_count(&self) -> usize {
        match self {
            RootShape::Records { count } => *count,
            RootShape::SingleRecord => 1,
        }
    }
}

/// A transformed document ready for serialization.
///
/// Deliberately not a [`Value`]: wrapped output cannot be handed back to the
/// transformer, which only accepts raw data dumps.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedDocument {
    root: Map<String, Value>,
    shape: RootShape,
}

impl WrappedDocument {
    /// Root mapping with exactly one entry, the root element
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Shape of the root
    pub fn shape(&self) -> RootShape {
        self.shape
    }

    /// Consume into the root mapping
    pub fn into_root(self) -> Map<String, Value> {
        self.root
    }
}

/// Applies a [`FieldRules`] table to JSON trees
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'r> {
    rules: &'r FieldRules,
}

impl<'r> Transformer<'r> {
    /// Create a transformer for the given rule table
    pub fn new(rules: &'r FieldRules) -> Self {
        Self { rules }
    }

    /// Rule table in use
    pub fn rules(&self) -> &'r FieldRules {
        self.rules
    }

    /// Transform any node: objects are rewritten key by key, arrays item by
    /// item, scalars are returned unchanged.
    pub fn transform(&self, node: &Value) -> Value {
        match node {
            Value::Object(map) => Value::Object(self.transform_record(map)),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.transform(item)).collect())
            }
            scalar => scalar.clone(),
        }
    }

    /// Transform the entries of one object
    pub fn transform_record(&self, record: &Map<String, Value>) -> Map<String, Value> {
        record
            .iter()
            .map(|(key, value)| (key.clone(), self.transform_field(key, value)))
            .collect()
    }

    fn transform_field(&self, key: &str, value: &Value) -> Value {
        match (value, self.rules.rule_for(key)) {
            (Value::Array(items), FieldRule::PassThrough) => Value::Array(items.clone()),
            (Value::Array(items), FieldRule::WrapAsPlural) => {
                let wrapped: Vec<Value> = items.iter().map(|item| self.transform(item)).collect();
                let mut wrapper = Map::with_capacity(1);
                wrapper.insert(FieldRules::singular(key).to_string(), Value::Array(wrapped));
                Value::Object(wrapper)
            }
            (Value::Object(map), _) => Value::Object(self.transform_record(map)),
            (other, _) => other.clone(),
        }
    }

    /// Transform a whole data dump and attach the root element.
    ///
    /// An array becomes `{"records": {"record": [...]}}`, an object becomes
    /// `{"record": {...}}`. Any other root is rejected.
    pub fn document(&self, input: &Value) -> Result<WrappedDocument> {
        let (tag, body, shape) = match input {
            Value::Array(records) => {
                let transformed: Vec<Value> = records.iter().map(|r| self.transform(r)).collect();
                let mut inner = Map::with_capacity(1);
                inner.insert(RECORD_TAG.to_string(), Value::Array(transformed));
                (
                    RECORDS_TAG,
                    Value::Object(inner),
                    RootShape::Records {
                        count: records.len(),
                    },
                )
            }
            Value::Object(record) => (
                RECORD_TAG,
                Value::Object(self.transform_record(record)),
                RootShape::SingleRecord,
            ),
            other => {
                return Err(DumpError::UnsupportedRoot {
                    found: ValueKind::of(other).to_string(),
                })
            }
        };

        let mut root = Map::with_capacity(1);
        root.insert(tag.to_string(), body);
        Ok(WrappedDocument { root, shape })
    }
}
