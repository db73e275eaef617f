//! Field paths used to locate values in diagnostics

use std::fmt;

/// One step of a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object key
    Key(String),
    /// Position inside a sequence
    Index(usize),
}

/// Location of a value inside a record, rendered as `names[0].value`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Path of the record itself
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend with an object key
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self { segments }
    }

    /// Extend with a sequence position
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Last object key on the path, skipping trailing indices
    pub fn last_key(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|segment| match segment {
            PathSegment::Key(key) => Some(key.as_str()),
            PathSegment::Index(_) => None,
        })
    }

    /// Segments from the record down
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// True for the record path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<record>");
        }
        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if idx == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(i) => write!(f, "[{}]", i)?,
            }
        }
        Ok(())
    }
}
