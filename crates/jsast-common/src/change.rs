//! Change annotations attached to nodes by an external differencing pass.
//!
//! The tree never computes these values. An annotator writes them after the
//! tree is built, and the interchange writer re-emits them verbatim.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Edit status of a node relative to a baseline tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    Inserted,
    Deleted,
    Updated,
    Moved,
    Unchanged,
    /// Not yet annotated.
    #[default]
    Unknown,
}

impl ChangeKind {
    /// The upper-case name used in the interchange trailer (`"INSERTED"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Inserted => "INSERTED",
            ChangeKind::Deleted => "DELETED",
            ChangeKind::Updated => "UPDATED",
            ChangeKind::Moved => "MOVED",
            ChangeKind::Unchanged => "UNCHANGED",
            ChangeKind::Unknown => "UNKNOWN",
        }
    }

    /// Whether the annotator marked this node as differing from the baseline.
    #[must_use]
    pub const fn is_change(self) -> bool {
        matches!(
            self,
            ChangeKind::Inserted | ChangeKind::Deleted | ChangeKind::Updated | ChangeKind::Moved
        )
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered set of opaque annotation records (criteria or dependencies).
///
/// Records are structured JSON values produced by the annotator. The tree only
/// stores and re-emits them; duplicates are dropped on insert so the set keeps
/// first-insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationSet {
    records: Vec<Value>,
}

impl AnnotationSet {
    #[must_use]
    pub fn new() -> AnnotationSet {
        AnnotationSet::default()
    }

    /// Add a record. Returns `false` if an equal record was already present.
    pub fn insert(&mut self, record: Value) -> bool {
        if self.records.contains(&record) {
            return false;
        }
        self.records.push(record);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.records.iter()
    }

    /// The records as a JSON array, in insertion order.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(self.records.clone())
    }
}

impl FromIterator<Value> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> AnnotationSet {
        let mut set = AnnotationSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn change_kind_names_are_upper_case() {
        assert_eq!(ChangeKind::Inserted.to_string(), "INSERTED");
        assert_eq!(ChangeKind::default().as_str(), "UNKNOWN");
        assert_eq!(
            serde_json::to_value(ChangeKind::Unchanged).unwrap(),
            json!("UNCHANGED")
        );
    }

    #[test]
    fn annotation_set_drops_duplicates_and_keeps_order() {
        let mut set = AnnotationSet::new();
        assert!(set.insert(json!({"type": "CONDITION", "id": 2})));
        assert!(set.insert(json!({"type": "ASSIGNMENT", "id": 1})));
        assert!(!set.insert(json!({"type": "CONDITION", "id": 2})));
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.to_json(),
            json!([{"type": "CONDITION", "id": 2}, {"type": "ASSIGNMENT", "id": 1}])
        );
    }

    #[test]
    fn empty_set_serializes_as_empty_array() {
        assert_eq!(AnnotationSet::new().to_json(), json!([]));
    }
}
