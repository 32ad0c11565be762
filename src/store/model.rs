//! The annotation entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat field mapping of an annotation, excluding its id.
pub type Fields = Map<String, Value>;

/// An annotation: a store-assigned id plus free-form scalar and list fields
/// (`uri`, `text`, `user`, `ranges`, ...).
///
/// Serializes to a single flat JSON object with `id` alongside the fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Annotation {
    /// Build an annotation. Any `id` key in `fields` is dropped.
    pub fn new(id: impl Into<String>, mut fields: Fields) -> Self {
        fields.remove("id");
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Overwrite the supplied fields, keeping the rest. The id never changes.
    pub fn merge(&mut self, fields: Fields) {
        for (key, value) in fields {
            if key != "id" {
                self.fields.insert(key, value);
            }
        }
    }

    /// Full representation.
    pub fn as_value(&self) -> Value {
        let mut map = Map::with_capacity(self.fields.len() + 1);
        map.insert("id".to_string(), Value::String(self.id.clone()));
        map.extend(self.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        Value::Object(map)
    }

    /// Id-only representation used by search without `all_fields`.
    pub fn summary(&self) -> Value {
        serde_json::json!({ "id": self.id })
    }

    /// Exact-match filter. Strings compare directly; numbers and booleans
    /// by their textual form. Lists, objects and missing fields never match.
    pub fn matches(&self, key: &str, expected: &str) -> bool {
        if key == "id" {
            return self.id == expected;
        }
        match self.fields.get(key) {
            Some(Value::String(s)) => s == expected,
            Some(Value::Number(n)) => n.to_string() == expected,
            Some(Value::Bool(b)) => b.to_string() == expected,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_serializes_flat() {
        let anno = Annotation::new("1", fields(json!({"uri": "http://xyz.com", "ranges": ["1.0 2.0"]})));
        assert_eq!(
            serde_json::to_value(&anno).unwrap(),
            json!({"id": "1", "uri": "http://xyz.com", "ranges": ["1.0 2.0"]})
        );
        assert_eq!(anno.as_value(), serde_json::to_value(&anno).unwrap());
    }

    #[test]
    fn test_new_and_merge_ignore_id() {
        let mut anno = Annotation::new("1", fields(json!({"id": "evil", "text": "a"})));
        assert_eq!(anno.id, "1");
        assert!(!anno.fields.contains_key("id"));

        anno.merge(fields(json!({"id": "2", "text": "b", "user": "levin"})));
        assert_eq!(anno.id, "1");
        assert_eq!(anno.fields["text"], "b");
        assert_eq!(anno.fields["user"], "levin");
    }

    #[test]
    fn test_matches() {
        let anno = Annotation::new("7", fields(json!({"uri": "u", "page": 3, "done": true, "tags": ["u"]})));
        assert!(anno.matches("id", "7"));
        assert!(anno.matches("uri", "u"));
        assert!(anno.matches("page", "3"));
        assert!(anno.matches("done", "true"));
        assert!(!anno.matches("tags", "u"));
        assert!(!anno.matches("missing", "u"));
        assert!(!anno.matches("uri", "U"));
    }
}
