use serde_json::{Map, Value};

/// Untyped JSON document returned by the CI server.
///
/// Every accessor falls back to a default instead of failing, so a missing
/// field or a failed fetch degrades to `0` or an empty sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Value,
}
impl Document {
    pub fn new(root: Value) -> Self {
        Self { root }
    }
    pub fn empty() -> Self {
        Self::new(Value::Object(Map::new()))
    }

    pub fn is_empty(&self) -> bool {
        match &self.root {
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            _ => false,
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.root.as_object()?.get(key)
    }

    pub fn number(&self, key: &str) -> f64 {
        match self.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn items(&self, key: &str) -> Vec<Document> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().cloned().map(Document::new).collect(),
            _ => vec![],
        }
    }

    pub fn len(&self, key: &str) -> usize {
        match self.get(key) {
            Some(Value::Array(items)) => items.len(),
            _ => 0,
        }
    }

    /// Truthiness of a field: `true`, a non-zero number, or a non-empty string.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
            Some(Value::Null) | None => false,
        }
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }
}
impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_fields_default() {
        let doc = Document::empty();
        assert!(doc.is_empty());
        assert_eq!(doc.number("totalExecutors"), 0.0);
        assert_eq!(doc.len("items"), 0);
        assert!(doc.items("computer").is_empty());
        assert!(!doc.flag("offline"));
        assert_eq!(doc.str("color"), None);
    }

    #[test]
    fn wrong_shapes_default() {
        let doc = Document::new(json!({
            "totalExecutors": "ten",
            "items": {"a": 1},
            "color": 7,
        }));
        assert_eq!(doc.number("totalExecutors"), 0.0);
        assert_eq!(doc.len("items"), 0);
        assert_eq!(doc.str("color"), None);

        let list = Document::new(json!([1, 2, 3]));
        assert!(!list.is_empty());
        assert_eq!(list.len("items"), 0);
    }

    #[test]
    fn reads_present_fields() {
        let doc = Document::new(json!({
            "totalExecutors": 10,
            "busyExecutors": 2.5,
            "computer": [{"offline": true}, {"offline": false}, {}],
        }));
        assert_eq!(doc.number("totalExecutors"), 10.0);
        assert_eq!(doc.number("busyExecutors"), 2.5);
        let nodes = doc.items("computer");
        assert_eq!(nodes.len(), 3);
        let offline: Vec<bool> = nodes.iter().map(|n| n.flag("offline")).collect();
        assert_eq!(offline, [true, false, false]);
    }
}
