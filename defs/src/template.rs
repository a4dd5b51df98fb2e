use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// Leaf value of a template document.
#[derive(Debug, Clone)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Number(a), Scalar::Number(b)) => numbers_equal(a, b),
            (Scalar::String(a), Scalar::String(b)) => a == b,
            _ => false,
        }
    }
}

// Integers compare exactly, anything else by numeric value so that 5 == 5.0
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::String(s) => write!(f, "{}", s),
        }
    }
}

/// A template as a closed tree of scalars, mappings and sequences.
///
/// Mapping keys keep the order they were read in, which is the order used when
/// diffs are rendered. Equality ignores that order.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateDocument {
    Scalar(Scalar),
    Mapping(IndexMap<String, TemplateDocument>),
    Sequence(Vec<TemplateDocument>),
}

impl TemplateDocument {
    /// An empty mapping, the shape of a template with nothing in it.
    pub fn empty() -> Self {
        TemplateDocument::Mapping(IndexMap::new())
    }

    pub fn string(value: impl Into<String>) -> Self {
        TemplateDocument::Scalar(Scalar::String(value.into()))
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, TemplateDocument>> {
        match self {
            TemplateDocument::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TemplateDocument::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, TemplateDocument::Scalar(_))
    }

    /// Looks up a key when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&TemplateDocument> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    pub fn to_json(&self) -> Value {
        match self {
            TemplateDocument::Scalar(Scalar::Null) => Value::Null,
            TemplateDocument::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            TemplateDocument::Scalar(Scalar::Number(n)) => Value::Number(n.clone()),
            TemplateDocument::Scalar(Scalar::String(s)) => Value::String(s.clone()),
            TemplateDocument::Sequence(items) => {
                Value::Array(items.iter().map(TemplateDocument::to_json).collect())
            }
            TemplateDocument::Mapping(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for TemplateDocument {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => TemplateDocument::Scalar(Scalar::Null),
            Value::Bool(b) => TemplateDocument::Scalar(Scalar::Bool(b)),
            Value::Number(n) => TemplateDocument::Scalar(Scalar::Number(n)),
            Value::String(s) => TemplateDocument::Scalar(Scalar::String(s)),
            Value::Array(items) => {
                TemplateDocument::Sequence(items.into_iter().map(TemplateDocument::from).collect())
            }
            Value::Object(map) => TemplateDocument::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, TemplateDocument::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Scalars print bare, everything else as compact JSON.
impl fmt::Display for TemplateDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateDocument::Scalar(scalar) => write!(f, "{}", scalar),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl Serialize for TemplateDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TemplateDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(TemplateDocument::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_numbers_compare_by_value() {
        let five: TemplateDocument = json!(5).into();
        let five_float: TemplateDocument = json!(5.0).into();
        let six: TemplateDocument = json!(6).into();

        assert_eq!(five, five_float);
        assert_ne!(five, six);
    }

    #[test]
    fn test_strings_do_not_equal_numbers() {
        let text: TemplateDocument = json!("5").into();
        let number: TemplateDocument = json!(5).into();
        assert_ne!(text, number);
    }

    #[test]
    fn test_mapping_equality_ignores_key_order() {
        let a: TemplateDocument = json!({"a": 1, "b": 2}).into();
        let b: TemplateDocument = serde_json::from_str(r#"{"b": 2, "a": 1}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mapping_keeps_document_order() {
        let doc: TemplateDocument =
            serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let keys: Vec<&str> = doc
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_display() {
        let scalar = TemplateDocument::string("old-value");
        let mapping: TemplateDocument = json!({"Key": "Value"}).into();

        assert_eq!(scalar.to_string(), "old-value");
        assert_eq!(mapping.to_string(), r#"{"Key":"Value"}"#);
    }
}
