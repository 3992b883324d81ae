//! Leaf and member shapes shared by the request envelopes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A binary-bearing leaf of a request envelope.
///
/// Backends send these as base64 text; the platform credential API wants raw
/// buffers. On the JSON side `Raw` is an array of byte numbers. Any other JSON
/// value lands in `Other`, so one odd leaf never hides its siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Binary {
    Text(String),
    Raw(Vec<u8>),
    Other(Value),
}

impl Binary {
    /// Empty text, an empty buffer, `null`, `false` or zero. Such leaves are
    /// left as they are where a field is optional.
    pub fn is_empty(&self) -> bool {
        match self {
            Binary::Text(text) => text.is_empty(),
            Binary::Raw(bytes) => bytes.is_empty(),
            Binary::Other(Value::Null) | Binary::Other(Value::Bool(false)) => true,
            Binary::Other(Value::Number(n)) => n.as_f64() == Some(0.0),
            Binary::Other(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Binary::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            Binary::Raw(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl From<String> for Binary {
    fn from(text: String) -> Self {
        Binary::Text(text)
    }
}

impl From<&str> for Binary {
    fn from(text: &str) -> Self {
        Binary::Text(text.to_owned())
    }
}

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Binary::Raw(bytes)
    }
}

/// A member that is expected to hold a structured value.
///
/// Anything that does not have the expected shape (a string where an object
/// was expected, an object where a list was expected, ...) lands in `Opaque`
/// and is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nested<T> {
    Object(T),
    Opaque(Value),
}

impl<T> Nested<T> {
    pub fn as_object(&self) -> Option<&T> {
        match self {
            Nested::Object(inner) => Some(inner),
            Nested::Opaque(_) => None,
        }
    }

    /// Rebuilds the structured variant with `f`; opaque values are cloned.
    pub(crate) fn try_map<U, E>(&self, f: impl FnOnce(&T) -> Result<U, E>) -> Result<Nested<U>, E> {
        Ok(match self {
            Nested::Object(inner) => Nested::Object(f(inner)?),
            Nested::Opaque(value) => Nested::Opaque(value.clone()),
        })
    }
}

impl<T> From<T> for Nested<T> {
    fn from(inner: T) -> Self {
        Nested::Object(inner)
    }
}

/// Field deserializer that keeps an explicit `null`.
///
/// Paired with `#[serde(default)]`: a missing member is `None`, while a
/// present one (`null` included) is handed to `T` and wrapped in `Some`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_binary_from_string() {
        let leaf: Binary = serde_json::from_value(json!("AA==")).unwrap();
        assert_eq!(leaf, Binary::Text("AA==".to_string()));
    }

    #[test]
    fn test_binary_from_byte_array() {
        let leaf: Binary = serde_json::from_value(json!([0, 1, 255])).unwrap();
        assert_eq!(leaf, Binary::Raw(vec![0, 1, 255]));
    }

    #[test]
    fn test_binary_raw_serializes_as_numbers() {
        let value = serde_json::to_value(Binary::Raw(vec![7, 8])).unwrap();
        assert_eq!(value, json!([7, 8]));
    }

    #[test]
    fn test_binary_is_empty() {
        assert!(Binary::from("").is_empty());
        assert!(Binary::from(Vec::new()).is_empty());
        assert!(!Binary::from("AA==").is_empty());
        assert!(!Binary::from(vec![0]).is_empty());
    }

    #[test]
    fn test_binary_other_values() {
        for value in [json!(null), json!(false), json!(0)] {
            let leaf: Binary = serde_json::from_value(value.clone()).unwrap();
            assert_eq!(leaf, Binary::Other(value));
            assert!(leaf.is_empty());
        }
        for value in [json!(true), json!(5), json!({"a": 1}), json!([256])] {
            let leaf: Binary = serde_json::from_value(value.clone()).unwrap();
            assert_eq!(leaf, Binary::Other(value));
            assert!(!leaf.is_empty());
        }
    }

    #[test]
    fn test_binary_other_serializes_verbatim() {
        let value = serde_json::to_value(Binary::Other(json!(null))).unwrap();
        assert_eq!(value, json!(null));
    }

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "present")]
        leaf: Option<Binary>,
    }

    #[test]
    fn test_present_keeps_null() {
        let holder: Holder = serde_json::from_value(json!({"leaf": null})).unwrap();
        assert_eq!(holder.leaf, Some(Binary::Other(json!(null))));

        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert_eq!(holder.leaf, None);
    }

    #[test]
    fn test_nested_opaque_keeps_value() {
        let member: Nested<Vec<u8>> = serde_json::from_value(json!("nope")).unwrap();
        assert_eq!(member, Nested::Opaque(json!("nope")));
        assert_eq!(serde_json::to_value(&member).unwrap(), json!("nope"));
    }

    #[test]
    fn test_nested_try_map() {
        let member: Nested<u8> = Nested::Object(2);
        let mapped: Result<Nested<u16>, ()> = member.try_map(|n| Ok(u16::from(*n) * 10));
        assert_eq!(mapped, Ok(Nested::Object(20)));

        let opaque: Nested<u8> = Nested::Opaque(json!(null));
        let mapped: Result<Nested<u16>, ()> = opaque.try_map(|_| Err(()));
        assert_eq!(mapped, Ok(Nested::Opaque(json!(null))));
    }
}
