use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SurveyError;

/// Free-form configuration forwarded to a page or question block.
///
/// Keys are opaque here: they are whatever the renderer downstream
/// understands (`isRequired`, `visibleIf`, ...). When serialized the map is
/// flattened into the owning block, so every key sits next to `name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(Map<String, Value>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an option, returning the previous value for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: Options) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    /// Build options from any serializable struct, e.g. a typed settings
    /// struct the caller keeps for a renderer.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, SurveyError> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(SurveyError::NotAnObject("null")),
            Value::Bool(_) => Err(SurveyError::NotAnObject("bool")),
            Value::Number(_) => Err(SurveyError::NotAnObject("number")),
            Value::String(_) => Err(SurveyError::NotAnObject("string")),
            Value::Array(_) => Err(SurveyError::NotAnObject("array")),
        }
    }

    /// Fail if any key is one of `reserved`.
    pub(crate) fn check_reserved(&self, block: &str, reserved: &[&str]) -> Result<(), SurveyError> {
        match reserved.iter().find(|key| self.0.contains_key(**key)) {
            Some(key) => Err(SurveyError::ReservedOption {
                block: block.to_string(),
                key: key.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Options {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for Options {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct RadioSettings {
        is_required: bool,
        col_count: u8,
    }

    #[test]
    fn from_serializable_struct() {
        let opts = Options::from_serializable(&RadioSettings {
            is_required: true,
            col_count: 7,
        })
        .unwrap();
        assert_eq!(opts.get("isRequired"), Some(&json!(true)));
        assert_eq!(opts.get("colCount"), Some(&json!(7)));
    }

    #[test]
    fn from_serializable_rejects_non_objects() {
        let err = Options::from_serializable(&vec![1, 2]).unwrap_err();
        assert!(matches!(err, SurveyError::NotAnObject("array")));
        assert!(Options::from_serializable(&"text").is_err());
    }

    #[test]
    fn merge_overrides_existing_keys() {
        let mut base = Options::new().with("a", 1).with("b", 2);
        base.merge(Options::new().with("b", 3).with("c", 4));
        assert_eq!(base.len(), 3);
        assert_eq!(base.get("b"), Some(&json!(3)));
    }

    #[test]
    fn serializes_as_plain_object() {
        let opts = Options::new().with("visibleIf", "{age} > 18");
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({"visibleIf": "{age} > 18"})
        );
    }
}
