//! Common value types shared by the engine, the mixin and the directives

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Translation options passed through to the engine (`lng`, `ns`, interpolation values...)
pub type TOptions = Map<String, Value>;

/// One namespace or an ordered list of namespaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Namespaces {
    One(String),
    Many(Vec<String>),
}

impl Namespaces {
    /// Normalize to an ordered list
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Namespaces::One(ns) => vec![ns],
            Namespaces::Many(list) => list,
        }
    }

    /// Read namespaces from a JSON value (`"ns"` or `["a", "b"]`)
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(ns) => Some(Namespaces::One(ns.clone())),
            Value::Array(items) => Some(Namespaces::Many(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            )),
            _ => None,
        }
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        Namespaces::One("translation".to_string())
    }
}

impl From<&str> for Namespaces {
    fn from(ns: &str) -> Self {
        Namespaces::One(ns.to_string())
    }
}

impl From<Vec<String>> for Namespaces {
    fn from(list: Vec<String>) -> Self {
        Namespaces::Many(list)
    }
}

/// Recursively merge `source` into `target`.
///
/// Objects are combined key by key; arrays and scalars in `source` replace
/// whatever `target` held.
pub fn deep_merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}

/// Like [`deep_merge`] but leaves leaves that already exist in `target` untouched
pub fn deep_merge_keep(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => deep_merge_keep(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        _ => {}
    }
}
