//! Stored settings of one widget instance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Settings of a single placed widget, keyed by setting name.
///
/// Values are kept as JSON scalars because the host platform stores strings,
/// numbers and booleans side by side. Every consumer in this crate reads them
/// through the string view returned by [`Instance::get_str`].
///
/// # Example
///
/// ```rust
/// use widgetlayer::Instance;
///
/// let instance = Instance::new()
///     .with("bayleaf_text_align", "center")
///     .with("bayleaf_widget_featured_image", 42);
///
/// assert_eq!(instance.get_str("bayleaf_text_align").as_deref(), Some("center"));
/// assert_eq!(instance.get_str("bayleaf_widget_featured_image").as_deref(), Some("42"));
/// assert!(instance.get_str("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instance {
    values: BTreeMap<String, Value>,
}

impl Instance {
    /// Creates an empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, returning the updated instance for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the raw stored value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns true if the key is stored, even with an empty value.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the string view of a stored value.
    ///
    /// Strings are returned as-is, numbers in their decimal form, `true` as
    /// `"1"`. `false`, `null` and compound values read as the empty string.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.values.get(key).map(value_to_string)
    }

    /// Returns true if the key is stored with a non-empty string view.
    pub fn is_nonempty(&self, key: &str) -> bool {
        self.get_str(key).is_some_and(|v| !v.is_empty())
    }

    /// Returns true if the stored value is truthy (non-empty and not `"0"`).
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get_str(key).is_some_and(|v| !v.is_empty() && v != "0")
    }

    /// Iterates over stored setting names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    /// Number of stored settings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Instance {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut instance = Instance::new();
        for (k, v) in iter {
            instance.insert(k, v);
        }
        instance
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}
