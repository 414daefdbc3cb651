//! Ordered key/value collections of gathered metadata

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Insertion-ordered fact collection. Keys are unique; the first value
/// inserted for a key is kept. A `None` value is a fact that could not be
/// obtained and serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactMap {
    entries: Vec<(String, Option<String>)>,
}

impl FactMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` and leaves the map unchanged when `key` is already present.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    pub fn insert_value(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        self.insert(key, Some(value.into()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl Serialize for FactMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FactMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut facts = FactMap::new();
        for (key, value) in iter {
            facts.insert_value(key, value);
        }
        facts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_wins() {
        let mut facts = FactMap::new();
        assert!(facts.insert_value("EngineVersion", "4.0.1"));
        assert!(!facts.insert_value("EngineVersion", "5.0.0"));

        assert_eq!(facts.len(), 1);
        assert_eq!(facts.get("EngineVersion"), Some("4.0.1"));
    }

    #[test]
    fn serializes_in_insertion_order_with_nulls() {
        let mut facts = FactMap::new();
        facts.insert_value("zeta", "1");
        facts.insert("alpha", None);
        facts.insert_value("mid", "x y");

        let json = serde_json::to_string(&facts).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":null,"mid":"x y"}"#);
    }

    #[test]
    fn absent_value_is_present_key() {
        let mut facts = FactMap::new();
        facts.insert("processor", None);

        assert!(facts.contains_key("processor"));
        assert_eq!(facts.get("processor"), None);
    }
}
