use crate::Value;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Property key after classification by shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// Canonical non-negative integer (e.g. `"0"`, `"42"`, but not `"042"`).
    Index(u32),
    Name(String),
}

impl PropertyKey {
    pub fn parse(key: &str) -> Self {
        let canonical = key == "0"
            || (!key.is_empty()
                && !key.starts_with('0')
                && key.bytes().all(|b| b.is_ascii_digit()));
        if canonical {
            // `u32::MAX` itself is not a valid index
            if let Ok(index) = key.parse::<u32>() {
                if index < u32::MAX {
                    return PropertyKey::Index(index);
                }
            }
        }
        PropertyKey::Name(key.to_string())
    }
}

impl From<&str> for PropertyKey {
    fn from(key: &str) -> Self {
        PropertyKey::parse(key)
    }
}

/// Property storage shared by objects and arrays.
///
/// Index-keyed properties are kept in numeric order, all other names in insertion order.
/// Arrays only ever populate the index-keyed map through their literals.
#[derive(Debug, Clone, Default)]
pub struct Object {
    indexed: BTreeMap<u32, Value>,
    named: IndexMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates array storage. `None` elements are holes.
    pub fn from_elements(elements: impl IntoIterator<Item = Option<Value>>) -> Self {
        let indexed = elements
            .into_iter()
            .zip(0..)
            .filter_map(|(value, index)| value.map(|value| (index, value)))
            .collect();
        Self {
            indexed,
            named: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        match PropertyKey::parse(key) {
            PropertyKey::Index(index) => self.indexed.get(&index),
            PropertyKey::Name(name) => self.named.get(&name),
        }
    }

    /// Inserts or overwrites a property. Overwriting a name keeps its original position.
    pub fn set(&mut self, key: &str, value: Value) {
        match PropertyKey::parse(key) {
            PropertyKey::Index(index) => {
                self.indexed.insert(index, value);
            }
            PropertyKey::Name(name) => {
                self.named.insert(name, value);
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        match PropertyKey::parse(key) {
            PropertyKey::Index(index) => self.indexed.remove(&index),
            PropertyKey::Name(name) => self.named.shift_remove(&name),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// One past the highest index, or `0` without index-keyed properties.
    pub fn length(&self) -> u32 {
        self.indexed
            .keys()
            .next_back()
            .map_or(0, |last| last.saturating_add(1))
    }

    pub fn get_index(&self, index: u32) -> Option<&Value> {
        self.indexed.get(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.indexed.is_empty() && self.named.is_empty()
    }

    /// Index-keyed entries in ascending order.
    pub fn indexed(&self) -> impl Iterator<Item = (u32, &Value)> {
        self.indexed.iter().map(|(index, value)| (*index, value))
    }

    /// Name-keyed entries in insertion order.
    pub fn named(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.named.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// All entries, index-keyed first.
    pub fn entries(&self) -> impl Iterator<Item = (PropertyKey, &Value)> {
        self.indexed()
            .map(|(index, value)| (PropertyKey::Index(index), value))
            .chain(
                self.named()
                    .map(|(name, value)| (PropertyKey::Name(name.to_string()), value)),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_shape() {
        assert_eq!(PropertyKey::parse("0"), PropertyKey::Index(0));
        assert_eq!(PropertyKey::parse("122"), PropertyKey::Index(122));
        assert_eq!(PropertyKey::parse("007"), PropertyKey::Name("007".to_string()));
        assert_eq!(PropertyKey::parse("-1"), PropertyKey::Name("-1".to_string()));
        assert_eq!(PropertyKey::parse("1.5"), PropertyKey::Name("1.5".to_string()));
        assert_eq!(PropertyKey::parse(""), PropertyKey::Name(String::new()));
        assert_eq!(
            PropertyKey::parse("4294967295"),
            PropertyKey::Name("4294967295".to_string())
        );
        assert_eq!(PropertyKey::parse("4294967294"), PropertyKey::Index(4294967294));
    }

    #[test]
    fn test_entry_order() {
        let mut object = Object::new();
        object.set("b", Value::Number(1.0));
        object.set("10", Value::Number(2.0));
        object.set("a", Value::Number(3.0));
        object.set("2", Value::Number(4.0));
        object.set("b", Value::Number(5.0));

        let keys: Vec<_> = object.entries().map(|(key, _)| key).collect();
        assert_eq!(
            keys,
            vec![
                PropertyKey::Index(2),
                PropertyKey::Index(10),
                PropertyKey::Name("b".to_string()),
                PropertyKey::Name("a".to_string()),
            ]
        );
        assert_eq!(object.get("b"), Some(&Value::Number(5.0)));
    }

    #[test]
    fn test_array_storage() {
        let mut array = Object::from_elements(vec![
            Some(Value::Number(1.0)),
            None,
            Some(Value::Number(3.0)),
        ]);
        assert_eq!(array.length(), 3);
        assert_eq!(array.get("1"), None);
        assert_eq!(array.get_index(2), Some(&Value::Number(3.0)));
        array.set("3", Value::Bool(true));
        assert_eq!(array.get("3"), Some(&Value::Bool(true)));
        assert_eq!(array.remove("3"), Some(Value::Bool(true)));
        assert_eq!(array.length(), 3);
        assert!(!array.contains_key("3"));
    }

    #[test]
    fn test_empty() {
        assert!(Object::new().is_empty());
        assert_eq!(Object::new().length(), 0);
    }
}
