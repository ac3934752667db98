//! Insertion-ordered field storage for records.
//!
//! Field order is load-bearing in this notation: the encoder emits fields in
//! the order the map holds them, and decode fills a record's fields in
//! declared order, so [`FieldMap`] wraps [`IndexMap`] rather than a hash map.

use indexmap::IndexMap;

/// An ordered map of field names to values.
///
/// # Examples
///
/// ```rust
/// use dent::{FieldMap, Value};
///
/// let mut fields = FieldMap::new();
/// fields.insert("first".to_string(), Value::from(1));
/// fields.insert("second".to_string(), Value::from(2));
///
/// let names: Vec<_> = fields.keys().cloned().collect();
/// assert_eq!(names, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMap(IndexMap<String, crate::Value>);

impl FieldMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        FieldMap(IndexMap::new())
    }

    /// Creates an empty map with room for `capacity` fields.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        FieldMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a field, returning the previous value if the name was present.
    /// A re-inserted name keeps its original position.
    pub fn insert(&mut self, name: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(name, value)
    }

    /// Returns the value of the named field, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&crate::Value> {
        self.0.get(name)
    }

    /// Removes the named field and returns its value, preserving the order of
    /// the remaining fields.
    pub fn remove(&mut self, name: &str) -> Option<crate::Value> {
        self.0.shift_remove(name)
    }

    /// Returns `true` if a field with this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Field values in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Field name/value pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        FieldMap(IndexMap::from_iter(iter))
    }
}
