//! Ordered field map for ADIF records.
//!
//! [`Record`] wraps an [`IndexMap`] so that fields iterate in the order they
//! appeared in the ADIF text. Re-inserting an existing name replaces the value
//! but keeps the field at its original position.
//!
//! ## Examples
//!
//! ```rust
//! use adif2cabrillo::{AdifValue, Record};
//!
//! let mut record = Record::new();
//! record.insert("CALL".to_string(), AdifValue::from("W1AW"));
//! record.insert("FREQ".to_string(), AdifValue::from(14.25));
//!
//! let names: Vec<_> = record.keys().cloned().collect();
//! assert_eq!(names, vec!["CALL", "FREQ"]);
//! ```

use crate::AdifValue;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One ADIF record: field names (uppercase) to typed values, in input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record(IndexMap<String, AdifValue>);

impl Record {
    /// Creates an empty `Record`.
    #[must_use]
    pub fn new() -> Self {
        Record(IndexMap::new())
    }

    /// Inserts a field, returning the previous value for that name if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use adif2cabrillo::{AdifValue, Record};
    ///
    /// let mut record = Record::new();
    /// assert!(record.insert("MODE".to_string(), AdifValue::from("CW")).is_none());
    /// assert!(record.insert("MODE".to_string(), AdifValue::from("SSB")).is_some());
    /// assert_eq!(record.get_str("MODE"), Some("SSB"));
    /// ```
    pub fn insert(&mut self, name: String, value: AdifValue) -> Option<AdifValue> {
        self.0.insert(name, value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AdifValue> {
        self.0.get(name)
    }

    /// Returns the field value when it is string-typed.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(AdifValue::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the field names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, AdifValue> {
        self.0.keys()
    }

    /// Returns an iterator over the fields, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, AdifValue> {
        self.0.iter()
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl IntoIterator for Record {
    type Item = (String, AdifValue);
    type IntoIter = indexmap::map::IntoIter<String, AdifValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a AdifValue);
    type IntoIter = indexmap::map::Iter<'a, String, AdifValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, AdifValue)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, AdifValue)>>(iter: T) -> Self {
        Record(IndexMap::from_iter(iter))
    }
}
