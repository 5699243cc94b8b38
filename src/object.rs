//! Insertion-ordered object type.
//!
//! This module provides [`Object`], an ordered list of `(key, value)` entries.
//! Lookup is a linear scan by key equality: there is no hashing and no sorting,
//! so iteration always follows first-insertion order.
//!
//! ## Access policies
//!
//! - [`Object::at`] is read-strict and fails with
//!   [`Error::KeyNotFound`](crate::Error::KeyNotFound)
//! - [`Object::get_or_insert`] (and `IndexMut`) is write-permissive: an absent
//!   key is appended with a `Null` value, an existing key is returned in place
//!
//! ## Examples
//!
//! ```rust
//! use serde_tagconf::{Object, Value};
//!
//! let mut object = Object::new();
//! object["name"] = Value::from("Alice");
//! object["age"] = Value::from(30);
//! object["name"] = Value::from("Bob");
//!
//! assert_eq!(object.len(), 2);
//! let keys: Vec<_> = object.keys().collect();
//! assert_eq!(keys, vec!["name", "age"]);
//! ```

use crate::{Error, Result, Value};
use std::ops::{Index, IndexMut};

/// An insertion-ordered sequence of `(String, Value)` entries.
///
/// Keys written through [`Object::get_or_insert`] or [`Object::insert`] are
/// unique. [`Object::from_entries`] trusts its input: duplicate keys are kept,
/// and every lookup resolves to the first matching entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object(Vec<(String, Value)>);

impl Object {
    /// Creates an empty `Object`.
    #[must_use]
    pub fn new() -> Self {
        Object(Vec::new())
    }

    /// Seeds an `Object` from an explicit ordered list of entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagconf::{Object, Value};
    ///
    /// let object = Object::from_entries(vec![
    ///     ("k".to_string(), Value::from(1)),
    ///     ("k".to_string(), Value::from(2)),
    /// ]);
    /// assert_eq!(object.len(), 2);
    /// assert_eq!(object.get("k"), Some(&Value::from(1)));
    /// ```
    #[must_use]
    pub fn from_entries(entries: Vec<(String, Value)>) -> Self {
        Object(entries)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.0.iter().position(|(k, _)| k == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Returns the value for `key`, failing if it is absent.
    pub fn at(&self, key: &str) -> Result<&Value> {
        self.get(key).ok_or_else(|| Error::key_not_found(key))
    }

    /// Mutable counterpart of [`Object::at`]; never inserts.
    pub fn at_mut(&mut self, key: &str) -> Result<&mut Value> {
        match self.position(key) {
            Some(pos) => Ok(&mut self.0[pos].1),
            None => Err(Error::key_not_found(key)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the slot for `key`, appending a `Null` entry if it is absent.
    pub fn get_or_insert(&mut self, key: &str) -> &mut Value {
        let pos = match self.position(key) {
            Some(pos) => pos,
            None => {
                self.0.push((key.to_string(), Value::Null));
                self.0.len() - 1
            }
        };
        &mut self.0[pos].1
    }

    /// Sets `key` to `value` without reordering an existing entry.
    ///
    /// Returns the previous value if the key was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagconf::{Object, Value};
    ///
    /// let mut object = Object::new();
    /// assert!(object.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(object.insert("key".to_string(), Value::from(43)).is_some());
    /// assert_eq!(object.len(), 1);
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        match self.position(&key) {
            Some(pos) => Some(std::mem::replace(&mut self.0[pos].1, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Removes the first entry matching `key`.
    ///
    /// # Errors
    ///
    /// Fails with `KeyNotFound` if no entry matches.
    pub fn erase(&mut self, key: &str) -> Result<Value> {
        match self.position(key) {
            Some(pos) => Ok(self.0.remove(pos).1),
            None => Err(Error::key_not_found(key)),
        }
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.0.iter().map(|(_, v)| v)
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> + '_ {
        self.0.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

impl Index<&str> for Object {
    type Output = Value;

    /// Panics when the key is absent.
    fn index(&self, key: &str) -> &Value {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found: {:?}", key),
        }
    }
}

impl IndexMut<&str> for Object {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.get_or_insert(key)
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Value)> for Object {
    /// Collects through [`Object::insert`], so a repeated key keeps its first
    /// position and its last value.
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}
