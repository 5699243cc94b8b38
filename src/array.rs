//! Ordered sequence of values.
//!
//! [`Array`] is the public view of the array variant of [`Value`]. It has two
//! accessors with different bounds policies:
//!
//! - [`Array::at`] is read-strict and fails with
//!   [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
//! - [`Array::get_or_grow`] (and `IndexMut`) is write-permissive and extends the
//!   sequence with `Null` slots up to and including the requested index
//!
//! ## Examples
//!
//! ```rust
//! use serde_tagconf::{Array, Value};
//!
//! let mut array = Array::with_size(2);
//! assert!(array.at(5).is_err());
//!
//! array[5] = Value::from(true);
//! assert_eq!(array.len(), 6);
//! assert!(array.at(4).unwrap().is_null());
//! ```

use crate::{Error, Result, Value};
use std::ops::{Index, IndexMut};

/// A dense, 0-based sequence of [`Value`]s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array(Vec<Value>);

impl Array {
    /// Creates an empty `Array`.
    #[must_use]
    pub fn new() -> Self {
        Array(Vec::new())
    }

    /// Creates an `Array` holding `size` `Null` slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagconf::Array;
    ///
    /// let array = Array::with_size(3);
    /// assert_eq!(array.len(), 3);
    /// assert!(array.iter().all(|v| v.is_null()));
    /// ```
    #[must_use]
    pub fn with_size(size: usize) -> Self {
        Array(vec![Value::Null; size])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the element at `index`, failing if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&Value> {
        let len = self.0.len();
        self.0
            .get(index)
            .ok_or_else(|| Error::index_out_of_bounds(index, len))
    }

    /// Mutable counterpart of [`Array::at`]; never grows the sequence.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Value> {
        let len = self.0.len();
        self.0
            .get_mut(index)
            .ok_or_else(|| Error::index_out_of_bounds(index, len))
    }

    /// Returns the element at `index`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Returns the slot at `index`, first growing the sequence with `Null`
    /// slots when `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagconf::Array;
    ///
    /// let mut array = Array::new();
    /// *array.get_or_grow(2) = 7.into();
    /// assert_eq!(array.len(), 3);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `index` is `usize::MAX`, or if the new length exceeds
    /// `isize::MAX` bytes, as `Vec` growth does.
    pub fn get_or_grow(&mut self, index: usize) -> &mut Value {
        if index >= self.0.len() {
            let len = match index.checked_add(1) {
                Some(len) => len,
                None => panic!("index {} exceeds the maximum array length", index),
            };
            self.0.resize(len, Value::Null);
        }
        &mut self.0[index]
    }

    /// Appends a value at the next index.
    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    /// Removes the element at `index`, shifting later elements down.
    ///
    /// # Errors
    ///
    /// Fails with `IndexOutOfBounds` if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> Result<Value> {
        if index >= self.0.len() {
            return Err(Error::index_out_of_bounds(index, self.0.len()));
        }
        Ok(self.0.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        self.0.iter_mut()
    }

    /// Returns the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

impl Index<usize> for Array {
    type Output = Value;

    /// Panics when out of range, like slice indexing.
    fn index(&self, index: usize) -> &Value {
        &self.0[index]
    }
}

impl IndexMut<usize> for Array {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        self.get_or_grow(index)
    }
}

impl From<Vec<Value>> for Array {
    fn from(elements: Vec<Value>) -> Self {
        Array(elements)
    }
}

impl From<Array> for Vec<Value> {
    fn from(array: Array) -> Self {
        array.0
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Array(Vec::from_iter(iter))
    }
}
