//! Ordered, positionally-edited sequences for the repeatable resume sections.
//!
//! Every index arriving from the editor shell is checked. Out-of-range indices
//! return a `ListError` and leave the list untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of range for list of length {len}")]
pub struct ListError {
    pub index: usize,
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexedList<T>(Vec<T>);

impl<T> Default for IndexedList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> From<Vec<T>> for IndexedList<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<'a, T> IntoIterator for &'a IndexedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T> IndexedList<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn push(&mut self, item: T) {
        self.0.push(item);
    }

    pub fn get(&self, index: usize) -> Result<&T, ListError> {
        let len = self.0.len();
        self.0.get(index).ok_or(ListError { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ListError> {
        let len = self.0.len();
        self.0.get_mut(index).ok_or(ListError { index, len })
    }

    pub fn remove(&mut self, index: usize) -> Result<T, ListError> {
        self.check(index)?;
        Ok(self.0.remove(index))
    }

    /// Moves the item at `from` so that it ends up at position `to`.
    /// Both positions must be in range.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), ListError> {
        self.check(from)?;
        self.check(to)?;
        let item = self.0.remove(from);
        self.0.insert(to, item);
        Ok(())
    }

    /// Swaps the item with its predecessor. A no-op for the first item.
    pub fn move_up(&mut self, index: usize) -> Result<(), ListError> {
        self.check(index)?;
        if index == 0 {
            return Ok(());
        }
        self.move_item(index, index - 1)
    }

    /// Swaps the item with its successor. A no-op for the last item.
    pub fn move_down(&mut self, index: usize) -> Result<(), ListError> {
        self.check(index)?;
        if index + 1 == self.0.len() {
            return Ok(());
        }
        self.move_item(index, index + 1)
    }

    fn check(&self, index: usize) -> Result<(), ListError> {
        if index < self.0.len() {
            Ok(())
        } else {
            Err(ListError {
                index,
                len: self.0.len(),
            })
        }
    }
}
