//! Ordered item container that remembers its most recent mutation.

use std::ops::Index;

use super::error::LayoutError;

/// Description of the most recent structural change to a [`ChangeTracked`].
///
/// Only the latest change is retained; each mutation overwrites the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Change {
    /// The whole sequence was replaced (or the container was just built).
    #[default]
    Reset,
    /// Items were inserted at these indices, ascending.
    Inserted(Vec<usize>),
    /// Items were removed from these pre-removal indices, descending.
    Deleted(Vec<usize>),
    /// Items at these indices were replaced in place.
    Updated(Vec<usize>),
}

impl Change {
    /// Indices touched by the change; empty for [`Change::Reset`].
    pub fn indices(&self) -> &[usize] {
        match self {
            Change::Reset => &[],
            Change::Inserted(indices) | Change::Deleted(indices) | Change::Updated(indices) => {
                indices
            }
        }
    }
}

/// Vector wrapper that records the kind and indices of its latest mutation.
///
/// Consumers (typically [`crate::layout::GridLayout::apply_change`]) read
/// [`ChangeTracked::latest_change`] after each mutation to update derived state
/// incrementally instead of rescanning everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeTracked<T> {
    items: Vec<T>,
    latest_change: Change,
}

impl<T> Default for ChangeTracked<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> ChangeTracked<T> {
    /// Wrap an existing sequence. The latest change starts as [`Change::Reset`].
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            latest_change: Change::Reset,
        }
    }

    /// The most recent change.
    pub fn latest_change(&self) -> &Change {
        &self.latest_change
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::IndexOutOfRange`] if `index >= len()`.
    pub fn try_get(&self, index: usize) -> Result<&T, LayoutError> {
        self.items
            .get(index)
            .ok_or_else(|| LayoutError::out_of_range(index, self.items.len()))
    }

    /// All items as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterate over items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Replace the whole sequence.
    pub fn set(&mut self, items: Vec<T>) {
        self.items = items;
        self.latest_change = Change::Reset;
    }

    /// Append one item.
    pub fn append(&mut self, item: T) {
        let index = self.items.len();
        self.items.push(item);
        self.latest_change = Change::Inserted(vec![index]);
    }

    /// Append several items. Records `[old_len, old_len + count)` as inserted.
    pub fn append_all(&mut self, items: impl IntoIterator<Item = T>) {
        let start = self.items.len();
        self.items.extend(items);
        self.latest_change = Change::Inserted((start..self.items.len()).collect());
    }

    /// Remove the items at `indices`.
    ///
    /// Indices may be given in any order; duplicates are collapsed. Removal runs
    /// from the highest index down so earlier removals never shift later ones.
    /// The recorded change lists the original indices, descending.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::IndexOutOfRange`] if any index is out of range; the
    /// container is left untouched in that case.
    pub fn remove_at(&mut self, indices: &[usize]) -> Result<(), LayoutError> {
        let mut descending = indices.to_vec();
        descending.sort_unstable_by(|a, b| b.cmp(a));
        descending.dedup();

        if let Some(&highest) = descending.first() {
            if highest >= self.items.len() {
                return Err(LayoutError::out_of_range(highest, self.items.len()));
            }
        }

        for &index in &descending {
            self.items.remove(index);
        }
        self.latest_change = Change::Deleted(descending);
        Ok(())
    }

    /// Remove a single item.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::IndexOutOfRange`] if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<T, LayoutError> {
        if index >= self.items.len() {
            return Err(LayoutError::out_of_range(index, self.items.len()));
        }
        let removed = self.items.remove(index);
        self.latest_change = Change::Deleted(vec![index]);
        Ok(removed)
    }

    /// Replace the item at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::IndexOutOfRange`] if `index >= len()`.
    pub fn update_at(&mut self, index: usize, item: T) -> Result<T, LayoutError> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or_else(|| LayoutError::out_of_range(index, len))?;
        let previous = std::mem::replace(slot, item);
        self.latest_change = Change::Updated(vec![index]);
        Ok(previous)
    }
}

impl<T> From<Vec<T>> for ChangeTracked<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for ChangeTracked<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> Index<usize> for ChangeTracked<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a ChangeTracked<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
