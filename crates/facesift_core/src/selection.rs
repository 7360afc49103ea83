use std::collections::BTreeSet;

/// Indices of the current result sequence marked for batch operations.
///
/// Cleared wholesale whenever the underlying result sequence is replaced.
/// No operation here touches network or storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    indices: BTreeSet<usize>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of one index.
    pub fn toggle(&mut self, index: usize) {
        if !self.indices.remove(&index) {
            self.indices.insert(index);
        }
    }

    /// Selects every visible index, unless all of them are already
    /// selected, in which case the set is cleared.
    pub fn select_all(&mut self, visible: usize) {
        if self.indices.len() == visible && self.indices.iter().all(|&i| i < visible) {
            self.indices.clear();
        } else {
            self.indices = (0..visible).collect();
        }
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Selected indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.indices.iter().copied().collect()
    }
}
