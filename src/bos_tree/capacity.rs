use super::BOSTree;
use crate::compare::Natural;
use crate::raw::RawBOSTree;

impl<K, V> BOSTree<K, V> {
    /// Creates an empty tree with capacity for at least `capacity` nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let tree: BOSTree<i32, i32> = BOSTree::with_capacity(32);
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, V, C> BOSTree<K, V, C> {
    /// Creates an empty tree ordered by `compare`, with capacity for at least `capacity` nodes.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, compare: C) -> Self {
        BOSTree {
            raw: RawBOSTree::with_capacity(capacity, compare),
        }
    }

    /// Returns the number of nodes the tree can hold without reallocating.
    ///
    /// Slots freed by removals are reused before the tree grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let tree: BOSTree<i32, i32> = BOSTree::with_capacity(32);
    /// assert_eq!(tree.capacity(), 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
