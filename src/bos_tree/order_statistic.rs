use core::ops::{Index, IndexMut};

use super::{BOSTree, NodeRef};
use crate::Rank;
use crate::compare::Compare;

impl<K, V, C> BOSTree<K, V, C> {
    /// Returns the node at position `index` in sorted order.
    ///
    /// The index is zero-based. Returns `None` if `index` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let mut tree = BOSTree::new();
    /// tree.insert("a", 10);
    /// tree.insert("c", 30);
    /// tree.insert("b", 20);
    ///
    /// let node = tree.select(1).unwrap();
    /// assert_eq!(tree.get(node), Some((&"b", &20)));
    /// assert!(tree.select(3).is_none());
    /// ```
    #[must_use]
    pub fn select(&self, index: usize) -> Option<NodeRef> {
        self.raw.select(index).map(NodeRef)
    }

    /// Returns the zero-based position of `node` in sorted order, or `None` if the handle is
    /// stale.
    ///
    /// `rank(select(i)) == Some(i)` for every `i < len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let mut tree = BOSTree::new();
    /// let b = tree.insert(20, "b");
    /// tree.insert(10, "a");
    ///
    /// assert_eq!(tree.rank(b), Some(1));
    /// tree.remove(b).unwrap();
    /// assert_eq!(tree.rank(b), None);
    /// ```
    #[must_use]
    pub fn rank(&self, node: NodeRef) -> Option<usize> {
        if !self.raw.contains(node.0) {
            return None;
        }
        Some(self.raw.rank(node.0))
    }

    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let node = self.raw.select(rank)?;
        let node = self.raw.node(node);
        Some((node.key(), node.value()))
    }

    /// Returns the key and a mutable reference to the value at position `rank` in sorted order.
    ///
    /// The key is returned as a shared reference because mutating it would violate the tree's
    /// ordering invariants.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let mut tree = BOSTree::new();
    /// tree.insert(10, "a");
    /// tree.insert(5, "b");
    ///
    /// if let Some((key, value)) = tree.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(tree.get_by_rank(0), Some((&5, &"updated")));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let node = self.raw.select(rank)?;
        self.raw.try_node_mut(node).map(|node| node.entry_mut())
    }
}

impl<K, V, C: Compare<K>> BOSTree<K, V, C> {
    /// Returns the zero-based rank of the node [`lookup`](BOSTree::lookup) finds for `key`, or
    /// `None` if the key is not present.
    ///
    /// With duplicate keys, this is the rank of one of them, not necessarily the first.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let mut tree = BOSTree::new();
    /// tree.insert(10, "a");
    /// tree.insert(20, "b");
    ///
    /// assert_eq!(tree.rank_of(&20), Some(1));
    /// assert_eq!(tree.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, key: &K) -> Option<usize> {
        self.raw.lookup(key).map(|node| self.raw.rank(node))
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use bos_tree::{BOSTree, Rank};
///
/// let mut tree = BOSTree::new();
/// tree.insert("a", 1);
/// tree.insert("b", 2);
///
/// assert_eq!(tree[Rank(1)], 2);
/// ```
impl<K, V, C> Index<Rank> for BOSTree<K, V, C> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use bos_tree::{BOSTree, Rank};
///
/// let mut tree: BOSTree<_, _> = [("a", 1), ("b", 2)].into_iter().collect();
/// tree[Rank(1)] = 5;
///
/// assert_eq!(tree.get_by_rank(1), Some((&"b", &5)));
/// ```
impl<K, V, C> IndexMut<Rank> for BOSTree<K, V, C> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
