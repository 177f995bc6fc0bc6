use core::fmt;
use core::iter::FusedIterator;

use crate::compare::{Compare, Natural};
use crate::error::{Error, Result};
use crate::raw::{Handle, RawBOSTree, Side};

mod capacity;
mod order_statistic;

pub use crate::Rank;

/// A handle to one node of a [`BOSTree`].
///
/// Handles are returned by [`BOSTree::insert`] and by the navigation methods. They stay valid
/// while the tree rebalances, and become stale once their node is removed (or the tree is
/// cleared); a stale handle is never confused with a node inserted later.
///
/// Every tree tags its handles, so passing a handle to a different tree is detected and treated
/// like a stale handle. A [`Clone`] of a tree shares the tag and accepts the handles the
/// original issued before the clone.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeRef(Handle);

/// An ordered multimap based on an [AVL tree] with subtree-size augmentation.
///
/// Keys are ordered by a comparator `C` fixed at construction: [`Natural`] for keys implementing
/// [`Ord`], or any `Fn(&K, &K) -> Ordering` closure. Equal keys are allowed; each insertion
/// creates a new node placed after the existing equal keys, and the returned [`NodeRef`] is the
/// way to tell duplicates apart.
///
/// Besides key lookup the tree answers order-statistic queries in O(log n):
/// [`select`](BOSTree::select) finds the node at a sorted position and
/// [`rank`](BOSTree::rank) returns the sorted position of a node.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative to any
/// other key changes while it is in the tree. The behavior resulting from such a logic error is
/// not specified, but will be encapsulated to the `BOSTree` that observed it and not result in
/// undefined behavior.
///
/// # Examples
///
/// ```
/// use bos_tree::BOSTree;
///
/// let mut tasks = BOSTree::new();
/// tasks.insert(3, "write docs");
/// let urgent = tasks.insert(1, "fix build");
/// tasks.insert(2, "review");
/// tasks.insert(2, "reply to mail");
///
/// // In priority order; equal priorities keep insertion order.
/// let order: Vec<_> = tasks.values().copied().collect();
/// assert_eq!(order, ["fix build", "review", "reply to mail", "write docs"]);
///
/// // Walk from a node to its neighbors.
/// let next = tasks.next_node(urgent).unwrap();
/// assert_eq!(tasks.get(next), Some((&2, &"review")));
///
/// // Remove exactly the node we were handed.
/// assert_eq!(tasks.remove(urgent), Ok((1, "fix build")));
/// assert_eq!(tasks.len(), 3);
/// ```
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
#[derive(Clone)]
pub struct BOSTree<K, V, C = Natural> {
    raw: RawBOSTree<K, V, C>,
}

/// An iterator over the entries of a `BOSTree`, in sorted order.
///
/// This `struct` is created by the [`iter`] method on [`BOSTree`].
///
/// # Examples
///
/// ```
/// use bos_tree::BOSTree;
///
/// let tree: BOSTree<_, _> = [(1, "a"), (2, "b")].into_iter().collect();
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: BOSTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, C> {
    tree: &'a RawBOSTree<K, V, C>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An iterator over the keys of a `BOSTree`, in sorted order.
///
/// This `struct` is created by the [`keys`](BOSTree::keys) method on [`BOSTree`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V, C> {
    inner: Iter<'a, K, V, C>,
}

/// An iterator over the values of a `BOSTree`, in key order.
///
/// This `struct` is created by the [`values`](BOSTree::values) method on [`BOSTree`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V, C> {
    inner: Iter<'a, K, V, C>,
}

/// An owning iterator over the entries of a `BOSTree`, in sorted order.
///
/// This `struct` is created by the [`into_iter`] method on [`BOSTree`] (provided by the
/// [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

impl<K, V> BOSTree<K, V> {
    /// Makes a new, empty `BOSTree` ordered by the keys' [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let mut tree = BOSTree::new();
    /// tree.insert(1, "a");
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C> BOSTree<K, V, C> {
    /// Makes a new, empty `BOSTree` ordered by `compare`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let mut tree = BOSTree::with_comparator(|a: &f64, b: &f64| a.total_cmp(b));
    /// tree.insert(2.5, "b");
    /// tree.insert(-1.0, "a");
    ///
    /// let first = tree.select(0).unwrap();
    /// assert_eq!(tree.key(first), Some(&-1.0));
    /// ```
    #[must_use]
    pub const fn with_comparator(compare: C) -> Self {
        Self {
            raw: RawBOSTree::new(compare),
        }
    }

    /// Returns the comparator the tree was built with.
    #[must_use]
    pub fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns the number of nodes in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let mut tree = BOSTree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1, "a");
    /// tree.insert(1, "b");
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the height of the tree: 0 for a single node, `None` when empty.
    ///
    /// An AVL tree with `n` nodes is never taller than about `1.44 * log2(n + 2)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let tree: BOSTree<i32, ()> = (0..7).map(|k| (k, ())).collect();
    /// assert_eq!(tree.height(), Some(2));
    /// ```
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.raw.height()
    }

    /// Removes every node. All outstanding handles become stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let mut tree = BOSTree::new();
    /// let node = tree.insert(1, "a");
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert!(!tree.contains_node(node));
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns `true` if `node` refers to a node currently in the tree.
    #[must_use]
    pub fn contains_node(&self, node: NodeRef) -> bool {
        self.raw.contains(node.0)
    }

    /// Returns the key and value of `node`, or `None` if the handle is stale.
    #[must_use]
    pub fn get(&self, node: NodeRef) -> Option<(&K, &V)> {
        self.raw.try_node(node.0).map(|node| (node.key(), node.value()))
    }

    /// Returns the key of `node`, or `None` if the handle is stale.
    #[must_use]
    pub fn key(&self, node: NodeRef) -> Option<&K> {
        self.raw.try_node(node.0).map(|node| node.key())
    }

    /// Returns the value of `node`, or `None` if the handle is stale.
    #[must_use]
    pub fn value(&self, node: NodeRef) -> Option<&V> {
        self.raw.try_node(node.0).map(|node| node.value())
    }

    /// Returns a mutable reference to the value of `node`, or `None` if the handle is stale.
    ///
    /// Keys cannot be mutated in place, since that could break the tree's ordering.
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let mut tree = BOSTree::new();
    /// let node = tree.insert("apples", 3);
    /// if let Some(count) = tree.value_mut(node) {
    ///     *count += 1;
    /// }
    /// assert_eq!(tree.value(node), Some(&4));
    /// ```
    #[must_use]
    pub fn value_mut(&mut self, node: NodeRef) -> Option<&mut V> {
        self.raw.try_node_mut(node.0).map(|node| node.value_mut())
    }

    /// Removes `node` from the tree and returns its key and value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StaleNode`] if `node` was already removed or was issued by another tree.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::{BOSTree, Error};
    ///
    /// let mut tree = BOSTree::new();
    /// let first = tree.insert(7, "first");
    /// tree.insert(7, "second");
    ///
    /// assert_eq!(tree.remove(first), Ok((7, "first")));
    /// assert_eq!(tree.remove(first), Err(Error::StaleNode));
    /// assert_eq!(tree.values().collect::<Vec<_>>(), [&"second"]);
    /// ```
    pub fn remove(&mut self, node: NodeRef) -> Result<(K, V)> {
        if !self.raw.contains(node.0) {
            return Err(Error::StaleNode);
        }
        Ok(self.raw.remove(node.0))
    }

    /// Returns the in-order successor of `node`.
    ///
    /// Returns `None` if `node` is the last node or the handle is stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let mut tree = BOSTree::new();
    /// let a = tree.insert(1, "a");
    /// let b = tree.insert(2, "b");
    ///
    /// assert_eq!(tree.next_node(a), Some(b));
    /// assert_eq!(tree.next_node(b), None);
    /// ```
    #[must_use]
    pub fn next_node(&self, node: NodeRef) -> Option<NodeRef> {
        self.neighbor(node, Side::Right)
    }

    /// Returns the in-order predecessor of `node`.
    ///
    /// Returns `None` if `node` is the first node or the handle is stale.
    #[must_use]
    pub fn prev_node(&self, node: NodeRef) -> Option<NodeRef> {
        self.neighbor(node, Side::Left)
    }

    fn neighbor(&self, node: NodeRef, side: Side) -> Option<NodeRef> {
        if !self.raw.contains(node.0) {
            return None;
        }
        self.raw.neighbor(node.0, side).map(NodeRef)
    }

    /// Returns the first node in sorted order.
    #[must_use]
    pub fn first(&self) -> Option<NodeRef> {
        self.raw.first(Side::Left).map(NodeRef)
    }

    /// Returns the last node in sorted order.
    #[must_use]
    pub fn last(&self) -> Option<NodeRef> {
        self.raw.first(Side::Right).map(NodeRef)
    }

    /// Returns the first key-value pair in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let mut tree = BOSTree::new();
    /// assert_eq!(tree.first_key_value(), None);
    /// tree.insert(2, "b");
    /// tree.insert(1, "a");
    /// assert_eq!(tree.first_key_value(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.first().and_then(|node| self.get(node))
    }

    /// Returns the last key-value pair in sorted order.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.last().and_then(|node| self.get(node))
    }

    /// Removes and returns the first entry in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let mut tree: BOSTree<_, _> = [(1, "a"), (2, "b")].into_iter().collect();
    /// assert_eq!(tree.pop_first(), Some((1, "a")));
    /// assert_eq!(tree.pop_first(), Some((2, "b")));
    /// assert_eq!(tree.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.raw.first(Side::Left)?;
        Some(self.raw.remove(first))
    }

    /// Removes and returns the last entry in sorted order.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.raw.first(Side::Right)?;
        Some(self.raw.remove(last))
    }

    /// Gets an iterator over the entries of the tree, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let mut tree = BOSTree::new();
    /// tree.insert(3, "c");
    /// tree.insert(1, "a");
    /// tree.insert(2, "b");
    ///
    /// let (first_key, first_value) = tree.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            tree: &self.raw,
            front: self.raw.first(Side::Left),
            back: self.raw.first(Side::Right),
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys of the tree, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the tree, in order by key.
    pub fn values(&self) -> Values<'_, K, V, C> {
        Values { inner: self.iter() }
    }
}

impl<K, V, C: Compare<K>> BOSTree<K, V, C> {
    /// Inserts a key-value pair and returns a handle to the new node.
    ///
    /// Duplicate keys are allowed: the new node is placed after every node with an equal key.
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
    /// let a = tree.insert(37, "a");
    /// let b = tree.insert(37, "b");
    ///
    /// assert_ne!(a, b);
    /// assert_eq!(tree.rank(a), Some(0));
    /// assert_eq!(tree.rank(b), Some(1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> NodeRef {
        NodeRef(self.raw.insert(key, value))
    }

    /// Returns a node whose key compares equal to `key`, or `None` if there is none.
    ///
    /// When several nodes share the key, which one is returned is unspecified.
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
    /// tree.insert(1, "a");
    ///
    /// let node = tree.lookup(&1).unwrap();
    /// assert_eq!(tree.value(node), Some(&"a"));
    /// assert_eq!(tree.lookup(&2), None);
    /// ```
    #[must_use]
    pub fn lookup(&self, key: &K) -> Option<NodeRef> {
        self.raw.lookup(key).map(NodeRef)
    }

    /// Returns `true` if some node's key compares equal to `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.lookup(key).is_some()
    }

    /// Removes the node [`lookup`](BOSTree::lookup) finds for `key` and returns its entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::BOSTree;
    ///
    /// let mut tree = BOSTree::new();
    /// tree.insert(1, "a");
    /// assert_eq!(tree.remove_key(&1), Some((1, "a")));
    /// assert_eq!(tree.remove_key(&1), None);
    /// ```
    pub fn remove_key(&mut self, key: &K) -> Option<(K, V)> {
        let node = self.raw.lookup(key)?;
        Some(self.raw.remove(node))
    }

    /// Returns the value that follows the node found for `key`.
    ///
    /// Returns `Ok(None)` when that node is the last one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if no node has the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bos_tree::{BOSTree, Error};
    ///
    /// let mut tree = BOSTree::new();
    /// tree.insert(1, "a");
    /// tree.insert(2, "b");
    ///
    /// assert_eq!(tree.next_value(&1), Ok(Some(&"b")));
    /// assert_eq!(tree.next_value(&2), Ok(None));
    /// assert_eq!(tree.next_value(&3), Err(Error::KeyNotFound));
    /// ```
    pub fn next_value(&self, key: &K) -> Result<Option<&V>> {
        self.neighbor_value(key, Side::Right)
    }

    /// Returns the value that precedes the node found for `key`.
    ///
    /// Returns `Ok(None)` when that node is the first one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if no node has the key.
    pub fn prev_value(&self, key: &K) -> Result<Option<&V>> {
        self.neighbor_value(key, Side::Left)
    }

    fn neighbor_value(&self, key: &K, side: Side) -> Result<Option<&V>> {
        let node = self.raw.lookup(key).ok_or(Error::KeyNotFound)?;
        Ok(self.raw.neighbor(node, side).map(|neighbor| self.raw.node(neighbor).value()))
    }
}

impl<K, V, C: Default> Default for BOSTree<K, V, C> {
    /// Creates an empty `BOSTree` with the default comparator.
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for BOSTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Compare<K>> Extend<(K, V)> for BOSTree<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BOSTree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = BOSTree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V, C> IntoIterator for &'a BOSTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Iter<'a, K, V, C> {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for BOSTree<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the tree, sorted by key.
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let handle = self.front?;
        self.front = tree.neighbor(handle, Side::Right);
        self.remaining -= 1;
        let node = tree.node(handle);
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, C> DoubleEndedIterator for Iter<'a, K, V, C> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let handle = self.back?;
        self.back = tree.neighbor(handle, Side::Left);
        self.remaining -= 1;
        let node = tree.node(handle);
        Some((node.key(), node.value()))
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {}

impl<K, V, C> FusedIterator for Iter<'_, K, V, C> {}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, C> Iterator for Keys<'a, K, V, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, C> DoubleEndedIterator for Keys<'a, K, V, C> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V, C> ExactSizeIterator for Keys<'_, K, V, C> {}

impl<K, V, C> FusedIterator for Keys<'_, K, V, C> {}

impl<'a, K, V, C> Iterator for Values<'a, K, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, C> DoubleEndedIterator for Values<'a, K, V, C> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V, C> ExactSizeIterator for Values<'_, K, V, C> {}

impl<K, V, C> FusedIterator for Values<'_, K, V, C> {}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    #[test]
    fn stale_handles_report_absence() {
        let mut tree = BOSTree::new();
        let a = tree.insert(1, "a");
        tree.insert(2, "b");
        tree.remove(a).unwrap();

        assert_eq!(tree.get(a), None);
        assert_eq!(tree.next_node(a), None);
        assert_eq!(tree.prev_node(a), None);
        assert_eq!(tree.value_mut(a), None);
        assert_eq!(tree.remove(a), Err(Error::StaleNode));
    }

    #[test]
    fn iterators_meet_in_the_middle() {
        let tree: BOSTree<i32, i32> = (0..5).map(|k| (k, k * 10)).collect();
        let mut iter = tree.iter();

        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some((&0, &0)));
        assert_eq!(iter.next_back(), Some((&4, &40)));
        assert_eq!(iter.next(), Some((&1, &10)));
        assert_eq!(iter.next_back(), Some((&3, &30)));
        assert_eq!(iter.next(), Some((&2, &20)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn debug_lists_entries_in_order() {
        let tree: BOSTree<i32, &str> = [(2, "b"), (1, "a")].into_iter().collect();
        assert_eq!(format!("{tree:?}"), r#"{1: "a", 2: "b"}"#);
    }

    #[test]
    fn into_iter_drains_in_order() {
        let tree: BOSTree<i32, ()> = [3, 1, 2, 1].into_iter().map(|k| (k, ())).collect();
        let keys: Vec<i32> = tree.into_iter().map(|(k, ())| k).collect();
        assert_eq!(keys, [1, 1, 2, 3]);
    }

    #[test]
    fn clone_keeps_handles_valid() {
        let mut tree = BOSTree::new();
        let node = tree.insert(1, "a");
        let copy = tree.clone();
        tree.remove(node).unwrap();

        assert_eq!(copy.get(node), Some((&1, &"a")));
        assert!(!tree.contains_node(node));
    }

    #[test]
    fn handles_from_another_tree_are_rejected() {
        let mut first = BOSTree::new();
        let mut second = BOSTree::new();
        let foreign = first.insert(1, "first");
        let local = second.insert(99, "second");

        assert_ne!(foreign, local);
        assert!(!second.contains_node(foreign));
        assert_eq!(second.get(foreign), None);
        assert_eq!(second.value_mut(foreign), None);
        assert_eq!(second.rank(foreign), None);
        assert_eq!(second.next_node(foreign), None);
        assert_eq!(second.prev_node(foreign), None);
        assert_eq!(second.remove(foreign), Err(Error::StaleNode));
        assert_eq!(second.len(), 1);
        assert_eq!(first.remove(foreign), Ok((1, "first")));
    }

    #[test]
    fn empty_tree_rejects_foreign_handles() {
        let mut first = BOSTree::new();
        let foreign = first.insert(1, ());
        let mut empty: BOSTree<i32, ()> = BOSTree::new();

        assert_eq!(empty.remove(foreign), Err(Error::StaleNode));
    }
}
