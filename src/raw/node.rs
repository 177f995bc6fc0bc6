use core::cmp::max;

use super::handle::Handle;
use super::size::Size;

/// Which child of a node, or which way a rotation moves its pivot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const BOTH: [Side; 2] = [Side::Left, Side::Right];

    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    #[inline]
    const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

// AVL node: the entry plus the links and cached fields that keep the tree balanced and ranked.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<Handle>,
    children: [Option<Handle>; 2],
    // Number of nodes in each child subtree, excluding this node.
    counts: [Size; 2],
    // 0 for a leaf, otherwise one more than the taller child.
    height: u8,
}

impl<K, V> Node<K, V> {
    /// Creates a detached leaf.
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            parent: None,
            children: [None, None],
            counts: [Size::ZERO, Size::ZERO],
            height: 0,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Returns the key and a mutable value; the key stays shared so ordering cannot be broken.
    #[inline]
    pub(crate) fn entry_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        self.children[side.index()]
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        self.children[side.index()] = child;
    }

    /// Returns the side `child` hangs on, or `None` if it is not a child of this node.
    #[inline]
    pub(crate) fn side_of(&self, child: Handle) -> Option<Side> {
        Side::BOTH.into_iter().find(|&side| self.child(side) == Some(child))
    }

    #[inline]
    pub(crate) fn count(&self, side: Side) -> Size {
        self.counts[side.index()]
    }

    #[inline]
    pub(crate) fn set_count(&mut self, side: Side, count: Size) {
        self.counts[side.index()] = count;
    }

    /// Number of nodes in the subtree rooted here, this node included.
    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.count(Side::Left).to_usize() + self.count(Side::Right).to_usize() + 1
    }

    #[inline]
    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub(crate) fn set_height(&mut self, height: u8) {
        self.height = height;
    }

    /// Overwrites the cached fields from the given child summaries.
    ///
    /// Each summary is `(height, size)` of a present child.
    pub(crate) fn refresh(&mut self, left: Option<(u8, usize)>, right: Option<(u8, usize)>) {
        let depth = |summary: Option<(u8, usize)>| summary.map_or(0, |(height, _)| height + 1);
        let size = |summary: Option<(u8, usize)>| summary.map_or(Size::ZERO, |(_, size)| Size::from_usize(size));

        self.height = max(depth(left), depth(right));
        self.counts = [size(left), size(right)];
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_a_leaf() {
        let node = Node::new(1, "one");
        assert_eq!(node.height(), 0);
        assert_eq!(node.size(), 1);
        assert!(node.parent().is_none());
        assert!(Side::BOTH.iter().all(|&side| node.child(side).is_none()));
    }

    #[test]
    fn refresh_uses_taller_child() {
        let mut node = Node::new(1, ());
        node.refresh(Some((2, 5)), None);
        assert_eq!(node.height(), 3);
        assert_eq!(node.count(Side::Left).to_usize(), 5);
        assert_eq!(node.count(Side::Right).to_usize(), 0);
        assert_eq!(node.size(), 6);

        node.refresh(Some((0, 1)), Some((1, 2)));
        assert_eq!(node.height(), 2);
        assert_eq!(node.size(), 4);
    }

    #[test]
    fn side_of_finds_child() {
        let left = Handle::new(1, 1, 0);
        let right = Handle::new(1, 2, 0);
        let mut node = Node::new(0, ());
        node.set_child(Side::Left, Some(left));
        node.set_child(Side::Right, Some(right));

        assert_eq!(node.side_of(left), Some(Side::Left));
        assert_eq!(node.side_of(right), Some(Side::Right));
        assert_eq!(node.side_of(Handle::new(1, 3, 0)), None);
        assert_eq!(Side::Left.opposite(), Side::Right);
    }
}
