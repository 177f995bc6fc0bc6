use alloc::vec::Vec;
use core::cmp::Ordering;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};
use crate::compare::Compare;

/// The core AVL tree implementation backing `BOSTree`.
///
/// Every node caches its height and the sizes of both child subtrees. Mutations keep three
/// invariants at once: in-order keys are sorted by the comparator, sibling heights differ by at
/// most one, and every cached count equals the real subtree size.
#[derive(Clone)]
pub(crate) struct RawBOSTree<K, V, C> {
    /// Arena owning every node; links between nodes are handles into it.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total order over keys.
    compare: C,
}

impl<K, V, C> RawBOSTree<K, V, C> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(compare: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            compare,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, compare: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            compare,
        }
    }

    /// Returns the number of nodes in the tree, read from the root's cached counts.
    pub(crate) fn len(&self) -> usize {
        let len = self.root.map_or(0, |root| self.node(root).size());
        debug_assert_eq!(len, self.nodes.len(), "root counts disagree with the arena");
        len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Height of the root node, or `None` for an empty tree.
    pub(crate) fn height(&self) -> Option<usize> {
        self.root.map(|root| usize::from(self.node(root).height()))
    }

    pub(crate) fn comparator(&self) -> &C {
        &self.compare
    }

    /// Removes every node. Handles issued before the call become stale.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns true if `handle` names a live node of this tree.
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.nodes.contains(handle)
    }

    /// Returns a node, or `None` for a stale handle.
    pub(crate) fn try_node(&self, handle: Handle) -> Option<&Node<K, V>> {
        self.nodes.try_get(handle)
    }

    pub(crate) fn try_node_mut(&mut self, handle: Handle) -> Option<&mut Node<K, V>> {
        self.nodes.try_get_mut(handle)
    }

    /// Returns a node the tree itself links to.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Returns the leftmost (`Side::Left`) or rightmost (`Side::Right`) node of the tree.
    pub(crate) fn first(&self, side: Side) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, side))
    }

    /// Follows `side` links from `handle` as far as they go.
    fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.node(handle).child(side) {
            handle = child;
        }
        handle
    }

    /// Returns the parent of `handle` and the side `handle` hangs on.
    fn parent_side(&self, handle: Handle) -> Option<(Handle, Side)> {
        let parent = self.node(handle).parent()?;
        let side = self
            .node(parent)
            .side_of(handle)
            .expect("`RawBOSTree::parent_side()` - parent does not link back to child");
        Some((parent, side))
    }

    /// Returns the in-order successor (`Side::Right`) or predecessor (`Side::Left`) of a live node.
    pub(crate) fn neighbor(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.node(handle).child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        // Climb while we are the `side` child; the first ancestor reached from the other side is
        // the neighbor. Reaching the root that way means there is none.
        let mut current = handle;
        while let Some((parent, from)) = self.parent_side(current) {
            if from != side {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Returns the node at 0-based in-order position `index`.
    pub(crate) fn select(&self, mut index: usize) -> Option<Handle> {
        if index >= self.len() {
            return None;
        }

        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            let left = node.count(Side::Left).to_usize();
            match index.cmp(&left) {
                Ordering::Less => current = node.child(Side::Left),
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    index -= left + 1;
                    current = node.child(Side::Right);
                }
            }
        }

        // Only reachable if subtree counts disagree with the tree shape.
        None
    }

    /// Returns the 0-based in-order position of a live node.
    pub(crate) fn rank(&self, handle: Handle) -> usize {
        let mut rank = self.node(handle).count(Side::Left).to_usize();
        let mut current = handle;
        while let Some((parent, side)) = self.parent_side(current) {
            if side == Side::Right {
                rank += self.node(parent).count(Side::Left).to_usize() + 1;
            }
            current = parent;
        }
        rank
    }

    /// Moves every entry out in sorted order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut order = Vec::with_capacity(self.len());
        let mut current = self.first(Side::Left);
        while let Some(handle) = current {
            order.push(handle);
            current = self.neighbor(handle, Side::Right);
        }

        let result = order.into_iter().map(|handle| self.nodes.take(handle).into_entry()).collect();
        self.root = None;
        result
    }

    /// Recomputes the cached height and counts of `handle` from its direct children.
    fn update(&mut self, handle: Handle) {
        let summary = |side: Side| {
            self.node(handle).child(side).map(|child| {
                let child = self.node(child);
                (child.height(), child.size())
            })
        };
        let (left, right) = (summary(Side::Left), summary(Side::Right));
        self.node_mut(handle).refresh(left, right);
    }

    /// Height of the subtree on `side`, plus one; 0 when that child is missing.
    fn depth(&self, handle: Handle, side: Side) -> isize {
        self.node(handle)
            .child(side)
            .map_or(0, |child| isize::from(self.node(child).height()) + 1)
    }

    /// Right depth minus left depth: positive when right-heavy.
    fn balance(&self, handle: Handle) -> isize {
        self.depth(handle, Side::Right) - self.depth(handle, Side::Left)
    }

    /// Points whatever linked to `old` (its parent's child slot, or the root) at `new`, and sets
    /// `new`'s parent accordingly. `old`'s own fields are left untouched.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            Some(parent) => {
                let side = self
                    .node(parent)
                    .side_of(old)
                    .expect("`RawBOSTree::replace_child()` - `old` is not a child of `parent`");
                self.node_mut(parent).set_child(side, new);
            }
            None => self.root = new,
        }
        if let Some(new) = new {
            self.node_mut(new).set_parent(parent);
        }
    }

    /// Rotates the subtree at `pivot` so that `pivot` moves down to `direction`.
    ///
    /// ```text
    /// rotate(P, Right):            rotate(P, Left):
    ///
    ///       P          L              P              R
    ///     L   R  -->  c1  P         L   R   -->    P   c2
    ///   c1 c2           c2 R          c1 c2       L c1
    /// ```
    ///
    /// Returns the new subtree root.
    fn rotate(&mut self, pivot: Handle, direction: Side) -> Handle {
        let up = direction.opposite();
        let child = self
            .node(pivot)
            .child(up)
            .expect("`RawBOSTree::rotate()` - pivot has no child to rotate up");
        let parent = self.node(pivot).parent();
        log::trace!("rotate {direction:?} at {pivot:?}, promoting {child:?}");

        // The child's inner subtree changes hands.
        let inner = self.node(child).child(direction);
        self.node_mut(pivot).set_child(up, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(pivot));
        }

        self.replace_child(parent, pivot, Some(child));
        self.node_mut(child).set_child(direction, Some(pivot));
        self.node_mut(pivot).set_parent(Some(child));

        // Bottom-up: the pivot is now below the child.
        self.update(pivot);
        self.update(child);
        child
    }

    /// Restores AVL balance at a node whose balance factor has reached ±2.
    ///
    /// Returns the new subtree root.
    fn rebalance(&mut self, handle: Handle) -> Handle {
        let balance = self.balance(handle);
        debug_assert!(balance.abs() == 2, "rebalance: balance factor {balance} out of range");

        let heavy = if balance < 0 { Side::Left } else { Side::Right };
        let child = self
            .node(handle)
            .child(heavy)
            .expect("`RawBOSTree::rebalance()` - heavy side has no child");

        // Zig-zag: straighten the child first.
        let child_balance = self.balance(child);
        let leans_inward = match heavy {
            Side::Left => child_balance > 0,
            Side::Right => child_balance < 0,
        };
        if leans_inward {
            self.rotate(child, heavy);
        }
        self.rotate(handle, heavy.opposite())
    }

    /// Walks from `start` to the root after a node was removed below it.
    ///
    /// Unlike insertion, a removal may need a rotation at several levels, so rotations never end
    /// the walk. Once a level is balanced with its height unchanged nothing above can become
    /// unbalanced, and the rest of the walk only refreshes counts.
    fn rebalance_after_remove(&mut self, start: Option<Handle>) {
        let mut settled = false;
        let mut next = start;

        while let Some(current) = next {
            let before = self.node(current).height();
            self.update(current);

            let mut top = current;
            if !settled {
                if self.balance(current).abs() > 1 {
                    top = self.rebalance(current);
                } else if self.node(current).height() == before {
                    settled = true;
                }
            }
            next = self.node(top).parent();
        }
    }

    /// Removes a live node and returns its entry.
    pub(crate) fn remove(&mut self, handle: Handle) -> (K, V) {
        let node = self.node(handle);
        let start = match (node.child(Side::Left), node.child(Side::Right)) {
            (Some(left), Some(right)) => Some(self.unlink_with_two_children(handle, left, right)),
            (only, None) | (None, only) => {
                let parent = node.parent();
                self.replace_child(parent, handle, only);
                parent
            }
        };

        self.rebalance_after_remove(start);
        self.nodes.take(handle).into_entry()
    }

    /// Unlinks a node that has both children, moving a replacement from its deeper side into its
    /// position.
    ///
    /// Returns the node the upward rebalance should start from.
    fn unlink_with_two_children(&mut self, handle: Handle, left: Handle, right: Handle) -> Handle {
        // Take the replacement from the deeper side; ties favor the left.
        let side = if self.node(left).height() >= self.node(right).height() {
            Side::Left
        } else {
            Side::Right
        };
        let subtree = if side == Side::Left { left } else { right };
        let candidate = self.extreme(subtree, side.opposite());
        log::debug!("remove {handle:?}: replacing with {candidate:?} from the {side:?} subtree");

        // Detach the candidate, splicing its only possible child into its slot.
        let detached_from = self
            .node(candidate)
            .parent()
            .expect("`RawBOSTree::unlink_with_two_children()` - candidate has no parent");
        let orphan = self.node(candidate).child(side);
        self.replace_child(Some(detached_from), candidate, orphan);

        // Transplant the candidate into the removed node's position.
        let parent = self.node(handle).parent();
        self.replace_child(parent, handle, Some(candidate));
        for child_side in Side::BOTH {
            let child = self.node(handle).child(child_side);
            let count = self.node(handle).count(child_side);
            let transplanted = self.node_mut(candidate);
            transplanted.set_child(child_side, child);
            transplanted.set_count(child_side, count);
            if let Some(child) = child {
                self.node_mut(child).set_parent(Some(candidate));
            }
        }
        // Inheriting the old height lets the upward walk detect an unchanged height.
        let height = self.node(handle).height();
        self.node_mut(candidate).set_height(height);

        // Repair the detachment path, which now ends just below the candidate.
        if detached_from != handle {
            let mut current = detached_from;
            while current != candidate {
                self.update(current);
                let top = if self.balance(current).abs() > 1 {
                    self.rebalance(current)
                } else {
                    current
                };
                current = self
                    .node(top)
                    .parent()
                    .expect("`RawBOSTree::unlink_with_two_children()` - detachment path left the tree");
            }
        }

        candidate
    }
}

impl<K, V, C: Compare<K>> RawBOSTree<K, V, C> {
    /// Inserts a new node and returns its handle. Equal keys are placed after existing ones.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Handle {
        let mut parent = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            let side = match self.compare.compare(&key, node.key()) {
                Ordering::Less => Side::Left,
                Ordering::Equal | Ordering::Greater => Side::Right,
            };
            parent = Some((handle, side));
            current = node.child(side);
        }

        // Allocate before touching any counts so a full arena leaves the tree unchanged.
        let handle = self.nodes.alloc(Node::new(key, value));
        let Some((parent, side)) = parent else {
            self.root = Some(handle);
            return handle;
        };
        self.node_mut(handle).set_parent(Some(parent));
        self.node_mut(parent).set_child(side, Some(handle));

        // Count the new node into every subtree on the path back to the root.
        let mut below = handle;
        while let Some((ancestor, side)) = self.parent_side(below) {
            let count = self.node(ancestor).count(side).increment();
            self.node_mut(ancestor).set_count(side, count);
            below = ancestor;
        }

        // Walk up while heights change. A rotation brings its subtree back to the height it had
        // before the insertion, so the level above it will find its height unchanged and stop.
        let mut next = Some(parent);
        while let Some(current) = next {
            let before = self.node(current).height();
            self.update(current);

            let top = if self.balance(current).abs() > 1 {
                self.rebalance(current)
            } else if self.node(current).height() == before {
                break;
            } else {
                current
            };
            next = self.node(top).parent();
        }

        handle
    }

    /// Returns the first node on the search path whose key compares equal to `key`.
    pub(crate) fn lookup(&self, key: &K) -> Option<Handle> {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            current = match self.compare.compare(key, node.key()) {
                Ordering::Less => node.child(Side::Left),
                Ordering::Equal => return Some(handle),
                Ordering::Greater => node.child(Side::Right),
            };
        }
        None
    }
}
