/// A zero-based rank into the sorted order of a tree.
///
/// # Examples
///
/// ```
/// use bos_tree::{BOSTree, Rank};
///
/// let mut tree = BOSTree::new();
/// tree.insert("a", 10);
/// tree.insert("b", 20);
///
/// assert_eq!(tree[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
