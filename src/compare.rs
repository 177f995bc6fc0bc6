use core::cmp::Ordering;

/// A total order over keys, supplied once when a [`BOSTree`](crate::BOSTree) is built.
///
/// Any `Fn(&K, &K) -> Ordering` closure is a comparator, so most callers never name this trait.
/// The ordering must be total and must not change while keys are in the tree; otherwise lookups
/// and neighbor queries return unspecified (but memory-safe) results.
///
/// # Examples
///
/// ```
/// use bos_tree::BOSTree;
///
/// // Order by absolute value.
/// let mut tree = BOSTree::with_comparator(|a: &i32, b: &i32| a.abs().cmp(&b.abs()));
/// tree.insert(-3, "c");
/// tree.insert(1, "a");
/// tree.insert(2, "b");
///
/// let keys: Vec<_> = tree.keys().copied().collect();
/// assert_eq!(keys, [1, 2, -3]);
/// ```
pub trait Compare<K: ?Sized> {
    /// Compares two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The key type's own [`Ord`] ordering.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// The key type's [`Ord`] ordering, reversed.
///
/// # Examples
///
/// ```
/// use bos_tree::{BOSTree, Reverse};
///
/// let mut tree = BOSTree::with_comparator(Reverse);
/// for key in [1, 3, 2] {
///     tree.insert(key, ());
/// }
///
/// let first = tree.select(0).unwrap();
/// assert_eq!(tree.key(first), Some(&3));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reverse;

impl<K: Ord + ?Sized> Compare<K> for Reverse {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn natural_and_reverse_disagree() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Reverse.compare(&1, &2), Ordering::Greater);
        assert_eq!(Reverse.compare("a", "a"), Ordering::Equal);
    }

    #[test]
    fn closures_are_comparators() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert_eq!(by_len.compare(&"ab", &"c"), Ordering::Greater);
    }
}
