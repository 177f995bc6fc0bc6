use core::fmt;

/// Errors reported by [`BOSTree`](crate::BOSTree) operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// No node with the requested key is in the tree.
    KeyNotFound,
    /// The node handle does not refer to a live node of this tree.
    StaleNode,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotFound => write!(f, "node not found for key"),
            Self::StaleNode => write!(f, "node handle is not part of this tree"),
        }
    }
}

impl core::error::Error for Error {}

/// Result alias for tree operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_messages() {
        assert_eq!(Error::KeyNotFound.to_string(), "node not found for key");
        assert_eq!(Error::StaleNode.to_string(), "node handle is not part of this tree");
    }
}
