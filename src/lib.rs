//! Balanced order-statistic tree for Rust.
//!
//! This crate provides [`BOSTree`], an AVL tree whose nodes also track the sizes of their
//! subtrees. On top of the usual ordered-map operations it answers positional queries in
//! O(log n):
//!
//! - [`select`](BOSTree::select) - Get the node at a given sorted position
//! - [`rank`](BOSTree::rank) - Get the sorted position of a node
//! - Indexing by [`Rank`] - e.g., `tree[Rank(0)]` for the first value
//!
//! Insertion returns a [`NodeRef`], a stable handle to the new node. Handles stay valid across
//! rebalancing and are invalidated only when their node is removed, so a caller can remember
//! where an element went and later ask for its rank or remove exactly that element, even among
//! duplicate keys.
//!
//! # Example
//!
//! ```
//! use bos_tree::{BOSTree, Rank};
//!
//! let mut scores = BOSTree::new();
//! let alice = scores.insert(100, "Alice");
//! scores.insert(85, "Bob");
//! scores.insert(92, "Carol");
//!
//! // Ordered-map style lookups
//! let bob = scores.lookup(&85).unwrap();
//! assert_eq!(scores.value(bob), Some(&"Bob"));
//! assert_eq!(scores.len(), 3);
//!
//! // Order-statistic operations (O(log n))
//! let median = scores.select(1).unwrap();
//! assert_eq!(scores.value(median), Some(&"Carol"));
//! assert_eq!(scores.rank(alice), Some(2));
//!
//! // Index by rank
//! assert_eq!(scores[Rank(0)], "Bob");
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Duplicate keys** - Equal keys are kept in insertion order
//! - **Custom orderings** - Any `Fn(&K, &K) -> Ordering` closure is a comparator
//! - **Checked handles** - Handles to removed nodes are detected, never reused
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to their parent and children by generational handles.
//! Each node caches its height and both child subtree sizes; insertion and removal repair
//! those caches on the way back up to the root, rotating wherever sibling heights drift apart
//! by two. Mutations report rotations through the [`log`] facade at trace level.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod order_statistic;
mod raw;

pub mod bos_tree;

pub use bos_tree::{BOSTree, NodeRef};
pub use compare::{Compare, Natural, Reverse};
pub use error::{Error, Result};
pub use order_statistic::Rank;
