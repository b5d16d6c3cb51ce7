// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_rtree --heading-base-level=0

//! Understory R-tree: a dynamic, height-balanced index of 2D rectangles.
//!
//! Understory R-tree is a building block for spatial lookups over axis-aligned regions.
//!
//! - Insert regions with caller-supplied identifiers, or let the tree number them.
//! - Find a stored region exactly, or query everything overlapping a target region.
//! - Remove regions; the tree rebalances itself by condensing and reinserting.
//!
//! The tree follows Guttman's design: every node other than the root holds between
//! `m` and `M` entries (2 and 4 by default), all leaves sit at the same depth, and
//! overfull nodes are divided with the quadratic split. Regions are generic over the
//! scalar type (`i64`, `f32`, `f64`), with areas computed in a widened accumulator.
//!
//! # Example
//!
//! ```rust
//! use understory_rtree::{RTree, Region};
//!
//! let mut tree: RTree<i64, u32> = RTree::new();
//! tree.add(Region::new(10, 20, 50, 60), 99);
//! tree.add(Region::new(30, 60, 70, 80), 101);
//!
//! // Exact search.
//! assert_eq!(
//!     tree.search(&Region::new(10, 20, 50, 60)),
//!     Some((Region::new(10, 20, 50, 60), 99))
//! );
//!
//! // Everything overlapping a target, one record at a time.
//! let hits: Vec<_> = tree
//!     .range_records(Region::new(0, 0, 40, 40))
//!     .map(|(_, id)| id)
//!     .collect();
//! assert_eq!(hits, [99]);
//!
//! assert!(tree.remove(&Region::new(30, 60, 70, 80)));
//! assert_eq!(tree.size(), 1);
//! ```
//!
//! ## Range queries and full subtrees
//!
//! [`RTree::range`] reports a subtree lying wholly inside the target as a single
//! [`RangeItem::Subtree`] instead of walking it. Callers that want individual records
//! either expand it with [`Node::leaf_order`] or use [`RTree::range_records`]:
//!
//! ```rust
//! use understory_rtree::{RTree, RangeItem, Region};
//!
//! let mut tree: RTree<i64, u64> = RTree::with_fanout(2, 4).unwrap();
//! for i in 0..20 {
//!     tree.add_auto(Region::<i64>::from_xywh(i * 10, 0, 5, 5));
//! }
//!
//! let mut count = 0;
//! for item in tree.range(Region::new(-1, -1, 1000, 1000)) {
//!     match item {
//!         RangeItem::Subtree(node) => count += node.leaf_order().count(),
//!         RangeItem::Record(..) => count += 1,
//!     }
//! }
//! assert_eq!(count, 20);
//! ```
//!
//! ## Fan-out
//!
//! [`RTree::with_fanout`] takes the minimum and maximum number of entries per node and
//! rejects combinations outside `2 <= m <= M / 2`, since the split could not
//! otherwise leave both halves at least `m` full.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates.
//! Region comparisons treat unordered values as not contained and not overlapping.
//!
//! ## Features
//!
//! - `kurbo`: conversions between [`Region<f64>`](Region) and `kurbo::Rect`.

#![no_std]

extern crate alloc;

pub mod error;
pub mod iter;
pub mod node;
pub mod tree;
pub mod types;

pub use error::FanoutError;
pub use iter::{LeafOrder, Range, RangeItem, RangeRecords};
pub use node::Node;
pub use tree::{DEFAULT_MAX_FILL, DEFAULT_MIN_FILL, RTree, RTreeF32, RTreeF64, RTreeI64};
pub use types::{Region, Scalar, ScalarAcc};
