// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public [`RTree`] API: insertion, deletion, exact search, and range queries.

use alloc::vec::Vec;
use core::fmt;
use core::fmt::Debug;

use crate::error::FanoutError;
use crate::iter::{LeafOrder, Range, RangeRecords};
use crate::node::{Entry, Node};
use crate::types::{Region, Scalar};

/// Default minimum number of entries per non-root node.
pub const DEFAULT_MIN_FILL: usize = 2;

/// Default maximum number of entries per node.
pub const DEFAULT_MAX_FILL: usize = 4;

/// A height-balanced R-tree over 2D regions with identifiers `I`.
///
/// Every node other than the root holds between `min_fill` and `max_fill`
/// entries, and every interior node's region is the tight union of its
/// children's regions. Duplicate regions are allowed.
pub struct RTree<T: Scalar, I> {
    root: Option<Node<T, I>>,
    min_fill: usize,
    max_fill: usize,
    next_id: u64,
}

impl<T: Scalar, I> Default for RTree<T, I> {
    fn default() -> Self {
        Self {
            root: None,
            min_fill: DEFAULT_MIN_FILL,
            max_fill: DEFAULT_MAX_FILL,
            next_id: 1,
        }
    }
}

impl<T: Scalar, I> RTree<T, I> {
    /// Create an empty tree with the default fan-out (2 to 4 entries per node).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree holding between `min` and `max` entries per node.
    ///
    /// Requires `2 <= min <= max / 2`.
    pub fn with_fanout(min: usize, max: usize) -> Result<Self, FanoutError> {
        if min < 2 {
            return Err(FanoutError::MinTooSmall { min });
        }
        if min > max / 2 {
            return Err(FanoutError::MinTooLarge { min, max });
        }
        Ok(Self {
            min_fill: min,
            max_fill: max,
            ..Self::default()
        })
    }

    /// Minimum number of entries per non-root node.
    pub fn min_fill(&self) -> usize {
        self.min_fill
    }

    /// Maximum number of entries per node.
    pub fn max_fill(&self) -> usize {
        self.max_fill
    }

    /// The root node, `None` when the tree is empty.
    pub fn root(&self) -> Option<&Node<T, I>> {
        self.root.as_ref()
    }

    /// Number of levels; 0 for an empty tree, 1 when the root is a leaf.
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.level() + 1)
    }

    /// Number of stored records.
    ///
    /// Walks the whole tree.
    pub fn size(&self) -> usize {
        self.root.as_ref().map_or(0, Node::size)
    }

    /// Whether the tree stores no records.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drop every record. The fan-out and identifier counter are kept.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Insert `region` with identifier `id`.
    pub fn add(&mut self, region: Region<T>, id: I) {
        let (min, max) = (self.min_fill, self.max_fill);
        let record = Entry::record(region, id);
        let Some(root) = self.root.as_mut() else {
            let mut leaf = Node::new(0, max + 1);
            leaf.add_entry(record);
            self.root = Some(leaf);
            return;
        };

        let path = root.choose_leaf(&region);
        let sibling = match root.descendant_mut(&path) {
            Some(leaf) if leaf.len() < max => {
                leaf.add_entry(record);
                None
            }
            Some(leaf) => Some(leaf.split(record, min, max)),
            None => {
                debug_assert!(false, "chosen leaf path left the tree");
                return;
            }
        };

        if let Some(partner) = Self::adjust_tree(root, &path, sibling, min, max) {
            self.grow_root(partner);
        }
    }

    /// Walk `path` back up from the leaf, tightening each parent around its child
    /// and absorbing the sibling produced by a split below, splitting in turn when
    /// the parent is full.
    ///
    /// Returns the root's split partner if the split propagated all the way up.
    fn adjust_tree(
        root: &mut Node<T, I>,
        path: &[usize],
        mut sibling: Option<Node<T, I>>,
        min: usize,
        max: usize,
    ) -> Option<Node<T, I>> {
        for depth in (1..=path.len()).rev() {
            let Some(parent) = root.descendant_mut(&path[..depth - 1]) else {
                debug_assert!(false, "adjust path left the tree");
                return None;
            };
            if let Some(child_region) = parent.child_region(path[depth - 1]) {
                parent.include(&child_region);
            }
            sibling = match sibling.take() {
                Some(split_off) if parent.len() < max => {
                    parent.add_entry(Entry::child(split_off));
                    None
                }
                Some(split_off) => Some(parent.split(Entry::child(split_off), min, max)),
                None => None,
            };
        }
        sibling
    }

    /// Put a new root above the current one and its split partner.
    fn grow_root(&mut self, partner: Node<T, I>) {
        let Some(old) = self.root.take() else {
            self.root = Some(partner);
            return;
        };
        let mut root = Node::new(old.level() + 1, self.max_fill + 1);
        root.add_entry(Entry::child(old));
        root.add_entry(Entry::child(partner));
        log::debug!("R-tree grew to height {}", root.level() + 1);
        self.root = Some(root);
    }

    /// Remove one record whose region equals `region`.
    ///
    /// Returns `false`, leaving the tree untouched, if no record matches exactly.
    /// Overlapping or containing regions do not count as matches.
    pub fn remove(&mut self, region: &Region<T>) -> bool {
        let min = self.min_fill;
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        let Some(mut path) = root.find_leaf(region) else {
            return false;
        };
        let Some(slot) = path.pop() else {
            return false;
        };
        let Some(leaf) = root.descendant_mut(&path) else {
            return false;
        };
        let _ = leaf.remove_entry(slot);

        let orphans = if path.is_empty() {
            root.adjust_region();
            Vec::new()
        } else {
            let (adjusted, orphans) = root.condense_tree(&path, min);
            root.adjust_region();
            log::debug!(
                "condensed {} under-full node(s), topmost adjusted depth {:?}",
                orphans.len(),
                adjusted
            );
            orphans
        };

        let mut records = Vec::new();
        for orphan in orphans {
            orphan.drain_records(&mut records);
        }
        for (r, id) in records {
            self.add(r, id);
        }

        self.collapse_root();
        true
    }

    /// Shorten the tree while the root is an interior node with a single child,
    /// and drop an empty root.
    fn collapse_root(&mut self) {
        loop {
            match self.root.take() {
                Some(root) if !root.is_leaf() && root.len() == 1 => {
                    self.root = root.into_single_child();
                    log::debug!("R-tree collapsed to height {}", self.height());
                }
                Some(root) if root.is_empty() => {
                    self.root = None;
                    return;
                }
                other => {
                    self.root = other;
                    return;
                }
            }
        }
    }

    /// Lazy range query over `target`.
    ///
    /// Subtrees wholly inside `target` come back as [`RangeItem::Subtree`](crate::RangeItem::Subtree)
    /// without visiting their records; other overlapping records come back one by one.
    pub fn range(&self, target: Region<T>) -> Range<'_, T, I> {
        Range::new(self.root.as_ref(), target)
    }

    /// Lazy range query reporting every overlapping record individually.
    pub fn range_records(&self, target: Region<T>) -> RangeRecords<'_, T, I> {
        self.range(target).records()
    }

    /// Records in leaf order.
    pub fn iter(&self) -> LeafOrder<'_, T, I> {
        LeafOrder::new(self.root.as_ref())
    }
}

impl<T: Scalar, I: Copy> RTree<T, I> {
    /// Find a record whose region equals `region`.
    ///
    /// Only descends into subtrees containing `region`. With duplicates, the
    /// first one found is returned.
    pub fn search(&self, region: &Region<T>) -> Option<(Region<T>, I)> {
        let (r, id) = self.root.as_ref()?.search(region)?;
        Some((*r, *id))
    }
}

impl<T: Scalar, I: From<u64>> RTree<T, I> {
    /// Insert `region` with the next identifier from this tree's counter.
    ///
    /// Identifiers start at 1 and increase by one per call.
    pub fn add_auto(&mut self, region: Region<T>) -> I
    where
        I: Copy,
    {
        let id = I::from(self.next_id);
        self.next_id += 1;
        self.add(region, id);
        id
    }
}

impl<'a, T: Scalar, I: Copy> IntoIterator for &'a RTree<T, I> {
    type Item = (Region<T>, I);
    type IntoIter = LeafOrder<'a, T, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Scalar + fmt::Display, I: Debug> fmt::Display for RTree<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{root}"),
            None => f.write_str("[]"),
        }
    }
}

impl<T: Scalar, I> Debug for RTree<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RTree")
            .field("min_fill", &self.min_fill)
            .field("max_fill", &self.max_fill)
            .field("height", &self.height())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

// Convenience type aliases.

/// R-tree with i64 coordinates and i128 metrics.
pub type RTreeI64<I> = RTree<i64, I>;

/// R-tree with f32 coordinates and f64 metrics.
pub type RTreeF32<I> = RTree<f32, I>;

/// R-tree with f64 coordinates and f64 metrics.
pub type RTreeF64<I> = RTree<f64, I>;
