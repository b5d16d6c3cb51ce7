// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy traversals: leaf-order iteration and range queries.
//!
//! Both iterators walk the tree with an explicit stack of `(node, next entry)`
//! frames, so they do no work beyond what the consumer pulls and can be dropped
//! part way through.

use alloc::vec::Vec;
use core::fmt;

use crate::node::{Entry, Node};
use crate::types::{Region, Scalar};

type Frame<'a, T, I> = (&'a Node<T, I>, usize);

/// Leaf-order iterator over `(region, id)` records.
///
/// Returned by [`RTree::iter`](crate::RTree::iter) and [`Node::leaf_order`].
pub struct LeafOrder<'a, T: Scalar, I> {
    stack: Vec<Frame<'a, T, I>>,
}

impl<'a, T: Scalar, I> LeafOrder<'a, T, I> {
    pub(crate) fn new(root: Option<&'a Node<T, I>>) -> Self {
        Self {
            stack: root.into_iter().map(|n| (n, 0)).collect(),
        }
    }
}

impl<T: Scalar, I: Copy> Iterator for LeafOrder<'_, T, I> {
    type Item = (Region<T>, I);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let node = frame.0;
            let Some(entry) = node.entries().get(frame.1) else {
                self.stack.pop();
                continue;
            };
            frame.1 += 1;
            match entry {
                Entry::Record { region, id } => return Some((*region, *id)),
                Entry::Child(child) => self.stack.push((&**child, 0)),
            }
        }
    }
}

impl<T: Scalar, I> fmt::Debug for LeafOrder<'_, T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafOrder")
            .field("depth", &self.stack.len())
            .finish_non_exhaustive()
    }
}

/// One result of a range query.
#[derive(Debug)]
pub enum RangeItem<'a, T: Scalar, I> {
    /// A whole subtree lying inside the query region.
    ///
    /// Its records are not reported individually; enumerate them with
    /// [`Node::leaf_order`] if needed.
    Subtree(&'a Node<T, I>),
    /// A single record overlapping the query region.
    Record(Region<T>, I),
}

impl<T: Scalar, I> RangeItem<'_, T, I> {
    /// Whether this item stands for a full subtree.
    pub fn is_full_subtree(&self) -> bool {
        matches!(self, Self::Subtree(_))
    }
}

/// Lazy range query, returned by [`RTree::range`](crate::RTree::range).
///
/// Yields [`RangeItem::Subtree`] for each maximal subtree wholly contained in the
/// target and [`RangeItem::Record`] for records overlapping it elsewhere.
pub struct Range<'a, T: Scalar, I> {
    target: Region<T>,
    root: Option<&'a Node<T, I>>,
    stack: Vec<Frame<'a, T, I>>,
}

impl<'a, T: Scalar, I> Range<'a, T, I> {
    pub(crate) fn new(root: Option<&'a Node<T, I>>, target: Region<T>) -> Self {
        Self {
            target,
            root,
            stack: Vec::new(),
        }
    }

    /// Expand subtrees so that every overlapping record is reported individually.
    pub fn records(self) -> RangeRecords<'a, T, I> {
        RangeRecords {
            range: self,
            expanding: None,
        }
    }
}

impl<'a, T: Scalar, I: Copy> Iterator for Range<'a, T, I> {
    type Item = RangeItem<'a, T, I>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            let bounds = root.region()?;
            if self.target.contains_region(&bounds) {
                return Some(RangeItem::Subtree(root));
            }
            self.stack.push((root, 0));
        }
        loop {
            let frame = self.stack.last_mut()?;
            let node = frame.0;
            let Some(entry) = node.entries().get(frame.1) else {
                self.stack.pop();
                continue;
            };
            frame.1 += 1;
            match entry {
                Entry::Record { region, id } => {
                    if self.target.overlaps(region) {
                        return Some(RangeItem::Record(*region, *id));
                    }
                }
                Entry::Child(child) => {
                    let Some(bounds) = child.region() else {
                        continue;
                    };
                    if !self.target.overlaps(&bounds) {
                        continue;
                    }
                    if self.target.contains_region(&bounds) {
                        return Some(RangeItem::Subtree(&**child));
                    }
                    self.stack.push((&**child, 0));
                }
            }
        }
    }
}

impl<T: Scalar, I> fmt::Debug for Range<'_, T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Range")
            .field("target", &self.target)
            .field("depth", &self.stack.len())
            .finish_non_exhaustive()
    }
}

/// Range query with subtrees expanded into their records.
///
/// Returned by [`Range::records`] and [`RTree::range_records`](crate::RTree::range_records).
pub struct RangeRecords<'a, T: Scalar, I> {
    range: Range<'a, T, I>,
    expanding: Option<LeafOrder<'a, T, I>>,
}

impl<T: Scalar, I: Copy> Iterator for RangeRecords<'_, T, I> {
    type Item = (Region<T>, I);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(leaves) = &mut self.expanding {
                if let Some(record) = leaves.next() {
                    return Some(record);
                }
                self.expanding = None;
            }
            match self.range.next()? {
                RangeItem::Record(region, id) => return Some((region, id)),
                RangeItem::Subtree(node) => self.expanding = Some(node.leaf_order()),
            }
        }
    }
}

impl<T: Scalar, I> fmt::Debug for RangeRecords<'_, T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeRecords")
            .field("range", &self.range)
            .field("expanding", &self.expanding.is_some())
            .finish()
    }
}
