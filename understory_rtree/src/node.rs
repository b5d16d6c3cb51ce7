// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R-tree nodes: bounded entry lists with a cached bounding region.
//!
//! A node at level 0 is a leaf and holds records (a region plus its identifier).
//! A node at a higher level holds owned child nodes exactly one level below it.
//! Nodes never point back at their parents; structural operations carry the path
//! they descended along as a list of child positions starting at the root.
//!
//! Splitting follows Guttman's quadratic algorithm:
//!
//! - `pick_seeds` takes the pair wasting the most area when grouped,
//!   `area(J) - area(E1) - area(E2)` where `J` covers both.
//! - Remaining entries go, in order, to the group whose covering region would
//!   have the smaller area after absorbing them. Ties go to the group with the
//!   smaller area, then the one with fewer entries, then the new sibling.
//! - As soon as one group needs every remaining entry to reach the minimum fill,
//!   it takes them all.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::mem;

use crate::iter::LeafOrder;
use crate::types::{Region, Scalar, grow, union_area};

/// One slot of a [`Node`].
pub(crate) enum Entry<T: Scalar, I> {
    /// A stored rectangle and its identifier (leaf level only).
    Record { region: Region<T>, id: I },
    /// An owned child one level below (interior levels only).
    Child(Box<Node<T, I>>),
}

impl<T: Scalar, I> Entry<T, I> {
    pub(crate) fn record(region: Region<T>, id: I) -> Self {
        Self::Record { region, id }
    }

    pub(crate) fn child(node: Node<T, I>) -> Self {
        Self::Child(Box::new(node))
    }

    /// Bounding region of the entry, `None` for an empty child.
    ///
    /// Children attached to a tree are never empty; callers skip one if it shows up.
    pub(crate) fn region(&self) -> Option<Region<T>> {
        match self {
            Self::Record { region, .. } => Some(*region),
            Self::Child(node) => node.region,
        }
    }
}

/// A node of the R-tree.
///
/// Nodes are only reachable through a tree; they are exposed by
/// [`RTree::root`](crate::RTree::root) and by range queries reporting whole
/// subtrees (see [`RangeItem::Subtree`](crate::RangeItem::Subtree)).
pub struct Node<T: Scalar, I> {
    region: Option<Region<T>>,
    level: usize,
    entries: Vec<Entry<T, I>>,
}

impl<T: Scalar, I> Node<T, I> {
    /// Empty node at `level`, with room for `capacity` entries.
    pub(crate) fn new(level: usize, capacity: usize) -> Self {
        Self {
            region: None,
            level,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Tight bound over all entries, `None` if the node is empty.
    pub fn region(&self) -> Option<Region<T>> {
        self.region
    }

    /// Height above the leaves; leaves are level 0.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Whether this node stores records rather than children.
    pub fn is_leaf(&self) -> bool {
        self.level == 0
    }

    /// Number of occupied entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the node has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records stored in this subtree.
    pub fn size(&self) -> usize {
        if self.is_leaf() {
            return self.entries.len();
        }
        self.entries
            .iter()
            .map(|e| match e {
                Entry::Child(child) => child.size(),
                Entry::Record { .. } => 1,
            })
            .sum()
    }

    /// Records of this subtree in leaf order.
    pub fn leaf_order(&self) -> LeafOrder<'_, T, I> {
        LeafOrder::new(Some(self))
    }

    pub(crate) fn entries(&self) -> &[Entry<T, I>] {
        &self.entries
    }

    /// Append an entry and grow the cached region to cover it.
    ///
    /// Callers check capacity first.
    pub(crate) fn add_entry(&mut self, entry: Entry<T, I>) {
        if let Some(r) = entry.region() {
            self.include(&r);
        }
        self.entries.push(entry);
    }

    /// Swap-remove the entry at `idx`. The region is left as is; see [`Self::adjust_region`].
    pub(crate) fn remove_entry(&mut self, idx: usize) -> Entry<T, I> {
        self.entries.swap_remove(idx)
    }

    /// Grow the cached region to include `r`.
    pub(crate) fn include(&mut self, r: &Region<T>) {
        self.region = Some(grow(self.region, r));
    }

    /// Recompute the region from the current entries.
    pub(crate) fn adjust_region(&mut self) {
        self.region = self
            .entries
            .iter()
            .filter_map(Entry::region)
            .fold(None, |acc, r| Some(grow(acc, &r)));
    }

    /// Region of the child at `idx`, if that slot holds a child.
    pub(crate) fn child_region(&self, idx: usize) -> Option<Region<T>> {
        match self.entries.get(idx)? {
            Entry::Child(child) => child.region,
            Entry::Record { .. } => None,
        }
    }

    /// Follow `path` (child positions) down from this node.
    pub(crate) fn descendant_mut(&mut self, path: &[usize]) -> Option<&mut Self> {
        let mut node = self;
        for &idx in path {
            node = match node.entries.get_mut(idx)? {
                Entry::Child(child) => &mut **child,
                Entry::Record { .. } => return None,
            };
        }
        Some(node)
    }

    /// Replace an interior node holding a single child by that child.
    pub(crate) fn into_single_child(mut self) -> Option<Self> {
        debug_assert_eq!(self.entries.len(), 1, "collapsing a node with siblings");
        match self.entries.pop()? {
            Entry::Child(child) => Some(*child),
            Entry::Record { .. } => None,
        }
    }

    /// Move every record of this subtree into `out`, in leaf order.
    pub(crate) fn drain_records(self, out: &mut Vec<(Region<T>, I)>) {
        for entry in self.entries {
            match entry {
                Entry::Record { region, id } => out.push((region, id)),
                Entry::Child(child) => (*child).drain_records(out),
            }
        }
    }

    /// Descend from this node to the leaf best suited to receive `rect`.
    ///
    /// At each level picks the child whose region has the smallest area after
    /// absorbing `rect`, preferring the child with the smaller current area on ties.
    /// Returns the child positions taken, so an empty path means this node is the leaf.
    pub(crate) fn choose_leaf(&self, rect: &Region<T>) -> Vec<usize> {
        let mut path = Vec::new();
        let mut node = self;
        while !node.is_leaf() {
            let Some(idx) = node.choose_subtree(rect) else {
                break;
            };
            path.push(idx);
            match &node.entries[idx] {
                Entry::Child(child) => node = &**child,
                Entry::Record { .. } => break,
            }
        }
        path
    }

    fn choose_subtree(&self, rect: &Region<T>) -> Option<usize> {
        let mut best: Option<(usize, T::Acc, T::Acc)> = None;
        for (i, entry) in self.entries.iter().enumerate() {
            let Some(r) = entry.region() else {
                continue;
            };
            let cost = union_area(&r, rect);
            let area = r.area();
            let better = match best {
                None => true,
                Some((_, best_cost, best_area)) => {
                    cost < best_cost || (cost == best_cost && area < best_area)
                }
            };
            if better {
                best = Some((i, cost, area));
            }
        }
        best.map(|(i, _, _)| i)
    }

    /// Locate a record equal to `rect`.
    ///
    /// Only descends into children whose region contains `rect`. Returns the child
    /// positions from this node to the owning leaf, followed by the record's
    /// position in that leaf. The first match in scan order wins.
    pub(crate) fn find_leaf(&self, rect: &Region<T>) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        self.find_leaf_into(rect, &mut path).then_some(path)
    }

    fn find_leaf_into(&self, rect: &Region<T>, path: &mut Vec<usize>) -> bool {
        if self.is_leaf() {
            let found = self.entries.iter().position(
                |e| matches!(e, Entry::Record { region, .. } if region == rect),
            );
            if let Some(idx) = found {
                path.push(idx);
                return true;
            }
            return false;
        }
        if !self.region.is_some_and(|r| r.contains_region(rect)) {
            return false;
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if let Entry::Child(child) = entry
                && child.region.is_some_and(|r| r.contains_region(rect))
            {
                path.push(i);
                if child.find_leaf_into(rect, path) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }

    /// First record equal to `rect`, found by containment-guided descent.
    pub(crate) fn search(&self, rect: &Region<T>) -> Option<(&Region<T>, &I)> {
        if self.is_leaf() {
            return self.entries.iter().find_map(|e| match e {
                Entry::Record { region, id } if region == rect => Some((region, id)),
                _ => None,
            });
        }
        if !self.region.is_some_and(|r| r.contains_region(rect)) {
            return None;
        }
        self.entries.iter().find_map(|e| match e {
            Entry::Child(child) if child.region.is_some_and(|r| r.contains_region(rect)) => {
                child.search(rect)
            }
            _ => None,
        })
    }

    /// Split an overfull node.
    ///
    /// `self` holds `max` entries and `extra` is the one that does not fit. The
    /// `max + 1` entries are divided between `self` and a new sibling at the same
    /// level, each ending with between `min` and `max` entries. Returns the sibling.
    pub(crate) fn split(&mut self, extra: Entry<T, I>, min: usize, max: usize) -> Self {
        let mut pool = mem::replace(&mut self.entries, Vec::with_capacity(max + 1));
        pool.push(extra);
        self.region = None;

        let (first, second) = pick_seeds(&pool);
        let seed_b = pool.remove(second);
        let seed_a = pool.remove(first);
        self.add_entry(seed_a);
        let mut sibling = Self::new(self.level, max + 1);
        sibling.add_entry(seed_b);

        let mut pool = pool.into_iter();
        loop {
            let remaining = pool.len();
            if remaining == 0 {
                break;
            }
            if self.len() + remaining <= min {
                pool.by_ref().for_each(|e| self.add_entry(e));
                break;
            }
            if sibling.len() + remaining <= min {
                pool.by_ref().for_each(|e| sibling.add_entry(e));
                break;
            }
            if let Some(entry) = pool.next() {
                self.pick_next(&mut sibling, entry);
            }
        }

        log::trace!(
            "split level {} node into {} + {} entries",
            self.level,
            self.len(),
            sibling.len()
        );
        sibling
    }

    /// Assign `entry` to whichever of `self` and `sibling` it enlarges least.
    fn pick_next(&mut self, sibling: &mut Self, entry: Entry<T, I>) {
        let Some(r) = entry.region() else {
            // Enlarges neither group.
            if self.len() < sibling.len() {
                self.add_entry(entry);
            } else {
                sibling.add_entry(entry);
            }
            return;
        };
        let d1 = grow(self.region, &r).area();
        let d2 = grow(sibling.region, &r).area();
        if d1 < d2 {
            self.add_entry(entry);
        } else if d2 < d1 {
            sibling.add_entry(entry);
        } else {
            let own_area = self.region.map(|r| r.area());
            let sibling_area = sibling.region.map(|r| r.area());
            if own_area < sibling_area {
                self.add_entry(entry);
            } else if sibling_area < own_area {
                sibling.add_entry(entry);
            } else if self.len() < sibling.len() {
                self.add_entry(entry);
            } else {
                sibling.add_entry(entry);
            }
        }
    }

    /// Eliminate under-full nodes along `path` after a record was removed from the
    /// leaf at its end.
    ///
    /// `self` is the root and `path` holds child positions from the root to that
    /// leaf. Walking upward, every node left with fewer than `min` entries is
    /// detached from its parent and collected; every other node has its region
    /// tightened. The root itself is left to the caller.
    ///
    /// Returns the depth of the topmost tightened node (if any survived) and the
    /// detached subtrees in leaf-to-root order.
    pub(crate) fn condense_tree(&mut self, path: &[usize], min: usize) -> (Option<usize>, Vec<Self>) {
        let mut orphans = Vec::new();
        let mut adjusted = None;
        for depth in (1..=path.len()).rev() {
            let Some(parent) = self.descendant_mut(&path[..depth - 1]) else {
                debug_assert!(false, "condense path left the tree");
                break;
            };
            let idx = path[depth - 1];
            let under_full = match parent.entries.get_mut(idx) {
                Some(Entry::Child(child)) if child.len() < min => true,
                Some(Entry::Child(child)) => {
                    child.adjust_region();
                    false
                }
                _ => {
                    debug_assert!(false, "condense path points at a record");
                    break;
                }
            };
            if under_full {
                if let Entry::Child(child) = parent.remove_entry(idx) {
                    orphans.push(*child);
                }
            } else {
                adjusted = Some(depth);
            }
        }
        (adjusted, orphans)
    }
}

/// Pick the two entries that waste the most area when grouped together.
///
/// The first maximal pair in scan order wins. Returns positions `(i, j)` with `i < j`.
fn pick_seeds<T: Scalar, I>(entries: &[Entry<T, I>]) -> (usize, usize) {
    let mut best: Option<(T::Acc, usize, usize)> = None;
    for (i, a) in entries.iter().enumerate() {
        let Some(ra) = a.region() else {
            continue;
        };
        let area_a = ra.area();
        for (j, b) in entries.iter().enumerate().skip(i + 1) {
            let Some(rb) = b.region() else {
                continue;
            };
            let waste = union_area(&ra, &rb) - area_a - rb.area();
            if best.as_ref().is_none_or(|(w, _, _)| waste > *w) {
                best = Some((waste, i, j));
            }
        }
    }
    best.map(|(_, i, j)| (i, j)).unwrap_or((0, 1))
}

impl<T: Scalar + fmt::Display, I: fmt::Debug> fmt::Display for Node<T, I> {
    /// Linear rendering: `(L<level>:<region>: <entries>)`, records as `<id>:<region>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(L{}:", self.level)?;
        if let Some(r) = &self.region {
            write!(f, "{r}")?;
        }
        f.write_str(":")?;
        for entry in &self.entries {
            match entry {
                Entry::Record { region, id } => write!(f, " {id:?}:{region}")?,
                Entry::Child(child) => write!(f, " {child}")?,
            }
        }
        f.write_str(")")
    }
}

impl<T: Scalar, I> fmt::Debug for Node<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("region", &self.region)
            .field("level", &self.level)
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}
