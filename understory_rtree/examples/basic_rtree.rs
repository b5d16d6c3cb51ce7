// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory R-tree: add, search, range query, and remove.

use understory_rtree::{RTree, Region};

fn main() {
    let mut tree: RTree<i64, u32> = RTree::new();
    tree.add(Region::new(10, 20, 50, 60), 99);
    tree.add(Region::new(30, 60, 70, 80), 101);
    tree.add(Region::new(-30, 60, 70, 80), 103);
    tree.add(Region::new(40, 70, 60, 100), 105);
    tree.add(Region::new(10, 60, 0, 90), 107);
    println!("tree: {tree}");

    // Exact search
    println!("search: {:?}", tree.search(&Region::new(40, 70, 60, 100)));

    // Query a window
    let hits: Vec<_> = tree.range_records(Region::new(0, 50, 20, 70)).collect();
    println!("hits in window: {:?}", hits);

    // Remove and show the condensed tree
    let removed = tree.remove(&Region::new(10, 20, 50, 60));
    println!("removed: {removed}, size: {}, tree: {tree}", tree.size());
}
