// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-window example: index a long list of rows and query the viewport.
//!
//! Run:
//! - `cargo run -p understory_rtree_demos --example rtree_visible_rows`

use kurbo::Rect;
use understory_rtree::{RTree, RangeItem, Region};

const ROW_H: f64 = 20.0;
const WIDTH: f64 = 200.0;

fn main() {
    let mut tree: RTree<f64, usize> = RTree::with_fanout(4, 8).expect("valid fan-out");
    let rows = 1000_usize;
    for i in 0..rows {
        let y0 = i as f64 * ROW_H;
        tree.add(Rect::new(0.0, y0, WIDTH, y0 + ROW_H).into(), i);
    }
    println!("{} rows, tree height {}", tree.size(), tree.height());

    // Simulate a few scroll positions by changing the viewport rectangle.
    for scroll in [0.0, 30.0, 200.0, 600.0] {
        let viewport = Region::from(Rect::new(0.0, scroll, WIDTH, scroll + 100.0));
        let mut visible: Vec<_> = tree.range_records(viewport).map(|(_, i)| i).collect();
        visible.sort_unstable();
        println!("scroll={scroll:.1} -> visible indices: {:?}", visible);
    }

    // A viewport covering whole subtrees reports them without visiting their rows.
    let viewport = Region::from(Rect::new(-1.0, -1.0, WIDTH + 1.0, 4000.0));
    let (mut subtrees, mut records) = (0, 0);
    for item in tree.range(viewport) {
        match item {
            RangeItem::Subtree(node) => {
                subtrees += 1;
                records += node.size();
            }
            RangeItem::Record(..) => records += 1,
        }
    }
    println!("tall viewport: {records} rows in {subtrees} full subtrees plus loose records");
}
