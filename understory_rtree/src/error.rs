// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported when configuring a tree.

/// Rejected fan-out parameters passed to [`RTree::with_fanout`](crate::RTree::with_fanout).
///
/// The split algorithm can only leave both halves at least `min` entries full when
/// `2 <= min <= max / 2`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FanoutError {
    /// The minimum fill is below 2.
    #[error("minimum fill {min} must be at least 2")]
    MinTooSmall {
        /// Requested minimum fill.
        min: usize,
    },
    /// The minimum fill exceeds half of the maximum fill.
    #[error("minimum fill {min} exceeds half of maximum fill {max}")]
    MinTooLarge {
        /// Requested minimum fill.
        min: usize,
        /// Requested maximum fill.
        max: usize,
    },
}
