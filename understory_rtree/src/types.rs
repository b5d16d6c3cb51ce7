// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt;
use core::fmt::Debug;

/// Axis-aligned rectangular region in 2D.
///
/// Regions are normalized at construction: whatever order the corners are given in,
/// `min_x <= max_x` and `min_y <= max_y` hold afterwards. Equality is structural.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region<T> {
    min_x: T,
    min_y: T,
    max_x: T,
    max_y: T,
}

impl<T: Copy + PartialOrd> Region<T> {
    /// Create a region spanning the two corner points `(x0, y0)` and `(x1, y1)`.
    ///
    /// The corners may be given in any order.
    pub fn new(x0: T, y0: T, x1: T, y1: T) -> Self {
        Self {
            min_x: min_t(x0, x1),
            min_y: min_t(y0, y1),
            max_x: max_t(x0, x1),
            max_y: max_t(y0, y1),
        }
    }

    /// Degenerate region covering a single point.
    pub const fn from_point(x: T, y: T) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Minimum x (left).
    pub const fn min_x(&self) -> T {
        self.min_x
    }

    /// Minimum y (top).
    pub const fn min_y(&self) -> T {
        self.min_y
    }

    /// Maximum x (right).
    pub const fn max_x(&self) -> T {
        self.max_x
    }

    /// Maximum y (bottom).
    pub const fn max_y(&self) -> T {
        self.max_y
    }

    /// Smallest region containing both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: min_t(self.min_x, other.min_x),
            min_y: min_t(self.min_y, other.min_y),
            max_x: max_t(self.max_x, other.max_x),
            max_y: max_t(self.max_y, other.max_y),
        }
    }

    /// Smallest region containing both `self` and the point.
    pub fn union_point(&self, x: T, y: T) -> Self {
        Self {
            min_x: min_t(self.min_x, x),
            min_y: min_t(self.min_y, y),
            max_x: max_t(self.max_x, x),
            max_y: max_t(self.max_y, y),
        }
    }

    /// Whether the two regions share any point. Touching edges count as overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        le(other.min_x, self.max_x)
            && le(self.min_x, other.max_x)
            && le(other.min_y, self.max_y)
            && le(self.min_y, other.max_y)
    }

    /// The region shared by both, or `None` if they are disjoint.
    ///
    /// Touching regions produce a degenerate line or point region.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            min_x: max_t(self.min_x, other.min_x),
            min_y: max_t(self.min_y, other.min_y),
            max_x: min_t(self.max_x, other.max_x),
            max_y: min_t(self.max_y, other.max_y),
        })
    }

    /// Whether `other` lies entirely within this region (boundaries inclusive).
    pub fn contains_region(&self, other: &Self) -> bool {
        le(self.min_x, other.min_x)
            && le(self.min_y, other.min_y)
            && le(other.max_x, self.max_x)
            && le(other.max_y, self.max_y)
    }

    /// Whether this region contains the point (boundaries inclusive).
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.min_x, x) && le(self.min_y, y) && le(x, self.max_x) && le(y, self.max_y)
    }
}

impl<T: Scalar> Region<T> {
    /// Width of the region.
    pub fn width(&self) -> T {
        T::sub(self.max_x, self.min_x)
    }

    /// Height of the region.
    pub fn height(&self) -> T {
        T::sub(self.max_y, self.min_y)
    }

    /// Area of the region in the scalar's widened accumulator type.
    #[inline]
    pub fn area(&self) -> T::Acc {
        let w = T::max_zero(self.width());
        let h = T::max_zero(self.height());
        T::widen(w) * T::widen(h)
    }
}

impl Region<f32> {
    /// Create a region from origin and size in f32.
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(x, y, x + w, y + h)
    }
}

impl Region<f64> {
    /// Create a region from origin and size in f64.
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x, y, x + w, y + h)
    }
}

impl Region<i64> {
    /// Create a region from origin and size in i64.
    pub fn from_xywh(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self::new(x, y, x.saturating_add(w), y.saturating_add(h))
    }
}

impl<T: fmt::Display> fmt::Display for Region<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{} , {},{})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// Numeric scalar abstraction for regions stored in the tree.
///
/// Provides the operations needed for area metrics, with an associated widened
/// accumulator type for area (e.g., f32→f64, i64→i128).
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type suitable for area/cost computations.
    type Acc: Copy
        + PartialOrd
        + core::ops::Add<Output = Self::Acc>
        + core::ops::Sub<Output = Self::Acc>
        + core::ops::Mul<Output = Self::Acc>
        + Debug;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Max of the scalar value and zero.
    fn max_zero(v: Self) -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0)
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i128
    }
}

/// Helper alias for the widened accumulator type associated with a scalar `T`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

/// Area of the union of two regions.
#[inline]
pub(crate) fn union_area<T: Scalar>(a: &Region<T>, b: &Region<T>) -> T::Acc {
    a.union(b).area()
}

/// Union of an optional running bound with another region.
#[inline]
pub(crate) fn grow<T: Copy + PartialOrd>(acc: Option<Region<T>>, r: &Region<T>) -> Region<T> {
    match acc {
        Some(a) => a.union(r),
        None => *r,
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

#[cfg(feature = "kurbo")]
mod kurbo_interop {
    use super::Region;

    impl From<kurbo::Rect> for Region<f64> {
        fn from(r: kurbo::Rect) -> Self {
            Self::new(r.x0, r.y0, r.x1, r.y1)
        }
    }

    impl From<Region<f64>> for kurbo::Rect {
        fn from(r: Region<f64>) -> Self {
            Self::new(r.min_x, r.min_y, r.max_x, r.max_y)
        }
    }

    impl Region<f64> {
        /// Whether this region contains the Kurbo point (boundaries inclusive).
        pub fn contains(&self, pt: kurbo::Point) -> bool {
            self.contains_point(pt.x, pt.y)
        }
    }
}
