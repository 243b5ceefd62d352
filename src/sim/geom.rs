//! Axis-aligned geometry primitives
//!
//! Everything in the collision code reduces to 1-D interval tests. A 2-D
//! contact is approved by combining an x test with a y test, so the
//! interval type carries both closed and half-open membership.

use serde::{Deserialize, Serialize};

/// A 1-D interval from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: f32,
    pub end: f32,
}

impl Span {
    pub fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Closed membership: `start <= v <= end`
    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.start && v <= self.end
    }

    /// Half-open membership: `start <= v < end`
    #[inline]
    pub fn contains_half_open(&self, v: f32) -> bool {
        v >= self.start && v < self.end
    }

    /// Shift both ends by `d`
    #[inline]
    pub fn shifted(&self, d: f32) -> Self {
        Self::new(self.start + d, self.end + d)
    }
}

/// Closed interval overlap.
///
/// Two intervals intersect iff at least one of them starts inside the
/// other, so checking both starts is a complete test.
#[inline]
pub fn overlaps(a: Span, b: Span) -> bool {
    a.contains(b.start) || b.contains(a.start)
}

/// Half-open interval overlap; touching ends do not count
#[inline]
pub fn overlaps_half_open(a: Span, b: Span) -> bool {
    a.contains_half_open(b.start) || b.contains_half_open(a.start)
}

/// An axis-aligned rectangle, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn x_span(&self) -> Span {
        Span::new(self.left(), self.right())
    }

    #[inline]
    pub fn y_span(&self) -> Span {
        Span::new(self.top(), self.bottom())
    }

    /// Zero, negative or non-finite extents. Such a rect never reports contact.
    pub fn is_degenerate(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
            || !self.x.is_finite()
            || !self.y.is_finite()
            || !self.w.is_finite()
            || !self.h.is_finite()
    }
}
