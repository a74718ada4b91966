//! Basic 2D types and tolerances shared by the geometry kernel.
//!
//! - `Vec2`: double-precision point/vector (nalgebra column vector).
//! - `EPS`: the fuzzy-equality epsilon used by every predicate.
//! - `Interval`: closed 1D interval with intersection and subtraction, used when
//!   projecting facing edges onto a shared axis.
//!
//! Code cross-refs: `segment::{Segment, Line}`, `convex::ConvexPolygon`

use nalgebra::Vector2;

/// 2D point or displacement.
pub type Vec2 = Vector2<f64>;

/// Default fuzzy-equality tolerance for coordinates.
///
/// Scales in this crate are metres with O(1..100) extents; 1e-9 keeps boundary
/// tests stable after repeated growth steps.
pub const EPS: f64 = 1e-9;

#[inline]
pub fn fuzzy_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS
}

/// Component-wise fuzzy equality of two points.
#[inline]
pub fn fuzzy_eq_vec(a: Vec2, b: Vec2) -> bool {
    fuzzy_eq(a.x, b.x) && fuzzy_eq(a.y, b.y)
}

/// z-component of the 3D cross product `a × b`.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Orientation of the triple (a, b, c): > 0 counterclockwise, < 0 clockwise.
#[inline]
pub fn orient(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    cross(b - a, c - a)
}

/// Left normal of `v` (rotated 90° counterclockwise), same magnitude.
#[inline]
pub fn normal(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Angle of `v` w.r.t. the positive x axis, in (-π, π].
#[inline]
pub fn angle(v: Vec2) -> f64 {
    v.y.atan2(v.x)
}

/// Unsigned angle between two vectors in [0, π]. NaN if either is zero.
#[inline]
pub fn angle_between(a: Vec2, b: Vec2) -> f64 {
    let denom = a.norm() * b.norm();
    (a.dot(&b) / denom).clamp(-1.0, 1.0).acos()
}

/// Vector with the direction of `v` and the given magnitude. Zero stays zero.
#[inline]
pub fn resized(v: Vec2, magnitude: f64) -> Vec2 {
    let n = v.norm();
    if n <= EPS {
        v
    } else {
        v * (magnitude / n)
    }
}

/// Coordinate axis, used for axis-aligned projections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn component(self, p: Vec2) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    #[inline]
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Point whose `self` component is `along` and whose other component is `across`.
    #[inline]
    pub fn point(self, along: f64, across: f64) -> Vec2 {
        match self {
            Axis::X => Vec2::new(along, across),
            Axis::Y => Vec2::new(across, along),
        }
    }
}

/// Closed interval `[lo, hi]` on the real line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

impl Interval {
    /// Build from two bounds in any order.
    #[inline]
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.hi - self.lo
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.length() <= EPS
    }

    /// Overlap with `other`; `None` if they are disjoint (touching yields a degenerate interval).
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        let lo = self.lo.max(other.lo);
        let hi = self.hi.min(other.hi);
        if lo > hi + EPS {
            None
        } else {
            Some(Interval { lo, hi: hi.max(lo) })
        }
    }

    /// `self \ other` as up to two disjoint pieces (closed; endpoints shared with `other` kept).
    pub fn subtract(&self, other: &Interval) -> Vec<Interval> {
        if other.hi <= self.lo + EPS || other.lo >= self.hi - EPS {
            return vec![*self];
        }
        let mut out = Vec::with_capacity(2);
        if other.lo > self.lo + EPS {
            out.push(Interval {
                lo: self.lo,
                hi: other.lo,
            });
        }
        if other.hi < self.hi - EPS {
            out.push(Interval {
                lo: other.hi,
                hi: self.hi,
            });
        }
        out
    }

    /// Subtract every interval in `cuts`, keeping the remaining pieces in order.
    pub fn subtract_all<'a, I>(&self, cuts: I) -> Vec<Interval>
    where
        I: IntoIterator<Item = &'a Interval>,
    {
        let mut pieces = vec![*self];
        for cut in cuts {
            pieces = pieces.iter().flat_map(|p| p.subtract(cut)).collect();
        }
        pieces
    }
}
