//! Segments, infinite lines, and their intersections.
//!
//! Every intersection routine returns the four-way `Intersection` value so that
//! callers can tell "no intersection" apart from "infinitely many points".
//!
//! Conventions
//! - Segments are immutable values; derived properties are recomputed on demand.
//! - Degenerate segments (zero length) are legal, but `to_line` and
//!   `is_parallel_to` panic on them: asking for the direction of a point is a
//!   caller bug.

use super::types::{cross, fuzzy_eq, fuzzy_eq_vec, Axis, Interval, Vec2, EPS};

/// Result of intersecting two geometric entities.
#[derive(Clone, Debug, PartialEq)]
pub enum Intersection {
    Empty,
    Point(Vec2),
    /// Finitely many points (e.g. a line crossing a circle twice).
    Points(Vec<Vec2>),
    /// Coincident lines or segments sharing more than one point.
    Infinite,
}

impl Intersection {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Intersection::Empty)
    }

    /// The single point, if this is a one-point intersection.
    #[inline]
    pub fn point(&self) -> Option<Vec2> {
        match self {
            Intersection::Point(p) => Some(*p),
            _ => None,
        }
    }

    /// Finite points of the intersection (empty for `Empty` and `Infinite`).
    pub fn points(&self) -> Vec<Vec2> {
        match self {
            Intersection::Point(p) => vec![*p],
            Intersection::Points(ps) => ps.clone(),
            Intersection::Empty | Intersection::Infinite => Vec::new(),
        }
    }

    fn from_points(mut points: Vec<Vec2>) -> Self {
        points.dedup_by(|a, b| fuzzy_eq_vec(*a, *b));
        match points.len() {
            0 => Intersection::Empty,
            1 => Intersection::Point(points[0]),
            _ => Intersection::Points(points),
        }
    }
}

/// Closed segment between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub first: Vec2,
    pub second: Vec2,
}

impl Segment {
    #[inline]
    pub fn new(first: Vec2, second: Vec2) -> Self {
        Self { first, second }
    }

    /// `second - first`.
    #[inline]
    pub fn vector(&self) -> Vec2 {
        self.second - self.first
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.first + self.second) * 0.5
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        fuzzy_eq_vec(self.first, self.second)
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        fuzzy_eq(self.first.y, self.second.y)
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        fuzzy_eq(self.first.x, self.second.x)
    }

    #[inline]
    pub fn is_axis_aligned(&self) -> bool {
        !self.is_degenerate() && (self.is_horizontal() || self.is_vertical())
    }

    /// Axis the segment runs along, if it is axis-aligned and non-degenerate.
    pub fn axis(&self) -> Option<Axis> {
        if self.is_degenerate() {
            None
        } else if self.is_horizontal() {
            Some(Axis::X)
        } else if self.is_vertical() {
            Some(Axis::Y)
        } else {
            None
        }
    }

    /// Projection of the segment onto `axis`.
    #[inline]
    pub fn interval(&self, axis: Axis) -> Interval {
        Interval::new(axis.component(self.first), axis.component(self.second))
    }

    #[inline]
    pub fn translate(&self, v: Vec2) -> Segment {
        Segment::new(self.first + v, self.second + v)
    }

    /// Reverse orientation.
    #[inline]
    pub fn reversed(&self) -> Segment {
        Segment::new(self.second, self.first)
    }

    /// Shorten by `by` at both ends; collapses to the midpoint if too short.
    pub fn shrink(&self, by: f64) -> Segment {
        let len = self.length();
        if len <= 2.0 * by + EPS {
            let m = self.midpoint();
            return Segment::new(m, m);
        }
        let d = self.vector() / len * by;
        Segment::new(self.first + d, self.second - d)
    }

    /// Infinite line through this segment.
    ///
    /// Panics on a degenerate segment.
    pub fn to_line(&self) -> Line {
        assert!(
            !self.is_degenerate(),
            "cannot build a line from degenerate segment {:?}",
            self
        );
        Line::through(self.first, self.second)
    }

    /// Whether `p` lies on the segment (fuzzy).
    pub fn contains(&self, p: Vec2) -> bool {
        if self.is_degenerate() {
            return fuzzy_eq_vec(self.first, p);
        }
        let v = self.vector();
        let len = v.norm();
        if (cross(v, p - self.first) / len).abs() > EPS {
            return false;
        }
        let t = (p - self.first).dot(&v) / len;
        t >= -EPS && t <= len + EPS
    }

    /// Closest point of the segment to `p`.
    pub fn closest_point_to(&self, p: Vec2) -> Vec2 {
        if self.is_degenerate() {
            return self.first;
        }
        if self.contains(p) {
            return p;
        }
        let line = self.to_line();
        let foot = line.project(p);
        if self.contains(foot) {
            foot
        } else if (self.first - foot).norm() <= (self.second - foot).norm() {
            self.first
        } else {
            self.second
        }
    }

    #[inline]
    pub fn distance_to(&self, p: Vec2) -> f64 {
        (self.closest_point_to(p) - p).norm()
    }

    /// Parallelism test. Panics if either segment is degenerate.
    pub fn is_parallel_to(&self, other: &Segment) -> bool {
        assert!(
            !self.is_degenerate() && !other.is_degenerate(),
            "parallelism is undefined for degenerate segments {:?}, {:?}",
            self,
            other
        );
        let a = self.vector().normalize();
        let b = other.vector().normalize();
        cross(a, b).abs() <= EPS
    }

    /// Both segments lie on the same infinite line.
    pub fn is_collinear_with(&self, other: &Segment) -> bool {
        self.is_parallel_to(other) && self.to_line().contains(other.first)
    }

    /// Intersection with another segment.
    ///
    /// Cases
    /// - One side degenerate: its point, if the other contains it.
    /// - Collinear: overlap reduced to a shared endpoint (`Point`) or `Infinite`.
    /// - Otherwise: line intersection kept only if both segments contain it.
    pub fn intersect(&self, other: &Segment) -> Intersection {
        if self.is_degenerate() || other.is_degenerate() {
            let (point, seg) = if self.is_degenerate() {
                (self.first, other)
            } else {
                (other.first, self)
            };
            return if seg.contains(point) {
                Intersection::Point(point)
            } else {
                Intersection::Empty
            };
        }
        if self.is_collinear_with(other) {
            return self.collinear_overlap(other);
        }
        match self.to_line().intersect(&other.to_line()) {
            Intersection::Point(p) if self.contains(p) && other.contains(p) => {
                Intersection::Point(p)
            }
            _ => Intersection::Empty,
        }
    }

    fn collinear_overlap(&self, other: &Segment) -> Intersection {
        let len = self.length();
        let dir = self.vector() / len;
        let t = |p: Vec2| (p - self.first).dot(&dir);
        let own = Interval::new(0.0, len);
        let theirs = Interval::new(t(other.first), t(other.second));
        match own.intersect(&theirs) {
            None => Intersection::Empty,
            Some(overlap) if overlap.is_degenerate() => {
                // Snap to whichever endpoint is shared to keep the result symmetric.
                let p = self.first + dir * overlap.lo;
                let shared = [self.first, self.second]
                    .into_iter()
                    .find(|e| fuzzy_eq_vec(*e, p) && other.contains(*e))
                    .unwrap_or(p);
                Intersection::Point(shared)
            }
            Some(_) => Intersection::Infinite,
        }
    }

    /// Intersection with the circle of `center` and `radius`.
    pub fn intersect_circle(&self, center: Vec2, radius: f64) -> Intersection {
        if self.is_degenerate() {
            return if fuzzy_eq((self.first - center).norm(), radius) {
                Intersection::Point(self.first)
            } else {
                Intersection::Empty
            };
        }
        let hits = self.to_line().intersect_circle(center, radius).points();
        Intersection::from_points(hits.into_iter().filter(|p| self.contains(*p)).collect())
    }
}

/// Infinite line `origin + t · direction`, with unit `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    origin: Vec2,
    direction: Vec2,
}

impl Line {
    fn through(a: Vec2, b: Vec2) -> Self {
        Self {
            origin: a,
            direction: (b - a).normalize(),
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Signed distance of `p` from the line (positive on the left).
    #[inline]
    pub fn signed_distance(&self, p: Vec2) -> f64 {
        cross(self.direction, p - self.origin)
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.signed_distance(p).abs() <= EPS
    }

    /// Orthogonal projection of `p` onto the line.
    #[inline]
    pub fn project(&self, p: Vec2) -> Vec2 {
        self.origin + self.direction * (p - self.origin).dot(&self.direction)
    }

    pub fn is_parallel_to(&self, other: &Line) -> bool {
        cross(self.direction, other.direction).abs() <= EPS
    }

    /// Intersection with another line: `Point`, `Empty` (parallel) or `Infinite` (coincident).
    pub fn intersect(&self, other: &Line) -> Intersection {
        let denom = cross(self.direction, other.direction);
        if denom.abs() <= EPS {
            return if self.contains(other.origin) {
                Intersection::Infinite
            } else {
                Intersection::Empty
            };
        }
        let t = cross(other.origin - self.origin, other.direction) / denom;
        Intersection::Point(self.origin + self.direction * t)
    }

    /// Intersection with a circle: `Empty`, tangent `Point`, or two `Points`.
    pub fn intersect_circle(&self, center: Vec2, radius: f64) -> Intersection {
        let foot = self.project(center);
        let d = (foot - center).norm();
        if d > radius + EPS {
            Intersection::Empty
        } else if fuzzy_eq(d, radius) {
            Intersection::Point(foot)
        } else {
            let h = (radius * radius - d * d).sqrt();
            Intersection::Points(vec![foot - self.direction * h, foot + self.direction * h])
        }
    }
}
