//! Mutable convex polygons (V-representation).
//!
//! Purpose
//! - Rooms, obstacles and seeds are convex polygons stored as an ordered vertex
//!   list (CW or CCW, but consistent).
//! - Mutations are the only legal way to change a polygon; each one checks the
//!   resulting shape and returns `false` without touching the vertex list when
//!   convexity would break.
//!
//! Conventions
//! - Edge `i` runs from vertex `i` to vertex `i + 1` (cyclically).
//! - Predicates are fuzzy (`EPS`); `contains` is boundary-inclusive and the two
//!   explicit variants are defined on top of it and `lies_on_boundary`.
//!
//! Code cross-refs: `segment::Segment`, `extendable::ExtendablePolygon`

use super::segment::Segment;
use super::types::{cross, fuzzy_eq_vec, Vec2, EPS};

/// Convex polygon with at least three vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexPolygon {
    vertices: Vec<Vec2>,
}

impl ConvexPolygon {
    /// Build from an ordered vertex list; `None` if the vertices do not form a convex polygon.
    pub fn new(vertices: Vec<Vec2>) -> Option<Self> {
        if is_convex(&vertices) {
            Some(Self { vertices })
        } else {
            None
        }
    }

    /// Axis-aligned rectangle with lower-left corner `origin` (CCW order).
    pub fn rectangle(origin: Vec2, width: f64, height: f64) -> Option<Self> {
        Self::new(vec![
            origin,
            origin + Vec2::new(width, 0.0),
            origin + Vec2::new(width, height),
            origin + Vec2::new(0.0, height),
        ])
    }

    /// Axis-aligned square centred on `center`.
    pub fn square(center: Vec2, side: f64) -> Option<Self> {
        let h = side / 2.0;
        Self::rectangle(center - Vec2::new(h, h), side, side)
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex `i`, indices wrap around.
    #[inline]
    pub fn vertex(&self, i: usize) -> Vec2 {
        self.vertices[i % self.vertices.len()]
    }

    /// Edge `i`, from vertex `i` to vertex `i + 1`.
    #[inline]
    pub fn edge(&self, i: usize) -> Segment {
        Segment::new(self.vertex(i), self.vertex(i + 1))
    }

    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.vertices.len()).map(move |i| self.edge(i))
    }

    /// Index of the edge equal to `edge` (same endpoints, same orientation).
    pub fn index_of_edge(&self, edge: &Segment) -> Option<usize> {
        self.edges().position(|e| {
            fuzzy_eq_vec(e.first, edge.first) && fuzzy_eq_vec(e.second, edge.second)
        })
    }

    /// Twice the signed area (positive for CCW order).
    fn signed_area2(&self) -> f64 {
        signed_area2(&self.vertices)
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.signed_area2() > 0.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area2().abs() / 2.0
    }

    /// Area centroid.
    pub fn centroid(&self) -> Vec2 {
        let a2 = self.signed_area2();
        let n = self.vertices.len();
        let mut c = Vec2::zeros();
        for i in 0..n {
            let p = self.vertex(i);
            let q = self.vertex(i + 1);
            c += (p + q) * cross(p, q);
        }
        c / (3.0 * a2)
    }

    /// Largest distance between two vertices.
    pub fn diameter(&self) -> f64 {
        let mut best: f64 = 0.0;
        for (i, p) in self.vertices.iter().enumerate() {
            for q in &self.vertices[i + 1..] {
                best = best.max((p - q).norm());
            }
        }
        best
    }

    /// Bounding box as `(min, max)` corners.
    pub fn bounding_box(&self) -> (Vec2, Vec2) {
        let mut lo = Vec2::new(f64::INFINITY, f64::INFINITY);
        let mut hi = Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in &self.vertices {
            lo = lo.inf(v);
            hi = hi.sup(v);
        }
        (lo, hi)
    }

    /// Unit outward normal of edge `i`.
    pub fn outward_normal(&self, i: usize) -> Vec2 {
        outward_normal(&self.edge(i), self.is_ccw())
    }

    /// Boundary-inclusive, fuzzy membership.
    pub fn contains(&self, p: Vec2) -> bool {
        let ccw = self.is_ccw();
        self.edges()
            .all(|e| outward_normal(&e, ccw).dot(&(p - e.first)) <= EPS)
    }

    pub fn lies_on_boundary(&self, p: Vec2) -> bool {
        self.edges().any(|e| e.contains(p))
    }

    #[inline]
    pub fn contains_boundary_included(&self, p: Vec2) -> bool {
        self.contains(p) || self.lies_on_boundary(p)
    }

    #[inline]
    pub fn contains_boundary_excluded(&self, p: Vec2) -> bool {
        self.contains(p) && !self.lies_on_boundary(p)
    }

    /// Every vertex of `other` is inside (boundary included).
    pub fn contains_polygon(&self, other: &ConvexPolygon) -> bool {
        other
            .vertices
            .iter()
            .all(|v| self.contains_boundary_included(*v))
    }

    /// Interiors overlap (separating-axis test; touching boundaries do not count).
    pub fn intersects(&self, other: &ConvexPolygon) -> bool {
        !has_separating_axis(self, other) && !has_separating_axis(other, self)
    }

    /// The polygons touch along a boundary portion of positive length and do not overlap.
    pub fn is_adjacent_to(&self, other: &ConvexPolygon) -> bool {
        if self.intersects(other) {
            return false;
        }
        self.edges().any(|e| {
            other.edges().any(|f| {
                !e.is_degenerate()
                    && !f.is_degenerate()
                    && matches!(e.intersect(&f), super::Intersection::Infinite)
            })
        })
    }

    /// Distance from `p` to the polygon (zero inside).
    pub fn distance_to(&self, p: Vec2) -> f64 {
        if self.contains(p) {
            return 0.0;
        }
        self.edges()
            .map(|e| e.distance_to(p))
            .fold(f64::INFINITY, f64::min)
    }

    /// Index of the edge closest to `segment`.
    ///
    /// Ties (e.g. several edges touching the segment) are broken by the distance
    /// of the contact point from `segment.first`.
    pub fn closest_edge_to(&self, segment: &Segment) -> usize {
        let mut best = (0usize, f64::INFINITY, f64::INFINITY);
        for (i, e) in self.edges().enumerate() {
            let (d, contact) = segment_distance(&e, segment);
            let from_start = (contact - segment.first).norm();
            if d < best.1 - EPS || (d <= best.1 + EPS && from_start < best.2) {
                best = (i, d, from_start);
            }
        }
        best.0
    }

    /// Part of the polygon on the inner side of the line through `on_line` with
    /// outward normal `n` (points `x` with `n·(x - on_line) <= 0`).
    pub fn clip_to_halfplane(&self, on_line: Vec2, n: Vec2) -> Option<ConvexPolygon> {
        let side = |p: Vec2| n.dot(&(p - on_line));
        let mut out: Vec<Vec2> = Vec::with_capacity(self.vertices.len() + 1);
        for i in 0..self.vertices.len() {
            let p = self.vertex(i);
            let q = self.vertex(i + 1);
            let (sp, sq) = (side(p), side(q));
            if sp <= EPS {
                out.push(p);
            }
            if (sp < -EPS && sq > EPS) || (sp > EPS && sq < -EPS) {
                let t = sp / (sp - sq);
                out.push(p + (q - p) * t);
            }
        }
        out.dedup_by(|a, b| fuzzy_eq_vec(*a, *b));
        if out.len() > 1 && fuzzy_eq_vec(out[0], out[out.len() - 1]) {
            out.pop();
        }
        ConvexPolygon::new(out)
    }

    /// Insert `p` so that it becomes vertex `index`.
    pub fn add_vertex(&mut self, index: usize, p: Vec2) -> bool {
        if index > self.vertices.len() {
            return false;
        }
        self.try_mutate(|vs| vs.insert(index, p))
    }

    pub fn move_vertex(&mut self, index: usize, p: Vec2) -> bool {
        if index >= self.vertices.len() {
            return false;
        }
        self.try_mutate(|vs| vs[index] = p)
    }

    pub fn remove_vertex(&mut self, index: usize) -> bool {
        if index >= self.vertices.len() || self.vertices.len() <= 3 {
            return false;
        }
        self.try_mutate(|vs| {
            vs.remove(index);
        })
    }

    /// Replace edge `index` with `edge` (moves both of its endpoints).
    pub fn replace_edge(&mut self, index: usize, edge: Segment) -> bool {
        let n = self.vertices.len();
        if index >= n {
            return false;
        }
        self.try_mutate(|vs| {
            vs[index] = edge.first;
            vs[(index + 1) % n] = edge.second;
        })
    }

    /// Translate edge `index` by `by`.
    pub fn move_edge(&mut self, index: usize, by: Vec2) -> bool {
        let e = self.edge(index);
        self.replace_edge(index, e.translate(by))
    }

    fn try_mutate<F: FnOnce(&mut Vec<Vec2>)>(&mut self, f: F) -> bool {
        let mut candidate = self.vertices.clone();
        f(&mut candidate);
        if is_convex(&candidate) {
            self.vertices = candidate;
            true
        } else {
            false
        }
    }
}

fn signed_area2(vs: &[Vec2]) -> f64 {
    let n = vs.len();
    (0..n).map(|i| cross(vs[i], vs[(i + 1) % n])).sum()
}

/// Unit outward normal of `e` for a polygon with the given orientation.
fn outward_normal(e: &Segment, ccw: bool) -> Vec2 {
    let d = e.vector().normalize();
    if ccw {
        Vec2::new(d.y, -d.x)
    } else {
        Vec2::new(-d.y, d.x)
    }
}

/// Distance between two segments and a representative contact point on `b`.
fn segment_distance(a: &Segment, b: &Segment) -> (f64, Vec2) {
    if let Some(p) = a.intersect(b).point() {
        return (0.0, p);
    }
    let candidates = [
        (a.distance_to(b.first), b.first),
        (a.distance_to(b.second), b.second),
        (b.distance_to(a.first), b.closest_point_to(a.first)),
        (b.distance_to(a.second), b.closest_point_to(a.second)),
    ];
    candidates
        .into_iter()
        .fold((f64::INFINITY, b.first), |acc, c| if c.0 < acc.0 { c } else { acc })
}

/// Some edge normal of `a` separates `a` from `b` (touching counts as separated).
fn has_separating_axis(a: &ConvexPolygon, b: &ConvexPolygon) -> bool {
    let ccw = a.is_ccw();
    a.edges().any(|e| {
        let n = outward_normal(&e, ccw);
        let a_max = n.dot(&e.first);
        let b_min = b
            .vertices
            .iter()
            .map(|v| n.dot(v))
            .fold(f64::INFINITY, f64::min);
        b_min >= a_max - EPS
    })
}

/// Convexity check: no degenerate edge, consistent turning, total turning of one loop.
pub(crate) fn is_convex(vs: &[Vec2]) -> bool {
    let n = vs.len();
    if n < 3 || vs.iter().any(|v| !v.x.is_finite() || !v.y.is_finite()) {
        return false;
    }
    if (0..n).any(|i| fuzzy_eq_vec(vs[i], vs[(i + 1) % n])) {
        return false;
    }
    let mut pos = false;
    let mut neg = false;
    let mut turning = 0.0;
    for i in 0..n {
        let a = vs[i];
        let b = vs[(i + 1) % n];
        let c = vs[(i + 2) % n];
        let u = (b - a).normalize();
        let w = (c - b).normalize();
        let o = cross(u, w);
        if o > EPS {
            pos = true;
        } else if o < -EPS {
            neg = true;
        } else if u.dot(&w) < 0.0 {
            // spike: the boundary folds back on itself
            return false;
        }
        turning += o.atan2(u.dot(&w));
    }
    if pos == neg {
        return false;
    }
    (turning.abs() - std::f64::consts::TAU).abs() < 1e-6
}
