//! Axis-aligned ellipses, used as landmark shapes.
//!
//! Containment inside a convex polygon is exact: an ellipse lies inside iff for
//! every edge its support value along the outward normal does not exceed the
//! edge's offset.

use super::convex::ConvexPolygon;
use super::types::{Vec2, EPS};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    center: Vec2,
    /// Semi-axes along x and y.
    semi_axes: Vec2,
}

impl Ellipse {
    /// Panics if a semi-axis is not strictly positive.
    pub fn new(center: Vec2, semi_x: f64, semi_y: f64) -> Self {
        assert!(
            semi_x > 0.0 && semi_y > 0.0,
            "ellipse semi-axes must be positive, got ({semi_x}, {semi_y})"
        );
        Self {
            center,
            semi_axes: Vec2::new(semi_x, semi_y),
        }
    }

    #[inline]
    pub fn centroid(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn semi_axes(&self) -> Vec2 {
        self.semi_axes
    }

    #[inline]
    pub fn diameter(&self) -> f64 {
        2.0 * self.semi_axes.x.max(self.semi_axes.y)
    }

    /// Same centre, semi-axes multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.center,
            self.semi_axes.x * factor,
            self.semi_axes.y * factor,
        )
    }

    /// Support function `max_{x ∈ E} n·x`.
    #[inline]
    pub fn support(&self, n: Vec2) -> f64 {
        let a = self.semi_axes;
        n.dot(&self.center) + ((a.x * n.x).powi(2) + (a.y * n.y).powi(2)).sqrt()
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let d = p - self.center;
        let a = self.semi_axes;
        (d.x / a.x).powi(2) + (d.y / a.y).powi(2) <= 1.0 + EPS
    }

    /// Whether the whole ellipse lies inside `polygon` (boundary included).
    pub fn is_inside(&self, polygon: &ConvexPolygon) -> bool {
        (0..polygon.vertex_count()).all(|i| {
            let n = polygon.outward_normal(i);
            self.support(n) <= n.dot(&polygon.vertex(i)) + EPS
        })
    }
}
