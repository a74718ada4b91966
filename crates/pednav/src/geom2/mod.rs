//! 2D geometry kernel (V-representation, fuzzy predicates).
//!
//! Purpose
//! - Segments, lines and circle intersections with an explicit four-way
//!   `Intersection` result.
//! - Convex polygons whose mutations refuse to break convexity, and an
//!   extendable variant that grows edge by edge around obstacles.
//! - Ellipses for landmark shapes.
//!
//! Why this design
//! - Rooms are built by moving vertices, so a vertex list is the natural
//!   representation; half-space forms are derived on the fly (outward normals).
//! - Every comparison is fuzzy (`EPS`), otherwise adjacency and boundary tests
//!   flip on floating-point noise after a few hundred growth steps.
//!
//! Code cross-refs: `ConvexPolygon`, `ExtendablePolygon`, `Segment`, `Line`,
//! `Intersection`, `Ellipse`, `Interval`

mod convex;
mod ellipse;
mod extendable;
mod segment;
mod types;

pub use convex::ConvexPolygon;
pub use ellipse::Ellipse;
pub use extendable::{EdgeGrowth, ExtendablePolygon};
pub use segment::{Intersection, Line, Segment};
pub use types::{
    angle, angle_between, cross, fuzzy_eq, fuzzy_eq_vec, normal, orient, resized, Axis, Interval,
    Vec2, EPS,
};

#[cfg(test)]
mod tests;
