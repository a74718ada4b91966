//! Pedestrian spatial cognition and room-level navigation.
//!
//! Layers, each depending only on the ones above it:
//! - `geom2`: mutable convex polygons, segments, ellipses.
//! - `mesh`: rooms and passages grown from seeds around obstacles.
//! - `cognitive`: landmarks, the landmark tree, volatile memory.
//! - `navigation`: strategies reacting to room entries, and the per-agent action.
//! - `steering`: blending the navigation displacement with other urges.
//!
//! The host simulation owns positions and time; this crate only answers
//! "where should this agent move next" and performs no I/O.

pub mod api;
pub mod cognitive;
pub mod config;
pub mod error;
pub mod geom2;
pub mod mesh;
pub mod navigation;
pub mod steering;

#[cfg(test)]
mod test_support;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::NavCfg;
pub use geom2::Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::config::{CognitiveCfg, MeshCfg, MotionCfg, NavCfg, SteeringCfg};
    pub use crate::geom2::{ConvexPolygon, Segment, Vec2};
    pub use crate::mesh::{generate_navigation_graph, NavigationGraph, PassageId, RoomId};
    pub use crate::navigation::{
        Decision, NavState, NavigationAction, NavigationStrategy, NoCongestion, Pedestrian,
        Strategy,
    };
    pub use crate::steering::{Contribution, SinglePrevalent, SteeringContext, SteeringStrategy};
}
