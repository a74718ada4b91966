//! Curated internal API (UNSTABLE).
//!
//! Important
//! - A convenience surface for the CLI and benches, not a stable public API.
//!   Breaking changes are allowed.
//! - Prefer these re-exports for consistency across callers.

// geometry
pub use crate::geom2::{
    angle_between, resized, ConvexPolygon, Ellipse, ExtendablePolygon, Intersection, Line,
    Segment, Vec2, EPS,
};
// navigation graph
pub use crate::mesh::{generate_navigation_graph, NavigationGraph, Passage, PassageId, RoomId};
// agent knowledge
pub use crate::cognitive::{sample_landmarks, CognitiveMap, Landmark, MapEdge, VolatileMemory};
// strategies and the per-agent action
pub use crate::navigation::{
    Decision, DestinationReaching, DynamicPursuing, Exploring, GoalOrientedExploration,
    KnownDestinationReaching, NavState, NavigationAction, NavigationStrategy, NoCongestion,
    Occupancy, Pedestrian, Pursuing, ReachRule, RouteFollowing, Strategy,
};
// steering
pub use crate::steering::{
    Contribution, ContributorKind, DistanceWeighting, Level, NearestPerLevel, SinglePrevalent,
    SteeringContext, SteeringStrategy, TypeWeighting, WeightedCombiner,
};
// configuration and errors
pub use crate::config::{CognitiveCfg, MeshCfg, MotionCfg, NavCfg, SteeringCfg};
pub use crate::error::{ConfigError, NavError};
