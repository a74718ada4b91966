//! Steering inputs and the combiner seam.

use crate::geom2::{ConvexPolygon, Vec2};

/// Partition a contributor belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    Group,
    Individual,
}

/// What produced a contribution; keys the per-kind weighting table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContributorKind {
    /// The room-level navigation action; at most one per agent.
    Navigation,
    ObstacleAvoidance,
    Separation,
    Cohesion,
    Alignment,
    Seek,
    Other,
}

/// One proposed displacement for the current cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contribution {
    pub kind: ContributorKind,
    pub level: Level,
    pub vector: Vec2,
    /// Point the contributor is heading for, if it has one.
    pub target: Option<Vec2>,
}

impl Contribution {
    pub fn new(kind: ContributorKind, level: Level, vector: Vec2) -> Self {
        Self {
            kind,
            level,
            vector,
            target: None,
        }
    }

    pub fn with_target(mut self, target: Vec2) -> Self {
        self.target = Some(target);
        self
    }

    #[inline]
    pub fn is_navigation(&self) -> bool {
        self.kind == ContributorKind::Navigation
    }
}

/// Where the agent stands when the contributions are blended.
#[derive(Clone, Copy, Debug)]
pub struct SteeringContext<'a> {
    pub position: Vec2,
    /// Room the agent is in, if known.
    pub room: Option<&'a ConvexPolygon>,
}

impl<'a> SteeringContext<'a> {
    /// Whether moving by `v` ends outside the current room (never, with no room).
    pub fn leaves_room(&self, v: Vec2) -> bool {
        self.room
            .is_some_and(|r| !r.contains_boundary_included(self.position + v))
    }

    /// Distance to the contribution's target; unbounded without one.
    pub fn distance_to_target(&self, c: &Contribution) -> f64 {
        c.target.map_or(f64::INFINITY, |t| (t - self.position).norm())
    }
}

/// Blends the contributions of one cycle into the displacement to execute.
///
/// `&mut self`: some combiners carry state across cycles (smoothing).
pub trait SteeringStrategy {
    fn compute_displacement(&mut self, ctx: &SteeringContext<'_>, contributions: &[Contribution])
        -> Vec2;
}
