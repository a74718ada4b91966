//! Room-entry handlers: the shared view, the decision value, and the closed set
//! of strategy variants.

use std::collections::HashMap;

use super::explore::{Exploring, GoalOrientedExploration};
use super::pursue::{DynamicPursuing, Pursuing};
use super::route::{DestinationReaching, KnownDestinationReaching, RouteFollowing};
use crate::cognitive::{CognitiveMap, VolatileMemory};
use crate::geom2::{ConvexPolygon, Vec2};
use crate::mesh::{NavigationGraph, PassageId, RoomId};

/// Crowding of a room as a multiplicative cost factor (1 = free).
pub trait Occupancy {
    fn congestion(&self, room: RoomId) -> f64;
}

/// Every room is free.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCongestion;

impl Occupancy for NoCongestion {
    #[inline]
    fn congestion(&self, _room: RoomId) -> f64 {
        1.0
    }
}

/// Explicit per-room factors; rooms not listed are free.
impl Occupancy for HashMap<RoomId, f64> {
    fn congestion(&self, room: RoomId) -> f64 {
        self.get(&room).copied().unwrap_or(1.0)
    }
}

/// What an agent knows and sees when it enters a room.
pub struct Situation<'a> {
    pub graph: &'a NavigationGraph,
    pub position: Vec2,
    pub room: RoomId,
    /// Passages leaving `room` that the agent can see.
    pub doors: &'a [PassageId],
    pub memory: &'a VolatileMemory,
    pub map: &'a CognitiveMap,
    pub occupancy: &'a dyn Occupancy,
}

impl<'a> Situation<'a> {
    #[inline]
    pub fn current_room(&self) -> &'a ConvexPolygon {
        self.graph.room(self.room)
    }

    /// Room on the far side of `door`.
    #[inline]
    pub fn head(&self, door: PassageId) -> RoomId {
        self.graph.passage(door).head
    }

    /// Distance from the agent to the door segment.
    #[inline]
    pub fn door_distance(&self, door: PassageId) -> f64 {
        self.graph.passage(door).segment.distance_to(self.position)
    }

    #[inline]
    pub fn in_current_room(&self, p: Vec2) -> bool {
        self.current_room().contains_boundary_included(p)
    }
}

/// Outcome of a room-entry event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decision {
    CrossDoor(PassageId),
    /// Walk to a point in (or reachable straight from) the current room and stay.
    MoveToFinal(Vec2),
    Stop,
}

/// A per-agent navigation policy driven by room entries.
pub trait NavigationStrategy {
    /// The agent entered `s.room` as planned.
    fn in_new_room(&mut self, s: &Situation<'_>) -> Decision;

    /// The agent ended up in `s.room` while heading for `expected`, coming from `previous`.
    fn in_unexpected_new_room(
        &mut self,
        s: &Situation<'_>,
        previous: RoomId,
        expected: RoomId,
    ) -> Decision {
        let _ = (previous, expected);
        self.in_new_room(s)
    }
}

/// Closed set of strategies; each variant delegates to the ones it wraps.
#[derive(Clone, Debug)]
pub enum Strategy {
    Explore(Exploring),
    Pursue(Pursuing),
    DynamicPursue(DynamicPursuing),
    FollowRoute(RouteFollowing),
    GoalOrientedExplore(GoalOrientedExploration),
    ReachKnownDestination(KnownDestinationReaching),
    ReachDestination(DestinationReaching),
}

impl Strategy {
    /// Change the destination of a dynamically pursuing strategy.
    /// Returns `false` for variants with a fixed goal.
    pub fn set_destination(&mut self, destination: Vec2) -> bool {
        match self {
            Strategy::DynamicPursue(p) => {
                p.set_destination(destination);
                true
            }
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Explore(_) => "explore",
            Strategy::Pursue(_) => "pursue",
            Strategy::DynamicPursue(_) => "dynamic_pursue",
            Strategy::FollowRoute(_) => "follow_route",
            Strategy::GoalOrientedExplore(_) => "goal_oriented_explore",
            Strategy::ReachKnownDestination(_) => "reach_known_destination",
            Strategy::ReachDestination(_) => "reach_destination",
        }
    }
}

impl NavigationStrategy for Strategy {
    fn in_new_room(&mut self, s: &Situation<'_>) -> Decision {
        match self {
            Strategy::Explore(x) => x.in_new_room(s),
            Strategy::Pursue(x) => x.in_new_room(s),
            Strategy::DynamicPursue(x) => x.in_new_room(s),
            Strategy::FollowRoute(x) => x.in_new_room(s),
            Strategy::GoalOrientedExplore(x) => x.in_new_room(s),
            Strategy::ReachKnownDestination(x) => x.in_new_room(s),
            Strategy::ReachDestination(x) => x.in_new_room(s),
        }
    }

    fn in_unexpected_new_room(
        &mut self,
        s: &Situation<'_>,
        previous: RoomId,
        expected: RoomId,
    ) -> Decision {
        match self {
            Strategy::Explore(x) => x.in_unexpected_new_room(s, previous, expected),
            Strategy::Pursue(x) => x.in_unexpected_new_room(s, previous, expected),
            Strategy::DynamicPursue(x) => x.in_unexpected_new_room(s, previous, expected),
            Strategy::FollowRoute(x) => x.in_unexpected_new_room(s, previous, expected),
            Strategy::GoalOrientedExplore(x) => x.in_unexpected_new_room(s, previous, expected),
            Strategy::ReachKnownDestination(x) => x.in_unexpected_new_room(s, previous, expected),
            Strategy::ReachDestination(x) => x.in_unexpected_new_room(s, previous, expected),
        }
    }
}
