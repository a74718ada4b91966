//! Room-level navigation: strategies that decide which door to take, and the
//! action that turns those decisions into per-cycle displacements.
//!
//! Purpose
//! - `NavigationStrategy` reacts to room entries with a `Decision`.
//! - `NavigationAction` owns one `Pedestrian` and one `Strategy` and runs the
//!   low-level state machine (walk to door, cross it, walk to final point).
//!
//! Why this design
//! - Strategies are a closed `enum` dispatching to small structs that compose
//!   by value (route following wraps dynamic pursuit, destination reaching wraps
//!   goal-oriented exploration and known-destination reaching). No trait objects
//!   in the hot path, and each piece stays testable on its own.
//! - Strategies only see a borrowed `Situation`; the agent's knowledge and the
//!   graph are never owned by a strategy.
//!
//! Conventions
//! - Doors in sight are the outgoing passages of the current room.
//! - Crowding enters through `Occupancy`; `NoCongestion` when no crowd model runs.
//!
//! Code cross-refs: `cognitive::{CognitiveMap, VolatileMemory}`, `mesh::NavigationGraph`

mod action;
mod explore;
mod pursue;
mod route;
mod strategy;

pub use action::{NavState, NavigationAction, Pedestrian};
pub use explore::{door_weight, Exploring, GoalOrientedExploration, KNOWN_IMPASSE_FACTOR};
pub use pursue::{DynamicPursuing, Pursuing};
pub use route::{plan, DestinationReaching, KnownDestinationReaching, ReachRule, RouteFollowing};
pub use strategy::{Decision, NavigationStrategy, NoCongestion, Occupancy, Situation, Strategy};
