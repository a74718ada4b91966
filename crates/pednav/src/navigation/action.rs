//! The navigation action: one agent, one strategy, and the low-level state
//! machine that turns decisions into per-cycle displacements.
//!
//! States
//! - `Start`: position not yet matched to a room.
//! - `NewRoom`: a room was entered; the strategy is consulted next.
//! - `MovingToCrossingPoint`: walking to the chosen door, `agent radius` away
//!   from its ends.
//! - `CrossingDoor`: pushing through the door along its normal until inside the
//!   next room.
//! - `MovingToFinal`, `Arrived`, `Stopped`.
//!
//! Leaving the current room anywhere else than through the chosen door is an
//! unexpected room entry and is reported to the strategy as such.

use rand::rngs::StdRng;
use tracing::debug;

use super::strategy::{Decision, NavigationStrategy, Occupancy, Situation, Strategy};
use crate::cognitive::{sample_landmarks, CognitiveMap, VolatileMemory};
use crate::config::{CognitiveCfg, MotionCfg};
use crate::geom2::{resized, Vec2};
use crate::mesh::{NavigationGraph, PassageId, RoomId};

/// Upper bound on state transitions within one decision cycle.
const MAX_TRANSITIONS: usize = 8;

/// Agent-owned knowledge and body.
#[derive(Clone, Debug)]
pub struct Pedestrian {
    radius: f64,
    knowledge_degree: f64,
    memory: VolatileMemory,
    map: Option<CognitiveMap>,
    rng: StdRng,
}

impl Pedestrian {
    /// Panics if `radius` is not positive or `knowledge_degree` is outside `[0, 1]`.
    pub fn new(radius: f64, knowledge_degree: f64, rng: StdRng) -> Self {
        assert!(radius > 0.0, "agent radius must be positive, got {radius}");
        assert!(
            (0.0..=1.0).contains(&knowledge_degree),
            "knowledge degree must lie in [0, 1], got {knowledge_degree}"
        );
        Self {
            radius,
            knowledge_degree,
            memory: VolatileMemory::new(),
            map: None,
            rng,
        }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn knowledge_degree(&self) -> f64 {
        self.knowledge_degree
    }

    #[inline]
    pub fn memory(&self) -> &VolatileMemory {
        &self.memory
    }

    #[inline]
    pub fn memory_mut(&mut self) -> &mut VolatileMemory {
        &mut self.memory
    }

    /// The cognitive map, if it was built already.
    #[inline]
    pub fn cognitive_map(&self) -> Option<&CognitiveMap> {
        self.map.as_ref()
    }

    /// Memory and cognitive map; the map is built on first use and kept forever.
    pub fn knowledge(
        &mut self,
        graph: &NavigationGraph,
        cfg: &CognitiveCfg,
    ) -> (&VolatileMemory, &CognitiveMap) {
        let Self {
            radius,
            knowledge_degree,
            memory,
            map,
            rng,
        } = self;
        let map = map.get_or_insert_with(|| {
            let landmarks = sample_landmarks(graph, 2.0 * *radius, *knowledge_degree, cfg, rng);
            CognitiveMap::build(graph, landmarks)
        });
        (&*memory, &*map)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavState {
    Start,
    NewRoom {
        room: RoomId,
        /// `(previous, expected)` when the entry was not planned.
        deviation: Option<(RoomId, RoomId)>,
    },
    MovingToCrossingPoint {
        door: PassageId,
        point: Vec2,
    },
    CrossingDoor {
        door: PassageId,
        exit: Vec2,
    },
    MovingToFinal(Vec2),
    Arrived,
    Stopped,
}

/// Drives one pedestrian with one strategy.
#[derive(Clone, Debug)]
pub struct NavigationAction {
    pedestrian: Pedestrian,
    strategy: Strategy,
    motion: MotionCfg,
    cognitive: CognitiveCfg,
    state: NavState,
    room: Option<RoomId>,
}

impl NavigationAction {
    pub fn new(
        pedestrian: Pedestrian,
        strategy: Strategy,
        motion: MotionCfg,
        cognitive: CognitiveCfg,
    ) -> Self {
        Self {
            pedestrian,
            strategy,
            motion,
            cognitive,
            state: NavState::Start,
            room: None,
        }
    }

    #[inline]
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Room the agent was last seen entering.
    #[inline]
    pub fn current_room(&self) -> Option<RoomId> {
        self.room
    }

    #[inline]
    pub fn pedestrian(&self) -> &Pedestrian {
        &self.pedestrian
    }

    #[inline]
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self.state, NavState::Arrived | NavState::Stopped)
    }

    /// Displacement to apply this cycle (at most `step_length` long).
    pub fn next_displacement(
        &mut self,
        graph: &NavigationGraph,
        position: Vec2,
        occupancy: &dyn Occupancy,
    ) -> Vec2 {
        for _ in 0..MAX_TRANSITIONS {
            match self.state {
                NavState::Start => match graph.room_containing(position) {
                    Some(room) => {
                        self.state = NavState::NewRoom {
                            room,
                            deviation: None,
                        }
                    }
                    None => return Vec2::zeros(),
                },
                NavState::NewRoom { room, deviation } => {
                    self.enter(graph, position, room, deviation, occupancy);
                }
                NavState::MovingToCrossingPoint { door, point } => {
                    if self.detect_deviation(graph, position) {
                        continue;
                    }
                    if self.arrived_at(position, point) {
                        self.state = NavState::CrossingDoor {
                            door,
                            exit: self.exit_point(graph, door, point),
                        };
                        continue;
                    }
                    return self.step(point - position);
                }
                NavState::CrossingDoor { door, exit } => {
                    let passage = graph.passage(door);
                    if graph.room(passage.head).contains_boundary_excluded(position) {
                        self.state = NavState::NewRoom {
                            room: passage.head,
                            deviation: None,
                        };
                        continue;
                    }
                    if let Some(other) = graph.room_containing(position) {
                        if other != passage.tail && other != passage.head {
                            self.state = NavState::NewRoom {
                                room: other,
                                deviation: Some((passage.tail, passage.head)),
                            };
                            continue;
                        }
                    }
                    if self.arrived_at(position, exit) {
                        // pushed to the exit without entering the head room
                        self.state = NavState::Start;
                        continue;
                    }
                    return self.step(exit - position);
                }
                NavState::MovingToFinal(target) => {
                    if self.detect_deviation(graph, position) {
                        continue;
                    }
                    if self.arrived_at(position, target) {
                        debug!(x = target.x, y = target.y, "arrived");
                        self.state = NavState::Arrived;
                        return Vec2::zeros();
                    }
                    return self.step(target - position);
                }
                NavState::Arrived | NavState::Stopped => return Vec2::zeros(),
            }
        }
        Vec2::zeros()
    }

    /// Planned entry into `room`: record the visit, consult the strategy, act.
    pub fn in_new_room(
        &mut self,
        graph: &NavigationGraph,
        position: Vec2,
        room: RoomId,
        occupancy: &dyn Occupancy,
    ) -> Decision {
        self.enter(graph, position, room, None, occupancy)
    }

    /// Entry into `room` while heading for `expected`, coming from `previous`.
    pub fn in_unexpected_new_room(
        &mut self,
        graph: &NavigationGraph,
        position: Vec2,
        room: RoomId,
        previous: RoomId,
        expected: RoomId,
        occupancy: &dyn Occupancy,
    ) -> Decision {
        self.enter(graph, position, room, Some((previous, expected)), occupancy)
    }

    /// Change the destination of a dynamically pursuing strategy; when the agent
    /// is inside a room the strategy is consulted again right away. With
    /// `void_memory`, visit counts are zeroed (known rooms stay known).
    /// Returns `false` if the strategy has a fixed goal.
    pub fn set_destination(
        &mut self,
        graph: &NavigationGraph,
        position: Vec2,
        destination: Vec2,
        void_memory: bool,
        occupancy: &dyn Occupancy,
    ) -> bool {
        if !self.strategy.set_destination(destination) {
            return false;
        }
        if void_memory {
            self.pedestrian.memory_mut().reset();
        }
        if let Some(room) = self.room {
            if graph.room(room).contains_boundary_included(position) {
                let decision = self.consult(graph, position, room, None, occupancy);
                self.apply(graph, position, decision);
            }
        }
        true
    }

    fn enter(
        &mut self,
        graph: &NavigationGraph,
        position: Vec2,
        room: RoomId,
        deviation: Option<(RoomId, RoomId)>,
        occupancy: &dyn Occupancy,
    ) -> Decision {
        self.room = Some(room);
        self.pedestrian.memory_mut().visit(room);
        let decision = self.consult(graph, position, room, deviation, occupancy);
        debug!(
            room = room.0,
            unexpected = deviation.is_some(),
            strategy = self.strategy.name(),
            ?decision,
            "room_entered"
        );
        self.apply(graph, position, decision);
        decision
    }

    fn consult(
        &mut self,
        graph: &NavigationGraph,
        position: Vec2,
        room: RoomId,
        deviation: Option<(RoomId, RoomId)>,
        occupancy: &dyn Occupancy,
    ) -> Decision {
        let (memory, map) = self.pedestrian.knowledge(graph, &self.cognitive);
        let s = Situation {
            graph,
            position,
            room,
            doors: graph.outgoing(room),
            memory,
            map,
            occupancy,
        };
        match deviation {
            None => self.strategy.in_new_room(&s),
            Some((previous, expected)) => self.strategy.in_unexpected_new_room(&s, previous, expected),
        }
    }

    fn apply(&mut self, graph: &NavigationGraph, position: Vec2, decision: Decision) {
        self.state = match decision {
            Decision::CrossDoor(door) => NavState::MovingToCrossingPoint {
                door,
                point: self.crossing_point(graph, door, position),
            },
            Decision::MoveToFinal(p) => NavState::MovingToFinal(p),
            Decision::Stop => NavState::Stopped,
        };
    }

    /// If the agent left its room for another one, switch to `NewRoom`.
    fn detect_deviation(&mut self, graph: &NavigationGraph, position: Vec2) -> bool {
        let Some(current) = self.room else {
            return false;
        };
        if graph.room(current).contains_boundary_included(position) {
            return false;
        }
        match graph.room_containing(position) {
            Some(other) => {
                self.state = NavState::NewRoom {
                    room: other,
                    deviation: Some((current, current)),
                };
                true
            }
            None => false,
        }
    }

    /// Closest point of the door, kept one radius away from its ends.
    fn crossing_point(&self, graph: &NavigationGraph, door: PassageId, position: Vec2) -> Vec2 {
        graph
            .passage(door)
            .segment
            .shrink(self.pedestrian.radius())
            .closest_point_to(position)
    }

    /// Point beyond the door: across the gap, one radius plus a margin deep.
    fn exit_point(&self, graph: &NavigationGraph, door: PassageId, point: Vec2) -> Vec2 {
        let passage = graph.passage(door);
        let gap = graph.room(passage.head).distance_to(point);
        point + passage.normal * (gap + self.pedestrian.radius() + self.motion.door_margin)
    }

    #[inline]
    fn arrived_at(&self, position: Vec2, target: Vec2) -> bool {
        (target - position).norm() <= self.motion.arrival_tolerance
    }

    #[inline]
    fn step(&self, v: Vec2) -> Vec2 {
        if v.norm() > self.motion.step_length {
            resized(v, self.motion.step_length)
        } else {
            v
        }
    }
}
