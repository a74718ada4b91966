//! Exploration: door weighting, plain exploring, and exploring that diverts to
//! destinations it happens to see.

use tracing::trace;

use super::strategy::{Decision, NavigationStrategy, Situation};
use crate::error::NavError;
use crate::geom2::Vec2;
use crate::mesh::PassageId;

/// Cost multiplier for doors leading into a dead end the agent already knows.
pub const KNOWN_IMPASSE_FACTOR: f64 = 10.0;

/// Cost of crossing `door`: `(1 + distance + extra) × 2^visits × congestion × impasse`,
/// all taken for the room behind the door.
pub fn door_weight(s: &Situation<'_>, door: PassageId, extra: f64) -> f64 {
    let head = s.head(door);
    let visits = s.memory.visits(head).min(64) as i32;
    let impasse = if s.memory.is_known_impasse(s.graph, head) {
        KNOWN_IMPASSE_FACTOR
    } else {
        1.0
    };
    (1.0 + s.door_distance(door) + extra)
        * 2f64.powi(visits)
        * s.occupancy.congestion(head)
        * impasse
}

/// Visible door of least `door_weight`, with `extra` added per door.
pub(crate) fn cheapest_door<F>(s: &Situation<'_>, extra: F) -> Option<PassageId>
where
    F: Fn(PassageId) -> f64,
{
    s.doors
        .iter()
        .map(|&d| (d, door_weight(s, d, extra(d))))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(d, _)| d)
}

/// Wander through the least visited, least crowded doors.
#[derive(Clone, Debug, Default)]
pub struct Exploring;

impl NavigationStrategy for Exploring {
    fn in_new_room(&mut self, s: &Situation<'_>) -> Decision {
        match cheapest_door(s, |_| 0.0) {
            Some(d) => Decision::CrossDoor(d),
            None => Decision::Stop,
        }
    }
}

/// Explore, but head for any destination seen in the current room or behind a
/// visible door.
#[derive(Clone, Debug)]
pub struct GoalOrientedExploration {
    destinations: Vec<Vec2>,
    explore: Exploring,
}

impl GoalOrientedExploration {
    pub fn new(destinations: Vec<Vec2>) -> Result<Self, NavError> {
        if destinations.is_empty() {
            return Err(NavError::NoDestinations);
        }
        Ok(Self {
            destinations,
            explore: Exploring,
        })
    }

    #[inline]
    pub fn destinations(&self) -> &[Vec2] {
        &self.destinations
    }

    /// A destination in sight, if any: the nearest one in the current room,
    /// else the door into a room holding one, cheapest by distance × congestion.
    pub fn divert(&self, s: &Situation<'_>) -> Option<Decision> {
        let here = self
            .destinations
            .iter()
            .copied()
            .filter(|&d| s.in_current_room(d))
            .min_by(|a, b| (a - s.position).norm().total_cmp(&(b - s.position).norm()));
        if let Some(d) = here {
            trace!(room = s.room.0, x = d.x, y = d.y, "destination_in_room");
            return Some(Decision::MoveToFinal(d));
        }
        s.doors
            .iter()
            .copied()
            .filter(|&door| {
                let head = s.graph.room(s.head(door));
                self.destinations
                    .iter()
                    .any(|&d| head.contains_boundary_included(d))
            })
            .map(|door| {
                let cost = s.door_distance(door) * s.occupancy.congestion(s.head(door));
                (door, cost)
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(door, _)| Decision::CrossDoor(door))
    }
}

impl NavigationStrategy for GoalOrientedExploration {
    fn in_new_room(&mut self, s: &Situation<'_>) -> Decision {
        match self.divert(s) {
            Some(d) => d,
            None => self.explore.in_new_room(s),
        }
    }
}
