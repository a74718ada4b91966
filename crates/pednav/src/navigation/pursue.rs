//! Direct pursuit of a destination point, fixed or changeable at runtime.

use super::explore::cheapest_door;
use super::strategy::{Decision, NavigationStrategy, Situation};
use crate::geom2::Vec2;

/// Head for `destination` without consulting the cognitive map: walk to it if
/// it is in the current room, else take the door that is cheapest counting
/// the remaining straight-line distance.
#[derive(Clone, Debug)]
pub struct Pursuing {
    destination: Vec2,
}

impl Pursuing {
    pub fn new(destination: Vec2) -> Self {
        Self { destination }
    }

    #[inline]
    pub fn destination(&self) -> Vec2 {
        self.destination
    }
}

impl NavigationStrategy for Pursuing {
    fn in_new_room(&mut self, s: &Situation<'_>) -> Decision {
        let target = self.destination;
        if s.in_current_room(target) {
            return Decision::MoveToFinal(target);
        }
        let beyond = |door| {
            s.graph
                .passage(door)
                .segment
                .distance_to(target)
        };
        match cheapest_door(s, beyond) {
            Some(door) => Decision::CrossDoor(door),
            // nothing to cross: go straight and let the motion layer cope
            None => Decision::MoveToFinal(target),
        }
    }
}

/// `Pursuing` whose destination may change during the run.
#[derive(Clone, Debug)]
pub struct DynamicPursuing {
    pursue: Pursuing,
}

impl DynamicPursuing {
    pub fn new(destination: Vec2) -> Self {
        Self {
            pursue: Pursuing::new(destination),
        }
    }

    #[inline]
    pub fn destination(&self) -> Vec2 {
        self.pursue.destination()
    }

    pub fn set_destination(&mut self, destination: Vec2) {
        self.pursue = Pursuing::new(destination);
    }
}

impl NavigationStrategy for DynamicPursuing {
    fn in_new_room(&mut self, s: &Situation<'_>) -> Decision {
        self.pursue.in_new_room(s)
    }
}
