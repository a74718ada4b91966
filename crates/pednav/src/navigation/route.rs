//! Route following and destination reaching on top of the cognitive map.
//!
//! Reach rules
//! - `InRoom`: a waypoint is reached once the current room contains it.
//! - `InRoomOrAdjacent`: also when a visible door leads into a room containing
//!   it (routes planned on landmark centroids are approximate).
//! - The final waypoint is never reached by a rule; it is walked to.

use tracing::debug;

use super::explore::{Exploring, GoalOrientedExploration};
use super::pursue::DynamicPursuing;
use super::strategy::{Decision, NavigationStrategy, Situation};
use crate::error::NavError;
use crate::geom2::Vec2;
use crate::mesh::RoomId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReachRule {
    InRoom,
    InRoomOrAdjacent,
}

impl ReachRule {
    pub fn is_reached(self, s: &Situation<'_>, waypoint: Vec2) -> bool {
        if s.in_current_room(waypoint) {
            return true;
        }
        match self {
            ReachRule::InRoom => false,
            ReachRule::InRoomOrAdjacent => s.doors.iter().any(|&d| {
                s.graph
                    .room(s.head(d))
                    .contains_boundary_included(waypoint)
            }),
        }
    }
}

/// Walk an ordered list of waypoints, skipping ahead past every waypoint the
/// current room already covers.
#[derive(Clone, Debug)]
pub struct RouteFollowing {
    route: Vec<Vec2>,
    next: usize,
    rule: ReachRule,
    pursue: DynamicPursuing,
}

impl RouteFollowing {
    pub fn new(route: Vec<Vec2>, rule: ReachRule) -> Result<Self, NavError> {
        let first = *route.first().ok_or(NavError::EmptyRoute)?;
        Ok(Self {
            route,
            next: 0,
            rule,
            pursue: DynamicPursuing::new(first),
        })
    }

    #[inline]
    pub fn route(&self) -> &[Vec2] {
        &self.route
    }

    /// Index of the waypoint currently pursued.
    #[inline]
    pub fn next_index(&self) -> usize {
        self.next
    }

    #[inline]
    pub fn rule(&self) -> ReachRule {
        self.rule
    }

    #[inline]
    pub fn is_reached(&self, s: &Situation<'_>, waypoint: Vec2) -> bool {
        self.rule.is_reached(s, waypoint)
    }

    /// One past the farthest reached waypoint in the remaining route (the final
    /// waypoint excluded), or the current index if none is reached.
    pub fn index_of_next_waypoint(&self, s: &Situation<'_>) -> usize {
        let last = self.route.len() - 1;
        (self.next..last)
            .rev()
            .find(|&k| self.is_reached(s, self.route[k]))
            .map_or(self.next, |k| k + 1)
    }

    fn advance(&mut self, s: &Situation<'_>) -> bool {
        let next = self.index_of_next_waypoint(s);
        let moved = next != self.next;
        if moved {
            debug!(from = self.next, to = next, room = s.room.0, "route_skip_ahead");
            self.next = next;
        }
        self.pursue.set_destination(self.route[self.next]);
        moved
    }
}

impl NavigationStrategy for RouteFollowing {
    fn in_new_room(&mut self, s: &Situation<'_>) -> Decision {
        self.advance(s);
        self.pursue.in_new_room(s)
    }

    /// Go back toward the expected room unless this room already lets the route advance.
    fn in_unexpected_new_room(
        &mut self,
        s: &Situation<'_>,
        _previous: RoomId,
        expected: RoomId,
    ) -> Decision {
        if self.advance(s) {
            return self.pursue.in_new_room(s);
        }
        let back = s
            .doors
            .iter()
            .copied()
            .filter(|&d| s.head(d) == expected)
            .min_by(|&a, &b| s.door_distance(a).total_cmp(&s.door_distance(b)));
        match back {
            Some(door) => Decision::CrossDoor(door),
            None => self.pursue.in_new_room(s),
        }
    }
}

/// Plan a route over the cognitive map toward the best known destination,
/// lazily on the first room entry.
#[derive(Clone, Debug)]
pub struct KnownDestinationReaching {
    destinations: Vec<Vec2>,
    follow: Option<RouteFollowing>,
}

impl KnownDestinationReaching {
    pub fn new(destinations: Vec<Vec2>) -> Result<Self, NavError> {
        if destinations.is_empty() {
            return Err(NavError::NoDestinations);
        }
        Ok(Self {
            destinations,
            follow: None,
        })
    }

    #[inline]
    pub fn destinations(&self) -> &[Vec2] {
        &self.destinations
    }

    /// The planned route, once the first room entry has happened.
    pub fn route(&self) -> Option<&[Vec2]> {
        self.follow.as_ref().map(|f| f.route())
    }

    #[inline]
    pub fn following(&self) -> Option<&RouteFollowing> {
        self.follow.as_ref()
    }

    fn follower(&mut self, s: &Situation<'_>) -> &mut RouteFollowing {
        let destinations = &self.destinations;
        self.follow.get_or_insert_with(|| {
            let route = plan(destinations, s);
            debug!(waypoints = route.len(), room = s.room.0, "route_planned");
            RouteFollowing {
                next: 0,
                rule: ReachRule::InRoomOrAdjacent,
                pursue: DynamicPursuing::new(route[0]),
                route,
            }
        })
    }
}

/// Landmark route toward the cheapest reachable destination, or the closest
/// destination alone when no landmark route starts nearer than it.
///
/// `destinations` must be non-empty.
pub fn plan(destinations: &[Vec2], s: &Situation<'_>) -> Vec<Vec2> {
    let pos = s.position;
    let (closest, closest_dist) = destinations
        .iter()
        .map(|&d| (d, (d - pos).norm()))
        .fold((pos, f64::INFINITY), |best, c| if c.1 < best.1 { c } else { best });
    let landmarks = s.map.landmarks();
    let start = s
        .map
        .closest_landmark(pos)
        .filter(|&k| (landmarks[k].centroid() - pos).norm() < closest_dist);
    let Some(start) = start else {
        return vec![closest];
    };
    destinations
        .iter()
        .filter_map(|&d| {
            let end = s.map.closest_landmark(d)?;
            let path = s.map.path(start, end)?;
            let mut route: Vec<Vec2> = path.iter().map(|&k| landmarks[k].centroid()).collect();
            route.push(d);
            Some((polyline_length(pos, &route), route))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, route)| route)
        .unwrap_or_else(|| vec![closest])
}

fn polyline_length(start: Vec2, points: &[Vec2]) -> f64 {
    let mut prev = start;
    let mut total = 0.0;
    for &p in points {
        total += (p - prev).norm();
        prev = p;
    }
    total
}

impl NavigationStrategy for KnownDestinationReaching {
    fn in_new_room(&mut self, s: &Situation<'_>) -> Decision {
        self.follower(s).in_new_room(s)
    }

    fn in_unexpected_new_room(
        &mut self,
        s: &Situation<'_>,
        previous: RoomId,
        expected: RoomId,
    ) -> Decision {
        self.follower(s).in_unexpected_new_room(s, previous, expected)
    }
}

/// Divert to any destination in sight; otherwise follow the planned route to a
/// known destination (or explore when none is known).
#[derive(Clone, Debug)]
pub struct DestinationReaching {
    goal: GoalOrientedExploration,
    known: Option<KnownDestinationReaching>,
    explore: Exploring,
}

impl DestinationReaching {
    pub fn new(known: Vec<Vec2>, unknown: Vec<Vec2>) -> Result<Self, NavError> {
        let all: Vec<Vec2> = known.iter().chain(unknown.iter()).copied().collect();
        let goal = GoalOrientedExploration::new(all)?;
        let known = if known.is_empty() {
            None
        } else {
            Some(KnownDestinationReaching::new(known)?)
        };
        Ok(Self {
            goal,
            known,
            explore: Exploring,
        })
    }

    pub fn known(&self) -> Option<&KnownDestinationReaching> {
        self.known.as_ref()
    }
}

impl NavigationStrategy for DestinationReaching {
    fn in_new_room(&mut self, s: &Situation<'_>) -> Decision {
        if let Some(d) = self.goal.divert(s) {
            return d;
        }
        match &mut self.known {
            Some(k) => k.in_new_room(s),
            None => self.explore.in_new_room(s),
        }
    }

    fn in_unexpected_new_room(
        &mut self,
        s: &Situation<'_>,
        previous: RoomId,
        expected: RoomId,
    ) -> Decision {
        if let Some(d) = self.goal.divert(s) {
            return d;
        }
        match &mut self.known {
            Some(k) => k.in_unexpected_new_room(s, previous, expected),
            None => self.explore.in_new_room(s),
        }
    }
}
