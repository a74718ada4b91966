//! Volatile memory: which rooms an agent knows and how often it entered them.

use std::collections::{HashMap, HashSet};

use crate::mesh::{NavigationGraph, RoomId};

/// Two explicit records: the set of known rooms survives `reset`, the visit
/// counts do not.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VolatileMemory {
    known: HashSet<RoomId>,
    visits: HashMap<RoomId, u32>,
}

impl VolatileMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one entry into `room`.
    pub fn visit(&mut self, room: RoomId) {
        self.known.insert(room);
        *self.visits.entry(room).or_insert(0) += 1;
    }

    #[inline]
    pub fn visits(&self, room: RoomId) -> u32 {
        self.visits.get(&room).copied().unwrap_or(0)
    }

    #[inline]
    pub fn is_known(&self, room: RoomId) -> bool {
        self.known.contains(&room)
    }

    pub fn known(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.known.iter().copied()
    }

    /// A room the agent has been in and found to be a dead end.
    pub fn is_known_impasse(&self, graph: &NavigationGraph, room: RoomId) -> bool {
        self.is_known(room) && graph.is_impasse(room)
    }

    /// Zero every visit count; known rooms stay known.
    pub fn reset(&mut self) {
        self.visits.values_mut().for_each(|v| *v = 0);
    }
}
