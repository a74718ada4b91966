//! Navigation graph: rooms and directed passages.

use std::collections::VecDeque;

use crate::geom2::{ConvexPolygon, Segment, Vec2};

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassageId(pub usize);

/// Directed passage `tail → head`.
///
/// `segment` lies on the tail room's boundary; `normal` is the tail room's
/// outward unit normal there, i.e. the crossing direction.
#[derive(Clone, Debug, PartialEq)]
pub struct Passage {
    pub tail: RoomId,
    pub head: RoomId,
    pub segment: Segment,
    pub normal: Vec2,
}

/// Immutable graph of rooms and passages, with per-room adjacency lists.
#[derive(Clone, Debug, Default)]
pub struct NavigationGraph {
    rooms: Vec<ConvexPolygon>,
    passages: Vec<Passage>,
    outgoing: Vec<Vec<PassageId>>, // passage ids leaving room k
    incoming: Vec<Vec<PassageId>>, // passage ids entering room k
}

impl NavigationGraph {
    /// Panics if a passage refers to a room that does not exist.
    pub fn new(rooms: Vec<ConvexPolygon>, passages: Vec<Passage>) -> Self {
        let mut outgoing = vec![Vec::new(); rooms.len()];
        let mut incoming = vec![Vec::new(); rooms.len()];
        for (k, p) in passages.iter().enumerate() {
            assert!(
                p.tail.0 < rooms.len() && p.head.0 < rooms.len(),
                "passage {k} ({:?} -> {:?}) refers to a missing room; graph has {} rooms",
                p.tail,
                p.head,
                rooms.len()
            );
            outgoing[p.tail.0].push(PassageId(k));
            incoming[p.head.0].push(PassageId(k));
        }
        Self {
            rooms,
            passages,
            outgoing,
            incoming,
        }
    }

    #[inline]
    pub fn rooms(&self) -> &[ConvexPolygon] {
        &self.rooms
    }

    #[inline]
    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    pub fn room_ids(&self) -> impl Iterator<Item = RoomId> {
        (0..self.rooms.len()).map(RoomId)
    }

    #[inline]
    pub fn room(&self, id: RoomId) -> &ConvexPolygon {
        &self.rooms[id.0]
    }

    #[inline]
    pub fn passage(&self, id: PassageId) -> &Passage {
        &self.passages[id.0]
    }

    #[inline]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// First room containing `p` (boundary included).
    pub fn room_containing(&self, p: Vec2) -> Option<RoomId> {
        self.rooms
            .iter()
            .position(|r| r.contains_boundary_included(p))
            .map(RoomId)
    }

    #[inline]
    pub fn outgoing(&self, room: RoomId) -> &[PassageId] {
        &self.outgoing[room.0]
    }

    #[inline]
    pub fn incoming(&self, room: RoomId) -> &[PassageId] {
        &self.incoming[room.0]
    }

    /// Rooms reachable through one passage, without duplicates.
    pub fn successors(&self, room: RoomId) -> Vec<RoomId> {
        let mut out: Vec<RoomId> = self.outgoing[room.0]
            .iter()
            .map(|&p| self.passages[p.0].head)
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Rooms with a passage into `room`, without duplicates.
    pub fn predecessors(&self, room: RoomId) -> Vec<RoomId> {
        let mut out: Vec<RoomId> = self.incoming[room.0]
            .iter()
            .map(|&p| self.passages[p.0].tail)
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Passages from `tail` to `head`.
    pub fn passages_between(&self, tail: RoomId, head: RoomId) -> Vec<PassageId> {
        self.outgoing[tail.0]
            .iter()
            .copied()
            .filter(|&p| self.passages[p.0].head == head)
            .collect()
    }

    /// A room with at most one way out.
    #[inline]
    pub fn is_impasse(&self, room: RoomId) -> bool {
        self.successors(room).len() <= 1
    }

    /// Breadth-first passage counts from `from` to every room (`None` if unreachable).
    pub fn hop_distances_from(&self, from: RoomId) -> Vec<Option<usize>> {
        let mut dist = vec![None; self.rooms.len()];
        dist[from.0] = Some(0);
        let mut queue = VecDeque::from([from]);
        while let Some(r) = queue.pop_front() {
            let d = dist[r.0].unwrap_or(0);
            for &p in &self.outgoing[r.0] {
                let h = self.passages[p.0].head;
                if dist[h.0].is_none() {
                    dist[h.0] = Some(d + 1);
                    queue.push_back(h);
                }
            }
        }
        dist
    }

    /// Minimum number of passages from `from` to `to`.
    pub fn hop_distance(&self, from: RoomId, to: RoomId) -> Option<usize> {
        self.hop_distances_from(from)[to.0]
    }

    #[inline]
    pub fn is_reachable(&self, from: RoomId, to: RoomId) -> bool {
        self.hop_distance(from, to).is_some()
    }
}
