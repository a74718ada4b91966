//! Shared fixtures for unit tests.

use nalgebra::vector;

use crate::geom2::{ConvexPolygon, Segment};
use crate::mesh::{NavigationGraph, Passage, RoomId};

/// `n` 5×5 rooms in a row along x, each linked both ways to its neighbours.
///
/// Passage `2k` leads from room `k` to room `k + 1`, passage `2k + 1` back.
pub(crate) fn corridor(n: usize) -> NavigationGraph {
    let rooms: Vec<ConvexPolygon> = (0..n)
        .map(|k| ConvexPolygon::rectangle(vector![5.0 * k as f64, 0.0], 5.0, 5.0).unwrap())
        .collect();
    let mut passages = Vec::new();
    for k in 0..n.saturating_sub(1) {
        let x = 5.0 * (k + 1) as f64;
        passages.push(Passage {
            tail: RoomId(k),
            head: RoomId(k + 1),
            segment: Segment::new(vector![x, 0.0], vector![x, 5.0]),
            normal: vector![1.0, 0.0],
        });
        passages.push(Passage {
            tail: RoomId(k + 1),
            head: RoomId(k),
            segment: Segment::new(vector![x, 5.0], vector![x, 0.0]),
            normal: vector![-1.0, 0.0],
        });
    }
    NavigationGraph::new(rooms, passages)
}
