//! Passage detection between grown rooms.
//!
//! For every axis-aligned edge, a scratch copy of its room is pushed outward
//! until it strikes other rooms (obstacles and bounds are not blocking here).
//! Only a push that strikes exactly one room yields passages: that room's facing
//! edge is projected onto the shared axis, the parts hidden by obstacles standing
//! in the gap are cut away, and every remaining piece becomes one passage on the
//! probing room's edge. An edge that strikes several rooms in the same step gets
//! nothing; the struck rooms may still reach it with their own pushes. Oblique
//! adjacencies are never detected.

use tracing::trace;

use super::graph::{Passage, RoomId};
use crate::config::MeshCfg;
use crate::geom2::{Axis, ConvexPolygon, ExtendablePolygon, Interval, Segment, Vec2, EPS};

/// Tolerance on `|n_a + n_b|` for two edge normals to count as opposite.
const OPPOSITE_EPS: f64 = 1e-6;

pub(crate) fn detect(
    rooms: &[ConvexPolygon],
    obstacles: &[ConvexPolygon],
    bounds: &ConvexPolygon,
    cfg: &MeshCfg,
) -> Vec<Passage> {
    let mut passages = Vec::new();
    for (a, room) in rooms.iter().enumerate() {
        for i in 0..room.vertex_count() {
            if room.edge(i).axis().is_none() {
                continue;
            }
            let Some(b) = first_struck(rooms, a, i, bounds, cfg.unit) else {
                continue;
            };
            let found = facing_passages(rooms, a, i, b, obstacles);
            trace!(tail = a, head = b, edge = i, count = found.len(), "edge_struck_room");
            passages.extend(found);
        }
    }
    passages
}

/// The single room struck first when advancing edge `edge` of room `a` step
/// by step. `None` if the push leaves `bounds`, cannot advance, or strikes
/// several rooms at once.
fn first_struck(
    rooms: &[ConvexPolygon],
    a: usize,
    edge: usize,
    bounds: &ConvexPolygon,
    step: f64,
) -> Option<usize> {
    // scratch copy; the room itself is never touched
    let mut scratch = ExtendablePolygon::new(rooms[a].clone());
    loop {
        if !scratch.advance_edge(edge, step) {
            return None;
        }
        let mut struck = rooms
            .iter()
            .enumerate()
            .filter(|&(b, r)| b != a && r.intersects(scratch.polygon()))
            .map(|(b, _)| b);
        match (struck.next(), struck.next()) {
            (Some(b), None) => return Some(b),
            (Some(_), Some(_)) => {
                trace!(room = a, edge, "edge_struck_several_rooms");
                return None;
            }
            (None, _) => {}
        }
        if !bounds.contains_polygon(scratch.polygon()) {
            return None;
        }
    }
}

/// Passages from room `a` (through its edge `edge`) to room `b`.
fn facing_passages(
    rooms: &[ConvexPolygon],
    a: usize,
    edge: usize,
    b: usize,
    obstacles: &[ConvexPolygon],
) -> Vec<Passage> {
    let (room_a, room_b) = (&rooms[a], &rooms[b]);
    let e = room_a.edge(edge);
    let Some(axis) = e.axis() else {
        return Vec::new();
    };
    let n = room_a.outward_normal(edge);
    let across = axis.other().component(e.first);

    let Some(f) = (0..room_b.vertex_count()).find_map(|j| {
        let f = room_b.edge(j);
        let facing = f.axis() == Some(axis)
            && (room_b.outward_normal(j) + n).norm() <= OPPOSITE_EPS
            && n.dot(&(f.first - e.first)) >= -EPS;
        facing.then_some(f)
    }) else {
        return Vec::new();
    };

    let Some(overlap) = e.interval(axis).intersect(&f.interval(axis)) else {
        return Vec::new();
    };
    if overlap.is_degenerate() {
        return Vec::new();
    }
    let cuts: Vec<Interval> = obstacles
        .iter()
        .filter_map(|o| occlusion(o, e.first, f.first, n, axis))
        .collect();

    overlap
        .subtract_all(&cuts)
        .into_iter()
        .filter(|piece| !piece.is_degenerate())
        .map(|piece| {
            let s = Segment::new(axis.point(piece.lo, across), axis.point(piece.hi, across));
            let segment = if s.vector().dot(&e.vector()) < 0.0 {
                s.reversed()
            } else {
                s
            };
            Passage {
                tail: RoomId(a),
                head: RoomId(b),
                segment,
                normal: n,
            }
        })
        .collect()
}

/// Shadow of `obstacle` on the shared axis, restricted to the gap between the
/// facing edges through `near` and `far` (crossing direction `n`).
fn occlusion(
    obstacle: &ConvexPolygon,
    near: Vec2,
    far: Vec2,
    n: Vec2,
    axis: Axis,
) -> Option<Interval> {
    let in_gap = obstacle
        .clip_to_halfplane(near, -n)?
        .clip_to_halfplane(far, n)?;
    if in_gap.area() <= EPS {
        return None;
    }
    let (lo, hi) = in_gap.bounding_box();
    Some(Interval::new(axis.component(lo), axis.component(hi)))
}
