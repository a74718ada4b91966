//! Landmark sampling inside rooms.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::config::CognitiveCfg;
use crate::geom2::{ConvexPolygon, Ellipse, Vec2};
use crate::mesh::{NavigationGraph, RoomId};

/// Upper bound on shrink attempts for one candidate.
const MAX_SHRINKS: usize = 64;

/// A memorable sub-area of one room.
#[derive(Clone, Debug, PartialEq)]
pub struct Landmark {
    pub room: RoomId,
    pub shape: Ellipse,
}

impl Landmark {
    #[inline]
    pub fn centroid(&self) -> Vec2 {
        self.shape.centroid()
    }
}

/// Sample at most one landmark per room for an agent of the given diameter.
///
/// Rooms not wider than `cfg.min_room_diameter_factor × agent_diameter` are
/// skipped; the rest are shuffled with `rng` and the first
/// `floor(knowledge_degree × n)` receive a landmark.
///
/// Panics if `knowledge_degree` is outside `[0, 1]` or `cfg.shrink_factor`
/// outside `(0, 1)`.
pub fn sample_landmarks<R: Rng + ?Sized>(
    graph: &NavigationGraph,
    agent_diameter: f64,
    knowledge_degree: f64,
    cfg: &CognitiveCfg,
    rng: &mut R,
) -> Vec<Landmark> {
    assert!(
        (0.0..=1.0).contains(&knowledge_degree),
        "knowledge degree must lie in [0, 1], got {knowledge_degree}"
    );
    assert!(
        cfg.shrink_factor > 0.0 && cfg.shrink_factor < 1.0,
        "shrink factor must lie in (0, 1), got {}",
        cfg.shrink_factor
    );
    let threshold = cfg.min_room_diameter_factor * agent_diameter;
    let mut eligible: Vec<RoomId> = graph
        .room_ids()
        .filter(|&r| graph.room(r).diameter() > threshold)
        .collect();
    eligible.shuffle(rng);
    let keep = (knowledge_degree * eligible.len() as f64).floor() as usize;
    eligible
        .into_iter()
        .take(keep)
        .filter_map(|room| {
            let shape = place(graph.room(room), cfg, &mut *rng)?;
            let at = shape.centroid();
            trace!(room = room.0, x = at.x, y = at.y, "landmark_placed");
            Some(Landmark { room, shape })
        })
        .collect()
}

/// Random ellipse inside `room`, shrunk until it fits.
fn place<R: Rng + ?Sized>(room: &ConvexPolygon, cfg: &CognitiveCfg, rng: &mut R) -> Option<Ellipse> {
    let c = room.centroid();
    let v = room.vertex(rng.gen_range(0..room.vertex_count()));
    // strictly interior: less than halfway from the centroid to a vertex
    let center = c + (v - c) * rng.gen_range(0.0..0.5);
    let d = room.diameter();
    let mut span = || rng.gen_range(cfg.landmark_min_span..=cfg.landmark_max_span) * d / 2.0;
    let (sx, sy) = (span(), span());
    let mut shape = Ellipse::new(center, sx, sy);
    for _ in 0..MAX_SHRINKS {
        if shape.is_inside(room) {
            return Some(shape);
        }
        shape = shape.scaled(cfg.shrink_factor);
    }
    None
}
