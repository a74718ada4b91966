//! Plant and grow seed polygons.
//!
//! Growth is greedy and monotone: each edge advances by a fixed unit until its
//! first failed advance, after which it never moves again. Coverage of the
//! walkable area is therefore approximate.

use tracing::{debug, trace};

use crate::config::MeshCfg;
use crate::geom2::{ConvexPolygon, ExtendablePolygon, Vec2};

/// One square per seed position; seeds that leave `bounds`, touch the interior
/// of an obstacle, or overlap an earlier seed are dropped.
pub(crate) fn plant(
    bounds: &ConvexPolygon,
    obstacles: &[ConvexPolygon],
    positions: &[Vec2],
    cfg: &MeshCfg,
) -> Vec<ExtendablePolygon> {
    let mut seeds: Vec<ExtendablePolygon> = Vec::with_capacity(positions.len());
    for (k, &p) in positions.iter().enumerate() {
        let Some(square) = ConvexPolygon::square(p, cfg.seed_side) else {
            debug!(seed = k, x = p.x, y = p.y, "seed_dropped_invalid_square");
            continue;
        };
        if !bounds.contains_polygon(&square) {
            debug!(seed = k, x = p.x, y = p.y, "seed_dropped_out_of_bounds");
            continue;
        }
        if obstacles.iter().any(|o| o.intersects(&square)) {
            debug!(seed = k, x = p.x, y = p.y, "seed_dropped_on_obstacle");
            continue;
        }
        if seeds.iter().any(|s| s.polygon().intersects(&square)) {
            debug!(seed = k, x = p.x, y = p.y, "seed_dropped_overlapping_seed");
            continue;
        }
        seeds.push(ExtendablePolygon::new(square));
    }
    seeds
}

/// Grow all seeds round by round until no edge moves. Returns the number of
/// rounds in which something moved.
pub(crate) fn grow(
    seeds: &mut [ExtendablePolygon],
    obstacles: &[ConvexPolygon],
    bounds: &ConvexPolygon,
    cfg: &MeshCfg,
) -> usize {
    let mut rounds = 0;
    loop {
        let mut any = false;
        for i in 0..seeds.len() {
            let (before, rest) = seeds.split_at_mut(i);
            let Some((current, after)) = rest.split_first_mut() else {
                break;
            };
            if !current.can_grow() {
                continue;
            }
            let others: Vec<&ConvexPolygon> = before
                .iter()
                .chain(after.iter())
                .map(|s| s.polygon())
                .collect();
            if current.extend(cfg.unit, obstacles, &others, bounds) {
                any = true;
                trace!(
                    round = rounds,
                    seed = i,
                    vertices = current.polygon().vertex_count(),
                    "seed_extended"
                );
            }
        }
        if !any {
            break;
        }
        rounds += 1;
    }
    debug!(rounds, seeds = seeds.len(), "growth_finished");
    rounds
}
