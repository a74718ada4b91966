//! Navigation-graph synthesis from an obstacle field.
//!
//! Purpose
//! - Turn a rectangular bound, convex obstacles and seed positions into a graph
//!   of convex rooms connected by directed passages.
//!
//! Pipeline
//! 1. Plant a small square per seed (drop seeds on obstacles or out of bounds).
//! 2. Grow all seeds edge by edge; obstacles and other seeds block. An edge that
//!    pokes a single vertex into one obstacle with an oblique side bends around it.
//! 3. Push every axis-aligned edge toward its neighbours; an edge that strikes
//!    exactly one room emits passages on the unoccluded overlap of the facing
//!    edges. Zero-length pieces are dropped.
//!
//! Conventions
//! - A passage is directed: it lies on the tail room's edge and crosses along the
//!   tail room's outward normal. Two facing rooms get one passage per direction
//!   and per unoccluded piece.
//!
//! Code cross-refs: `geom2::ExtendablePolygon`, `cognitive::CognitiveMap`

mod crossings;
mod graph;
mod grow;

pub use graph::{NavigationGraph, Passage, PassageId, RoomId};

use tracing::debug;

use crate::config::MeshCfg;
use crate::geom2::{ConvexPolygon, ExtendablePolygon, Vec2};

/// Build the navigation graph for `bounds` (expected to be a rectangle).
///
/// Panics if `cfg.unit` or `cfg.seed_side` is not positive.
pub fn generate_navigation_graph(
    bounds: &ConvexPolygon,
    obstacles: &[ConvexPolygon],
    seeds: &[Vec2],
    cfg: &MeshCfg,
) -> NavigationGraph {
    assert!(
        cfg.unit > 0.0 && cfg.seed_side > 0.0,
        "growth unit and seed side must be positive, got {cfg:?}"
    );
    let mut grown = grow::plant(bounds, obstacles, seeds, cfg);
    let planted = grown.len();
    let rounds = grow::grow(&mut grown, obstacles, bounds, cfg);
    let rooms: Vec<ConvexPolygon> = grown
        .into_iter()
        .map(ExtendablePolygon::into_polygon)
        .collect();
    let passages = crossings::detect(&rooms, obstacles, bounds, cfg);
    debug!(
        seeds = seeds.len(),
        planted,
        rounds,
        passages = passages.len(),
        "navigation_graph_generated"
    );
    NavigationGraph::new(rooms, passages)
}

#[cfg(test)]
mod tests;
