//! Minimum spanning structure over an agent's landmarks.

use std::collections::VecDeque;

use tracing::debug;

use super::landmarks::Landmark;
use crate::geom2::Vec2;
use crate::mesh::NavigationGraph;

/// Tree edge between landmarks `a` and `b` (indices into `landmarks()`),
/// weighted by the room-hop distance of their rooms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapEdge {
    pub a: usize,
    pub b: usize,
    pub hops: usize,
}

/// Immutable landmark tree (a forest when the rooms are not all connected).
#[derive(Clone, Debug, Default)]
pub struct CognitiveMap {
    landmarks: Vec<Landmark>,
    edges: Vec<MapEdge>,
    adjacency: Vec<Vec<usize>>, // neighbour landmark indices
}

impl CognitiveMap {
    /// Prim's construction over the complete landmark graph.
    ///
    /// The weight of a pair is the smaller of the two directed hop distances;
    /// pairs with no path either way have no edge.
    pub fn build(graph: &NavigationGraph, landmarks: Vec<Landmark>) -> Self {
        let n = landmarks.len();
        let hops_from: Vec<Vec<Option<usize>>> = landmarks
            .iter()
            .map(|l| graph.hop_distances_from(l.room))
            .collect();
        let weight = |i: usize, j: usize| -> Option<usize> {
            let there = hops_from[i][landmarks[j].room.0];
            let back = hops_from[j][landmarks[i].room.0];
            match (there, back) {
                (Some(x), Some(y)) => Some(x.min(y)),
                (x, y) => x.or(y),
            }
        };

        let mut in_tree = vec![false; n];
        let mut best: Vec<Option<(usize, usize)>> = vec![None; n]; // (hops, parent)
        let mut edges = Vec::with_capacity(n.saturating_sub(1));
        for _ in 0..n {
            let Some(next) = (0..n)
                .filter(|&k| !in_tree[k])
                .min_by_key(|&k| best[k].map_or(usize::MAX, |(h, _)| h))
            else {
                break;
            };
            in_tree[next] = true;
            if let Some((hops, parent)) = best[next] {
                edges.push(MapEdge {
                    a: parent,
                    b: next,
                    hops,
                });
            }
            for k in (0..n).filter(|&k| !in_tree[k]) {
                if let Some(w) = weight(next, k) {
                    if best[k].map_or(true, |(h, _)| w < h) {
                        best[k] = Some((w, next));
                    }
                }
            }
        }

        let mut adjacency = vec![Vec::new(); n];
        for e in &edges {
            adjacency[e.a].push(e.b);
            adjacency[e.b].push(e.a);
        }
        debug!(landmarks = n, edges = edges.len(), "cognitive_map_built");
        Self {
            landmarks,
            edges,
            adjacency,
        }
    }

    #[inline]
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    #[inline]
    pub fn edges(&self) -> &[MapEdge] {
        &self.edges
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Landmark whose centroid is nearest to `p`.
    pub fn closest_landmark(&self, p: Vec2) -> Option<usize> {
        self.landmarks
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (a.centroid() - p)
                    .norm()
                    .total_cmp(&(b.centroid() - p).norm())
            })
            .map(|(k, _)| k)
    }

    /// The unique tree path from landmark `from` to landmark `to`, both included.
    /// `None` if they lie in different trees.
    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        let n = self.landmarks.len();
        if from >= n || to >= n {
            return None;
        }
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut seen = vec![false; n];
        seen[from] = true;
        let mut queue = VecDeque::from([from]);
        while let Some(k) = queue.pop_front() {
            if k == to {
                break;
            }
            for &m in &self.adjacency[k] {
                if !seen[m] {
                    seen[m] = true;
                    parent[m] = Some(k);
                    queue.push_back(m);
                }
            }
        }
        if !seen[to] {
            return None;
        }
        let mut out = vec![to];
        let mut cur = to;
        while let Some(p) = parent[cur] {
            out.push(p);
            cur = p;
        }
        out.reverse();
        Some(out)
    }
}
