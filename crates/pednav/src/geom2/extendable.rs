//! Convex polygons that grow edge by edge (mesh synthesis seeds).
//!
//! Purpose
//! - Wrap a `ConvexPolygon` with a per-edge growth cache: a "still growable"
//!   flag, the cached outward normal, and one growth direction per endpoint.
//! - Advance edges outward by a fixed step; when an edge would poke a single
//!   vertex into one obstacle with an oblique side, insert a vertex and let the
//!   neighbouring edges slide along that side instead of stopping.
//!
//! Cache policy
//! - Each cache entry remembers the edge slope it was computed for. An entry is
//!   valid iff the current edge still has that slope (`EdgeGrowth::is_valid_for`);
//!   stale entries are recomputed from the edge before use, which resets the
//!   growth directions to the normal. Advancing an edge keeps its slope, so
//!   oblique growth directions survive repeated `extend` calls.
//!
//! Code cross-refs: `convex::ConvexPolygon`, `crate::mesh::grow`

use super::convex::ConvexPolygon;
use super::segment::{Intersection, Segment};
use super::types::{cross, Vec2, EPS};

/// Minimum |d·n| for a growth direction to be usable.
const MIN_DIRECTION_DOT: f64 = 1e-6;

/// Growth cache for one edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeGrowth {
    pub growable: bool,
    /// Unit direction of the edge this entry was computed for.
    slope: Vec2,
    pub normal: Vec2,
    /// Growth directions for the first and second endpoint.
    pub directions: (Vec2, Vec2),
}

impl EdgeGrowth {
    fn fresh(edge: &Segment, normal: Vec2, growable: bool) -> Self {
        Self {
            growable,
            slope: edge.vector().normalize(),
            normal,
            directions: (normal, normal),
        }
    }

    /// Pure function of the current edge slope.
    #[inline]
    pub fn is_valid_for(&self, edge: &Segment) -> bool {
        !edge.is_degenerate()
            && cross(self.slope, edge.vector().normalize()).abs() <= EPS
            && self.slope.dot(&edge.vector()) > 0.0
    }
}

/// Which endpoint of the advancing edge intruded an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Endpoint {
    First,
    Second,
}

/// Outcome of one edge advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Advance {
    Moved,
    /// A vertex was inserted to follow an oblique obstacle side.
    Hugged,
    Blocked,
}

/// Convex polygon plus per-edge growth state.
#[derive(Clone, Debug)]
pub struct ExtendablePolygon {
    polygon: ConvexPolygon,
    growth: Vec<EdgeGrowth>,
}

impl ExtendablePolygon {
    pub fn new(polygon: ConvexPolygon) -> Self {
        let growth = (0..polygon.vertex_count())
            .map(|i| EdgeGrowth::fresh(&polygon.edge(i), polygon.outward_normal(i), true))
            .collect();
        Self { polygon, growth }
    }

    #[inline]
    pub fn polygon(&self) -> &ConvexPolygon {
        &self.polygon
    }

    #[inline]
    pub fn into_polygon(self) -> ConvexPolygon {
        self.polygon
    }

    #[inline]
    pub fn is_growable(&self, edge: usize) -> bool {
        self.growth[edge].growable
    }

    /// Some edge can still advance.
    pub fn can_grow(&self) -> bool {
        self.growth.iter().any(|g| g.growable)
    }

    /// Growth cache for `edge`, refreshed if the edge slope changed.
    pub fn growth(&mut self, edge: usize) -> EdgeGrowth {
        self.refresh(edge);
        self.growth[edge]
    }

    fn refresh(&mut self, edge: usize) {
        let e = self.polygon.edge(edge);
        if !self.growth[edge].is_valid_for(&e) {
            let growable = self.growth[edge].growable;
            self.growth[edge] = EdgeGrowth::fresh(&e, self.polygon.outward_normal(edge), growable);
        }
    }

    /// Insert a vertex; the new edge inherits the growable flag of the split one.
    pub fn add_vertex(&mut self, index: usize, p: Vec2) -> bool {
        if !self.polygon.add_vertex(index, p) {
            return false;
        }
        let n = self.growth.len();
        let inherited = self.growth[(index + n - 1) % n];
        self.growth.insert(index, inherited);
        true
    }

    /// Remove a vertex; the merged edge keeps the cache entry of the edge before it.
    pub fn remove_vertex(&mut self, index: usize) -> bool {
        if !self.polygon.remove_vertex(index) {
            return false;
        }
        self.growth.remove(index);
        true
    }

    pub fn move_vertex(&mut self, index: usize, p: Vec2) -> bool {
        self.polygon.move_vertex(index, p)
    }

    pub fn replace_edge(&mut self, index: usize, edge: Segment) -> bool {
        self.polygon.replace_edge(index, edge)
    }

    /// Edge `index` translated so that it advances by `step` along its normal,
    /// each endpoint moving along its own growth direction.
    pub fn advanced_edge(&mut self, index: usize, step: f64) -> Option<Segment> {
        let g = self.growth(index);
        let (d0, d1) = g.directions;
        let (k0, k1) = (d0.dot(&g.normal), d1.dot(&g.normal));
        if k0 < MIN_DIRECTION_DOT || k1 < MIN_DIRECTION_DOT {
            return None;
        }
        let e = self.polygon.edge(index);
        Some(Segment::new(
            e.first + d0 * (step / k0),
            e.second + d1 * (step / k1),
        ))
    }

    /// Try to advance edge `index` by `step` with no blocking shapes other than
    /// convexity. For callers that check collisions themselves.
    pub fn advance_edge(&mut self, index: usize, step: f64) -> bool {
        match self.advanced_edge(index, step) {
            Some(e) => self.polygon.replace_edge(index, e),
            None => false,
        }
    }

    /// Advance every growable edge once.
    ///
    /// An edge whose advance would leave `bounds`, break convexity, or overlap
    /// a shape in `obstacles` or `seeds` becomes permanently non-growable,
    /// unless the single-vertex oblique intrusion case applies.
    /// Returns whether any edge moved.
    pub fn extend(
        &mut self,
        step: f64,
        obstacles: &[ConvexPolygon],
        seeds: &[&ConvexPolygon],
        bounds: &ConvexPolygon,
    ) -> bool {
        let mut extended = false;
        let mut i = 0;
        while i < self.polygon.vertex_count() {
            if self.growth[i].growable {
                match self.try_advance(i, step, obstacles, seeds, bounds) {
                    Advance::Moved => extended = true,
                    Advance::Hugged => {
                        extended = true;
                        // skip the inserted edge that lies on the obstacle
                        i += 1;
                    }
                    Advance::Blocked => self.growth[i].growable = false,
                }
            }
            i += 1;
        }
        extended
    }

    fn try_advance(
        &mut self,
        i: usize,
        step: f64,
        obstacles: &[ConvexPolygon],
        seeds: &[&ConvexPolygon],
        bounds: &ConvexPolygon,
    ) -> Advance {
        let old_edge = self.polygon.edge(i);
        let Some(new_edge) = self.advanced_edge(i, step) else {
            return Advance::Blocked;
        };
        let snapshot = self.polygon.clone();
        if !self.polygon.replace_edge(i, new_edge) {
            return Advance::Blocked;
        }
        if !bounds.contains_polygon(&self.polygon) {
            self.polygon = snapshot;
            return Advance::Blocked;
        }
        let hit_seed = seeds.iter().any(|s| s.intersects(&self.polygon));
        let hit: Vec<&ConvexPolygon> = obstacles
            .iter()
            .filter(|o| o.intersects(&self.polygon))
            .collect();
        if !hit_seed && hit.is_empty() {
            return Advance::Moved;
        }
        let advanced = std::mem::replace(&mut self.polygon, snapshot);
        if hit_seed || hit.len() != 1 {
            return Advance::Blocked;
        }
        let Some((candidate, endpoint, side)) = self.hug(i, old_edge, new_edge, &advanced, hit[0])
        else {
            return Advance::Blocked;
        };
        let clear = bounds.contains_polygon(&candidate)
            && !obstacles.iter().any(|o| o.intersects(&candidate))
            && !seeds.iter().any(|s| s.intersects(&candidate));
        if !clear {
            return Advance::Blocked;
        }
        self.install_hug(i, candidate, endpoint, side);
        Advance::Hugged
    }

    /// Candidate polygon for the oblique intrusion case, if it applies, with the
    /// intruding endpoint and the obstacle side it hugs.
    fn hug(
        &self,
        i: usize,
        old_edge: Segment,
        new_edge: Segment,
        advanced: &ConvexPolygon,
        obstacle: &ConvexPolygon,
    ) -> Option<(ConvexPolygon, Endpoint, Segment)> {
        let (endpoint, path, side) = intrusion(old_edge, new_edge, advanced, obstacle)?;
        let q = match path.intersect(&side) {
            Intersection::Point(p) => p,
            other => panic!(
                "vertex path {:?} must cross obstacle side {:?} exactly once, got {:?}",
                path, side, other
            ),
        };
        let r = match new_edge.to_line().intersect(&side.to_line()) {
            Intersection::Point(p) => p,
            other => panic!(
                "non-parallel edge {:?} and side {:?} must meet in one point, got {:?}",
                new_edge, side, other
            ),
        };
        let n = self.polygon.vertex_count();
        let mut vs = self.polygon.vertices().to_vec();
        match endpoint {
            Endpoint::Second => {
                // ..., first', r, q, ...
                let ri = (i + 1) % n;
                vs[i] = new_edge.first;
                vs[ri] = r;
                vs.insert(ri + 1, q);
            }
            Endpoint::First => {
                // ..., q, r, second', ...
                vs[i] = r;
                vs[(i + 1) % n] = new_edge.second;
                vs.insert(i, q);
            }
        }
        ConvexPolygon::new(vs).map(|p| (p, endpoint, side))
    }

    /// Swap in the hugging polygon and re-orient growth along the obstacle side.
    fn install_hug(&mut self, i: usize, candidate: ConvexPolygon, endpoint: Endpoint, side: Segment) {
        let old_n = self.polygon.vertex_count();
        self.polygon = candidate;
        let n = old_n + 1;
        // index of the inserted oblique edge, the advanced edge and the other
        // edge that now ends or starts on the obstacle side
        let (oblique, advanced_idx, neighbour_idx) = match endpoint {
            Endpoint::Second => {
                let ri = (i + 1) % old_n;
                (ri, (ri + n - 1) % n, ri + 1)
            }
            Endpoint::First => (i, i + 1, (i + n - 1) % n),
        };
        let oblique_edge = self.polygon.edge(oblique);
        self.growth.insert(
            oblique,
            EdgeGrowth::fresh(&oblique_edge, self.polygon.outward_normal(oblique), false),
        );
        self.refresh(advanced_idx);
        self.refresh(neighbour_idx);
        let along = side.vector().normalize();
        for (idx, at_first) in [
            (advanced_idx, endpoint == Endpoint::First),
            (neighbour_idx, endpoint == Endpoint::Second),
        ] {
            let g = &mut self.growth[idx];
            let d = if along.dot(&g.normal) >= 0.0 { along } else { -along };
            if d.dot(&g.normal) < MIN_DIRECTION_DOT {
                g.growable = false;
                continue;
            }
            if at_first {
                g.directions.0 = d;
            } else {
                g.directions.1 = d;
            }
        }
    }
}

/// The intruding endpoint, its movement path, and the obstacle side it crosses,
/// when exactly one endpoint of the advanced edge is strictly inside `obstacle`,
/// no obstacle vertex is strictly inside the advanced polygon, and the side is
/// not parallel to the advancing edge.
fn intrusion(
    old_edge: Segment,
    new_edge: Segment,
    advanced: &ConvexPolygon,
    obstacle: &ConvexPolygon,
) -> Option<(Endpoint, Segment, Segment)> {
    if obstacle
        .vertices()
        .iter()
        .any(|v| advanced.contains_boundary_excluded(*v))
    {
        return None;
    }
    let first_in = obstacle.contains_boundary_excluded(new_edge.first);
    let second_in = obstacle.contains_boundary_excluded(new_edge.second);
    let (endpoint, path) = match (first_in, second_in) {
        (true, false) => (Endpoint::First, Segment::new(old_edge.first, new_edge.first)),
        (false, true) => (Endpoint::Second, Segment::new(old_edge.second, new_edge.second)),
        _ => return None,
    };
    let side = obstacle.edge(obstacle.closest_edge_to(&path));
    if side.is_degenerate() || side.is_parallel_to(&new_edge) {
        return None;
    }
    Some((endpoint, path, side))
}
