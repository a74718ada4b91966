//! JSON scenario files and the JSON views of results.
//!
//! Points are `[x, y]` arrays; polygons are vertex lists in either orientation.

use anyhow::{anyhow, Context, Result};
use nalgebra::vector;
use pednav::api::{
    CognitiveMap, ConvexPolygon, DestinationReaching, DynamicPursuing, Exploring,
    GoalOrientedExploration, KnownDestinationReaching, NavCfg, NavigationGraph, Pursuing,
    ReachRule, RouteFollowing, Strategy, Vec2,
};
use serde::{Deserialize, Serialize};

pub type Point = [f64; 2];

#[inline]
pub fn to_vec2(p: Point) -> Vec2 {
    vector![p[0], p[1]]
}

#[inline]
pub fn to_point(v: Vec2) -> Point {
    [v.x, v.y]
}

fn polygon(what: &str, points: &[Point]) -> Result<ConvexPolygon> {
    ConvexPolygon::new(points.iter().copied().map(to_vec2).collect())
        .ok_or_else(|| anyhow!("{what} is not a convex polygon with at least 3 vertices"))
}

fn points(ps: &[Point]) -> Vec<Vec2> {
    ps.iter().copied().map(to_vec2).collect()
}

#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    pub bounds: Vec<Point>,
    #[serde(default)]
    pub obstacles: Vec<Vec<Point>>,
    pub seeds: Vec<Point>,
    #[serde(default)]
    pub cfg: NavCfg,
    #[serde(default)]
    pub agent: Option<AgentDef>,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(text).context("parsing scenario JSON")?;
        scenario.cfg.validate().context("invalid cfg")?;
        Ok(scenario)
    }

    pub fn bounds(&self) -> Result<ConvexPolygon> {
        polygon("bounds", &self.bounds)
    }

    pub fn obstacles(&self) -> Result<Vec<ConvexPolygon>> {
        self.obstacles
            .iter()
            .enumerate()
            .map(|(k, o)| polygon(&format!("obstacle {k}"), o))
            .collect()
    }

    pub fn seeds(&self) -> Vec<Vec2> {
        points(&self.seeds)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AgentDef {
    pub start: Point,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default)]
    pub knowledge_degree: f64,
    #[serde(default)]
    pub seed: u64,
    pub strategy: StrategyDef,
}

fn default_radius() -> f64 {
    0.25
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyDef {
    Explore,
    Pursue {
        destination: Point,
    },
    DynamicPursue {
        destination: Point,
    },
    FollowRoute {
        route: Vec<Point>,
        #[serde(default)]
        adjacent: bool,
    },
    GoalOrientedExplore {
        destinations: Vec<Point>,
    },
    ReachKnownDestination {
        destinations: Vec<Point>,
    },
    ReachDestination {
        #[serde(default)]
        known: Vec<Point>,
        #[serde(default)]
        unknown: Vec<Point>,
    },
}

impl StrategyDef {
    pub fn build(&self) -> Result<Strategy> {
        let strategy = match self {
            StrategyDef::Explore => Strategy::Explore(Exploring),
            StrategyDef::Pursue { destination } => {
                Strategy::Pursue(Pursuing::new(to_vec2(*destination)))
            }
            StrategyDef::DynamicPursue { destination } => {
                Strategy::DynamicPursue(DynamicPursuing::new(to_vec2(*destination)))
            }
            StrategyDef::FollowRoute { route, adjacent } => {
                let rule = if *adjacent {
                    ReachRule::InRoomOrAdjacent
                } else {
                    ReachRule::InRoom
                };
                Strategy::FollowRoute(RouteFollowing::new(points(route), rule)?)
            }
            StrategyDef::GoalOrientedExplore { destinations } => Strategy::GoalOrientedExplore(
                GoalOrientedExploration::new(points(destinations))?,
            ),
            StrategyDef::ReachKnownDestination { destinations } => {
                Strategy::ReachKnownDestination(KnownDestinationReaching::new(points(
                    destinations,
                ))?)
            }
            StrategyDef::ReachDestination { known, unknown } => Strategy::ReachDestination(
                DestinationReaching::new(points(known), points(unknown))?,
            ),
        };
        Ok(strategy)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PassageView {
    pub tail: usize,
    pub head: usize,
    pub segment: [Point; 2],
    pub normal: Point,
}

#[derive(Clone, Debug, Serialize)]
pub struct GraphView {
    pub rooms: Vec<Vec<Point>>,
    pub passages: Vec<PassageView>,
}

impl From<&NavigationGraph> for GraphView {
    fn from(graph: &NavigationGraph) -> Self {
        Self {
            rooms: graph
                .rooms()
                .iter()
                .map(|r| r.vertices().iter().copied().map(to_point).collect())
                .collect(),
            passages: graph
                .passages()
                .iter()
                .map(|p| PassageView {
                    tail: p.tail.0,
                    head: p.head.0,
                    segment: [to_point(p.segment.first), to_point(p.segment.second)],
                    normal: to_point(p.normal),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LandmarkView {
    pub room: usize,
    pub center: Point,
    pub semi_axes: Point,
}

#[derive(Clone, Debug, Serialize)]
pub struct MapView {
    pub landmarks: Vec<LandmarkView>,
    /// `[a, b, hops]` per tree edge.
    pub edges: Vec<[usize; 3]>,
}

impl From<&CognitiveMap> for MapView {
    fn from(map: &CognitiveMap) -> Self {
        Self {
            landmarks: map
                .landmarks()
                .iter()
                .map(|l| LandmarkView {
                    room: l.room.0,
                    center: to_point(l.centroid()),
                    semi_axes: to_point(l.shape.semi_axes()),
                })
                .collect(),
            edges: map.edges().iter().map(|e| [e.a, e.b, e.hops]).collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct WalkView {
    pub strategy: &'static str,
    pub final_state: String,
    pub steps: usize,
    pub trajectory: Vec<Point>,
    /// Rooms in order of entry, consecutive repeats collapsed.
    pub rooms: Vec<usize>,
    pub cognitive_map: Option<MapView>,
}
