use super::*;
use crate::config::CognitiveCfg;
use crate::geom2::{ConvexPolygon, Ellipse};
use crate::mesh::{NavigationGraph, RoomId};
use crate::test_support::corridor;
use nalgebra::vector;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn landmark_in(graph: &NavigationGraph, room: usize) -> Landmark {
    let c = graph.room(RoomId(room)).centroid();
    Landmark {
        room: RoomId(room),
        shape: Ellipse::new(c, 0.5, 0.5),
    }
}

#[test]
fn spanning_tree_has_one_edge_less_than_landmarks() {
    let graph = corridor(5);
    // out of order on purpose
    let landmarks: Vec<Landmark> = [3, 0, 4, 1, 2]
        .iter()
        .map(|&r| landmark_in(&graph, r))
        .collect();
    let map = CognitiveMap::build(&graph, landmarks);
    assert_eq!(map.edges().len(), 4);
    // a corridor only has one-hop tree edges
    assert!(map.edges().iter().all(|e| e.hops == 1));
}

#[test]
fn tiny_maps_have_no_edges() {
    let graph = corridor(2);
    assert!(CognitiveMap::build(&graph, Vec::new()).edges().is_empty());
    let single = CognitiveMap::build(&graph, vec![landmark_in(&graph, 1)]);
    assert!(single.edges().is_empty());
    assert_eq!(single.path(0, 0), Some(vec![0]));
}

#[test]
fn disconnected_rooms_give_a_forest() {
    let mut rooms: Vec<ConvexPolygon> = corridor(2).rooms().to_vec();
    rooms.push(ConvexPolygon::rectangle(vector![20.0, 0.0], 5.0, 5.0).unwrap());
    let passages = corridor(2).passages().to_vec();
    let graph = NavigationGraph::new(rooms, passages);
    let map = CognitiveMap::build(
        &graph,
        (0..3).map(|r| landmark_in(&graph, r)).collect(),
    );
    assert_eq!(map.edges().len(), 1);
    assert_eq!(map.path(0, 2), None);
    assert_eq!(map.path(1, 0), Some(vec![1, 0]));
}

#[test]
fn tree_path_walks_the_corridor() {
    let graph = corridor(4);
    let map = CognitiveMap::build(&graph, (0..4).map(|r| landmark_in(&graph, r)).collect());
    assert_eq!(map.path(0, 3), Some(vec![0, 1, 2, 3]));
    assert_eq!(map.path(3, 1), Some(vec![3, 2, 1]));
    assert_eq!(map.path(0, 9), None);
    assert_eq!(map.closest_landmark(vector![11.0, 1.0]), Some(2));
    assert_eq!(CognitiveMap::default().closest_landmark(vector![0.0, 0.0]), None);
}

#[test]
fn knowledge_degree_selects_a_fraction_of_rooms() {
    let graph = corridor(3);
    let cfg = CognitiveCfg::default();
    let mut rng = StdRng::seed_from_u64(7);
    assert!(sample_landmarks(&graph, 0.5, 0.0, &cfg, &mut rng).is_empty());
    let all = sample_landmarks(&graph, 0.5, 1.0, &cfg, &mut rng);
    assert_eq!(all.len(), 3);
    for l in &all {
        assert!(l.shape.is_inside(graph.room(l.room)));
    }
    // floor(0.5 × 3)
    assert_eq!(sample_landmarks(&graph, 0.5, 0.5, &cfg, &mut rng).len(), 1);
}

#[test]
fn rooms_too_small_for_the_agent_get_no_landmark() {
    let graph = corridor(3);
    let cfg = CognitiveCfg::default();
    let mut rng = StdRng::seed_from_u64(1);
    // room diameter is 5√2 ≈ 7.07; factor 2 × diameter 4 = 8
    assert!(sample_landmarks(&graph, 4.0, 1.0, &cfg, &mut rng).is_empty());
}

#[test]
fn sampling_is_deterministic_per_seed() {
    let graph = corridor(6);
    let cfg = CognitiveCfg::default();
    let a = sample_landmarks(&graph, 0.5, 0.5, &cfg, &mut StdRng::seed_from_u64(42));
    let b = sample_landmarks(&graph, 0.5, 0.5, &cfg, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
    assert_eq!(a.len(), 3);
}

#[test]
#[should_panic(expected = "shrink factor")]
fn shrink_factor_must_be_a_proper_fraction() {
    let graph = corridor(1);
    let cfg = CognitiveCfg {
        shrink_factor: 1.5,
        ..CognitiveCfg::default()
    };
    let _ = sample_landmarks(&graph, 0.5, 1.0, &cfg, &mut StdRng::seed_from_u64(0));
}

#[test]
fn reset_zeroes_counts_but_keeps_knowledge() {
    let graph = corridor(2);
    let mut memory = VolatileMemory::new();
    memory.visit(RoomId(0));
    memory.visit(RoomId(0));
    memory.visit(RoomId(1));
    assert_eq!(memory.visits(RoomId(0)), 2);
    assert!(memory.is_known_impasse(&graph, RoomId(0)));
    memory.reset();
    assert_eq!(memory.visits(RoomId(0)), 0);
    assert!(memory.is_known(RoomId(0)));
    assert!(memory.is_known_impasse(&graph, RoomId(1)));
    assert!(!memory.is_known(RoomId(5)));
}
