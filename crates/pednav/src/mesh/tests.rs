use super::*;
use crate::geom2::Segment;
use nalgebra::vector;

fn rect(x: f64, y: f64, w: f64, h: f64) -> ConvexPolygon {
    ConvexPolygon::rectangle(vector![x, y], w, h).unwrap()
}

#[test]
fn single_seed_fills_empty_rectangle() {
    let bounds = rect(0.0, 0.0, 10.0, 10.0);
    let cfg = MeshCfg::default();
    let graph = generate_navigation_graph(&bounds, &[], &[vector![5.0, 5.0]], &cfg);
    assert_eq!(graph.room_count(), 1);
    assert!(graph.passages().is_empty());
    let (lo, hi) = graph.room(RoomId(0)).bounding_box();
    // within one growth step of every side
    assert!(lo.x <= cfg.unit && lo.y <= cfg.unit);
    assert!(hi.x >= 10.0 - cfg.unit && hi.y >= 10.0 - cfg.unit);
    assert!(bounds.contains_polygon(graph.room(RoomId(0))));
}

#[test]
fn facing_rooms_get_one_passage_each_way() {
    let bounds = rect(0.0, 0.0, 12.0, 5.0);
    let graph = generate_navigation_graph(
        &bounds,
        &[],
        &[vector![2.5, 2.5], vector![9.5, 2.5]],
        &MeshCfg::default(),
    );
    assert_eq!(graph.room_count(), 2);
    let (a, b) = (RoomId(0), RoomId(1));
    assert!(graph.room(a).is_adjacent_to(graph.room(b)));

    let ab = graph.passages_between(a, b);
    let ba = graph.passages_between(b, a);
    assert_eq!(ab.len(), 1);
    assert_eq!(ba.len(), 1);
    assert_eq!(graph.passages().len(), 2);

    let p = graph.passage(ab[0]);
    assert!((p.segment.length() - 5.0).abs() < 1e-9);
    assert!(p.segment.is_vertical());
    assert!((p.normal - vector![1.0, 0.0]).norm() < 1e-12);
    // the segment lies on the tail room's boundary
    assert!(graph.room(a).lies_on_boundary(p.segment.first));
    assert!(graph.room(a).lies_on_boundary(p.segment.second));
    assert!((graph.passage(ba[0]).normal - vector![-1.0, 0.0]).norm() < 1e-12);
}

#[test]
fn empty_gap_is_bridged_by_the_facing_overlap() {
    // seeds already fill both rooms; a 3-unit step cannot enter the 2-unit gap
    let cfg = MeshCfg {
        unit: 3.0,
        seed_side: 5.0,
    };
    let bounds = rect(0.0, 0.0, 12.0, 5.0);
    let graph =
        generate_navigation_graph(&bounds, &[], &[vector![2.5, 2.5], vector![9.5, 2.5]], &cfg);
    let (a, b) = (RoomId(0), RoomId(1));
    assert_eq!(graph.room_count(), 2);
    let (_, a_hi) = graph.room(a).bounding_box();
    let (b_lo, _) = graph.room(b).bounding_box();
    assert!((b_lo.x - a_hi.x - 2.0).abs() < 1e-9);

    assert_eq!(graph.passages().len(), 2);
    let ab = graph.passages_between(a, b);
    let ba = graph.passages_between(b, a);
    assert_eq!(ab.len(), 1);
    assert_eq!(ba.len(), 1);
    let there = graph.passage(ab[0]).segment;
    let back = graph.passage(ba[0]).segment;
    assert!((there.length() - 5.0).abs() < 1e-9);
    assert!((there.first.x - 5.0).abs() < 1e-9);
    assert!((back.length() - 5.0).abs() < 1e-9);
    assert!((back.first.x - 7.0).abs() < 1e-9);
}

#[test]
fn crossing_detection_spans_an_empty_gap() {
    let rooms = vec![rect(0.0, 0.0, 5.0, 5.0), rect(7.0, 1.0, 5.0, 3.0)];
    let bounds = rect(0.0, 0.0, 12.0, 5.0);
    let passages = crossings::detect(&rooms, &[], &bounds, &MeshCfg::default());
    assert_eq!(passages.len(), 2);
    for p in &passages {
        // overlap of the facing edges: y in [1, 4]
        assert!((p.segment.length() - 3.0).abs() < 1e-9);
        assert!((p.segment.first.y.min(p.segment.second.y) - 1.0).abs() < 1e-9);
    }
    assert!(passages
        .iter()
        .any(|p| p.tail == RoomId(0) && (p.segment.first.x - 5.0).abs() < 1e-9));
    assert!(passages
        .iter()
        .any(|p| p.tail == RoomId(1) && (p.segment.first.x - 7.0).abs() < 1e-9));
}

#[test]
fn edge_striking_two_rooms_at_once_gets_no_passage() {
    let rooms = vec![
        rect(0.0, 0.0, 5.0, 6.0),
        rect(7.0, 0.0, 5.0, 3.0),
        rect(7.0, 3.0, 5.0, 3.0),
    ];
    let bounds = rect(0.0, 0.0, 12.0, 6.0);
    let passages = crossings::detect(&rooms, &[], &bounds, &MeshCfg::default());
    // the wide room's right edge reaches both small rooms in the same step
    assert!(passages.iter().all(|p| p.tail != RoomId(0)));
    let into_wide: Vec<&Passage> = passages.iter().filter(|p| p.head == RoomId(0)).collect();
    assert_eq!(into_wide.len(), 2);
    assert!(into_wide
        .iter()
        .all(|p| (p.segment.length() - 3.0).abs() < 1e-9));
    // the small rooms touch each other and still link both ways
    assert_eq!(passages.len(), 4);
    assert!(passages
        .iter()
        .any(|p| p.tail == RoomId(1) && p.head == RoomId(2)));
    assert!(passages
        .iter()
        .any(|p| p.tail == RoomId(2) && p.head == RoomId(1)));
}

#[test]
fn obstacle_in_gap_clips_passage() {
    let bounds = rect(0.0, 0.0, 12.0, 5.0);
    let pillar = rect(5.5, 0.0, 1.0, 2.0);
    let graph = generate_navigation_graph(
        &bounds,
        &[pillar],
        &[vector![2.5, 2.5], vector![9.5, 2.5]],
        &MeshCfg::default(),
    );
    let (a, b) = (RoomId(0), RoomId(1));
    // growth stops at the pillar, leaving a two-unit gap
    let (_, a_hi) = graph.room(a).bounding_box();
    let (b_lo, _) = graph.room(b).bounding_box();
    assert!((a_hi.x - 5.0).abs() < 1e-9);
    assert!((b_lo.x - 7.0).abs() < 1e-9);

    let ab = graph.passages_between(a, b);
    assert_eq!(ab.len(), 1);
    let s = graph.passage(ab[0]).segment;
    assert!((s.length() - 3.0).abs() < 1e-9);
    assert!((s.first.x - 5.0).abs() < 1e-9);
    assert!((s.first.y.min(s.second.y) - 2.0).abs() < 1e-9);

    let ba = graph.passages_between(b, a);
    assert_eq!(ba.len(), 1);
    let back = graph.passage(ba[0]).segment;
    assert!((back.first.x - 7.0).abs() < 1e-9);
    // oriented like the edge it lies on (room b's left edge runs downward)
    assert!(back.first.y > back.second.y);
}

#[test]
fn seeds_on_obstacles_or_outside_are_dropped() {
    let bounds = rect(0.0, 0.0, 10.0, 10.0);
    let block = rect(6.0, 6.0, 2.0, 2.0);
    let graph = generate_navigation_graph(
        &bounds,
        &[block.clone()],
        &[vector![2.0, 2.0], vector![7.0, 7.0], vector![20.0, 2.0]],
        &MeshCfg::default(),
    );
    assert_eq!(graph.room_count(), 1);
    assert!(!graph.room(RoomId(0)).intersects(&block));
}

#[test]
fn corridor_of_three_rooms() {
    let bounds = rect(0.0, 0.0, 15.0, 5.0);
    let graph = generate_navigation_graph(
        &bounds,
        &[],
        &[vector![2.5, 2.5], vector![7.5, 2.5], vector![12.5, 2.5]],
        &MeshCfg::default(),
    );
    let (a, b, c) = (RoomId(0), RoomId(1), RoomId(2));
    assert_eq!(graph.room_count(), 3);
    assert_eq!(graph.passages().len(), 4);
    assert_eq!(graph.successors(b), vec![a, c]);
    assert_eq!(graph.predecessors(a), vec![b]);
    assert_eq!(graph.hop_distance(a, c), Some(2));
    assert_eq!(graph.hop_distance(c, c), Some(0));
    assert!(graph.is_reachable(c, a));
    assert!(graph.is_impasse(a));
    assert!(!graph.is_impasse(b));
    assert_eq!(graph.room_containing(vector![12.0, 1.0]), Some(c));
    assert_eq!(graph.room_containing(vector![20.0, 1.0]), None);
}

#[test]
fn hop_distance_is_none_between_components() {
    let rooms = vec![rect(0.0, 0.0, 1.0, 1.0), rect(5.0, 0.0, 1.0, 1.0)];
    let graph = NavigationGraph::new(rooms, Vec::new());
    assert_eq!(graph.hop_distance(RoomId(0), RoomId(1)), None);
    assert!(!graph.is_reachable(RoomId(0), RoomId(1)));
    assert!(graph.successors(RoomId(0)).is_empty());
}

#[test]
#[should_panic(expected = "missing room")]
fn passages_must_reference_existing_rooms() {
    let passage = Passage {
        tail: RoomId(0),
        head: RoomId(3),
        segment: Segment::new(vector![1.0, 0.0], vector![1.0, 1.0]),
        normal: vector![1.0, 0.0],
    };
    let _ = NavigationGraph::new(vec![rect(0.0, 0.0, 1.0, 1.0)], vec![passage]);
}
