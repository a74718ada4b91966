use super::*;
use nalgebra::vector;
use proptest::prelude::*;

fn unit_square() -> ConvexPolygon {
    ConvexPolygon::rectangle(vector![0.0, 0.0], 1.0, 1.0).unwrap()
}

fn close(a: Vec2, b: Vec2) -> bool {
    (a - b).norm() < 1e-9
}

#[test]
fn closest_point_handles_all_three_cases() {
    // degenerate
    let p = vector![1.0, 1.0];
    let deg = Segment::new(p, p);
    assert_eq!(deg.closest_point_to(vector![5.0, 5.0]), p);
    let s = Segment::new(vector![0.0, 0.0], vector![4.0, 0.0]);
    // on segment
    assert_eq!(s.closest_point_to(vector![2.0, 0.0]), vector![2.0, 0.0]);
    // projection inside
    assert!(close(s.closest_point_to(vector![1.0, 3.0]), vector![1.0, 0.0]));
    // projection outside, clamped to the nearer endpoint
    assert!(close(s.closest_point_to(vector![-2.0, 1.0]), vector![0.0, 0.0]));
    assert!(close(s.closest_point_to(vector![7.0, -1.0]), vector![4.0, 0.0]));
    assert!((s.distance_to(vector![1.0, 3.0]) - 3.0).abs() < 1e-12);
}

#[test]
#[should_panic(expected = "degenerate")]
fn to_line_rejects_degenerate_segment() {
    let p = vector![1.0, 2.0];
    let _ = Segment::new(p, p).to_line();
}

#[test]
#[should_panic(expected = "degenerate")]
fn parallelism_rejects_degenerate_segment() {
    let p = vector![1.0, 2.0];
    let s = Segment::new(vector![0.0, 0.0], vector![1.0, 0.0]);
    let _ = s.is_parallel_to(&Segment::new(p, p));
}

#[test]
fn segment_intersection_special_cases() {
    let a = Segment::new(vector![0.0, 0.0], vector![2.0, 2.0]);
    let b = Segment::new(vector![0.0, 2.0], vector![2.0, 0.0]);
    assert!(close(a.intersect(&b).point().unwrap(), vector![1.0, 1.0]));

    // lines cross outside the segments
    let c = Segment::new(vector![3.0, 0.0], vector![4.0, -1.0]);
    assert_eq!(a.intersect(&c), Intersection::Empty);

    // collinear, sharing one endpoint
    let d = Segment::new(vector![2.0, 2.0], vector![3.0, 3.0]);
    assert_eq!(a.intersect(&d), Intersection::Point(vector![2.0, 2.0]));

    // collinear overlap
    let e = Segment::new(vector![1.0, 1.0], vector![5.0, 5.0]);
    assert_eq!(a.intersect(&e), Intersection::Infinite);

    // collinear, disjoint
    let f = Segment::new(vector![3.0, 3.0], vector![5.0, 5.0]);
    assert_eq!(a.intersect(&f), Intersection::Empty);

    // parallel, not collinear
    let g = a.translate(vector![1.0, 0.0]);
    assert_eq!(a.intersect(&g), Intersection::Empty);

    // degenerate side
    let p = vector![0.5, 0.5];
    assert_eq!(a.intersect(&Segment::new(p, p)), Intersection::Point(p));
    let q = vector![0.5, 0.7];
    assert_eq!(Segment::new(q, q).intersect(&a), Intersection::Empty);
}

#[test]
fn line_intersections_distinguish_empty_and_infinite() {
    let l1 = Segment::new(vector![0.0, 0.0], vector![1.0, 0.0]).to_line();
    let l2 = Segment::new(vector![5.0, 0.0], vector![9.0, 0.0]).to_line();
    let l3 = Segment::new(vector![0.0, 1.0], vector![1.0, 1.0]).to_line();
    let l4 = Segment::new(vector![2.0, -1.0], vector![2.0, 1.0]).to_line();
    assert_eq!(l1.intersect(&l2), Intersection::Infinite);
    assert_eq!(l1.intersect(&l3), Intersection::Empty);
    assert!(close(l1.intersect(&l4).point().unwrap(), vector![2.0, 0.0]));
}

#[test]
fn circle_intersections() {
    let line = Segment::new(vector![-5.0, 0.0], vector![5.0, 0.0]).to_line();
    match line.intersect_circle(vector![0.0, 0.0], 2.0) {
        Intersection::Points(ps) => {
            assert_eq!(ps.len(), 2);
            assert!(close(ps[0], vector![-2.0, 0.0]));
            assert!(close(ps[1], vector![2.0, 0.0]));
        }
        other => panic!("expected two points, got {other:?}"),
    }
    assert!(close(
        line.intersect_circle(vector![0.0, 2.0], 2.0).point().unwrap(),
        vector![0.0, 0.0]
    ));
    assert!(line.intersect_circle(vector![0.0, 3.0], 2.0).is_empty());

    // segment keeps only hits on itself
    let s = Segment::new(vector![0.0, 0.0], vector![5.0, 0.0]);
    assert!(close(
        s.intersect_circle(vector![0.0, 0.0], 2.0).point().unwrap(),
        vector![2.0, 0.0]
    ));
}

#[test]
fn segment_shape_flags() {
    let h = Segment::new(vector![0.0, 1.0], vector![3.0, 1.0]);
    assert!(h.is_horizontal() && !h.is_vertical() && h.is_axis_aligned());
    assert_eq!(h.axis(), Some(Axis::X));
    assert_eq!(h.midpoint(), vector![1.5, 1.0]);
    let shrunk = h.shrink(0.5);
    assert!(close(shrunk.first, vector![0.5, 1.0]));
    assert!((shrunk.length() - 2.0).abs() < 1e-12);
    assert!(h.shrink(2.0).is_degenerate());
    let oblique = Segment::new(vector![0.0, 0.0], vector![1.0, 2.0]);
    assert!(!oblique.is_axis_aligned());
    assert_eq!(oblique.axis(), None);
}

#[test]
fn polygon_rejects_non_convex_input() {
    let concave = vec![
        vector![0.0, 0.0],
        vector![2.0, 0.0],
        vector![1.0, 0.5],
        vector![2.0, 2.0],
        vector![0.0, 2.0],
    ];
    assert!(ConvexPolygon::new(concave).is_none());
    // bow-tie
    let twisted = vec![
        vector![0.0, 0.0],
        vector![1.0, 1.0],
        vector![1.0, 0.0],
        vector![0.0, 1.0],
    ];
    assert!(ConvexPolygon::new(twisted).is_none());
    assert!(ConvexPolygon::new(vec![vector![0.0, 0.0], vector![1.0, 0.0]]).is_none());
}

#[test]
fn containment_variants() {
    let sq = unit_square();
    let inside = vector![0.5, 0.5];
    let on_edge = vector![1.0, 0.3];
    let corner = vector![0.0, 0.0];
    let outside = vector![1.5, 0.5];
    assert!(sq.contains_boundary_excluded(inside));
    assert!(sq.contains_boundary_included(on_edge));
    assert!(!sq.contains_boundary_excluded(on_edge));
    assert!(sq.lies_on_boundary(corner));
    assert!(!sq.contains_boundary_included(outside));
    assert!((sq.area() - 1.0).abs() < 1e-12);
    assert!(close(sq.centroid(), inside));
    assert!((sq.diameter() - 2f64.sqrt()).abs() < 1e-12);
}

#[test]
fn failed_mutations_leave_polygon_untouched() {
    let mut sq = unit_square();
    let before = sq.vertices().to_vec();
    // pulling a corner inward makes it concave
    assert!(!sq.move_vertex(2, vector![0.4, 0.4]));
    // a vertex that would create a dent
    assert!(!sq.add_vertex(2, vector![0.9, 0.5]));
    // tilting an edge past its neighbour
    assert!(!sq.replace_edge(0, Segment::new(vector![0.0, 0.0], vector![1.0, 1.5])));
    assert_eq!(sq.vertices(), before.as_slice());

    let mut tri = ConvexPolygon::new(vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![0.0, 1.0],
    ])
    .unwrap();
    assert!(!tri.remove_vertex(0));
    assert_eq!(tri.vertex_count(), 3);
}

#[test]
fn successful_mutations() {
    let mut sq = unit_square();
    assert!(sq.add_vertex(2, vector![1.5, 0.5]));
    assert_eq!(sq.vertex_count(), 5);
    assert!(sq.remove_vertex(2));
    assert_eq!(sq.vertices(), unit_square().vertices());
    assert!(sq.move_edge(1, vector![1.0, 0.0]));
    assert!(close(sq.vertex(1), vector![2.0, 0.0]));
    assert!(close(sq.vertex(2), vector![2.0, 1.0]));
}

#[test]
fn overlap_touching_and_adjacency() {
    let a = unit_square();
    let touching = ConvexPolygon::rectangle(vector![1.0, 0.25], 1.0, 0.5).unwrap();
    let corner_only = ConvexPolygon::rectangle(vector![1.0, 1.0], 1.0, 1.0).unwrap();
    let overlapping = ConvexPolygon::rectangle(vector![0.5, 0.5], 1.0, 1.0).unwrap();
    assert!(!a.intersects(&touching));
    assert!(a.is_adjacent_to(&touching));
    assert!(!a.intersects(&corner_only));
    assert!(!a.is_adjacent_to(&corner_only));
    assert!(a.intersects(&overlapping));
    assert!(overlapping.intersects(&a));
    assert!(!a.is_adjacent_to(&overlapping));
}

#[test]
fn closest_edge_prefers_the_crossed_side() {
    let sq = unit_square();
    // path from below entering through the bottom edge
    let path = Segment::new(vector![0.5, -1.0], vector![0.5, 0.5]);
    assert_eq!(sq.closest_edge_to(&path), 0);
    let far = Segment::new(vector![3.0, 0.2], vector![3.0, 0.8]);
    assert_eq!(sq.closest_edge_to(&far), 1);
}

#[test]
fn clip_keeps_inner_side() {
    let sq = ConvexPolygon::rectangle(vector![0.0, 0.0], 4.0, 2.0).unwrap();
    let left = sq
        .clip_to_halfplane(vector![1.0, 0.0], vector![1.0, 0.0])
        .unwrap();
    let (lo, hi) = left.bounding_box();
    assert!(close(lo, vector![0.0, 0.0]));
    assert!(close(hi, vector![1.0, 2.0]));
    assert!(sq
        .clip_to_halfplane(vector![-1.0, 0.0], vector![1.0, 0.0])
        .is_none());
}

#[test]
fn interval_subtraction() {
    let base = Interval::new(0.0, 10.0);
    let pieces = base.subtract_all(&[Interval::new(2.0, 3.0), Interval::new(8.0, 12.0)]);
    assert_eq!(
        pieces,
        vec![
            Interval::new(0.0, 2.0),
            Interval::new(3.0, 8.0)
        ]
    );
    assert!(base.subtract(&Interval::new(-5.0, 20.0)).is_empty());
    assert_eq!(
        base.intersect(&Interval::new(10.0, 11.0)).map(|i| i.is_degenerate()),
        Some(true)
    );
    assert!(base.intersect(&Interval::new(11.0, 12.0)).is_none());
}

#[test]
fn ellipse_fits_inside_polygon() {
    let room = ConvexPolygon::rectangle(vector![0.0, 0.0], 4.0, 2.0).unwrap();
    let fits = Ellipse::new(vector![2.0, 1.0], 2.0, 1.0);
    let too_wide = Ellipse::new(vector![2.0, 1.0], 2.1, 0.5);
    assert!(fits.is_inside(&room));
    assert!(!too_wide.is_inside(&room));
    assert!(too_wide.scaled(0.5).is_inside(&room));
    assert!(fits.contains(vector![3.9, 1.0]));
    assert!(!fits.contains(vector![3.9, 1.9]));
}

#[test]
fn extendable_grows_until_bounds() {
    let bounds = ConvexPolygon::rectangle(vector![0.0, 0.0], 10.0, 10.0).unwrap();
    let mut seed = ExtendablePolygon::new(ConvexPolygon::square(vector![5.0, 5.0], 1.0).unwrap());
    let mut rounds = 0;
    while seed.extend(1.0, &[], &[], &bounds) {
        rounds += 1;
        assert!(rounds < 100);
    }
    assert!(!seed.can_grow());
    let (lo, hi) = seed.polygon().bounding_box();
    assert!(close(lo, vector![0.5, 0.5]));
    assert!(close(hi, vector![9.5, 9.5]));
}

#[test]
fn extendable_hugs_oblique_obstacle_side() {
    let bounds = ConvexPolygon::rectangle(vector![0.0, 0.0], 10.0, 10.0).unwrap();
    let obstacle = ConvexPolygon::new(vec![
        vector![6.0, 1.5],
        vector![6.0, 5.0],
        vector![2.5, 5.0],
    ])
    .unwrap();
    let obstacles = [obstacle.clone()];
    let mut seed = ExtendablePolygon::new(ConvexPolygon::square(vector![2.0, 2.0], 2.0).unwrap());

    assert!(seed.extend(1.0, &obstacles, &[], &bounds));
    assert_eq!(seed.polygon().vertex_count(), 5);
    assert!(!seed.polygon().intersects(&obstacle));
    assert!(close(seed.polygon().vertex(2), vector![4.0, 3.5]));
    assert!(close(seed.polygon().vertex(3), vector![3.5, 4.0]));
    // the inserted edge lies on the obstacle and never grows
    assert!(!seed.is_growable(2));
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let top = seed.growth(3);
    assert!(close(top.directions.0, vector![-h, h]));
    assert!(close(top.directions.1, vector![0.0, 1.0]));
    let right = seed.growth(1);
    assert!(close(right.directions.1, vector![h, -h]));

    // a second round slides both vertices along the side; the cache survives
    assert!(seed.extend(1.0, &obstacles, &[], &bounds));
    assert!(close(seed.polygon().vertex(2), vector![5.0, 2.5]));
    assert!(close(seed.polygon().vertex(3), vector![2.5, 5.0]));
    assert!(close(seed.growth(3).directions.0, vector![-h, h]));
    assert!(!seed.polygon().intersects(&obstacle));
}

#[test]
fn growth_cache_resets_when_slope_changes() {
    let mut seed = ExtendablePolygon::new(unit_square());
    let before = seed.growth(0);
    assert!(close(before.normal, vector![0.0, -1.0]));
    // tilting the bottom edge changes its slope
    assert!(seed.move_vertex(1, vector![1.0, -0.5]));
    let after = seed.growth(0);
    assert!(!close(after.normal, before.normal));
    assert!(close(after.directions.0, after.normal));
    assert!((after.normal.norm() - 1.0).abs() < 1e-12);
}

fn regular_polygon(center: Vec2, radius: f64, n: usize, phase: f64) -> ConvexPolygon {
    let vs = (0..n)
        .map(|k| {
            let t = phase + k as f64 * std::f64::consts::TAU / n as f64;
            center + vector![t.cos(), t.sin()] * radius
        })
        .collect();
    ConvexPolygon::new(vs).unwrap()
}

proptest! {
    #[test]
    fn containment_laws(
        cx in -5.0..5.0f64,
        cy in -5.0..5.0f64,
        r in 0.5..5.0f64,
        n in 3usize..9,
        phase in 0.0..1.0f64,
        px in -10.0..10.0f64,
        py in -10.0..10.0f64,
        on_edge in any::<bool>(),
        t in 0.0..1.0f64,
    ) {
        let poly = regular_polygon(vector![cx, cy], r, n, phase);
        let p = if on_edge {
            let e = poly.edge((px.abs() as usize) % n);
            e.first + e.vector() * t
        } else {
            vector![px, py]
        };
        prop_assert_eq!(
            poly.contains_boundary_included(p),
            poly.contains(p) || poly.lies_on_boundary(p)
        );
        prop_assert_eq!(
            poly.contains_boundary_excluded(p),
            poly.contains(p) && !poly.lies_on_boundary(p)
        );
        if on_edge {
            prop_assert!(poly.lies_on_boundary(p));
        }
    }

    #[test]
    fn rejected_mutations_do_not_mutate(
        n in 3usize..8,
        op in 0usize..4,
        idx in 0usize..10,
        px in -3.0..3.0f64,
        py in -3.0..3.0f64,
        qx in -3.0..3.0f64,
        qy in -3.0..3.0f64,
    ) {
        let mut poly = regular_polygon(vector![0.0, 0.0], 1.0, n, 0.3);
        let before = poly.vertices().to_vec();
        let p = vector![px, py];
        let ok = match op {
            0 => poly.add_vertex(idx, p),
            1 => poly.move_vertex(idx, p),
            2 => poly.remove_vertex(idx),
            _ => poly.replace_edge(idx, Segment::new(p, vector![qx, qy])),
        };
        if !ok {
            prop_assert_eq!(poly.vertices(), before.as_slice());
        } else {
            prop_assert!(ConvexPolygon::new(poly.vertices().to_vec()).is_some());
        }
    }

    #[test]
    fn segment_intersection_is_symmetric(
        a in prop::array::uniform4(-4i32..4),
        b in prop::array::uniform4(-4i32..4),
    ) {
        let s1 = Segment::new(vector![a[0] as f64, a[1] as f64], vector![a[2] as f64, a[3] as f64]);
        let s2 = Segment::new(vector![b[0] as f64, b[1] as f64], vector![b[2] as f64, b[3] as f64]);
        prop_assume!(!s1.is_degenerate() && !s2.is_degenerate());
        match (s1.intersect(&s2), s2.intersect(&s1)) {
            (Intersection::Point(p), Intersection::Point(q)) => prop_assert!((p - q).norm() < 1e-9),
            (x, y) => prop_assert_eq!(x, y),
        }
    }
}
