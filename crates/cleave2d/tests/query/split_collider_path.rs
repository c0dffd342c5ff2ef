use crate::common::{convex_polygon, line_through};
use cleave2d::bounding_volume::Aabb;
use cleave2d::math::{Point, Real, Vector};
use cleave2d::query::{split_collider_path, CutPlane, PlaneFrame, Side, SplitResult};
use cleave2d::shape::path_signed_area;
use oorandom::Rand32;

#[test]
fn convex_paths_are_split_in_two_convex_loops() {
    let mut rng = Rand32::new(2024);
    let aabb = Aabb::new(Point::new(-1.0, -1.0), Point::new(1.0, 1.0));

    for _ in 0..300 {
        let collider = convex_polygon(&mut rng, Point::origin(), 1.0);
        let path = &collider.paths()[0];
        let frame = PlaneFrame::from_plane(&line_through(&mut rng, &aabb)).unwrap();

        let (lhs, rhs) = match split_collider_path(path, &frame) {
            SplitResult::Pair(lhs, rhs) => (lhs, rhs),
            SplitResult::Left => {
                assert!(path.iter().all(|pt| frame.classify(pt) == Side::Left));
                continue;
            }
            SplitResult::Right => {
                assert!(path.iter().all(|pt| frame.classify(pt) == Side::Right));
                continue;
            }
        };

        // A convex loop crosses a line exactly twice, adding one point per crossing
        // to each side.
        assert_eq!(lhs.len() + rhs.len(), path.len() + 4);
        assert!(lhs.len() >= 3 && rhs.len() >= 3);

        for (half, side) in [(&lhs, Side::Left), (&rhs, Side::Right)] {
            assert!(path_signed_area(half) > 0.0, "The winding order changed.");

            for pt in half.iter() {
                let local = frame.transform_point(pt);
                if path.contains(pt) {
                    // Points exactly on the cut are shared by both halves.
                    assert!(local.x == 0.0 || frame.classify(pt) == side);
                } else {
                    assert_relative_eq!(local.x, 0.0, epsilon = 1.0e-4);
                }
            }
        }

        assert_relative_eq!(
            path_signed_area(&lhs) + path_signed_area(&rhs),
            path_signed_area(path),
            epsilon = 1.0e-4
        );
    }
}

#[test]
fn first_point_order_is_preserved() {
    let mut rng = Rand32::new(5);
    let aabb = Aabb::new(Point::new(-0.5, -0.5), Point::new(0.5, 0.5));

    for _ in 0..100 {
        let collider = convex_polygon(&mut rng, Point::origin(), 1.0);
        let path = &collider.paths()[0];
        let frame = PlaneFrame::from_plane(&line_through(&mut rng, &aabb)).unwrap();

        if let SplitResult::Pair(lhs, rhs) = split_collider_path(path, &frame) {
            // Original points appear in the same relative order as in the input.
            for half in [&lhs, &rhs] {
                let positions: Vec<usize> = half
                    .iter()
                    .filter_map(|pt| path.iter().position(|p| p == pt))
                    .collect();
                assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}

/// Checks that `half` has no repeated point and no spike running along the cut.
fn assert_clean_loop(half: &[Point<Real>], frame: &PlaneFrame) {
    let n = half.len();
    assert!(n >= 3);

    for i in 0..n {
        let (prev, curr, next) = (half[(i + n - 1) % n], half[i], half[(i + 1) % n]);
        assert_ne!(curr, next, "Consecutive duplicate point {curr:?}.");

        let x = |pt: &Point<Real>| frame.transform_point(pt).x;
        if x(&curr).abs() < 1.0e-5 {
            assert!(
                x(&prev).abs() >= 1.0e-5 || x(&next).abs() >= 1.0e-5,
                "{curr:?} only connects to other points on the cut."
            );
        }
    }
}

#[test]
fn vertex_touching_the_cut_does_not_leave_a_spike() {
    let frame = PlaneFrame::from_plane(&CutPlane::new(Point::origin(), Vector::y())).unwrap();
    // Crosses the cut on its lower half, touches it at (0, 2) from the left.
    let path = [
        Point::new(-2.0, -1.0),
        Point::new(1.0, -1.0),
        Point::new(1.0, 0.0),
        Point::new(-1.0, 0.0),
        Point::new(0.0, 2.0),
        Point::new(-2.0, 2.0),
    ];

    let SplitResult::Pair(lhs, rhs) = split_collider_path(&path, &frame) else {
        panic!("The path crosses the cut.");
    };
    assert_clean_loop(&lhs, &frame);
    assert_clean_loop(&rhs, &frame);

    assert!(rhs.iter().all(|pt| frame.transform_point(pt).x > -1.0e-5));
    assert!(lhs.iter().all(|pt| frame.transform_point(pt).x < 1.0e-5));
    assert_relative_eq!(path_signed_area(&lhs), 5.0, epsilon = 1.0e-4);
    assert_relative_eq!(path_signed_area(&rhs), 1.0, epsilon = 1.0e-4);
}

#[test]
fn edge_lying_on_the_cut_stays_with_its_neighbors() {
    let frame = PlaneFrame::from_plane(&CutPlane::new(Point::origin(), Vector::y())).unwrap();
    // The edge from (0, 1) to (0, 2) lies on the cut, with the path on its left.
    let path = [
        Point::new(-2.0, -1.0),
        Point::new(1.0, -1.0),
        Point::new(1.0, 0.0),
        Point::new(-1.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(0.0, 2.0),
        Point::new(-2.0, 2.0),
    ];

    let SplitResult::Pair(lhs, rhs) = split_collider_path(&path, &frame) else {
        panic!("The path crosses the cut.");
    };
    assert_clean_loop(&lhs, &frame);
    assert_clean_loop(&rhs, &frame);
    assert_eq!(lhs.len(), 7);
    assert_eq!(rhs.len(), 4);
}
