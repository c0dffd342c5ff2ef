use crate::common::{convex_polygon, jittered_grid, line_through};
use cleave2d::bounding_volume::Aabb;
use cleave2d::math::{Point, Vector};
use cleave2d::query::{split_collider, split_mesh, CutPlane, PlaneFrame, SplitResult};
use cleave2d::shape::path_signed_area;
use oorandom::Rand32;

#[test]
fn mesh_split_preserves_area() {
    let mut rng = Rand32::new(42);
    let aabb = Aabb::new(Point::new(-2.0, -1.0), Point::new(3.0, 2.5));

    for _ in 0..200 {
        let mesh = jittered_grid(&mut rng, &aabb, 6);
        let plane = line_through(&mut rng, &aabb);
        let frame = PlaneFrame::from_plane(&plane).unwrap();

        match split_mesh(&mesh, &frame) {
            SplitResult::Pair(lhs, rhs) => {
                assert_relative_eq!(lhs.area() + rhs.area(), mesh.area(), epsilon = 1.0e-3);
            }
            // The line may only graze a corner of the grid.
            SplitResult::Left | SplitResult::Right => {}
        }
    }
}

#[test]
fn collider_split_preserves_area() {
    let mut rng = Rand32::new(7);
    let aabb = Aabb::new(Point::new(-1.0, -1.0), Point::new(1.0, 1.0));

    for _ in 0..200 {
        let collider = convex_polygon(&mut rng, Point::origin(), 1.0);
        let plane = line_through(&mut rng, &aabb);
        let frame = PlaneFrame::from_plane(&plane).unwrap();

        if let SplitResult::Pair(Some(lhs), Some(rhs)) = split_collider(&collider, &frame) {
            assert_relative_eq!(
                lhs.signed_area() + rhs.signed_area(),
                collider.signed_area(),
                epsilon = 1.0e-4
            );

            // Both halves of a convex polygon are convex, hence simple.
            for path in lhs.paths().iter().chain(rhs.paths()) {
                assert!(path.len() >= 3);
                assert!(path_signed_area(path) > 0.0);
                for i in 0..path.len() {
                    let a = path[i];
                    let b = path[(i + 1) % path.len()];
                    let c = path[(i + 2) % path.len()];
                    assert!((b - a).perp(&(c - b)) >= -1.0e-4, "Non-convex half.");
                }
            }
        }
    }
}

#[test]
fn one_sided_input_is_returned_whole() {
    let mut rng = Rand32::new(3);
    let aabb = Aabb::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
    let mesh = jittered_grid(&mut rng, &aabb, 3);
    let collider = convex_polygon(&mut rng, Point::new(0.5, 0.5), 0.5);

    let far_left = PlaneFrame::from_plane(&CutPlane::new(
        Point::new(10.0, 0.0),
        Vector::new(0.0, 1.0),
    ))
    .unwrap();
    let far_right = PlaneFrame::from_plane(&CutPlane::new(
        Point::new(-10.0, 0.0),
        Vector::new(0.0, 1.0),
    ))
    .unwrap();

    assert_eq!(split_mesh(&mesh, &far_left), SplitResult::Left);
    assert_eq!(split_mesh(&mesh, &far_right), SplitResult::Right);
    assert_eq!(split_collider(&collider, &far_left), SplitResult::Left);
    assert_eq!(split_collider(&collider, &far_right), SplitResult::Right);
}
