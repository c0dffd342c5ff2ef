use crate::common::rand_real;
use cleave2d::bounding_volume::Aabb;
use cleave2d::config::CutConfig;
use cleave2d::math::{Point, Real, Vector};
use cleave2d::region::{cut_object_in_region, CutEvent};
use cleave2d::scene::{NodeDesc, ObjectId, RigidBody, Scene, Transform};
use cleave2d::shape::{Collider, Mesh};
use oorandom::Rand32;

fn square(half_extent: Real) -> Aabb {
    Aabb::new(
        Point::new(-half_extent, -half_extent),
        Point::new(half_extent, half_extent),
    )
}

/// An object with a visual layer and a physical layer, both covering `aabb`.
fn layered_object(scene: &mut Scene, aabb: &Aabb, mass: Real) -> ObjectId {
    let object = scene.spawn(
        NodeDesc::new("root")
            .with_child(NodeDesc::visual("sprite", Mesh::from_aabb(aabb)))
            .with_child(NodeDesc::physical("hitbox", Collider::from_aabb(aabb))),
    );
    scene.object_mut(object).unwrap().body = Some(RigidBody::new(mass));
    object
}

fn assert_contains(outer: &Aabb, inner: &Aabb) {
    assert!(inner.mins.x >= outer.mins.x - 1.0e-4 && inner.mins.y >= outer.mins.y - 1.0e-4);
    assert!(inner.maxs.x <= outer.maxs.x + 1.0e-4 && inner.maxs.y <= outer.maxs.y + 1.0e-4);
}

#[test]
fn object_outside_of_the_region_is_left_untouched() {
    let mut scene = Scene::new();
    let object = layered_object(&mut scene, &square(1.0), 4.0);
    let region = Aabb::new(Point::new(3.0, -1.0), Point::new(5.0, 1.0));

    let mut events = vec![];
    let cut = cut_object_in_region(
        &mut scene,
        object,
        &region,
        &CutConfig::default(),
        |event| events.push(event),
    )
    .unwrap();

    assert_eq!(cut.inside, None);
    assert_eq!(cut.outside, Some(object));
    assert_eq!(
        events,
        [CutEvent::Finalized {
            fragment: object,
            was_split: false
        }]
    );
    assert!(!scene[object].is_split());
    assert_eq!(scene[object].body.unwrap().mass, 4.0);
}

#[test]
fn touching_the_region_is_not_overlapping_it() {
    let mut scene = Scene::new();
    let object = layered_object(&mut scene, &square(1.0), 4.0);
    // Shares the edge x = 1 with the object.
    let region = Aabb::new(Point::new(1.0, -1.0), Point::new(3.0, 1.0));

    let cut =
        cut_object_in_region(&mut scene, object, &region, &CutConfig::default(), |_| {})
            .unwrap();
    assert_eq!(cut.inside, None);
    assert_eq!(cut.outside, Some(object));
    assert_eq!(scene.num_objects(), 1);
}

#[test]
fn outer_pieces_are_merged_into_one_object() {
    let mut scene = Scene::new();
    let object = layered_object(&mut scene, &square(2.0), 16.0);
    let region = square(1.0);

    let mut events = vec![];
    let cut = cut_object_in_region(
        &mut scene,
        object,
        &region,
        &CutConfig::default(),
        |event| events.push(event),
    )
    .unwrap();
    let (inside, outside) = (cut.inside.unwrap(), cut.outside.unwrap());

    // Each of the four outer pieces brings both layers.
    assert_eq!(scene.root_children(outside).unwrap().len(), 8);
    assert_eq!(scene.root_children(inside).unwrap().len(), 2);
    assert_eq!(scene.num_objects(), 2);

    let merged: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            CutEvent::Merged { into, from } => Some((*into, *from)),
            _ => None,
        })
        .collect();
    assert_eq!(merged.len(), 3);
    for (into, from) in merged {
        assert_eq!(into, outside);
        assert!(!scene.contains_object(from));
        assert!(events.contains(&CutEvent::Destroyed(from)));
    }

    // Finalization comes last.
    let finalized = &events[events.len() - 2..];
    assert!(finalized
        .iter()
        .all(|e| matches!(e, CutEvent::Finalized { was_split: true, .. })));

    assert_contains(&region, &scene.total_bounds(inside).unwrap());
    assert_relative_eq!(scene.object_area(outside).unwrap(), 12.0, epsilon = 1.0e-4);
    assert_relative_eq!(scene[outside].body.unwrap().mass, 12.0, epsilon = 1.0e-3);
    assert!(scene[outside].is_split());
}

#[test]
fn region_over_a_corner_only_applies_two_cuts() {
    let mut scene = Scene::new();
    let object = layered_object(&mut scene, &square(2.0), 16.0);
    let region = Aabb::new(Point::new(1.0, 1.0), Point::new(5.0, 5.0));

    let mut merges = 0;
    let cut = cut_object_in_region(
        &mut scene,
        object,
        &region,
        &CutConfig::default(),
        |event| merges += matches!(event, CutEvent::Merged { .. }) as usize,
    )
    .unwrap();
    let (inside, outside) = (cut.inside.unwrap(), cut.outside.unwrap());

    assert_eq!(merges, 1);
    assert_relative_eq!(scene.object_area(inside).unwrap(), 1.0, epsilon = 1.0e-4);
    assert_relative_eq!(scene.object_area(outside).unwrap(), 15.0, epsilon = 1.0e-4);

    let bounds = scene.total_bounds(inside).unwrap();
    assert_relative_eq!(bounds.mins, Point::new(1.0, 1.0), epsilon = 1.0e-4);
    assert_relative_eq!(bounds.maxs, Point::new(2.0, 2.0), epsilon = 1.0e-4);
}

#[test]
fn mirrored_objects_are_cut_in_world_space() {
    let mut scene = Scene::new();
    let object = scene.spawn(
        NodeDesc::new("root")
            .with_transform(
                Transform::from_translation(Vector::new(10.0, 0.0))
                    .with_scale(Vector::new(-1.0, 2.0)),
            )
            // Spans [6, 10] x [0, 4] in world space.
            .with_child(NodeDesc::visual(
                "sprite",
                Mesh::from_aabb(&Aabb::new(Point::new(0.0, 0.0), Point::new(4.0, 2.0))),
            )),
    );
    let region = Aabb::new(Point::new(7.0, 1.0), Point::new(8.0, 3.0));

    let cut =
        cut_object_in_region(&mut scene, object, &region, &CutConfig::default(), |_| {})
            .unwrap();
    let (inside, outside) = (cut.inside.unwrap(), cut.outside.unwrap());

    let bounds = scene.total_bounds(inside).unwrap();
    assert_relative_eq!(bounds.mins, region.mins, epsilon = 1.0e-4);
    assert_relative_eq!(bounds.maxs, region.maxs, epsilon = 1.0e-4);

    let bounds = scene.total_bounds(outside).unwrap();
    assert_relative_eq!(bounds.mins, Point::new(6.0, 0.0), epsilon = 1.0e-4);
    assert_relative_eq!(bounds.maxs, Point::new(10.0, 4.0), epsilon = 1.0e-4);
}

#[test]
fn random_regions_conserve_area_and_mass() {
    let mut rng = Rand32::new(77);

    for _ in 0..100 {
        let mut scene = Scene::new();
        let object = layered_object(&mut scene, &square(2.0), 16.0);
        let mins = Point::new(rand_real(&mut rng, -3.0, 2.5), rand_real(&mut rng, -3.0, 2.5));
        let extents = Vector::new(rand_real(&mut rng, 0.5, 4.0), rand_real(&mut rng, 0.5, 4.0));
        let region = Aabb::new(mins, mins + extents);

        let cut =
            cut_object_in_region(&mut scene, object, &region, &CutConfig::default(), |_| {})
                .unwrap();
        let pieces: Vec<_> = [cut.inside, cut.outside].into_iter().flatten().collect();
        assert_eq!(scene.num_objects(), pieces.len());

        let area: Real = pieces.iter().map(|o| scene.object_area(*o).unwrap()).sum();
        let mass: Real = pieces.iter().map(|o| scene[*o].body.unwrap().mass).sum();
        assert_relative_eq!(area, 16.0, epsilon = 1.0e-3);
        assert_relative_eq!(mass, 16.0, epsilon = 1.0e-3);

        if let Some(inside) = cut.inside {
            assert_contains(&region, &scene.total_bounds(inside).unwrap());
        }
    }
}
