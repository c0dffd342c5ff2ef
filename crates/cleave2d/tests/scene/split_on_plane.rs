use cleave2d::bounding_volume::Aabb;
use cleave2d::config::CutConfig;
use cleave2d::math::{Point, Real, Vector};
use cleave2d::scene::{CutError, Element, NodeDesc, RigidBody, Scene, Transform};
use cleave2d::shape::{Collider, Mesh};

fn rect(mins: (Real, Real), maxs: (Real, Real)) -> Aabb {
    Aabb::new(Point::new(mins.0, mins.1), Point::new(maxs.0, maxs.1))
}

fn vertical() -> Vector<Real> {
    Vector::new(0.0, 1.0)
}

#[test]
fn rotated_object_is_cut_in_world_space() {
    let mut scene = Scene::new();
    let shape = rect((0.0, -0.5), (4.0, 0.5));
    let quarter_turn = Transform::identity().with_rotation(core::f32::consts::FRAC_PI_2 as Real);
    let object = scene.spawn(
        NodeDesc::new("root")
            // A quarter turn: the bar spans [-0.5, 0.5] x [0, 4] in world space.
            .with_transform(quarter_turn)
            .with_child(NodeDesc::both(
                "bar",
                Mesh::from_aabb(&shape),
                Collider::from_aabb(&shape),
            )),
    );

    // Walking towards +X, the left side is the top.
    let outcome = scene
        .split_on_plane(
            object,
            Point::new(0.0, 1.0),
            Vector::new(1.0, 0.0),
            &CutConfig::default(),
        )
        .unwrap();
    let (lhs, rhs) = (outcome.left.unwrap(), outcome.right.unwrap());

    let top = scene.total_bounds(lhs).unwrap();
    let bottom = scene.total_bounds(rhs).unwrap();
    assert_relative_eq!(top.mins.y, 1.0, epsilon = 1.0e-5);
    assert_relative_eq!(top.maxs.y, 4.0, epsilon = 1.0e-5);
    assert_relative_eq!(bottom.mins.y, 0.0, epsilon = 1.0e-5);
    assert_relative_eq!(bottom.maxs.y, 1.0, epsilon = 1.0e-5);
    assert_relative_eq!(scene.object_area(lhs).unwrap(), 3.0, epsilon = 1.0e-4);
    assert_relative_eq!(scene.object_area(rhs).unwrap(), 1.0, epsilon = 1.0e-4);
}

#[test]
fn mesh_and_collider_are_split_independently() {
    let mut scene = Scene::new();
    let object = scene.spawn(
        NodeDesc::new("root")
            // The visual lies fully on the left, only the collider crosses the cut.
            .with_child(NodeDesc::new("decal").with_element(Element::Both(
                Mesh::from_aabb(&rect((-2.0, 0.0), (-1.0, 1.0))),
                Collider::from_aabb(&rect((-2.0, 0.0), (2.0, 1.0))),
            ))),
    );

    let outcome = scene
        .split_on_plane(object, Point::origin(), vertical(), &CutConfig::default())
        .unwrap();
    let (lhs, rhs) = (outcome.left.unwrap(), outcome.right.unwrap());

    let decal_lhs = scene.find_node(lhs, "decal").unwrap();
    let decal_rhs = scene.find_node(rhs, "decal").unwrap();
    assert!(matches!(scene[decal_lhs].element(), Element::Both(..)));
    assert!(matches!(scene[decal_rhs].element(), Element::Physical(_)));

    let collider_rhs = scene[decal_rhs].element().collider().unwrap();
    assert_relative_eq!(collider_rhs.signed_area(), 2.0, epsilon = 1.0e-5);
}

#[test]
fn collider_only_objects_share_their_mass_evenly() {
    let mut scene = Scene::new();
    let object = scene.spawn(NodeDesc::physical(
        "hitbox",
        Collider::from_aabb(&rect((-1.0, 0.0), (3.0, 1.0))),
    ));
    scene.object_mut(object).unwrap().body = Some(RigidBody::new(10.0));

    let outcome = scene
        .split_on_plane(object, Point::origin(), vertical(), &CutConfig::default())
        .unwrap();
    let (lhs, rhs) = (outcome.left.unwrap(), outcome.right.unwrap());

    // Without any mesh, there is no area to share the mass with.
    assert_relative_eq!(scene[lhs].body.unwrap().mass, 5.0);
    assert_relative_eq!(scene[rhs].body.unwrap().mass, 5.0);
}

#[test]
fn repeated_cuts_conserve_area_and_mass() {
    let mut scene = Scene::new();
    let shape = rect((0.0, 0.0), (10.0, 2.0));
    let object = scene.spawn(NodeDesc::new("root").with_child(NodeDesc::visual(
        "plank",
        Mesh::from_aabb(&shape),
    )));
    scene.object_mut(object).unwrap().body = Some(RigidBody::new(20.0));

    let mut pieces = vec![object];
    for x in [1.0, 2.5, 4.0, 7.25] {
        let last = pieces.pop().unwrap();
        let outcome = scene
            .split_on_plane(last, Point::new(x, 0.0), vertical(), &CutConfig::default())
            .unwrap();
        pieces.extend(outcome.left);
        pieces.extend(outcome.right);
    }

    assert_eq!(pieces.len(), 5);
    assert_eq!(scene.num_objects(), 5);

    let total_area: Real = pieces.iter().map(|o| scene.object_area(*o).unwrap()).sum();
    let total_mass: Real = pieces.iter().map(|o| scene[*o].body.unwrap().mass).sum();
    assert_relative_eq!(total_area, 20.0, epsilon = 1.0e-3);
    assert_relative_eq!(total_mass, 20.0, epsilon = 1.0e-3);
    assert!(pieces.iter().all(|o| scene[*o].is_split()));
}

#[test]
fn unknown_objects_are_reported() {
    let mut scene = Scene::new();
    let object = scene.spawn(NodeDesc::visual(
        "quad",
        Mesh::from_aabb(&rect((0.0, 0.0), (1.0, 1.0))),
    ));
    scene.destroy_object(object).unwrap();

    assert_eq!(
        scene.split_on_plane(object, Point::origin(), vertical(), &CutConfig::default()),
        Err(CutError::UnknownObject(object))
    );
}

#[test]
fn zero_length_direction_is_rejected() {
    let mut scene = Scene::new();
    let object = scene.spawn(NodeDesc::visual(
        "quad",
        Mesh::from_aabb(&rect((0.0, 0.0), (1.0, 1.0))),
    ));

    assert_eq!(
        scene.split_on_plane(
            object,
            Point::origin(),
            Vector::zeros(),
            &CutConfig::default()
        ),
        Err(CutError::DegenerateDirection)
    );
    assert!(scene.contains_object(object));
}

#[test]
fn sliver_cuts_never_leave_colliders_without_meshes() {
    let mut scene = Scene::new();
    let object = scene.spawn(
        NodeDesc::new("root")
            // Only clipped by a sliver: moves to the right as a whole.
            .with_child(NodeDesc::both(
                "crate",
                Mesh::from_aabb(&rect((0.0, 0.0), (1.0, 1.0))),
                Collider::from_aabb(&rect((0.0, 0.0), (1.0, 1.0))),
            ))
            .with_child(NodeDesc::both(
                "beam",
                Mesh::from_aabb(&rect((-1.0, 2.0), (2.0, 3.0))),
                Collider::from_aabb(&rect((-1.0, 2.0), (2.0, 3.0))),
            )),
    );
    scene.object_mut(object).unwrap().body = Some(RigidBody::new(8.0));
    let config = CutConfig {
        min_fragment_extent: 0.01,
        ..CutConfig::default()
    };

    let outcome = scene
        .split_on_plane(object, Point::new(0.005, 0.0), vertical(), &config)
        .unwrap();
    let (lhs, rhs) = (outcome.left.unwrap(), outcome.right.unwrap());

    assert!(scene.find_node(lhs, "crate").is_none());
    assert!(scene.find_node(rhs, "crate").is_some());

    for half in [lhs, rhs] {
        for node in scene.descendants(half).unwrap() {
            if scene[node].element().collider().is_some() {
                assert!(scene[node].element().mesh().is_some());
            }
        }
        assert!(scene[half].body.unwrap().mass > 0.0);
    }

    assert_relative_eq!(scene.object_area(lhs).unwrap(), 1.005, epsilon = 1.0e-4);
    assert_relative_eq!(scene.object_area(rhs).unwrap(), 2.995, epsilon = 1.0e-4);
    let total_mass = scene[lhs].body.unwrap().mass + scene[rhs].body.unwrap().mass;
    assert_relative_eq!(total_mass, 8.0, epsilon = 1.0e-4);
}
