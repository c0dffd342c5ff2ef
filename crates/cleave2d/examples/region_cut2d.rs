extern crate nalgebra as na;

use cleave2d::bounding_volume::Aabb;
use cleave2d::config::CutConfig;
use cleave2d::region::{CutEvent, JobStatus, RegionCutJob};
use cleave2d::scene::{NodeDesc, RigidBody, Scene, Transform};
use cleave2d::shape::{Collider, Mesh};
use core::time::Duration;
use na::{Point2, Vector2};

fn main() {
    let mut scene = Scene::new();
    let tile = Aabb::new(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0));

    // A row of crates, the middle ones rotated.
    for i in 0..5 {
        let pose = Transform::from_translation(Vector2::new(i as f32 * 2.5, 0.0))
            .with_rotation(0.3 * (i % 2) as f32);
        let object = scene.spawn(
            NodeDesc::new(format!("crate {i}"))
                .with_transform(pose)
                .with_child(NodeDesc::both(
                    "body",
                    Mesh::from_aabb(&tile),
                    Collider::from_aabb(&tile),
                ))
                .with_child(NodeDesc::marker("muzzle")),
        );
        scene.object_mut(object).unwrap().body = Some(RigidBody::new(4.0));
    }

    // Carve a hole through the three crates in the middle.
    let region = Aabb::new(Point2::new(2.0, -0.5), Point2::new(8.0, 0.5));
    let mut job = RegionCutJob::from_scene(&mut scene, region, CutConfig::default());
    let mut frames = 0;

    loop {
        frames += 1;
        let status = job
            .advance(&mut scene, Duration::from_micros(50), |event| match event {
                CutEvent::Finalized {
                    fragment,
                    was_split,
                } => println!("{fragment:?} finalized (split: {was_split})."),
                CutEvent::Merged { into, from } => println!("{from:?} merged into {into:?}."),
                CutEvent::Destroyed(object) => println!("{object:?} destroyed."),
            })
            .unwrap();

        if status == JobStatus::Finished {
            break;
        }
    }

    println!("Region cut finished after {frames} frames.");
    for (object, cut) in job.results() {
        let inside = cut.inside.and_then(|id| scene[id].body).map(|b| b.mass);
        let outside = cut.outside.and_then(|id| scene[id].body).map(|b| b.mass);
        println!("{object:?}: mass inside {inside:?}, outside {outside:?}.");
    }
}
