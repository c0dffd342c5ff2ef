//! Splittable objects and the arena holding their hierarchies.
//!
//! A [`Scene`] owns every object and every node. An object is a tree of nodes whose
//! root carries the object's transform, and whose nodes may carry a mesh, a collider,
//! both, or nothing. Splitting an object along a line with [`Scene::split_on_plane`]
//! splits each of its nodes independently and restructures the two resulting trees.

pub use self::node::{Element, Node, NodeDesc, NodeFlags, NodeId};
pub use self::rigid_body::{AnimationState, RigidBody};
pub use self::scene::{CutError, ObjectId, Scene, Splittable};
pub use self::split_on_plane::SplitOutcome;
pub use self::transform::Transform;

mod node;
mod rigid_body;
mod scene;
mod split_on_plane;
mod transform;
