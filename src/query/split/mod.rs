//! Splitting meshes and polygons by an oriented line.
//!
//! All the splitting routines work in the *cut-plane frame*: a frame where the cut line
//! is the Y axis, pointing up. Points with a negative `x` in this frame are on the
//! [`Side::Left`] of the cut, everything else is on the [`Side::Right`].

pub use self::plane_frame::{classify_side, CutPlane, PlaneFrame};
pub use self::split::{Side, SplitResult};
pub use self::split_collider::{split_collider, split_collider_path};
pub use self::split_mesh::split_mesh;

mod plane_frame;
mod split;
mod split_collider;
mod split_mesh;
