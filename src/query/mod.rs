//! Non-persistent geometric queries.
//!
//! The only family of queries provided here is plane-splitting: cutting meshes and
//! collision polygons by an oriented line. See [`split_mesh`] and [`split_collider`].

pub use self::split::{
    classify_side, split_collider, split_collider_path, split_mesh, CutPlane, PlaneFrame, Side,
    SplitResult,
};

pub mod split;
