//! Geometry consumed and produced by the splitting routines.

pub use self::collider::{path_signed_area, Collider, ColliderBuilderError};
pub use self::mesh::{Mesh, MeshBuilderError};

mod collider;
mod mesh;
