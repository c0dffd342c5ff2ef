//! Area-based mass bookkeeping for split fragments.

pub use self::mass_split::MassSplit;

mod mass_properties_trimesh2d;
mod mass_split;

/// Free functions for some special-cases of area computation.
pub mod details {
    pub use super::mass_properties_trimesh2d::{triangle_area, trimesh_area};
}
