use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};

/// Indicated an inconsistency while building a polygonal collider.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColliderBuilderError {
    /// A collider must contain at least one path.
    #[error("A collider must contain at least one path.")]
    EmptyPaths,
    /// Every path must have at least three points to enclose an area.
    #[error("the path {path} only has {num_points} points, at least 3 are needed.")]
    PathTooShort {
        /// The offending path.
        path: usize,
        /// The number of points of this path.
        num_points: usize,
    },
}

/// A 2D collision boundary made of one or more closed point loops.
///
/// Consecutive points of a path, including the last and the first one, form the
/// polygon's edges. Paths are expected to be simple (non self-intersecting).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Collider {
    pub(crate) paths: Vec<Vec<Point<Real>>>,
}

impl Collider {
    /// Creates a collider from its closed paths.
    pub fn new(paths: Vec<Vec<Point<Real>>>) -> Result<Self, ColliderBuilderError> {
        if paths.is_empty() {
            return Err(ColliderBuilderError::EmptyPaths);
        }

        for (i, path) in paths.iter().enumerate() {
            if path.len() < 3 {
                return Err(ColliderBuilderError::PathTooShort {
                    path: i,
                    num_points: path.len(),
                });
            }
        }

        Ok(Self { paths })
    }

    /// Creates a collider with a single closed path.
    pub fn from_path(path: Vec<Point<Real>>) -> Result<Self, ColliderBuilderError> {
        Self::new(vec![path])
    }

    /// Creates a collider with a single rectangular, counter-clockwise path.
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self {
            paths: vec![aabb.vertices().to_vec()],
        }
    }

    /// The closed paths of this collider.
    pub fn paths(&self) -> &[Vec<Point<Real>>] {
        &self.paths
    }

    /// The total number of points across all paths.
    pub fn num_points(&self) -> usize {
        self.paths.iter().map(|p| p.len()).sum()
    }

    /// The axis-aligned bounding box of all the paths.
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points(self.paths.iter().flatten().copied())
    }

    /// The signed area of all the paths (positive for counter-clockwise loops).
    pub fn signed_area(&self) -> Real {
        self.paths.iter().map(|p| path_signed_area(p)).sum()
    }
}

/// The signed area enclosed by a closed path, positive if it is counter-clockwise.
pub fn path_signed_area(path: &[Point<Real>]) -> Real {
    let mut twice_area = 0.0;

    for (i, a) in path.iter().enumerate() {
        let b = &path[(i + 1) % path.len()];
        twice_area += a.coords.perp(&b.coords);
    }

    twice_area * 0.5
}
