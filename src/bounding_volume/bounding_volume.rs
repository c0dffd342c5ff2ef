/// Trait of bounding volumes.
///
/// Bounding volumes are coarse approximations of the objects of a scene, used to find the
/// objects a cut region may touch before doing any exact geometry work.
pub trait BoundingVolume {
    /// Checks if this bounding volume intersects with another one.
    ///
    /// Bounding volumes that only touch are considered intersecting.
    fn intersects(&self, _: &Self) -> bool;

    /// Checks if this bounding volume contains another one.
    fn contains(&self, _: &Self) -> bool;

    /// Merges this bounding volume with another one. The merge is done in-place.
    fn merge(&mut self, _: &Self);
}
