//! Axis Aligned Bounding Box.

use crate::bounding_volume::BoundingVolume;
use crate::math::{Affine, Point, Real, Vector, DIM};

/// An Axis-Aligned Bounding Box (AABB).
///
/// An AABB is the simplest bounding volume, defined by its minimum and maximum corners.
/// It's called "axis-aligned" because its edges are always parallel to the coordinate axes,
/// making it very fast to test and compute.
///
/// # Structure
///
/// - **mins**: The point with the smallest coordinates on each axis (bottom-left corner)
/// - **maxs**: The point with the largest coordinates on each axis (top-right corner)
/// - **Invariant**: `mins.x ≤ maxs.x`, `mins.y ≤ maxs.y`
///
/// In this crate AABBs are used for the cached bounds of splittable objects, for the
/// rectangular cut regions, and for measuring the extent of freshly split fragments.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use cleave2d::bounding_volume::Aabb;
/// use nalgebra::Point2;
///
/// let aabb = Aabb::from_points([
///     Point2::new(1.0, 2.0),
///     Point2::new(-1.0, 4.0),
///     Point2::new(0.0, 0.0),
/// ]);
///
/// assert_eq!(aabb.mins, Point2::new(-1.0, 0.0));
/// assert_eq!(aabb.maxs, Point2::new(1.0, 4.0));
/// assert!(aabb.spans(0, 0.5));
/// assert!(!aabb.spans(0, 1.0));
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates (bottom-left corner).
    pub mins: Point<Real>,

    /// The point with maximum coordinates (top-right corner).
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with inverted bounds.
    ///
    /// The resulting AABB has `mins` set to maximum values and `maxs` set to
    /// minimum values. This is useful as an initial value for AABB merging
    /// algorithms (similar to starting a min operation with infinity).
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// Creates a new AABB from its center and half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Creates a new AABB that tightly encloses a set of points.
    ///
    /// Returns an invalid AABB (see [`Aabb::is_valid`]) if the iterator is empty.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut result = Self::new_invalid();
        for pt in pts {
            result.take_point(pt);
        }
        result
    }

    /// Does this AABB enclose at least one point?
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.mins.x <= self.maxs.x && self.mins.y <= self.maxs.y
    }

    /// Returns the center point of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The extents of this `Aabb`.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The area of this `Aabb`.
    #[inline]
    pub fn area(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y
    }

    /// Enlarges this `Aabb` so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// Computes the `Aabb` bounding `self` transformed by the affine map `m`.
    ///
    /// The four corners are transformed so this stays exact under rotations, non-uniform
    /// scaling and mirroring.
    pub fn transform_by(&self, m: &Affine) -> Self {
        if !self.is_valid() {
            return *self;
        }

        Self::from_points(self.vertices().iter().map(|pt| m * pt))
    }

    /// Does the `axis`-th coordinate `coord` lie strictly between this AABB's bounds?
    ///
    /// A line at `coord` perpendicular to `axis` that is tangent to the AABB does not
    /// span it.
    #[inline]
    pub fn spans(&self, axis: usize, coord: Real) -> bool {
        self.mins[axis] < coord && coord < self.maxs[axis]
    }

    /// Computes the intersection of this `Aabb` and another one.
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let result = Aabb {
            mins: Point::from(self.mins.coords.sup(&other.mins.coords)),
            maxs: Point::from(self.maxs.coords.inf(&other.maxs.coords)),
        };

        for i in 0..DIM {
            if result.mins[i] > result.maxs[i] {
                return None;
            }
        }

        Some(result)
    }

    /// Computes the vertices of this `Aabb`, counter-clockwise from `mins`.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 4] {
        [
            Point::new(self.mins.x, self.mins.y),
            Point::new(self.maxs.x, self.mins.y),
            Point::new(self.maxs.x, self.maxs.y),
            Point::new(self.mins.x, self.maxs.y),
        ]
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    #[inline]
    fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    #[inline]
    fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }
}
