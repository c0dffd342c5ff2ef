use crate::math::{Affine, Isometry, Point, Real, Rotation, Translation, Vector, DEFAULT_EPSILON};
use crate::query::Side;
use na::Unit;

/// Classifies a point expressed in the cut-plane frame.
///
/// Points exactly on the cut line are classified as [`Side::Right`], so both halves never
/// disagree on a vertex lying on the seam.
#[inline]
pub fn classify_side(pt: &Point<Real>) -> Side {
    if pt.x < 0.0 {
        Side::Left
    } else {
        Side::Right
    }
}

/// An oriented infinite line.
///
/// The [`Side::Left`] of the plane is the side on the left when walking along `dir`,
/// i.e., the set of points `p` with `dir.perp(&(p - anchor)) > 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CutPlane {
    /// A point on the line.
    pub anchor: Point<Real>,
    /// The direction of the line. Does not need to be normalized.
    pub dir: Vector<Real>,
}

impl CutPlane {
    /// Creates a new cut plane from a point on the line and its direction.
    pub fn new(anchor: Point<Real>, dir: Vector<Real>) -> Self {
        Self { anchor, dir }
    }

    /// The rigid transformation mapping the frame this plane is expressed in into the
    /// cut-plane frame: `anchor` goes to the origin and `dir` to the `+Y` axis.
    ///
    /// Returns `None` if the direction is (close to) zero.
    pub fn frame_isometry(&self) -> Option<Isometry<Real>> {
        let dir = Unit::try_new(self.dir, DEFAULT_EPSILON)?;
        // Rotation by φ with cos φ = dir.y, sin φ = dir.x sends `dir` to `+Y`.
        let rotation = Rotation::from_cos_sin_unchecked(dir.y, dir.x);
        Some(Isometry::from_parts(
            Translation::from(rotation * -self.anchor.coords),
            rotation,
        ))
    }

    /// The side of this plane `pt` lies on.
    pub fn side_of(&self, pt: &Point<Real>) -> Side {
        if self.dir.perp(&(pt - self.anchor)) > 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// A map from some local space into the cut-plane frame.
///
/// The map is affine, not necessarily rigid: splitting a scaled child composes the cut's
/// rigid frame with the child's non-uniform scale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneFrame {
    to_plane: Affine,
}

impl PlaneFrame {
    /// A frame from an arbitrary affine map into the cut-plane frame.
    pub fn new(to_plane: Affine) -> Self {
        Self { to_plane }
    }

    /// The frame of `plane`, or `None` if its direction is degenerate.
    pub fn from_plane(plane: &CutPlane) -> Option<Self> {
        plane
            .frame_isometry()
            .map(|iso| Self::new(na::convert(iso)))
    }

    /// The frame of a space whose points are mapped by `local` into the space of `self`.
    #[must_use]
    pub fn prepend(&self, local: &Affine) -> Self {
        Self::new(self.to_plane * local)
    }

    /// The affine map into the cut-plane frame.
    pub fn to_plane(&self) -> &Affine {
        &self.to_plane
    }

    /// Expresses `pt` in the cut-plane frame.
    #[inline]
    pub fn transform_point(&self, pt: &Point<Real>) -> Point<Real> {
        self.to_plane * pt
    }

    /// The side of the cut `pt` lies on.
    #[inline]
    pub fn classify(&self, pt: &Point<Real>) -> Side {
        classify_side(&self.transform_point(pt))
    }
}
