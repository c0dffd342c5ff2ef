use crate::math::{Affine, Real, Vector};
use na::Matrix3;

/// The local pose of a scene node: a translation, a rotation angle and a non-uniform
/// scale, applied in scale-rotation-translation order.
///
/// Negative scale components mirror the node.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Transform {
    /// The translation part.
    pub translation: Vector<Real>,
    /// The rotation angle, in radians.
    pub rotation: Real,
    /// The scale factor along each local axis.
    pub scale: Vector<Real>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            translation: Vector::zeros(),
            rotation: 0.0,
            scale: Vector::repeat(1.0),
        }
    }

    /// A pure translation.
    pub fn from_translation(translation: Vector<Real>) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// Returns `self` with its rotation angle replaced by `angle`.
    #[must_use]
    pub fn with_rotation(mut self, angle: Real) -> Self {
        self.rotation = angle;
        self
    }

    /// Returns `self` with its scale replaced by `scale`.
    #[must_use]
    pub fn with_scale(mut self, scale: Vector<Real>) -> Self {
        self.scale = scale;
        self
    }

    /// Is exactly one of the scale components negative?
    pub fn is_mirrored(&self) -> bool {
        (self.scale.x < 0.0) != (self.scale.y < 0.0)
    }

    /// The affine map `translation * rotation * scale`.
    pub fn to_affine(&self) -> Affine {
        let (sin, cos) = self.rotation.sin_cos();
        let (sx, sy) = (self.scale.x, self.scale.y);
        #[rustfmt::skip]
        let matrix = Matrix3::new(
            cos * sx, -sin * sy, self.translation.x,
            sin * sx, cos * sy,  self.translation.y,
            0.0,      0.0,       1.0,
        );
        Affine::from_matrix_unchecked(matrix)
    }

    /// Decomposes an affine map into a translation, a rotation and a non-uniform scale.
    ///
    /// Mirroring ends up on the `y` scale component. Shear cannot be represented and is
    /// lost: the result then only approximates `m`.
    pub fn from_affine(m: &Affine) -> Self {
        let mat = m.matrix();
        let col_x = Vector::new(mat[(0, 0)], mat[(1, 0)]);
        let col_y = Vector::new(mat[(0, 1)], mat[(1, 1)]);
        let sx = col_x.norm();
        let det = col_x.perp(&col_y);
        let rotation = col_x.y.atan2(col_x.x);
        let sy = if sx > 0.0 { det / sx } else { col_y.norm() };

        if sx > 0.0 && sy != 0.0 {
            let sheared = col_x.dot(&col_y) / (sx * sy.abs());
            if sheared.abs() > 1.0e-4 {
                log::debug!("Dropping the shear of an affine transform ({sheared}).");
            }
        }

        Self {
            translation: Vector::new(mat[(0, 2)], mat[(1, 2)]),
            rotation,
            scale: Vector::new(sx, sy),
        }
    }
}

/// The determinant of the linear part of `m`. It is negative if `m` mirrors.
pub(crate) fn linear_determinant(m: &Affine) -> Real {
    let mat = m.matrix();
    mat[(0, 0)] * mat[(1, 1)] - mat[(0, 1)] * mat[(1, 0)]
}
