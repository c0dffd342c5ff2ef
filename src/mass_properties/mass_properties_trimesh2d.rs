use crate::math::{Point3, Real};

/// The unsigned area of the triangle `(a, b, c)` projected on the gameplay plane.
///
/// This is half the magnitude of the cross product of two of its edges.
#[inline]
pub fn triangle_area(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Real {
    let e1 = b.xy() - a.xy();
    let e2 = c.xy() - a.xy();
    e1.perp(&e2).abs() * 0.5
}

/// Computes the total area of a triangle-mesh.
pub fn trimesh_area(vertices: &[Point3<Real>], indices: &[[u32; 3]]) -> Real {
    indices
        .iter()
        .map(|idx| {
            triangle_area(
                &vertices[idx[0] as usize],
                &vertices[idx[1] as usize],
                &vertices[idx[2] as usize],
            )
        })
        .sum()
}
