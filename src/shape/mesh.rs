use crate::bounding_volume::Aabb;
use crate::mass_properties::details::trimesh_area;
use crate::math::{Point, Point3, Real};

/// Indicated an inconsistency while building a textured mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshBuilderError {
    /// A mesh must contain at least one triangle.
    #[error("A mesh must contain at least one triangle.")]
    EmptyIndices,
    /// The UV buffer must have exactly one entry per vertex.
    #[error("the mesh has {vertices} vertices but {uvs} texture coordinates.")]
    MismatchedUvs {
        /// The length of the vertex buffer.
        vertices: usize,
        /// The length of the UV buffer.
        uvs: usize,
    },
    /// A triangle references a vertex that does not exist.
    #[error("the triangle {triangle} references the vertex {index} but there are only {num_vertices} vertices.")]
    IndexOutOfBounds {
        /// The offending triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        index: u32,
        /// The length of the vertex buffer.
        num_vertices: usize,
    },
}

/// A textured triangle mesh lying on the gameplay plane.
///
/// Vertices are 3D so the renderer-facing depth (`z`) survives splitting, but all the
/// splitting math only looks at `x` and `y`. Every vertex has exactly one UV coordinate,
/// and every vertex is referenced by at least one triangle once the mesh went through a
/// split.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Mesh {
    pub(crate) vertices: Vec<Point3<Real>>,
    pub(crate) uvs: Vec<Point<Real>>,
    pub(crate) indices: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a new mesh from its vertex, texture coordinate and index buffers.
    ///
    /// This is the only place where the buffers are validated: the splitting routines
    /// assume well-formed input and never check it again.
    pub fn new(
        vertices: Vec<Point3<Real>>,
        uvs: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, MeshBuilderError> {
        if indices.is_empty() {
            return Err(MeshBuilderError::EmptyIndices);
        }

        if vertices.len() != uvs.len() {
            return Err(MeshBuilderError::MismatchedUvs {
                vertices: vertices.len(),
                uvs: uvs.len(),
            });
        }

        for (i, tri) in indices.iter().enumerate() {
            for index in tri {
                if *index as usize >= vertices.len() {
                    return Err(MeshBuilderError::IndexOutOfBounds {
                        triangle: i as u32,
                        index: *index,
                        num_vertices: vertices.len(),
                    });
                }
            }
        }

        Ok(Self::new_unchecked(vertices, uvs, indices))
    }

    pub(crate) fn new_unchecked(
        vertices: Vec<Point3<Real>>,
        uvs: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Self {
        Self {
            vertices,
            uvs,
            indices,
        }
    }

    /// Creates a two-triangle quad covering `aabb`, textured with the full `[0, 1]²` UV range.
    pub fn from_aabb(aabb: &Aabb) -> Self {
        let vertices = aabb
            .vertices()
            .iter()
            .map(|pt| Point3::new(pt.x, pt.y, 0.0))
            .collect();
        let uvs = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        Self::new_unchecked(vertices, uvs, vec![[0, 1, 2], [0, 2, 3]])
    }

    /// The vertex buffer of this mesh.
    pub fn vertices(&self) -> &[Point3<Real>] {
        &self.vertices
    }

    /// The texture coordinates of this mesh, index-aligned with the vertex buffer.
    pub fn uvs(&self) -> &[Point<Real>] {
        &self.uvs
    }

    /// The index buffer of this mesh.
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The number of triangles of this mesh.
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// The projection of the `i`-th vertex on the gameplay plane.
    #[inline]
    pub fn planar_vertex(&self, i: usize) -> Point<Real> {
        self.vertices[i].xy()
    }

    /// The axis-aligned bounding box of this mesh's projection on the gameplay plane.
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|pt| pt.xy()))
    }

    /// The total area of this mesh's triangles.
    pub fn area(&self) -> Real {
        trimesh_area(&self.vertices, &self.indices)
    }
}
