use crate::math::{Point, Point3, Real};
use crate::query::{PlaneFrame, Side, SplitResult};
use crate::shape::Mesh;
use crate::utils::{hashmap::HashMap, remove_unused_vertices, SortedPair};

/// Splits a textured mesh by the cut line of `frame`.
///
/// `frame` maps the mesh's local space into the cut-plane frame. The cut is always the
/// line `x = 0` of that frame.
///
/// # Result
/// Returns [`SplitResult::Left`] or [`SplitResult::Right`] if the whole mesh lies on one
/// side of the cut: in that case no new mesh is allocated. Otherwise, returns the pair
/// `(left, right)` of meshes.
///
/// Every crossing edge gets exactly one seam vertex, shared by all the triangles adjacent
/// to that edge and present (at the same position and UV) in both halves. Triangles keep
/// their winding order.
pub fn split_mesh(mesh: &Mesh, frame: &PlaneFrame) -> SplitResult<Mesh> {
    // 1. Partition the vertices.
    let local_x: Vec<Real> = mesh
        .vertices
        .iter()
        .map(|pt| frame.transform_point(&pt.xy()).x)
        .collect();
    let sides: Vec<Side> = local_x
        .iter()
        .map(|x| if *x < 0.0 { Side::Left } else { Side::Right })
        .collect();

    // Exit early if `mesh` isn’t crossed by the cut.
    let found_left = sides.contains(&Side::Left);
    let found_right = sides.contains(&Side::Right);

    if !found_left {
        return SplitResult::Right;
    }

    if !found_right {
        return SplitResult::Left;
    }

    // 2. Split the triangles.
    let mut builder = SeamBuilder {
        vertices: mesh.vertices.clone(),
        uvs: mesh.uvs.clone(),
        local_x: &local_x,
        seams: HashMap::default(),
    };
    let mut indices_lhs = vec![];
    let mut indices_rhs = vec![];

    for idx in &mesh.indices {
        let tri_sides = [
            sides[idx[0] as usize],
            sides[idx[1] as usize],
            sides[idx[2] as usize],
        ];

        if tri_sides[0] == tri_sides[1] && tri_sides[1] == tri_sides[2] {
            match tri_sides[0] {
                Side::Left => indices_lhs.push(*idx),
                Side::Right => indices_rhs.push(*idx),
            }
            continue;
        }

        // Exactly one vertex is alone on its side. Rotate the triangle so it comes first,
        // which keeps the winding order.
        let lone = if tri_sides[0] == tri_sides[1] {
            2
        } else if tri_sides[0] == tri_sides[2] {
            1
        } else {
            0
        };
        let p = idx[lone];
        let q = idx[(lone + 1) % 3];
        let r = idx[(lone + 2) % 3];
        let pq = builder.seam_vertex(p, q);
        let pr = builder.seam_vertex(p, r);

        let (lone_indices, pair_indices) = match tri_sides[lone] {
            Side::Left => (&mut indices_lhs, &mut indices_rhs),
            Side::Right => (&mut indices_rhs, &mut indices_lhs),
        };
        push_non_degenerate(lone_indices, [p, pq, pr]);
        push_non_degenerate(pair_indices, [pq, q, r]);
        push_non_degenerate(pair_indices, [pq, r, pr]);
    }

    // Seam vertices lying exactly on original vertices can leave one side empty.
    if indices_lhs.is_empty() {
        return SplitResult::Right;
    }

    if indices_rhs.is_empty() {
        return SplitResult::Left;
    }

    // 3. Partition the new triangles into two meshes.
    let SeamBuilder { vertices, uvs, .. } = builder;
    let mesh_lhs = compact_mesh(vertices.clone(), uvs.clone(), indices_lhs);
    let mesh_rhs = compact_mesh(vertices, uvs, indices_rhs);
    SplitResult::Pair(mesh_lhs, mesh_rhs)
}

struct SeamBuilder<'a> {
    vertices: Vec<Point3<Real>>,
    uvs: Vec<Point<Real>>,
    local_x: &'a [Real],
    seams: HashMap<SortedPair<u32>, u32>,
}

impl SeamBuilder<'_> {
    /// The index of the vertex where the edge `(a, b)` crosses the cut.
    ///
    /// The edge endpoints must lie on different sides.
    fn seam_vertex(&mut self, a: u32, b: u32) -> u32 {
        let edge = SortedPair::new(a, b);
        if let Some(id) = self.seams.get(&edge) {
            return *id;
        }

        // Always interpolate from the smallest index so the result doesn’t depend on
        // the orientation of the triangle that reached this edge first.
        let (start, end) = edge.as_tuple();
        let start_x = self.local_x[start as usize];
        let end_x = self.local_x[end as usize];

        // A vertex exactly on the cut is its own seam vertex.
        let id = if end_x == 0.0 {
            end
        } else if start_x == 0.0 {
            start
        } else {
            let ratio = -start_x / (end_x - start_x);
            let position = self.vertices[start as usize]
                .coords
                .lerp(&self.vertices[end as usize].coords, ratio);
            let uv = self.uvs[start as usize]
                .coords
                .lerp(&self.uvs[end as usize].coords, ratio);
            self.vertices.push(position.into());
            self.uvs.push(uv.into());
            (self.vertices.len() - 1) as u32
        };

        let _ = self.seams.insert(edge, id);
        id
    }
}

fn push_non_degenerate(indices: &mut Vec<[u32; 3]>, tri: [u32; 3]) {
    if tri[0] != tri[1] && tri[1] != tri[2] && tri[2] != tri[0] {
        indices.push(tri);
    }
}

fn compact_mesh(
    mut vertices: Vec<Point3<Real>>,
    mut uvs: Vec<Point<Real>>,
    mut indices: Vec<[u32; 3]>,
) -> Mesh {
    remove_unused_vertices(&mut vertices, &mut uvs, &mut indices);
    Mesh::new_unchecked(vertices, uvs, indices)
}
