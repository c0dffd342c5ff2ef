use crate::math::{Point, Point3, Real};

/// Given an index buffer, remove every vertex (and its UV) that is not indexed.
///
/// Unlike a `swap_remove`-based compaction, the relative order of the kept vertices is
/// preserved, so the index buffer is only renumbered downward.
pub fn remove_unused_vertices(
    vertices: &mut Vec<Point3<Real>>,
    uvs: &mut Vec<Point<Real>>,
    idx: &mut [[u32; 3]],
) {
    debug_assert_eq!(vertices.len(), uvs.len());
    let mut used = vec![false; vertices.len()];

    for tri in idx.iter() {
        used[tri[0] as usize] = true;
        used[tri[1] as usize] = true;
        used[tri[2] as usize] = true;
    }

    if used.iter().all(|u| *u) {
        return;
    }

    let mut remap = vec![u32::MAX; vertices.len()];
    let mut next = 0;

    for i in 0..vertices.len() {
        if used[i] {
            vertices[next] = vertices[i];
            uvs[next] = uvs[i];
            remap[i] = next as u32;
            next += 1;
        }
    }

    vertices.truncate(next);
    uvs.truncate(next);

    for tri in idx.iter_mut() {
        tri[0] = remap[tri[0] as usize];
        tri[1] = remap[tri[1] as usize];
        tri[2] = remap[tri[2] as usize];
    }
}
