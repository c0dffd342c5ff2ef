use crate::math::{Point, Real};
use crate::query::{PlaneFrame, SplitResult};
use crate::shape::Collider;

/// Splits one closed path by the cut line of `frame`.
///
/// The loop is walked once, including the closing edge from the last point back to the
/// first one. Each original point is appended to the output of its side and, whenever
/// an edge crosses the cut, one interpolated point is appended to both outputs. The
/// outputs are closed loops with the same winding as the input.
///
/// A point lying exactly on the cut is shared by both outputs, unless the path only
/// touches the cut there: it then stays on the side of its neighbors alone. Runs of
/// consecutive points on the cut are handled the same way, as a whole.
///
/// # Result
/// Returns [`SplitResult::Left`] or [`SplitResult::Right`] if the path has no point
/// strictly on one of the sides. Otherwise returns the `(left, right)` paths. Those may
/// have fewer than 3 points if the path barely crosses the cut: it is up to the caller
/// to discard them.
pub fn split_collider_path(
    path: &[Point<Real>],
    frame: &PlaneFrame,
) -> SplitResult<Vec<Point<Real>>> {
    let local_x: Vec<Real> = path
        .iter()
        .map(|pt| frame.transform_point(pt).x)
        .collect();

    if !local_x.iter().any(|x| *x < 0.0) {
        return SplitResult::Right;
    }
    if !local_x.iter().any(|x| *x > 0.0) {
        return SplitResult::Left;
    }

    let n = path.len();
    // Is the first point off the cut, walking from `i` by `step`, on the left?
    let next_off_cut_is_left = |i: usize, step: usize| {
        let mut k = (i + step) % n;
        while local_x[k] == 0.0 {
            k = (k + step) % n;
        }
        local_x[k] < 0.0
    };

    let mut path_lhs = Vec::with_capacity(n + 2);
    let mut path_rhs = Vec::with_capacity(n + 2);

    for i in 0..n {
        let j = (i + 1) % n;
        let (x_i, x_j) = (local_x[i], local_x[j]);

        if x_i < 0.0 {
            path_lhs.push(path[i]);
        } else if x_i > 0.0 {
            path_rhs.push(path[i]);
        } else {
            let prev_is_left = next_off_cut_is_left(i, n - 1);
            let next_is_left = next_off_cut_is_left(i, 1);

            if prev_is_left || next_is_left {
                path_lhs.push(path[i]);
            }
            if !prev_is_left || !next_is_left {
                path_rhs.push(path[i]);
            }
        }

        if (x_i < 0.0 && x_j > 0.0) || (x_i > 0.0 && x_j < 0.0) {
            let ratio = -x_i / (x_j - x_i);
            let seam = path[i].coords.lerp(&path[j].coords, ratio).into();
            path_lhs.push(seam);
            path_rhs.push(seam);
        }
    }

    log::trace!(
        "Split a {}-points path into {} and {} points.",
        n,
        path_lhs.len(),
        path_rhs.len()
    );
    SplitResult::Pair(path_lhs, path_rhs)
}

/// Splits every path of a collider by the cut line of `frame`.
///
/// Paths are processed independently. Paths that do not cross the cut are moved whole to
/// their side. A half is `None` if it contains no path, or if any of the paths split
/// onto it has fewer than 3 points: such a collider half is invalid as a whole.
pub fn split_collider(collider: &Collider, frame: &PlaneFrame) -> SplitResult<Option<Collider>> {
    let mut paths_lhs = vec![];
    let mut paths_rhs = vec![];
    let mut valid_lhs = true;
    let mut valid_rhs = true;
    let mut crossed = false;

    for path in &collider.paths {
        match split_collider_path(path, frame) {
            SplitResult::Left => paths_lhs.push(path.clone()),
            SplitResult::Right => paths_rhs.push(path.clone()),
            SplitResult::Pair(lhs, rhs) => {
                crossed = true;
                valid_lhs &= lhs.len() >= 3;
                valid_rhs &= rhs.len() >= 3;
                paths_lhs.push(lhs);
                paths_rhs.push(rhs);
            }
        }
    }

    if !crossed {
        if paths_rhs.is_empty() {
            return SplitResult::Left;
        }
        if paths_lhs.is_empty() {
            return SplitResult::Right;
        }
    }

    if !valid_lhs {
        log::debug!("Discarding the left half of a collider: one of its paths is degenerate.");
    }
    if !valid_rhs {
        log::debug!("Discarding the right half of a collider: one of its paths is degenerate.");
    }

    let lhs = (valid_lhs && !paths_lhs.is_empty()).then(|| Collider { paths: paths_lhs });
    let rhs = (valid_rhs && !paths_rhs.is_empty()).then(|| Collider { paths: paths_rhs });
    SplitResult::Pair(lhs, rhs)
}
