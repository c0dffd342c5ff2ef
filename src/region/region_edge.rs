use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::query::CutPlane;
use arrayvec::ArrayVec;

/// One of the four edges of a rectangular region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum EdgeSide {
    /// The edge at `maxs.x`.
    Right,
    /// The edge at `mins.x`.
    Left,
    /// The edge at `maxs.y`.
    Top,
    /// The edge at `mins.y`.
    Bottom,
}

impl EdgeSide {
    /// The order in which edges are tested against the bounds of an object.
    pub const EVALUATION_ORDER: [EdgeSide; 4] =
        [EdgeSide::Right, EdgeSide::Left, EdgeSide::Top, EdgeSide::Bottom];
    /// The order in which the cuts are applied.
    pub const CUT_ORDER: [EdgeSide; 4] =
        [EdgeSide::Right, EdgeSide::Left, EdgeSide::Bottom, EdgeSide::Top];

    /// The axis this edge is perpendicular to.
    pub fn axis(self) -> usize {
        match self {
            EdgeSide::Right | EdgeSide::Left => 0,
            EdgeSide::Top | EdgeSide::Bottom => 1,
        }
    }

    fn cut_rank(self) -> usize {
        match self {
            EdgeSide::Right => 0,
            EdgeSide::Left => 1,
            EdgeSide::Bottom => 2,
            EdgeSide::Top => 3,
        }
    }
}

/// An edge of a rectangular region, as a cut line.
///
/// The line is oriented so the interior of the region lies on its left.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RegionEdge {
    /// Which edge of the region this is.
    pub side: EdgeSide,
    /// The cut line supporting the edge.
    pub plane: CutPlane,
}

impl RegionEdge {
    /// The edge `side` of `region`.
    pub fn new(region: &Aabb, side: EdgeSide) -> Self {
        let (mins, maxs) = (region.mins, region.maxs);
        let plane = match side {
            EdgeSide::Right => CutPlane::new(Point::new(maxs.x, maxs.y), Vector::y()),
            EdgeSide::Left => CutPlane::new(Point::new(mins.x, mins.y), -Vector::y()),
            EdgeSide::Bottom => CutPlane::new(Point::new(maxs.x, mins.y), Vector::x()),
            EdgeSide::Top => CutPlane::new(Point::new(mins.x, maxs.y), -Vector::x()),
        };

        Self { side, plane }
    }

    /// The coordinate of this edge along its axis.
    pub fn coordinate(&self) -> Real {
        self.plane.anchor[self.side.axis()]
    }
}

/// The edges of `region` that cut through `bounds`, in the order the cuts must be
/// applied.
///
/// An edge cuts through `bounds` if its coordinate lies strictly between the bounds'
/// extremities on the same axis. Tangent edges yield no cut.
pub fn region_edges(region: &Aabb, bounds: &Aabb) -> ArrayVec<RegionEdge, 4> {
    let mut edges: ArrayVec<RegionEdge, 4> = EdgeSide::EVALUATION_ORDER
        .iter()
        .map(|side| RegionEdge::new(region, *side))
        .filter(|edge| bounds.spans(edge.side.axis(), edge.coordinate()))
        .collect();
    edges.sort_by_key(|edge| edge.side.cut_rank());
    edges
}
