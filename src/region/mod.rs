//! Cutting objects with axis-aligned rectangular regions.
//!
//! A region cut applies up to four edge cuts to an object, keeps what ends up inside of
//! the rectangle, and merges everything outside of it back into a single object. Use
//! [`cut_object_in_region`] to cut one object at once, or a [`RegionCutJob`] to spread
//! the cuts of many objects over several frames.

pub use self::region_cut::{cut_object_in_region, CutEvent, RegionCut};
pub use self::region_cut_job::{JobStatus, RegionCutJob};
pub use self::region_edge::{region_edges, EdgeSide, RegionEdge};

mod region_cut;
mod region_cut_job;
mod region_edge;
