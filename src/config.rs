//! Tunable parameters of the cutting pipeline.

use crate::math::Real;
use core::time::Duration;

/// Parameters controlling how objects are cut.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use cleave2d::config::CutConfig;
/// use std::time::Duration;
///
/// let config = CutConfig {
///     max_slice: Duration::from_millis(4),
///     ..CutConfig::default()
/// };
/// assert_eq!(config.min_fragment_extent, CutConfig::DEFAULT_MIN_FRAGMENT_EXTENT);
/// # }
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CutConfig {
    /// Split halves thinner than this along either axis are treated as absent.
    ///
    /// The extent is measured in the cut-plane frame of the child being split, i.e. in
    /// the object's local units (child scale included, object scale excluded).
    pub min_fragment_extent: Real,
    /// The time budget of one [`RegionCutJob::advance_with_config_budget`] call.
    ///
    /// [`RegionCutJob::advance_with_config_budget`]: crate::region::RegionCutJob::advance_with_config_budget
    pub max_slice: Duration,
}

impl CutConfig {
    /// The default value of [`CutConfig::min_fragment_extent`].
    pub const DEFAULT_MIN_FRAGMENT_EXTENT: Real = 1.0e-5;
    /// The default value of [`CutConfig::max_slice`].
    pub const DEFAULT_MAX_SLICE: Duration = Duration::from_millis(10);
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            min_fragment_extent: Self::DEFAULT_MIN_FRAGMENT_EXTENT,
            max_slice: Self::DEFAULT_MAX_SLICE,
        }
    }
}
