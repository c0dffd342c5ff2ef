use crate::math::Real;

/// How the mass of a split rigid-body is shared between its two halves.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MassSplit {
    /// The mass given to the half lying on the left of the cut.
    pub left: Real,
    /// The mass given to the half lying on the right of the cut.
    pub right: Real,
}

impl MassSplit {
    /// Shares `total_mass` in proportion to the area of each half.
    ///
    /// The sum of both halves is always `total_mass`. When both areas are zero (collapsed
    /// or purely physical children), the mass is shared evenly.
    pub fn from_areas(total_mass: Real, left_area: Real, right_area: Real) -> Self {
        let total_area = left_area + right_area;

        if total_area <= 0.0 || relative_eq!(total_area, 0.0) {
            log::debug!("Splitting the mass of a zero-area body evenly.");
            let half = total_mass * 0.5;
            return Self {
                left: half,
                right: total_mass - half,
            };
        }

        let left = total_mass * (left_area / total_area);
        Self {
            left,
            right: total_mass - left,
        }
    }
}
