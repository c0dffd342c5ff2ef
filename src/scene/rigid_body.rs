use crate::math::{AngVector, Real, Vector};

/// The physical state of an object, as far as splitting is concerned.
///
/// Both halves of a split keep the velocities of the object they come from, while the
/// mass is shared in proportion to the area of each half.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RigidBody {
    /// The total mass of the object.
    pub mass: Real,
    /// The linear velocity of the object.
    pub linear_velocity: Vector<Real>,
    /// The angular velocity of the object.
    pub angular_velocity: AngVector<Real>,
}

impl RigidBody {
    /// A body with the given mass, at rest.
    pub fn new(mass: Real) -> Self {
        Self {
            mass,
            linear_velocity: Vector::zeros(),
            angular_velocity: 0.0,
        }
    }

    /// Returns `self` with the given velocities.
    #[must_use]
    pub fn with_velocities(
        mut self,
        linear_velocity: Vector<Real>,
        angular_velocity: AngVector<Real>,
    ) -> Self {
        self.linear_velocity = linear_velocity;
        self.angular_velocity = angular_velocity;
        self
    }
}

/// Opaque per-object animation playback state.
///
/// Split fragments do not inherit it: it is cleared on both halves of a cut.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct AnimationState {
    /// The name of the clip being played.
    pub clip: String,
    /// The playback position in the clip, in seconds.
    pub time: Real,
}
