/// The side of a cut line a point, or a whole shape, lies on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Side {
    /// The side where the cut-plane frame's `x` is negative.
    Left,
    /// The side where the cut-plane frame's `x` is positive or zero.
    Right,
}

impl Side {
    /// The other side.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The result of a plane-splitting operation.
#[derive(Clone, Debug, PartialEq)]
pub enum SplitResult<T> {
    /// The split operation yield two results: one lying on the left of the cut
    /// and the second lying on its right.
    Pair(T, T),
    /// The shape being split is fully contained on the left of the cut.
    Left,
    /// The shape being split is fully contained on the right of the cut.
    Right,
}

impl<T> SplitResult<T> {
    /// The side the whole shape lies on, or `None` if it was actually split.
    pub fn side(&self) -> Option<Side> {
        match self {
            SplitResult::Pair(..) => None,
            SplitResult::Left => Some(Side::Left),
            SplitResult::Right => Some(Side::Right),
        }
    }

    /// A result with the whole shape on `side`.
    pub fn whole(side: Side) -> Self {
        match side {
            Side::Left => SplitResult::Left,
            Side::Right => SplitResult::Right,
        }
    }

    /// Maps both halves of a [`SplitResult::Pair`].
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> SplitResult<U> {
        match self {
            SplitResult::Pair(lhs, rhs) => SplitResult::Pair(f(lhs), f(rhs)),
            SplitResult::Left => SplitResult::Left,
            SplitResult::Right => SplitResult::Right,
        }
    }
}
