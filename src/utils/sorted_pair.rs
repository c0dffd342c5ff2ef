use core::cmp::PartialOrd;

/// A pair of elements sorted in increasing order.
///
/// Used as the key identifying an undirected mesh edge, so that both triangles sharing
/// an edge look up the same seam vertex.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SortedPair<T: PartialOrd>([T; 2]);

impl<T: PartialOrd> SortedPair<T> {
    /// Sorts two elements in increasing order into a new pair.
    pub fn new(element1: T, element2: T) -> Self {
        if element1 > element2 {
            SortedPair([element2, element1])
        } else {
            SortedPair([element1, element2])
        }
    }

    /// The smallest element of this pair.
    pub fn min(&self) -> &T {
        &self.0[0]
    }
}

impl<T: PartialOrd + Copy> SortedPair<T> {
    /// The two elements of this pair, smallest first.
    pub fn as_tuple(&self) -> (T, T) {
        (self.0[0], self.0[1])
    }
}
