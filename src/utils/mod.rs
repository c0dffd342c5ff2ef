//! Various unsorted geometrical and logical operators.

pub use self::cleanup::remove_unused_vertices;
pub use self::sorted_pair::SortedPair;

mod cleanup;
pub mod hashmap;
mod sorted_pair;
