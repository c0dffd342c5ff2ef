//! The hash-map used for memoization tables.
//!
//! Only lookups and insertions are performed on these maps, never iteration, so their
//! content never influences the order of any output.

/// Hashmap using [`hashbrown::HashMap`]
pub type HashMap<K, V> = hashbrown::hash_map::HashMap<K, V>;
