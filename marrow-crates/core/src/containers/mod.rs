//! Containers used throughout the solver.

mod keyed_vec;

pub use keyed_vec::KeyedVec;
pub use keyed_vec::StorageKey;

/// A hash map with the `fnv` hasher, which is faster than the standard hasher for the small keys
/// (typed indices) used throughout the solver.
pub type HashMap<K, V> = fnv::FnvHashMap<K, V>;

/// A hash set with the `fnv` hasher. See [`HashMap`].
pub type HashSet<K> = fnv::FnvHashSet<K>;
