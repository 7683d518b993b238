//! Hash map aliases used for name lookups.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::{HashMap, HashSet};
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    use std::hash::BuildHasherDefault;

    pub type HashMap<K, V> = hashbrown::HashMap<K, V, BuildHasherDefault<ahash::AHasher>>;
    pub type HashSet<K> = hashbrown::HashSet<K, BuildHasherDefault<ahash::AHasher>>;
}
