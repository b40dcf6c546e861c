//! Fast hash map and hash set type aliases.
//!
//! Plan evaluation and dictionary lookups hash a lot of short strings (entry
//! names, single characters, phrases). These aliases use the Fx hash from
//! `rustc-hash`, which is a good fit for short keys where denial-of-service
//! resistance is not a concern.
//!
//! # Examples
//!
//! ```
//! use rn_core::{FxHashMap, FxHashSet, fx_hash_map, fx_hash_set};
//!
//! let mut names: FxHashSet<String> = fx_hash_set();
//! names.insert("國家.txt".to_owned());
//!
//! let table: FxHashMap<&str, &str> = fx_hash_map();
//! assert!(table.is_empty());
//! ```

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// Creates a new empty [`FxHashMap`].
#[inline]
#[must_use]
pub fn fx_hash_map<K, V>() -> FxHashMap<K, V> {
    FxHashMap::default()
}

/// Creates a new empty [`FxHashSet`].
#[inline]
#[must_use]
pub fn fx_hash_set<V>() -> FxHashSet<V> {
    FxHashSet::default()
}
