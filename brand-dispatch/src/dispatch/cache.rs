//! # Dispatch Cache
//!
//! Maps argument fingerprints to the index of the method they resolved to.
//!
//! ```text
//! ┌──────────────────────────┬────────┬────────────┐
//! │ Fingerprint              │ Method │ Generation │
//! ├──────────────────────────┼────────┼────────────┤
//! │ 2#3:7|3:7                │ 0      │ 2          │
//! │ 2#3:9|12                 │ 4      │ 2          │
//! │ 1#                       │ 1      │ 2          │
//! └──────────────────────────┴────────┴────────────┘
//! ```
//!
//! Each entry records the registry generation it was resolved under. An
//! entry from an older generation is treated as a miss.

use std::fmt;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::subject::Subject;

/// The cache key of a call: the argument count, then each argument's
/// identity hash in argument order.
///
/// The count keeps calls of different arity apart even when every argument
/// carries no brands (`0#` vs `1#`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a call.
    pub fn of<S>(args: &[Subject<S>]) -> Self {
        let hashes: Vec<&str> = args.iter().map(|arg| arg.identity_hash()).collect();
        Self(format!("{}#{}", args.len(), hashes.join("|")))
    }

    /// The fingerprint as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedResolution {
    index: usize,
    generation: u64,
}

/// Fingerprint-keyed resolution cache.
#[derive(Default)]
pub(crate) struct DispatchCache {
    entries: RwLock<FxHashMap<Fingerprint, CachedResolution>>,
}

impl DispatchCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Look up a resolution computed under `generation`.
    pub(crate) fn get(&self, fingerprint: &Fingerprint, generation: u64) -> Option<usize> {
        let entries = self.entries.read();
        entries
            .get(fingerprint)
            .filter(|cached| cached.generation == generation)
            .map(|cached| cached.index)
    }

    /// Record a resolution. Concurrent inserts of the same key are harmless:
    /// both writers computed the same index from the same method list.
    pub(crate) fn insert(&self, fingerprint: Fingerprint, index: usize, generation: u64) {
        self.entries
            .write()
            .insert(fingerprint, CachedResolution { index, generation });
    }

    pub(crate) fn clear(&mut self) {
        self.entries.get_mut().clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Fingerprints currently cached, sorted.
    pub(crate) fn fingerprints(&self) -> Vec<Fingerprint> {
        let mut keys: Vec<_> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl fmt::Debug for DispatchCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchCache")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::Brand;

    #[test]
    fn test_fingerprint_is_positional() {
        let a = Brand::new("A");
        let b = Brand::new("B");
        let sa = Subject::new([a.clone()], ());
        let sb = Subject::new([b.clone()], ());

        let ab = Fingerprint::of(&[sa.clone(), sb.clone()]);
        let ba = Fingerprint::of(&[sb, sa]);
        assert_ne!(ab, ba);
        assert_eq!(ab.as_str(), format!("2#{}|{}", a.id(), b.id()));
    }

    #[test]
    fn test_fingerprint_ignores_identity_order() {
        let a = Brand::new("A");
        let b = Brand::new("B");
        let s1 = Subject::new([a.clone(), b.clone()], 1);
        let s2 = Subject::new([b, a], 2);
        assert_eq!(Fingerprint::of(&[s1]), Fingerprint::of(&[s2]));
    }

    #[test]
    fn test_fingerprint_of_empty_call() {
        let args: [Subject<()>; 0] = [];
        assert_eq!(Fingerprint::of(&args).as_str(), "0#");
        assert_eq!(Fingerprint::of(&args).to_string(), "(0#)");
    }

    #[test]
    fn test_fingerprint_separates_arity_of_unbranded_calls() {
        let one = [Subject::new([], ())];
        let two = [Subject::new([], ()), Subject::new([], ())];
        let none: [Subject<()>; 0] = [];

        assert_eq!(Fingerprint::of(&one).as_str(), "1#");
        assert_eq!(Fingerprint::of(&two).as_str(), "2#|");
        assert_ne!(Fingerprint::of(&none), Fingerprint::of(&one));
    }

    #[test]
    fn test_stale_generation_misses() {
        let cache = DispatchCache::new();
        let key = Fingerprint("2#1|1".to_string());

        cache.insert(key.clone(), 3, 0);
        assert_eq!(cache.get(&key, 0), Some(3));
        assert_eq!(cache.get(&key, 1), None);

        cache.insert(key.clone(), 5, 1);
        assert_eq!(cache.get(&key, 1), Some(5));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache = DispatchCache::new();
        cache.insert(Fingerprint("2".to_string()), 0, 0);
        cache.insert(Fingerprint("1".to_string()), 1, 0);
        assert_eq!(
            cache.fingerprints(),
            vec![Fingerprint("1".to_string()), Fingerprint("2".to_string())]
        );

        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}
