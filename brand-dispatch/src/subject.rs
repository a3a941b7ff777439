//! # Subjects
//!
//! A subject pairs a state value with the set of brands attached to it.
//! Subjects are the arguments of every multimethod call.
//!
//! The identity set is frozen after construction. [`Subject::attach`] and
//! [`Subject::remove`] return a new subject, leaving the receiver untouched.

use std::fmt;

use crate::brand::Brand;

/// A state value tagged with a set of brands.
#[derive(Clone, PartialEq)]
pub struct Subject<S> {
    /// Attached brands, sorted by identity token, without duplicates.
    identities: Vec<Brand>,
    /// Colon-joined tokens of `identities`.
    identity_hash: String,
    state: S,
}

impl<S> Subject<S> {
    /// Create a subject carrying `identities` and `state`.
    ///
    /// Duplicate brands collapse to one entry; the last handle given wins.
    pub fn new(identities: impl IntoIterator<Item = Brand>, state: S) -> Self {
        let mut set: Vec<Brand> = Vec::new();
        for identity in identities {
            insert_identity(&mut set, identity);
        }
        Self::from_sorted(set, state)
    }

    fn from_sorted(identities: Vec<Brand>, state: S) -> Self {
        let identity_hash = identity_hash(&identities);
        Self {
            identities,
            identity_hash,
            state,
        }
    }

    /// The attached brands in token order.
    pub fn identities(&self) -> &[Brand] {
        &self.identities
    }

    /// Order-independent fingerprint of the attached brands.
    pub fn identity_hash(&self) -> &str {
        &self.identity_hash
    }

    /// The wrapped state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Consume the subject, returning its state.
    pub fn into_state(self) -> S {
        self.state
    }

    /// Replace the state, keeping the identities.
    pub fn map_state<T>(self, f: impl FnOnce(S) -> T) -> Subject<T> {
        Subject {
            identities: self.identities,
            identity_hash: self.identity_hash,
            state: f(self.state),
        }
    }

    /// Check whether any attached brand is a kind of `identity`.
    pub fn has(&self, identity: &Brand) -> bool {
        self.identities.iter().any(|attached| attached.is(identity))
    }

    /// Returns true if exactly this brand is attached.
    pub fn carries(&self, identity: &Brand) -> bool {
        self.identities.binary_search(identity).is_ok()
    }
}

impl<S: Clone> Subject<S> {
    /// Return a copy of this subject with `identity` attached.
    ///
    /// Attaching a brand that is already present replaces the stored handle
    /// and leaves the identity set unchanged.
    #[must_use]
    pub fn attach(&self, identity: &Brand) -> Self {
        let mut identities = self.identities.clone();
        insert_identity(&mut identities, identity.clone());
        Self::from_sorted(identities, self.state.clone())
    }

    /// Return a copy of this subject with `identity` detached.
    ///
    /// Only the exact brand is removed; descendants stay attached.
    #[must_use]
    pub fn remove(&self, identity: &Brand) -> Self {
        let identities = self
            .identities
            .iter()
            .filter(|attached| *attached != identity)
            .cloned()
            .collect();
        Self::from_sorted(identities, self.state.clone())
    }
}

fn insert_identity(set: &mut Vec<Brand>, identity: Brand) {
    match set.binary_search(&identity) {
        Ok(index) => set[index] = identity,
        Err(index) => set.insert(index, identity),
    }
}

fn identity_hash(identities: &[Brand]) -> String {
    identities
        .iter()
        .map(|brand| brand.id().to_string())
        .collect::<Vec<_>>()
        .join(":")
}

impl<S: fmt::Debug> fmt::Debug for Subject<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} <", self.state)?;
        for (i, identity) in self.identities.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", identity)?;
        }
        write!(f, ">")
    }
}

impl<S: fmt::Display> fmt::Display for Subject<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)
    }
}
