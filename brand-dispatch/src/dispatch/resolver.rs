//! Method lookup.
//!
//! 1. **Collect candidates**: keep methods whose pattern has the call's
//!    arity and accepts every argument.
//! 2. **Select**: a single candidate wins outright.
//! 3. **Narrow** (only under [`ResolutionPolicy::MostSpecific`]): drop every
//!    candidate that another candidate is strictly more specific than.
//! 4. Anything left with more than one entry is ambiguous.

use crate::config::ResolutionPolicy;
use crate::subject::Subject;

use super::pattern::MethodEntry;
use super::result::Resolution;

/// Lookup over a borrowed method list.
pub struct DispatchResolver<'a, S, R> {
    methods: &'a [MethodEntry<S, R>],
    policy: ResolutionPolicy,
}

impl<'a, S, R> DispatchResolver<'a, S, R> {
    /// Create a resolver over `methods`.
    pub fn new(methods: &'a [MethodEntry<S, R>], policy: ResolutionPolicy) -> Self {
        Self { methods, policy }
    }

    /// Resolve a call to at most one method index.
    pub fn resolve(&self, args: &[Subject<S>]) -> Resolution {
        let applicable = self.applicable(args);

        match applicable.len() {
            0 => return Resolution::NoMatch,
            1 => return Resolution::Resolved(applicable[0]),
            _ => {}
        }

        let remaining = match self.policy {
            ResolutionPolicy::Strict => applicable,
            ResolutionPolicy::MostSpecific => self.find_maximal(&applicable),
        };

        match remaining.as_slice() {
            [single] => Resolution::Resolved(*single),
            _ => Resolution::Ambiguous(remaining),
        }
    }

    /// Indices of every method whose pattern accepts `args`, in
    /// registration order.
    pub fn applicable(&self, args: &[Subject<S>]) -> Vec<usize> {
        self.methods
            .iter()
            .enumerate()
            .filter(|(_, method)| method.pattern().accepts(args))
            .map(|(index, _)| index)
            .collect()
    }

    /// Keep the candidates no other candidate is strictly more specific than.
    fn find_maximal(&self, applicable: &[usize]) -> Vec<usize> {
        applicable
            .iter()
            .copied()
            .filter(|&m| {
                !applicable.iter().any(|&other| {
                    other != m
                        && self.methods[other]
                            .pattern()
                            .is_more_specific(self.methods[m].pattern())
                })
            })
            .collect()
    }
}
