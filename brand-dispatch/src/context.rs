//! # Dispatch Contexts
//!
//! A context is a named collection of multimethods. Contexts are values:
//! [`Context::clone`] and [`Context::concat`] produce new contexts whose
//! multimethods are independent copies of the sources.

use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::debug;

use crate::config::DispatchConfig;
use crate::dispatch::Multimethod;
use crate::error::{DispatchError, DispatchResult};
use crate::subject::Subject;

/// A set of multimethods keyed by operation name.
pub struct Context<S, R> {
    config: DispatchConfig,
    operations: IndexMap<String, Multimethod<S, R>>,
}

impl<S, R> Context<S, R> {
    /// Create an empty context with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    /// Create an empty context whose multimethods use `config`.
    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            config,
            operations: IndexMap::new(),
        }
    }

    /// The configuration handed to newly defined multimethods.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Define a new, empty operation and return it for registration.
    ///
    /// Fails with [`DispatchError::DuplicateOperation`] if `name` is taken.
    pub fn define(&mut self, name: impl Into<String>) -> DispatchResult<&mut Multimethod<S, R>> {
        match self.operations.entry(name.into()) {
            Entry::Occupied(entry) => Err(DispatchError::DuplicateOperation {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                debug!(operation = %entry.key(), "operation defined");
                let method = Multimethod::new(entry.key().clone()).with_config(self.config.clone());
                Ok(entry.insert(method))
            }
        }
    }

    /// Look up an operation.
    pub fn get(&self, name: &str) -> Option<&Multimethod<S, R>> {
        self.operations.get(name)
    }

    /// Look up an operation for further registration.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Multimethod<S, R>> {
        self.operations.get_mut(name)
    }

    /// Returns true if `name` is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Operation names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.operations.keys().map(String::as_str)
    }

    /// Iterate over operations in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Multimethod<S, R>)> + '_ {
        self.operations.iter().map(|(name, method)| (name.as_str(), method))
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if no operation is defined.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Merge `other` into a copy of this context.
    ///
    /// Operations present in both have `other`'s methods appended after this
    /// context's; operations only in `other` are copied over. Neither operand
    /// is modified.
    pub fn concat(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for (name, method) in &other.operations {
            let combined = match merged.operations.get(name) {
                Some(existing) => existing.concat(method),
                None => method.clone(),
            };
            merged.operations.insert(name.clone(), combined);
        }
        merged
    }
}

impl<S: fmt::Debug, R> Context<S, R> {
    /// Dispatch a call to the operation `name`.
    pub fn invoke(&self, name: &str, args: &[Subject<S>]) -> DispatchResult<R> {
        self.get(name)
            .ok_or_else(|| DispatchError::UnknownOperation {
                name: name.to_string(),
            })?
            .invoke(args)
    }
}

impl<S, R> Default for Context<S, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, R> Clone for Context<S, R> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            operations: self.operations.clone(),
        }
    }
}

impl<S, R> fmt::Debug for Context<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("operations", &self.operations)
            .finish()
    }
}
