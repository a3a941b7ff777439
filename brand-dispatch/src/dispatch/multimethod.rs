//! Multimethods: cached dispatch tables over one operation.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::DispatchConfig;
use crate::error::DispatchResult;
use crate::subject::Subject;

use super::cache::{DispatchCache, Fingerprint};
use super::pattern::{MethodEntry, Pattern};
use super::resolver::DispatchResolver;
use super::result::{AmbiguityError, NoMatchError, Resolution};

/// A registry of (pattern, implementation) pairs for one operation.
///
/// Methods are append-only. Every registration bumps the generation and
/// clears the resolution cache, so a call always sees every method defined
/// before it started.
///
/// ```
/// use brand_dispatch::{Brand, Multimethod, Subject};
///
/// let int8 = Brand::new("Int8");
/// let mut add: Multimethod<i64, i64> = Multimethod::new("add");
/// add.define([&int8, &int8], |args| args[0].state() + args[1].state());
///
/// let x = Subject::new([int8.clone()], 2);
/// let y = Subject::new([int8.clone()], 3);
/// assert_eq!(add.invoke(&[x, y]).unwrap(), 5);
/// ```
pub struct Multimethod<S, R> {
    name: String,
    config: DispatchConfig,
    methods: Vec<MethodEntry<S, R>>,
    generation: u64,
    cache: DispatchCache,
}

impl<S, R> Multimethod<S, R> {
    /// Create an empty multimethod.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: DispatchConfig::default(),
            methods: Vec::new(),
            generation: 0,
            cache: DispatchCache::new(),
        }
    }

    /// Replace the configuration. Cached resolutions are dropped.
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self.invalidate();
        self
    }

    /// The operation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The active configuration.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Registered methods in definition order.
    pub fn methods(&self) -> &[MethodEntry<S, R>] {
        &self.methods
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns true if no method is registered.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Registration generation; incremented by every definition.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fingerprints with a cached resolution.
    pub fn cached_signatures(&self) -> Vec<Fingerprint> {
        self.cache.fingerprints()
    }

    /// Register `implementation` for calls matching `pattern`.
    ///
    /// The pattern is positional: it only matches calls with exactly as many
    /// arguments as it has brands. Returns `self` for chaining.
    pub fn define<P, F>(&mut self, pattern: P, implementation: F) -> &mut Self
    where
        P: Into<Pattern>,
        F: Fn(&[Subject<S>]) -> R + Send + Sync + 'static,
    {
        let entry = MethodEntry::new(pattern.into(), Arc::new(implementation));
        self.append(entry);
        self
    }

    fn append(&mut self, entry: MethodEntry<S, R>) {
        debug!(
            operation = %self.name,
            pattern = %entry.pattern(),
            arity = entry.pattern().arity(),
            generation = self.generation + 1,
            "method defined"
        );
        self.methods.push(entry);
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.cache.clear();
    }

    /// Build a new multimethod holding this one's methods followed by
    /// `other`'s. Neither operand is modified.
    pub fn concat(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for entry in &other.methods {
            merged.append(entry.clone());
        }
        merged
    }
}

impl<S: fmt::Debug, R> Multimethod<S, R> {
    /// Find the method a call dispatches to, without running it.
    pub fn resolve(&self, args: &[Subject<S>]) -> DispatchResult<&MethodEntry<S, R>> {
        let fingerprint = Fingerprint::of(args);

        if self.config.cache {
            if let Some(method) = self
                .cache
                .get(&fingerprint, self.generation)
                .and_then(|index| self.methods.get(index))
            {
                trace!(operation = %self.name, %fingerprint, "dispatch cache hit");
                return Ok(method);
            }
        }

        let index = self.lookup(&fingerprint, args)?;
        if self.config.cache {
            self.cache.insert(fingerprint, index, self.generation);
        }
        Ok(&self.methods[index])
    }

    /// Dispatch a call and run the selected implementation.
    ///
    /// The implementation's return value is passed through untouched.
    pub fn invoke(&self, args: &[Subject<S>]) -> DispatchResult<R> {
        let method = self.resolve(args)?;
        Ok(method.call(args))
    }

    fn lookup(&self, fingerprint: &Fingerprint, args: &[Subject<S>]) -> DispatchResult<usize> {
        let resolver = DispatchResolver::new(&self.methods, self.config.policy);

        match resolver.resolve(args) {
            Resolution::Resolved(index) => {
                debug!(
                    operation = %self.name,
                    %fingerprint,
                    pattern = %self.methods[index].pattern(),
                    "dispatch resolved"
                );
                Ok(index)
            }
            Resolution::NoMatch => {
                debug!(operation = %self.name, %fingerprint, "no method matched");
                Err(NoMatchError {
                    operation: self.name.clone(),
                    fingerprint: fingerprint.clone(),
                    arguments: render_arguments(args),
                    considered: self.methods.len(),
                }
                .into())
            }
            Resolution::Ambiguous(indices) => {
                debug!(
                    operation = %self.name,
                    %fingerprint,
                    matches = indices.len(),
                    "ambiguous dispatch"
                );
                Err(AmbiguityError {
                    operation: self.name.clone(),
                    fingerprint: fingerprint.clone(),
                    arguments: render_arguments(args),
                    patterns: indices
                        .into_iter()
                        .map(|index| self.methods[index].pattern().clone())
                        .collect(),
                }
                .into())
            }
        }
    }
}

fn render_arguments<S: fmt::Debug>(args: &[Subject<S>]) -> Vec<String> {
    args.iter().map(|arg| format!("{:?}", arg)).collect()
}

impl<S, R> Clone for Multimethod<S, R> {
    /// Copy the method list; the clone starts with an empty cache.
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            config: self.config.clone(),
            methods: self.methods.clone(),
            generation: self.generation,
            cache: DispatchCache::new(),
        }
    }
}

impl<S, R> fmt::Debug for Multimethod<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Multimethod")
            .field("name", &self.name)
            .field("methods", &self.methods)
            .field("generation", &self.generation)
            .field("cache", &self.cache)
            .finish()
    }
}
