//! Dispatch Configuration
//!
//! Options shared by every multimethod of a context.

use serde::{Deserialize, Serialize};

/// How a call with more than one matching method is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionPolicy {
    /// Any call matched by more than one method is an ambiguity error.
    #[default]
    Strict,
    /// Select the unique maximally specific method; error only if several
    /// matches remain incomparable.
    MostSpecific,
}

/// Configuration for dispatch resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Resolution policy for overlapping methods.
    pub policy: ResolutionPolicy,

    /// Cache resolved methods per argument fingerprint.
    pub cache: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            policy: ResolutionPolicy::Strict,
            cache: true,
        }
    }
}

impl DispatchConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resolution policy.
    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enable or disable the resolution cache.
    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }
}
