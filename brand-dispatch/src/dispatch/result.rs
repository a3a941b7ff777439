//! Dispatch resolution outcomes and errors.

use std::fmt;

use super::cache::Fingerprint;
use super::pattern::Pattern;

/// Outcome of matching a call against a method list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one method was selected (index into the method list).
    Resolved(usize),
    /// No method matched.
    NoMatch,
    /// Several methods matched and none could be preferred.
    Ambiguous(Vec<usize>),
}

/// Error when no method matches the arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoMatchError {
    /// The operation that was called.
    pub operation: String,
    /// Fingerprint of the call.
    pub fingerprint: Fingerprint,
    /// The arguments, rendered for diagnostics.
    pub arguments: Vec<String>,
    /// Number of registered methods that were considered.
    pub considered: usize,
}

impl fmt::Display for NoMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no method of `{}` matches signature {} for arguments ({}); {} method(s) considered",
            self.operation,
            self.fingerprint,
            self.arguments.join(", "),
            self.considered
        )
    }
}

impl std::error::Error for NoMatchError {}

/// Error when multiple methods are ambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguityError {
    /// The operation that was called.
    pub operation: String,
    /// Fingerprint of the call.
    pub fingerprint: Fingerprint,
    /// The arguments, rendered for diagnostics.
    pub arguments: Vec<String>,
    /// Every pattern that matched (after specificity filtering, if enabled).
    pub patterns: Vec<Pattern>,
}

impl AmbiguityError {
    /// Check whether `pattern` is among the conflicting patterns.
    pub fn involves(&self, pattern: &Pattern) -> bool {
        self.patterns.contains(pattern)
    }
}

impl fmt::Display for AmbiguityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ambiguous call to `{}` with signature {} for arguments ({}): {} methods match: ",
            self.operation,
            self.fingerprint,
            self.arguments.join(", "),
            self.patterns.len()
        )?;
        for (i, pattern) in self.patterns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", pattern)?;
        }
        Ok(())
    }
}

impl std::error::Error for AmbiguityError {}
