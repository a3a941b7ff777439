//! Dispatch patterns and registered method entries.

use std::fmt;
use std::sync::Arc;

use crate::brand::Brand;
use crate::subject::Subject;

/// A registered implementation.
pub type Implementation<S, R> = Arc<dyn Fn(&[Subject<S>]) -> R + Send + Sync>;

/// A positional sequence of brands a call must satisfy.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Pattern(Vec<Brand>);

impl Pattern {
    /// Create a pattern from its positional brands.
    pub fn new(brands: Vec<Brand>) -> Self {
        Self(brands)
    }

    /// The positional brands.
    pub fn brands(&self) -> &[Brand] {
        &self.0
    }

    /// Number of arguments this pattern accepts.
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    /// Check whether this pattern accepts the given arguments.
    ///
    /// Arity must match, and at every position at least one brand attached
    /// to the argument must be a kind of the pattern brand.
    pub fn accepts<S>(&self, args: &[Subject<S>]) -> bool {
        self.arity() == args.len()
            && self.0.iter().zip(args).all(|(brand, arg)| arg.has(brand))
    }

    /// Check whether this pattern is strictly more specific than `other`.
    ///
    /// Every position must refine the corresponding position of `other`,
    /// and at least one must do so strictly.
    pub fn is_more_specific(&self, other: &Pattern) -> bool {
        if self.arity() != other.arity() {
            return false;
        }

        let mut some_strictly = false;
        for (mine, theirs) in self.0.iter().zip(&other.0) {
            if !mine.refines(theirs) {
                return false;
            }
            if !theirs.refines(mine) {
                some_strictly = true;
            }
        }

        some_strictly
    }
}

impl From<Vec<Brand>> for Pattern {
    fn from(brands: Vec<Brand>) -> Self {
        Self(brands)
    }
}

impl From<&[Brand]> for Pattern {
    fn from(brands: &[Brand]) -> Self {
        Self(brands.to_vec())
    }
}

impl<const N: usize> From<[Brand; N]> for Pattern {
    fn from(brands: [Brand; N]) -> Self {
        Self(brands.into())
    }
}

impl<const N: usize> From<[&Brand; N]> for Pattern {
    fn from(brands: [&Brand; N]) -> Self {
        Self(brands.into_iter().cloned().collect())
    }
}

impl FromIterator<Brand> for Pattern {
    fn from_iter<I: IntoIterator<Item = Brand>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, brand) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", brand)?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern{}", self)
    }
}

/// A pattern paired with the implementation it selects.
pub struct MethodEntry<S, R> {
    pattern: Pattern,
    implementation: Implementation<S, R>,
}

impl<S, R> MethodEntry<S, R> {
    /// Create a new entry.
    pub fn new(pattern: Pattern, implementation: Implementation<S, R>) -> Self {
        Self {
            pattern,
            implementation,
        }
    }

    /// The dispatch pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Run the implementation.
    pub fn call(&self, args: &[Subject<S>]) -> R {
        (self.implementation)(args)
    }

    /// Returns true if both entries share the same implementation.
    pub fn same_implementation(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.implementation, &other.implementation)
    }
}

impl<S, R> Clone for MethodEntry<S, R> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            implementation: Arc::clone(&self.implementation),
        }
    }
}

impl<S, R> fmt::Debug for MethodEntry<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodEntry")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}
