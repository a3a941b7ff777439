//! # Brands
//!
//! A brand is an immutable runtime identity tag. Brands form a tree through
//! optional parent links, and two combinators (`or`, `and`) build composite
//! predicates over them:
//!
//! ```text
//! Brand ::= Leaf { parent: Option<Brand> }
//!         | Or(Brand, Brand)
//!         | And(Brand, Brand)
//! ```
//!
//! Every brand carries a process-unique [`BrandId`]. Equality, hashing and
//! ordering are all defined on that token, never on the description.
//!
//! ## Subtyping
//!
//! [`Brand::is`] answers "is `self` a kind of `target`":
//!
//! 1. A brand is itself.
//! 2. A composite receiver evaluates its operands: `Or` if either side is,
//!    `And` if both sides are.
//! 3. A composite target is satisfied like a predicate: `Or` if `self` is
//!    either side, `And` if `self` is both.
//! 4. A leaf otherwise defers to its parent; a root brand is nothing else.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_BRAND_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity token of a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrandId(u64);

impl BrandId {
    fn fresh() -> Self {
        Self(NEXT_BRAND_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw token value.
    pub fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BrandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The shape of a brand node.
#[derive(Debug, Clone)]
pub enum BrandKind {
    /// A plain tag, optionally refining a parent.
    Leaf {
        /// The brand this one refines, if any.
        parent: Option<Brand>,
    },
    /// Union of two brands.
    Or(Brand, Brand),
    /// Intersection of two brands.
    And(Brand, Brand),
}

struct BrandNode {
    id: BrandId,
    description: String,
    kind: BrandKind,
}

/// A shared handle to an immutable brand node.
///
/// Cloning a `Brand` is cheap and yields the same brand.
#[derive(Clone)]
pub struct Brand(Arc<BrandNode>);

impl Brand {
    /// Create a new root brand.
    pub fn new(description: impl Into<String>) -> Self {
        Self::from_kind(description.into(), BrandKind::Leaf { parent: None })
    }

    /// Create a new brand that refines `parent`.
    pub fn with_parent(description: impl Into<String>, parent: &Brand) -> Self {
        Self::from_kind(
            description.into(),
            BrandKind::Leaf {
                parent: Some(parent.clone()),
            },
        )
    }

    fn from_kind(description: String, kind: BrandKind) -> Self {
        Self(Arc::new(BrandNode {
            id: BrandId::fresh(),
            description,
            kind,
        }))
    }

    /// The identity token.
    pub fn id(&self) -> BrandId {
        self.0.id
    }

    /// The human-readable description.
    pub fn description(&self) -> &str {
        &self.0.description
    }

    /// The node shape.
    pub fn kind(&self) -> &BrandKind {
        &self.0.kind
    }

    /// The parent of a leaf brand. Composites have no parent.
    pub fn parent(&self) -> Option<&Brand> {
        match &self.0.kind {
            BrandKind::Leaf { parent } => parent.as_ref(),
            BrandKind::Or(..) | BrandKind::And(..) => None,
        }
    }

    /// Iterate over the parent chain, nearest first.
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: self.parent().cloned(),
        }
    }

    /// Returns true for `Or`/`And` nodes.
    pub fn is_composite(&self) -> bool {
        !matches!(self.0.kind, BrandKind::Leaf { .. })
    }

    /// Return a handle to this same brand carrying a different description.
    ///
    /// The identity token is preserved, so the result compares equal to
    /// `self`. This is how combinator results get readable names:
    ///
    /// ```
    /// use brand_dispatch::Brand;
    ///
    /// let int8 = Brand::new("Int8");
    /// let int16 = Brand::new("Int16");
    /// let integer = int8.or(&int16).with_description("Integer");
    /// assert_eq!(integer.description(), "Integer");
    /// assert!(int8.is(&integer));
    /// ```
    pub fn with_description(&self, description: impl Into<String>) -> Brand {
        Self(Arc::new(BrandNode {
            id: self.0.id,
            description: description.into(),
            kind: self.0.kind.clone(),
        }))
    }

    /// Build the union of `self` and `other`.
    pub fn or(&self, other: &Brand) -> Brand {
        Self::from_kind(
            format!("({} | {})", self.description(), other.description()),
            BrandKind::Or(self.clone(), other.clone()),
        )
    }

    /// Build the intersection of `self` and `other`.
    pub fn and(&self, other: &Brand) -> Brand {
        Self::from_kind(
            format!("({} & {})", self.description(), other.description()),
            BrandKind::And(self.clone(), other.clone()),
        )
    }

    /// Check whether `self` is a kind of `target`.
    ///
    /// See the module documentation for the exact rules.
    pub fn is(&self, target: &Brand) -> bool {
        if self.id() == target.id() {
            return true;
        }

        match &self.0.kind {
            BrandKind::Or(left, right) => return left.is(target) || right.is(target),
            BrandKind::And(left, right) => return left.is(target) && right.is(target),
            BrandKind::Leaf { .. } => {}
        }

        match &target.0.kind {
            BrandKind::Or(left, right) => self.is(left) || self.is(right),
            BrandKind::And(left, right) => self.is(left) && self.is(right),
            BrandKind::Leaf { .. } => self.parent().is_some_and(|parent| parent.is(target)),
        }
    }

    /// Check whether every identity accepted by `self` as a dispatch pattern
    /// is also accepted by `other`.
    ///
    /// This is the specificity order between pattern elements: `Int8`
    /// refines `Int8 | Int16`, and a child refines its parent, but a union
    /// does not refine either of its operands.
    pub fn refines(&self, other: &Brand) -> bool {
        if self.id() == other.id() {
            return true;
        }

        match &self.0.kind {
            BrandKind::Or(left, right) => {
                return left.refines(other) && right.refines(other);
            }
            BrandKind::And(left, right) => {
                if left.refines(other) || right.refines(other) {
                    return true;
                }
            }
            BrandKind::Leaf { .. } => {}
        }

        match &other.0.kind {
            BrandKind::Or(left, right) => self.refines(left) || self.refines(right),
            BrandKind::And(left, right) => self.refines(left) && self.refines(right),
            BrandKind::Leaf { .. } => match &self.0.kind {
                BrandKind::Leaf { .. } => self.ancestors().any(|ancestor| ancestor == *other),
                BrandKind::Or(..) | BrandKind::And(..) => false,
            },
        }
    }
}

impl PartialEq for Brand {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Brand {}

impl Hash for Brand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl PartialOrd for Brand {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Brand {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id().cmp(&other.id())
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl fmt::Debug for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Brand({}#{})", self.description(), self.id())
    }
}

impl BitOr for &Brand {
    type Output = Brand;

    fn bitor(self, rhs: &Brand) -> Brand {
        self.or(rhs)
    }
}

impl BitAnd for &Brand {
    type Output = Brand;

    fn bitand(self, rhs: &Brand) -> Brand {
        self.and(rhs)
    }
}

/// Iterator over a brand's parent chain.
pub struct Ancestors {
    next: Option<Brand>,
}

impl Iterator for Ancestors {
    type Item = Brand;

    fn next(&mut self) -> Option<Brand> {
        let current = self.next.take()?;
        self.next = current.parent().cloned();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> (Brand, Brand, Brand, Brand) {
        let number = Brand::new("Number");
        let integer = Brand::with_parent("Integer", &number);
        let int8 = Brand::with_parent("Int8", &integer);
        let text = Brand::new("Text");
        (number, integer, int8, text)
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Brand::new("same");
        let b = Brand::new("same");
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn test_is_reflexive() {
        let (number, integer, int8, _) = numbers();
        assert!(number.is(&number));
        assert!(integer.is(&integer));
        assert!(int8.is(&int8));
    }

    #[test]
    fn test_is_follows_parent_chain() {
        let (number, integer, int8, text) = numbers();
        assert!(int8.is(&integer));
        assert!(int8.is(&number));
        assert!(integer.is(&number));

        assert!(!number.is(&integer));
        assert!(!integer.is(&int8));
        assert!(!int8.is(&text));
        assert!(!text.is(&number));
    }

    #[test]
    fn test_or_receiver() {
        let a = Brand::new("A");
        let b = Brand::new("B");
        let c = Brand::new("C");
        let a_or_b = a.or(&b);

        assert!(a_or_b.is(&a));
        assert!(a_or_b.is(&b));
        assert!(a_or_b.is(&a_or_b));
        assert!(!a_or_b.is(&c));
    }

    #[test]
    fn test_and_receiver() {
        let (number, integer, int8, text) = numbers();

        let both = int8.and(&integer);
        assert!(both.is(&integer));
        assert!(both.is(&number));
        assert!(!both.is(&int8));

        let unrelated = int8.and(&text);
        assert!(!unrelated.is(&number));
    }

    #[test]
    fn test_composite_target() {
        let (number, integer, int8, text) = numbers();
        let int16 = Brand::with_parent("Int16", &integer);
        let small = int8.or(&int16);

        assert!(int8.is(&small));
        assert!(int16.is(&small));
        assert!(!integer.is(&small));
        assert!(!text.is(&small));

        assert!(int8.is(&text.or(&number)));
        assert!(int8.is(&number.and(&integer)));
        assert!(!int8.is(&number.and(&text)));
    }

    #[test]
    fn test_nested_composites() {
        let a = Brand::new("A");
        let b = Brand::new("B");
        let c = Brand::new("C");
        let any = a.or(&b).or(&c);

        assert!(a.is(&any));
        assert!(b.is(&any));
        assert!(c.is(&any));
        assert_eq!(any.description(), "((A | B) | C)");
    }

    #[test]
    fn test_operators_build_composites() {
        let a = Brand::new("A");
        let b = Brand::new("B");

        assert_eq!((&a | &b).description(), "(A | B)");
        assert_eq!((&a & &b).description(), "(A & B)");
        assert!(a.is(&(&a | &b)));
    }

    #[test]
    fn test_with_description_keeps_identity() {
        let a = Brand::new("A");
        let b = Brand::new("B");
        let union = a.or(&b);
        let named = union.with_description("AorB");

        assert_eq!(named, union);
        assert_eq!(named.description(), "AorB");
        assert_eq!(union.description(), "(A | B)");
        assert!(a.is(&named));
    }

    #[test]
    fn test_ancestors() {
        let (number, integer, int8, _) = numbers();
        let chain: Vec<_> = int8.ancestors().collect();
        assert_eq!(chain, vec![integer, number.clone()]);
        assert_eq!(number.ancestors().count(), 0);
    }

    #[test]
    fn test_composites_have_no_parent() {
        let (number, _, int8, _) = numbers();
        let union = int8.or(&number);
        assert!(union.is_composite());
        assert!(union.parent().is_none());
        assert!(!int8.is_composite());
    }

    #[test]
    fn test_refines() {
        let (number, integer, int8, text) = numbers();
        let int16 = Brand::with_parent("Int16", &integer);
        let small = int8.or(&int16);

        assert!(int8.refines(&int8));
        assert!(int8.refines(&integer));
        assert!(int8.refines(&number));
        assert!(!integer.refines(&int8));

        assert!(int8.refines(&small));
        assert!(!small.refines(&int8));
        assert!(small.refines(&integer));

        assert!(int8.and(&text).refines(&int8));
        assert!(!text.refines(&small));
    }

    #[test]
    fn test_display_and_debug() {
        let a = Brand::new("Alpha");
        assert_eq!(a.to_string(), "Alpha");
        assert_eq!(format!("{:?}", a), format!("Brand(Alpha#{})", a.id()));
    }
}
