//! Multiple dispatch over branded subjects.
//!
//! This module implements the engine that selects which implementation of
//! an operation to call based on the brands attached to all of its
//! arguments at once.
//!
//! # Call Lifecycle
//!
//! ```text
//! invoke(args)
//!   ├── fingerprint(args) ── cache hit ──────────────────────────┐
//!   └── cache miss → lookup → Resolved ── cache ─────────────────┤
//!                           ├ NoMatch    → NoMethodMatched       │
//!                           └ Ambiguous  → AmbiguousDispatch     ▼
//!                                                           implementation(args)
//! ```
//!
//! # Module Structure
//!
//! - [`pattern`] - Dispatch patterns and method entries
//! - [`cache`] - Fingerprints and the generation-tagged resolution cache
//! - [`result`] - Resolution outcomes and errors
//! - [`resolver`] - Candidate matching and specificity narrowing
//! - [`multimethod`] - The per-operation registry

mod cache;
mod multimethod;
mod pattern;
mod resolver;
mod result;


pub use cache::Fingerprint;

pub use multimethod::Multimethod;

pub use pattern::{Implementation, MethodEntry, Pattern};

pub use resolver::DispatchResolver;

pub use result::{AmbiguityError, NoMatchError, Resolution};
