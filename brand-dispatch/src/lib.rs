//! # brand-dispatch
//!
//! Contextual multiple dispatch: select an implementation of an operation
//! from the runtime identities of *all* of its arguments.
//!
//! Identities are [`Brand`]s, organized into a parent hierarchy and combined
//! with `or`/`and`. Values carrying brands are [`Subject`]s. A
//! [`Multimethod`] maps brand patterns to implementations, and a
//! [`Context`] groups multimethods by operation name.
//!
//! ```
//! use brand_dispatch::{Brand, Context, DispatchError, Subject};
//!
//! let number = Brand::new("Number");
//! let int8 = Brand::with_parent("Int8", &number);
//! let int16 = Brand::with_parent("Int16", &number);
//!
//! let mut ctx: Context<i64, i64> = Context::new();
//! ctx.define("add")?
//!     .define([&int8, &int8], |args| (args[0].state() + args[1].state()) as i8 as i64);
//!
//! let x = Subject::new([int8.clone()], 100);
//! let y = Subject::new([int8.clone()], 100);
//! assert_eq!(ctx.invoke("add", &[x, y])?, -56);
//!
//! let wide = Subject::new([int16.clone()], 1);
//! let err = ctx.invoke("add", &[wide.clone(), wide]).unwrap_err();
//! assert!(matches!(err, DispatchError::NoMethodMatched(_)));
//! # Ok::<(), DispatchError>(())
//! ```
//!
//! Dispatch never breaks ties on its own: a call matched by two methods
//! fails with [`DispatchError::AmbiguousDispatch`] unless the context is
//! configured with [`ResolutionPolicy::MostSpecific`].

pub mod brand;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod subject;

pub use brand::{Ancestors, Brand, BrandId, BrandKind};
pub use config::{DispatchConfig, ResolutionPolicy};
pub use context::Context;
pub use dispatch::{
    AmbiguityError, DispatchResolver, Fingerprint, Implementation, MethodEntry, Multimethod,
    NoMatchError, Pattern, Resolution,
};
pub use error::{DispatchError, DispatchResult};
pub use subject::Subject;
