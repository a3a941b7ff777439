//! Error types for dispatch.

use thiserror::Error;

use crate::dispatch::{AmbiguityError, NoMatchError};

/// Errors raised by the dispatch layer.
///
/// Errors produced by implementations are never converted into this type;
/// they travel inside the implementation's own return value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    NoMethodMatched(#[from] NoMatchError),

    #[error(transparent)]
    AmbiguousDispatch(#[from] AmbiguityError),

    #[error("operation `{name}` is already defined in this context")]
    DuplicateOperation { name: String },

    #[error("operation `{name}` is not defined in this context")]
    UnknownOperation { name: String },
}

/// Dispatch result type.
pub type DispatchResult<T> = Result<T, DispatchError>;
