//! # brand-numeric
//!
//! Width-preserving arithmetic on branded numbers.
//!
//! Every number is a [`Subject`] branded with its width (`Int8`, `UInt32`,
//! `Float`, ...). Operations are multimethods in one [`NumericContext`], so
//! `Int8 + Int8` wraps at eight bits while `Int8 + Int16` has no method.
//!
//! ```
//! use brand_numeric::Calculator;
//!
//! let calc = Calculator::new().unwrap();
//! assert_eq!(calc.eval_str("add", &["100:i8", "100:i8"]).unwrap(), "-56:i8");
//! assert_eq!(calc.eval_str("mul", &["2:i32", "1.5:f64"]).unwrap(), "3.0:f64");
//! assert!(calc.eval_str("add", &["1:i8", "1:i16"]).is_err());
//! ```

pub mod arithmetic;
pub mod config;
pub mod taxonomy;
pub mod value;

use brand_dispatch::{DispatchConfig, DispatchError, Subject};
use thiserror::Error;
use tracing::debug;

pub use arithmetic::{
    build_context, describe, ArithmeticError, BinaryOp, NumericContext, NumericResult, NEG,
};
pub use config::{read_config, ConfigError};
pub use taxonomy::Taxonomy;
pub use value::{IntWidth, Kind, Literal, LiteralError, Numeric};

/// Error evaluating an operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Literal(#[from] LiteralError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

/// A taxonomy together with the arithmetic context built over it.
#[derive(Debug, Clone)]
pub struct Calculator {
    taxonomy: Taxonomy,
    context: NumericContext,
}

impl Calculator {
    /// Create a calculator with the default dispatch configuration.
    pub fn new() -> Result<Self, DispatchError> {
        Self::with_config(DispatchConfig::default())
    }

    /// Create a calculator with a custom dispatch configuration.
    pub fn with_config(config: DispatchConfig) -> Result<Self, DispatchError> {
        let taxonomy = Taxonomy::new();
        let context = build_context(&taxonomy, config)?;
        Ok(Self { taxonomy, context })
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn context(&self) -> &NumericContext {
        &self.context
    }

    /// Invoke `operation` on already-branded operands.
    pub fn eval(
        &self,
        operation: &str,
        operands: &[Subject<Numeric>],
    ) -> Result<Subject<Numeric>, EvalError> {
        let result = self.context.invoke(operation, operands)??;
        debug!(operation, result = %self.taxonomy.render(&result), "evaluated");
        Ok(result)
    }

    /// Parse literal operands, invoke `operation` and render the result.
    pub fn eval_str(&self, operation: &str, operands: &[&str]) -> Result<String, EvalError> {
        let mut subjects = Vec::with_capacity(operands.len());
        for text in operands {
            let literal: Literal = text.parse()?;
            subjects.push(self.taxonomy.literal(literal));
        }
        let result = self.eval(operation, &subjects)?;
        Ok(self.taxonomy.render(&result))
    }
}
