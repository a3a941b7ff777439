//! # Numeric Operations
//!
//! Builds the arithmetic [`Context`]: one multimethod per operator, with
//! methods for same-width integer pairs, float pairs and mixed pairs.
//!
//! | Pattern              | Result                         |
//! |----------------------|--------------------------------|
//! | `[IntN, IntN]`       | `IntN`, wrapped to the width   |
//! | `[Float, Float]`     | `Float`                        |
//! | `[Integer, Float]`   | `Float`                        |
//! | `[Float, Integer]`   | `Float`                        |
//! | `neg [Signed]`       | same width, wrapped            |
//! | `neg [Float]`        | `Float`                        |
//!
//! Integers of different widths have no method; callers must convert first.

use std::fmt;

use brand_dispatch::{Context, DispatchConfig, DispatchResult, Subject};
use thiserror::Error;
use tracing::debug;

use crate::taxonomy::Taxonomy;
use crate::value::{IntWidth, Numeric};

/// Error raised inside a numeric implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("expected {expected} operand(s), got {found}")]
    Arity { expected: usize, found: usize },

    #[error("operand state does not match its brand")]
    StateMismatch,
}

/// What every numeric implementation returns.
pub type NumericResult = Result<Subject<Numeric>, ArithmeticError>;

/// The arithmetic context.
pub type NumericContext = Context<Numeric, NumericResult>;

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 4] = [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div];

    /// Operation name inside the context.
    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
        }
    }

    /// Apply to integers; the caller wraps the result to its width.
    pub fn apply_integer(self, lhs: i128, rhs: i128) -> Result<i128, ArithmeticError> {
        Ok(match self {
            BinaryOp::Add => lhs.wrapping_add(rhs),
            BinaryOp::Sub => lhs.wrapping_sub(rhs),
            BinaryOp::Mul => lhs.wrapping_mul(rhs),
            BinaryOp::Div => {
                if rhs == 0 {
                    return Err(ArithmeticError::DivisionByZero);
                }
                lhs.wrapping_div(rhs)
            }
        })
    }

    /// Apply to floats. Division by zero follows IEEE 754.
    pub fn apply_float(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of the unary negation operation.
pub const NEG: &str = "neg";

/// Build the arithmetic context over `taxonomy`'s brands.
pub fn build_context(
    taxonomy: &Taxonomy,
    config: DispatchConfig,
) -> DispatchResult<NumericContext> {
    let mut ctx = NumericContext::with_config(config);

    for op in BinaryOp::ALL {
        let method = ctx.define(op.name())?;

        for width in IntWidth::ALL {
            let brand = taxonomy.width(width).clone();
            method.define([brand.clone(), brand.clone()], move |args| {
                let (lhs, rhs) = operands(args)?;
                let lhs = lhs.state().as_integer().ok_or(ArithmeticError::StateMismatch)?;
                let rhs = rhs.state().as_integer().ok_or(ArithmeticError::StateMismatch)?;
                let value = width.wrap(op.apply_integer(lhs, rhs)?);
                Ok(Subject::new([brand.clone()], Numeric::Integer(value)))
            });
        }

        let float = taxonomy.float.clone();
        for pattern in [
            [&taxonomy.float, &taxonomy.float],
            [&taxonomy.integer, &taxonomy.float],
            [&taxonomy.float, &taxonomy.integer],
        ] {
            let float = float.clone();
            method.define(pattern, move |args| {
                let (lhs, rhs) = operands(args)?;
                let value = op.apply_float(lhs.state().as_float(), rhs.state().as_float());
                Ok(Subject::new([float.clone()], Numeric::Float(value)))
            });
        }

        debug!(operation = op.name(), methods = method.len(), "registered operation");
    }

    let negate = ctx.define(NEG)?;
    let widths = taxonomy.clone();
    negate.define([&taxonomy.signed], move |args| {
        let operand = operand(args)?;
        let width = widths.width_of(operand).ok_or(ArithmeticError::StateMismatch)?;
        let value = operand.state().as_integer().ok_or(ArithmeticError::StateMismatch)?;
        Ok(widths.integer(width, value.wrapping_neg()))
    });
    let float = taxonomy.float.clone();
    negate.define([&taxonomy.float], move |args| {
        let value = operand(args)?.state().as_float();
        Ok(Subject::new([float.clone()], Numeric::Float(-value)))
    });

    Ok(ctx)
}

/// The operation names and the patterns each one accepts, in definition order.
pub fn describe(ctx: &NumericContext) -> Vec<(String, Vec<String>)> {
    ctx.iter()
        .map(|(name, method)| {
            let patterns = method
                .methods()
                .iter()
                .map(|entry| entry.pattern().to_string())
                .collect();
            (name.to_string(), patterns)
        })
        .collect()
}

fn operands(
    args: &[Subject<Numeric>],
) -> Result<(&Subject<Numeric>, &Subject<Numeric>), ArithmeticError> {
    match args {
        [lhs, rhs] => Ok((lhs, rhs)),
        _ => Err(ArithmeticError::Arity {
            expected: 2,
            found: args.len(),
        }),
    }
}

fn operand(args: &[Subject<Numeric>]) -> Result<&Subject<Numeric>, ArithmeticError> {
    match args {
        [only] => Ok(only),
        _ => Err(ArithmeticError::Arity {
            expected: 1,
            found: args.len(),
        }),
    }
}
