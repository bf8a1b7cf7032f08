//! Custom script expressions (SVars).
//!
//! Cards carry named formula strings that adjust how the AI values them.
//! This module provides a reference `ExpressionInterpreter` for the common
//! subset of that formula language and the error type interpreters report.

pub mod interpreter;

use thiserror::Error;

pub use interpreter::{SvarInterpreter, DEFAULT_MAX_DEPTH};

/// Errors produced while evaluating a script expression.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("empty expression")]
    Empty,

    #[error("unknown reference '{0}'")]
    UnknownReference(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unknown property '{0}'")]
    UnknownProperty(String),

    #[error("unknown counter kind '{0}'")]
    UnknownCounter(String),

    #[error("unknown math operation '{0}'")]
    UnknownMath(String),

    #[error("division by zero in '{0}'")]
    DivisionByZero(String),

    #[error("SVar references nest too deeply at '{0}'")]
    RecursionLimit(String),

    /// Raised by interpreters other than the built-in one.
    #[error("expression rejected: {0}")]
    Rejected(String),
}
