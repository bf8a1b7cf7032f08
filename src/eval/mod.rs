//! Creature evaluation.
//!
//! Reduces a piece snapshot to a signed desirability score by summing an
//! ordered pipeline of scoring stages onto a fixed base, with an optional
//! trace of every contribution.

pub mod abilities;
pub mod evaluator;
pub mod modifier;
pub(crate) mod penalty;
pub(crate) mod stages;
pub mod trace;

pub use abilities::{
    AbilityPattern, AbilityPatterns, Recognizer, DEFAULT_ABILITY_VALUE, ENERGY_DOUBLING_PUMP,
};
pub use evaluator::{Evaluator, BASE_VALUE};
pub use modifier::{EvaluationError, ExpressionInterpreter, EVALUATION_MODIFIER_SVAR};
pub use trace::{LogTrace, NullTrace, Stage, TraceEntry, TraceReport, TraceSink};
