//! Card-specific score modifier.
//!
//! A piece may carry an `AIEvaluationModifier` SVar whose expression is
//! evaluated by an external interpreter and added to the score verbatim.
//! This is the only stage that can fail.

use thiserror::Error;

use crate::piece::PieceSnapshot;
use crate::script::ScriptError;

use super::trace::{Stage, TraceSink};

/// SVar holding the card-specific evaluation adjustment.
pub const EVALUATION_MODIFIER_SVAR: &str = "AIEvaluationModifier";

/// Evaluates custom script expressions in the context of a piece.
///
/// Implementations must be deterministic for a given snapshot and must not
/// block; they may be called concurrently from several threads.
pub trait ExpressionInterpreter {
    fn evaluate(&self, expression: &str, piece: &PieceSnapshot) -> Result<i32, ScriptError>;
}

impl<T: ExpressionInterpreter + ?Sized> ExpressionInterpreter for &T {
    fn evaluate(&self, expression: &str, piece: &PieceSnapshot) -> Result<i32, ScriptError> {
        (**self).evaluate(expression, piece)
    }
}

impl<T: ExpressionInterpreter + ?Sized> ExpressionInterpreter for Box<T> {
    fn evaluate(&self, expression: &str, piece: &PieceSnapshot) -> Result<i32, ScriptError> {
        (**self).evaluate(expression, piece)
    }
}

/// Errors that abort an evaluation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("failed to evaluate SVar '{svar}' on '{piece}': {source}")]
    Modifier {
        piece: String,
        svar: String,
        #[source]
        source: ScriptError,
    },
}

impl EvaluationError {
    /// Name of the piece whose evaluation failed.
    pub fn piece(&self) -> &str {
        match self {
            EvaluationError::Modifier { piece, .. } => piece,
        }
    }
}

pub(crate) fn card_specific<I: ExpressionInterpreter + ?Sized>(
    piece: &PieceSnapshot,
    interpreter: &I,
    trace: &mut dyn TraceSink,
) -> Result<i64, EvaluationError> {
    let Some(expression) = piece.svar(EVALUATION_MODIFIER_SVAR) else {
        return Ok(0);
    };

    let value = interpreter.evaluate(expression, piece).map_err(|source| {
        log::warn!(
            "{}: {} '{}' failed: {}",
            piece.name,
            EVALUATION_MODIFIER_SVAR,
            expression,
            source
        );
        EvaluationError::Modifier {
            piece: piece.name.clone(),
            svar: EVALUATION_MODIFIER_SVAR.to_string(),
            source,
        }
    })?;

    let value = i64::from(value);
    trace.record(Stage::Modifier, "card-specific", value);
    Ok(value)
}
