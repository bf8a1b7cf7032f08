//! The creature evaluator.
//!
//! Sums the scoring stages onto a fixed base in a fixed order:
//! type, power/toughness, mana value, evasion, keywords, defense,
//! protection, abilities, linkage, penalties (subtracted), and the
//! card-specific modifier. The sum is exact; the score is that sum clamped
//! to the `i32` range.

use rayon::prelude::*;

use crate::piece::PieceSnapshot;
use crate::script::SvarInterpreter;

use super::abilities::{granted_abilities, AbilityPatterns};
use super::modifier::{card_specific, EvaluationError, ExpressionInterpreter};
use super::penalty::penalties;
use super::stages;
use super::trace::{clamp_score, NullTrace, TraceReport, TraceSink};

/// Starting value of every evaluation.
pub const BASE_VALUE: i32 = 80;

/// Scores creatures. Holds no per-call state, so one evaluator can serve
/// any number of threads.
#[derive(Debug, Clone)]
pub struct Evaluator<I = SvarInterpreter> {
    interpreter: I,
    patterns: AbilityPatterns,
}

impl Evaluator<SvarInterpreter> {
    /// An evaluator with the reference SVar interpreter and built-in patterns.
    pub fn new() -> Self {
        Self::with_interpreter(SvarInterpreter::new())
    }
}

impl Default for Evaluator<SvarInterpreter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ExpressionInterpreter> Evaluator<I> {
    pub fn with_interpreter(interpreter: I) -> Self {
        Evaluator {
            interpreter,
            patterns: AbilityPatterns::builtin(),
        }
    }

    /// Replaces the ability-pattern registry.
    pub fn with_patterns(mut self, patterns: AbilityPatterns) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn patterns(&self) -> &AbilityPatterns {
        &self.patterns
    }

    pub fn interpreter(&self) -> &I {
        &self.interpreter
    }

    /// Scores a piece considering both power/toughness and mana value.
    pub fn score(&self, piece: &PieceSnapshot) -> Result<i32, EvaluationError> {
        self.score_with(piece, true, true)
    }

    /// Scores a piece. A `false` flag omits that stage entirely.
    pub fn score_with(
        &self,
        piece: &PieceSnapshot,
        consider_pt: bool,
        consider_mana_value: bool,
    ) -> Result<i32, EvaluationError> {
        self.score_traced(piece, consider_pt, consider_mana_value, &mut NullTrace)
    }

    /// Scores a piece, reporting each contribution to `trace` in order.
    pub fn score_traced(
        &self,
        piece: &PieceSnapshot,
        consider_pt: bool,
        consider_mana_value: bool,
        trace: &mut dyn TraceSink,
    ) -> Result<i32, EvaluationError> {
        let mut value = i64::from(BASE_VALUE);

        value += stages::card_type(piece, trace);
        if consider_pt {
            value += stages::power_toughness(piece, trace);
        }
        if consider_mana_value {
            value += stages::mana_value(piece, trace);
        }
        value += stages::evasion(piece, trace);
        value += stages::good_keywords(piece, trace);
        value += stages::defensive_keywords(piece, trace);
        value += stages::protection_keywords(piece, trace);
        value += granted_abilities(piece, &self.patterns, trace);
        value += stages::linkage(piece, trace);
        value -= penalties(piece, trace);
        value += card_specific(piece, &self.interpreter, trace)?;

        let score = clamp_score(value);
        log::debug!("{}: evaluated to {}", piece.name, score);
        Ok(score)
    }

    /// Full breakdown of `score`.
    pub fn explain(&self, piece: &PieceSnapshot) -> Result<TraceReport, EvaluationError> {
        self.explain_with(piece, true, true)
    }

    pub fn explain_with(
        &self,
        piece: &PieceSnapshot,
        consider_pt: bool,
        consider_mana_value: bool,
    ) -> Result<TraceReport, EvaluationError> {
        let mut report = TraceReport::new(piece.name.clone(), BASE_VALUE);
        self.score_traced(piece, consider_pt, consider_mana_value, &mut report)?;
        Ok(report)
    }

    /// The highest-scoring piece; the first one wins ties.
    pub fn best<'a>(
        &self,
        pieces: &'a [PieceSnapshot],
    ) -> Result<Option<&'a PieceSnapshot>, EvaluationError> {
        self.pick(pieces, |candidate, current| candidate > current)
    }

    /// The lowest-scoring piece; the first one wins ties.
    pub fn worst<'a>(
        &self,
        pieces: &'a [PieceSnapshot],
    ) -> Result<Option<&'a PieceSnapshot>, EvaluationError> {
        self.pick(pieces, |candidate, current| candidate < current)
    }

    fn pick<'a>(
        &self,
        pieces: &'a [PieceSnapshot],
        better: impl Fn(i32, i32) -> bool,
    ) -> Result<Option<&'a PieceSnapshot>, EvaluationError> {
        let mut chosen: Option<(&PieceSnapshot, i32)> = None;
        for piece in pieces {
            let score = self.score(piece)?;
            match chosen {
                Some((_, current)) if !better(score, current) => {}
                _ => chosen = Some((piece, score)),
            }
        }
        Ok(chosen.map(|(piece, _)| piece))
    }
}

impl<I: ExpressionInterpreter + Sync> Evaluator<I> {
    /// Scores a batch in parallel. Results are in input order.
    pub fn score_all(&self, pieces: &[PieceSnapshot]) -> Vec<Result<i32, EvaluationError>> {
        pieces.par_iter().map(|p| self.score(p)).collect()
    }
}
