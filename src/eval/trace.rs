//! Contribution tracing.
//!
//! Every scoring stage reports each contribution it makes (label and signed
//! delta, in score space) to a `TraceSink` passed in for the call, zero
//! contributions included. The sink never influences the score.
//!
//! Contributions are exact `i64`s; only the final score is clamped to `i32`. `TraceReport` collects the contributions for
//! a human-readable breakdown; `LogTrace` forwards them to the `log` facade.

use std::fmt;

/// The scoring stage a contribution belongs to, in aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    CardType,
    PowerToughness,
    ManaValue,
    Evasion,
    Keywords,
    Defense,
    Protection,
    Abilities,
    Linkage,
    Penalty,
    Modifier,
}

impl Stage {
    pub const fn name(self) -> &'static str {
        match self {
            Stage::CardType => "type",
            Stage::PowerToughness => "pt",
            Stage::ManaValue => "cmc",
            Stage::Evasion => "evasion",
            Stage::Keywords => "keywords",
            Stage::Defense => "defense",
            Stage::Protection => "protection",
            Stage::Abilities => "abilities",
            Stage::Linkage => "linkage",
            Stage::Penalty => "penalty",
            Stage::Modifier => "modifier",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives contributions as they are made.
pub trait TraceSink {
    fn record(&mut self, stage: Stage, label: &'static str, delta: i64);
}

/// Clamps an exact running value into the score range.
#[inline]
pub(crate) fn clamp_score(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    #[inline]
    fn record(&mut self, _stage: Stage, _label: &'static str, _delta: i64) {}
}

/// Forwards contributions to `log::trace!`, tagged with the piece name.
#[derive(Debug, Clone, Copy)]
pub struct LogTrace<'a> {
    piece: &'a str,
}

impl<'a> LogTrace<'a> {
    pub fn new(piece: &'a str) -> Self {
        LogTrace { piece }
    }
}

impl TraceSink for LogTrace<'_> {
    fn record(&mut self, stage: Stage, label: &'static str, delta: i64) {
        log::trace!("{}: {} {} {:+}", self.piece, stage, label, delta);
    }
}

/// One recorded contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    pub stage: Stage,
    pub label: &'static str,
    pub delta: i64,
}

/// Base value plus every contribution of one evaluation, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceReport {
    piece: String,
    base: i32,
    entries: Vec<TraceEntry>,
}

impl TraceReport {
    pub fn new(piece: impl Into<String>, base: i32) -> Self {
        TraceReport {
            piece: piece.into(),
            base,
            entries: Vec::new(),
        }
    }

    pub fn piece(&self) -> &str {
        &self.piece
    }

    pub fn base(&self) -> i32 {
        self.base
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Base plus the sum of all deltas, clamped like the score.
    pub fn total(&self) -> i32 {
        let sum: i64 = self.entries.iter().map(|e| e.delta).sum();
        clamp_score(i64::from(self.base) + sum)
    }

    /// Sum of the deltas recorded for one stage.
    pub fn stage_total(&self, stage: Stage) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.stage == stage)
            .map(|e| e.delta)
            .sum()
    }

    /// Looks up the delta recorded under a label, if any.
    pub fn delta_of(&self, label: &str) -> Option<i64> {
        self.entries.iter().find(|e| e.label == label).map(|e| e.delta)
    }
}

impl TraceSink for TraceReport {
    fn record(&mut self, stage: Stage, label: &'static str, delta: i64) {
        self.entries.push(TraceEntry {
            stage,
            label,
            delta,
        });
    }
}

impl fmt::Display for TraceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Evaluation details for {}", self.piece)?;
        writeln!(f, "  base value: {}", self.base)?;
        for e in &self.entries {
            writeln!(f, "  {:<10} {:<20} {:+}", e.stage.name(), e.label, e.delta)?;
        }
        write!(f, "  total: {}", self.total())
    }
}

/// Running total for one additive stage, reporting each contribution to
/// the sink.
pub(crate) struct StageTally<'t> {
    stage: Stage,
    trace: &'t mut dyn TraceSink,
    value: i64,
}

impl<'t> StageTally<'t> {
    pub(crate) fn new(stage: Stage, trace: &'t mut dyn TraceSink) -> Self {
        StageTally {
            stage,
            trace,
            value: 0,
        }
    }

    #[inline]
    pub(crate) fn add(&mut self, label: &'static str, delta: i64) {
        self.trace.record(self.stage, label, delta);
        self.value += delta;
    }

    #[inline]
    pub(crate) fn finish(self) -> i64 {
        self.value
    }
}
