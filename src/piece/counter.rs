//! Counter kinds and per-kind counts.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A kind of persistent marker tracked on a piece or a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterKind {
    Shield,
    Energy,
    Stun,
    Fade,
    Time,
    #[serde(rename = "p1p1")]
    P1P1,
    #[serde(rename = "m1m1")]
    M1M1,
    Charge,
    Loyalty,
    Poison,
}

impl CounterKind {
    /// Returns the upper-case name used in script expressions (`P1P1`, `SHIELD`).
    pub const fn script_name(self) -> &'static str {
        match self {
            CounterKind::Shield => "SHIELD",
            CounterKind::Energy => "ENERGY",
            CounterKind::Stun => "STUN",
            CounterKind::Fade => "FADE",
            CounterKind::Time => "TIME",
            CounterKind::P1P1 => "P1P1",
            CounterKind::M1M1 => "M1M1",
            CounterKind::Charge => "CHARGE",
            CounterKind::Loyalty => "LOYALTY",
            CounterKind::Poison => "POISON",
        }
    }
}

impl fmt::Display for CounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.script_name())
    }
}

/// Returned when a counter name is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown counter kind '{0}'")]
pub struct UnknownCounterKind(pub String);

impl FromStr for CounterKind {
    type Err = UnknownCounterKind;

    /// Parses a script name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.to_ascii_uppercase().as_str() {
            "SHIELD" => CounterKind::Shield,
            "ENERGY" => CounterKind::Energy,
            "STUN" => CounterKind::Stun,
            "FADE" => CounterKind::Fade,
            "TIME" => CounterKind::Time,
            "P1P1" => CounterKind::P1P1,
            "M1M1" => CounterKind::M1M1,
            "CHARGE" => CounterKind::Charge,
            "LOYALTY" => CounterKind::Loyalty,
            "POISON" => CounterKind::Poison,
            _ => return Err(UnknownCounterKind(s.to_string())),
        };
        Ok(kind)
    }
}

/// Counter counts by kind. Missing kinds count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counters {
    counts: BTreeMap<CounterKind, u32>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the count for a kind. A count of zero removes the entry.
    pub fn set(&mut self, kind: CounterKind, count: u32) {
        if count == 0 {
            self.counts.remove(&kind);
        } else {
            self.counts.insert(kind, count);
        }
    }

    #[inline]
    pub fn get(&self, kind: CounterKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Count as a signed score operand, saturating at `i32::MAX`.
    #[inline]
    pub fn signed(&self, kind: CounterKind) -> i32 {
        i32::try_from(self.get(kind)).unwrap_or(i32::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
