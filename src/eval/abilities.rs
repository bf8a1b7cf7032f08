//! Granted-ability scoring.
//!
//! Every ability of the piece is worth a flat `DEFAULT_ABILITY_VALUE`
//! unless a registered `AbilityPattern` recognises it and supplies its own
//! value. Patterns are tried in registration order; the first match wins.

use std::fmt;

use crate::piece::{AbilityApi, CounterKind, Defined, GrantedAbility, PieceSnapshot};

use super::trace::{Stage, StageTally, TraceSink};

/// Value of an ability no pattern recognises.
pub const DEFAULT_ABILITY_VALUE: i32 = 10;

/// A pure recogniser: `Some(value)` replaces the default for that ability.
pub type Recognizer = fn(&GrantedAbility, &PieceSnapshot) -> Option<i32>;

/// A named ability-pattern recogniser.
#[derive(Clone, Copy)]
pub struct AbilityPattern {
    pub name: &'static str,
    pub recognize: Recognizer,
}

impl fmt::Debug for AbilityPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbilityPattern")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Self-only `+X/+X` paid purely with energy, where each activation
/// doubles power (Electrostatic Pummeler and similar).
pub const ENERGY_DOUBLING_PUMP: AbilityPattern = AbilityPattern {
    name: "energy-pump",
    recognize: energy_doubling_pump,
};

fn energy_doubling_pump(ability: &GrantedAbility, piece: &PieceSnapshot) -> Option<i32> {
    if ability.api != AbilityApi::Pump
        || !ability.pump.is_some_and(|p| p.is_plus_x_plus_x())
        || ability.uses_targeting
        || ability.defined != Defined::SelfOnly
        || !ability.costs_only_energy()
    {
        return None;
    }

    let energy = piece.controller_counters.get(CounterKind::Energy);
    if energy == 0 {
        return None;
    }

    let per_activation = ability.energy_cost().max(1);
    let activations = energy / per_activation;

    let initial = piece.power;
    let mut pumped = initial;
    for _ in 0..activations {
        let next = pumped.saturating_mul(2);
        if next == pumped {
            break;
        }
        pumped = next;
    }
    Some(pumped.saturating_sub(initial).saturating_mul(15))
}

/// Ordered registry of ability patterns.
#[derive(Debug, Clone)]
pub struct AbilityPatterns {
    patterns: Vec<AbilityPattern>,
}

impl AbilityPatterns {
    /// A registry with no patterns: every ability scores the default.
    pub fn empty() -> Self {
        AbilityPatterns {
            patterns: Vec::new(),
        }
    }

    /// The built-in patterns.
    pub fn builtin() -> Self {
        AbilityPatterns {
            patterns: vec![ENERGY_DOUBLING_PUMP],
        }
    }

    /// Appends a pattern after the existing ones.
    pub fn register(&mut self, pattern: AbilityPattern) {
        self.patterns.push(pattern);
    }

    pub fn with(mut self, pattern: AbilityPattern) -> Self {
        self.register(pattern);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.patterns.iter().map(|p| p.name)
    }

    /// Returns the trace label and value of one ability.
    pub fn value_of(&self, ability: &GrantedAbility, piece: &PieceSnapshot) -> (&'static str, i32) {
        self.patterns
            .iter()
            .find_map(|p| (p.recognize)(ability, piece).map(|v| (p.name, v)))
            .unwrap_or(("ability", DEFAULT_ABILITY_VALUE))
    }
}

impl Default for AbilityPatterns {
    fn default() -> Self {
        Self::builtin()
    }
}

pub(crate) fn granted_abilities(
    piece: &PieceSnapshot,
    patterns: &AbilityPatterns,
    trace: &mut dyn TraceSink,
) -> i64 {
    let mut tally = StageTally::new(Stage::Abilities, trace);
    for ability in piece.abilities.iter().filter(|a| a.class.is_ability()) {
        let (label, value) = patterns.value_of(ability, piece);
        tally.add(label, i64::from(value));
    }
    tally.finish()
}
