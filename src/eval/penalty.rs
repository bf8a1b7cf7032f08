//! The penalty ladder.
//!
//! Drawbacks accumulate into one running subtotal that is subtracted from
//! the score once. The rungs run strictly in `LADDER` order over a shared
//! `PenaltyTally`: two rungs can reset the subtotal to a fixed value,
//! discarding what came before, and the phasing rung reads the subtotal
//! built so far.
//!
//! The subtotal is an exact `i64`.
//!
//! The untapped and mana-ability terms grow the subtotal like every other
//! rung, which makes them count against the piece.

use crate::piece::{CounterKind, Keyword, MustAttack, PieceSnapshot, RuleFact};

use super::trace::{Stage, TraceSink};

/// Running penalty subtotal. Penalties are positive here; each change is
/// reported to the sink as its effect on the score (negated), zero or not.
pub(crate) struct PenaltyTally<'t> {
    subtotal: i64,
    trace: &'t mut dyn TraceSink,
}

impl<'t> PenaltyTally<'t> {
    pub(crate) fn new(trace: &'t mut dyn TraceSink) -> Self {
        PenaltyTally { subtotal: 0, trace }
    }

    #[inline]
    pub(crate) fn subtotal(&self) -> i64 {
        self.subtotal
    }

    /// Grows the subtotal by `amount`.
    pub(crate) fn charge(&mut self, label: &'static str, amount: i64) {
        self.trace.record(Stage::Penalty, label, -amount);
        self.subtotal += amount;
    }

    /// Replaces the subtotal with `value`.
    pub(crate) fn reset(&mut self, label: &'static str, value: i64) {
        self.trace.record(Stage::Penalty, label, self.subtotal - value);
        self.subtotal = value;
    }
}

type Rung = fn(&PieceSnapshot, &mut PenaltyTally<'_>);

/// Rungs in evaluation order. Reordering changes results.
const LADDER: [Rung; 11] = [
    attack_restrictions,
    block_restrictions,
    damage_fragility,
    target_fragility,
    untapped,
    mana_abilities,
    untap_restrictions,
    upkeep_costs,
    expiry_counters,
    phasing,
    upkeep_damage,
];

/// Value a useless piece is reset to.
#[inline]
fn useless(piece: &PieceSnapshot) -> i64 {
    50 + i64::from(piece.mana_value) * 5
}

fn attack_restrictions(piece: &PieceSnapshot, tally: &mut PenaltyTally<'_>) {
    if piece.has_keyword(Keyword::Defender) || piece.has_rule(RuleFact::CantAttack) {
        tally.charge("defender", i64::from(piece.combat_damage()) * 9 + 40);
    } else if piece.has_rule(RuleFact::SacrificeEndOfCombat) {
        tally.charge("sac-end", 40);
    }
}

fn block_restrictions(piece: &PieceSnapshot, tally: &mut PenaltyTally<'_>) {
    if piece.has_rule(RuleFact::CantAttackOrBlock) {
        tally.reset("useless", useless(piece));
    } else if piece.has_rule(RuleFact::CantBlock) {
        tally.charge("cant-block", 10);
    } else if piece.goaded {
        tally.charge("goaded", 5);
    } else {
        match piece.facts.must_attack {
            MustAttack::Itself => tally.charge("must-attack", 10),
            MustAttack::Entities => tally.charge("must-attack-player", 10),
            MustAttack::None => {}
        }
    }
}

fn damage_fragility(piece: &PieceSnapshot, tally: &mut PenaltyTally<'_>) {
    if piece.has_rule(RuleFact::DestroyWhenDamaged) {
        tally.charge("dies-to-dmg", (i64::from(piece.toughness) - 1) * 9);
    }
}

fn target_fragility(piece: &PieceSnapshot, tally: &mut PenaltyTally<'_>) {
    if piece.has_rule(RuleFact::DiesWhenTargeted) {
        tally.charge("dies", 25);
    }
}

fn untapped(piece: &PieceSnapshot, tally: &mut PenaltyTally<'_>) {
    if piece.is_untapped() {
        tally.charge("untapped", 1);
    }
}

fn mana_abilities(piece: &PieceSnapshot, tally: &mut PenaltyTally<'_>) {
    if piece.has_mana_ability() {
        tally.charge("manadork", 10);
    }
}

fn untap_restrictions(piece: &PieceSnapshot, tally: &mut PenaltyTally<'_>) {
    if piece.has_rule(RuleFact::DoesntUntap) {
        if piece.tapped {
            tally.reset("tapped-useless", useless(piece));
        } else {
            tally.charge("doesnt-untap", 50);
        }
    } else {
        tally.charge("stunned", i64::from(piece.counter(CounterKind::Stun)) * 10);
    }
}

fn upkeep_costs(piece: &PieceSnapshot, tally: &mut PenaltyTally<'_>) {
    if piece.has_rule(RuleFact::EndOfTurnLeavePlay) {
        tally.charge("eot-leaves", 50);
    } else if piece.has_keyword(Keyword::CumulativeUpkeep) {
        tally.charge("cupkeep", 30);
    } else if piece.has_rule(RuleFact::UpkeepCost) {
        tally.charge("sac-unless", 20);
    } else if piece.has_keyword(Keyword::Echo) && piece.facts.came_under_control_since_upkeep {
        tally.charge("echo-unpaid", 10);
    }
}

fn expiry_counters(piece: &PieceSnapshot, tally: &mut PenaltyTally<'_>) {
    if piece.has_keyword(Keyword::Fading) {
        tally.charge("fading", 20 / i64::from(piece.counter(CounterKind::Fade).max(1)));
    }
    if piece.has_keyword(Keyword::Vanishing) {
        tally.charge("vanishing", 20 / i64::from(piece.counter(CounterKind::Time).max(1)));
    }
}

// Only around half the time on the battlefield.
fn phasing(piece: &PieceSnapshot, tally: &mut PenaltyTally<'_>) {
    if piece.has_keyword(Keyword::Phasing) {
        let amount = (tally.subtotal() / 2).max(20);
        tally.charge("phasing", amount);
    }
}

fn upkeep_damage(piece: &PieceSnapshot, tally: &mut PenaltyTally<'_>) {
    if piece.has_rule(RuleFact::UpkeepSelfDamage) {
        tally.charge("upkeep-dmg", 20);
    }
}

/// Runs the ladder and returns the penalty subtotal (to be subtracted).
pub(crate) fn penalties(piece: &PieceSnapshot, trace: &mut dyn TraceSink) -> i64 {
    let mut tally = PenaltyTally::new(trace);
    for rung in LADDER {
        rung(piece, &mut tally);
    }
    tally.subtotal()
}
