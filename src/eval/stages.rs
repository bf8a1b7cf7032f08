//! Additive scoring stages.
//!
//! Each stage reads the snapshot and returns its signed contribution.
//! None of them can fail: absent keywords, counters, and facts read as zero.
//! Weights are applied in `i64`, so no snapshot value can overflow a stage.

use crate::piece::{CounterKind, Keyword, PieceSnapshot, RuleFact};

use super::trace::{Stage, StageTally, TraceSink};

/// Self-effects under which the piece deals no damage of its own.
const DAMAGE_PREVENTED_BY_SELF: [RuleFact; 4] = [
    RuleFact::PreventCombatDamageDealtBy,
    RuleFact::PreventAllDamageDealtBy,
    RuleFact::PreventCombatDamageDealtToAndBy,
    RuleFact::PreventAllDamageDealtToAndBy,
];

pub(crate) fn card_type(piece: &PieceSnapshot, trace: &mut dyn TraceSink) -> i64 {
    let mut tally = StageTally::new(Stage::CardType, trace);
    if !piece.token {
        tally.add("non-token", 20);
    }
    tally.finish()
}

pub(crate) fn power_toughness(piece: &PieceSnapshot, trace: &mut dyn TraceSink) -> i64 {
    let mut tally = StageTally::new(Stage::PowerToughness, trace);
    let mut power = i64::from(piece.combat_damage());
    let toughness = i64::from(piece.toughness);

    if DAMAGE_PREVENTED_BY_SELF.iter().any(|f| piece.has_rule(*f)) {
        power = 0;
    }

    tally.add("power", power * 15);
    tally.add("toughness", toughness * 10);

    if piece.has_keyword(Keyword::Daybound) && piece.double_faced {
        tally.add("transforming", power * 10);
    }
    tally.finish()
}

pub(crate) fn mana_value(piece: &PieceSnapshot, trace: &mut dyn TraceSink) -> i64 {
    let mut tally = StageTally::new(Stage::ManaValue, trace);
    tally.add("cmc", i64::from(piece.mana_value) * 5);
    tally.finish()
}

pub(crate) fn evasion(piece: &PieceSnapshot, trace: &mut dyn TraceSink) -> i64 {
    let mut tally = StageTally::new(Stage::Evasion, trace);
    let power = i64::from(piece.combat_damage());

    if piece.has_keyword(Keyword::Flying) {
        tally.add("flying", power * 10);
    }
    if piece.has_keyword(Keyword::Horsemanship) {
        tally.add("horses", power * 10);
    }

    if piece.facts.unblockable {
        tally.add("unblockable", power * 10);
        return tally.finish();
    }

    if piece.facts.assigns_damage_as_unblocked {
        tally.add("thorns", power * 6);
    }
    if piece.has_keyword(Keyword::Fear) {
        tally.add("fear", power * 6);
    }
    if piece.has_keyword(Keyword::Intimidate) {
        tally.add("intimidate", power * 6);
    }
    if piece.has_keyword(Keyword::Menace) {
        tally.add("menace", power * 4);
    }
    if piece.has_keyword(Keyword::Skulk) {
        tally.add("skulk", power * 3);
    }
    tally.finish()
}

pub(crate) fn good_keywords(piece: &PieceSnapshot, trace: &mut dyn TraceSink) -> i64 {
    let mut tally = StageTally::new(Stage::Keywords, trace);
    let power = i64::from(piece.combat_damage());
    let toughness = i64::from(piece.toughness);
    let kw = &piece.keywords;
    let magnitude = |k: Keyword| i64::from(kw.magnitude(k));
    let amount = |k: Keyword| i64::from(kw.amount(k));

    if power > 0 {
        if kw.has(Keyword::DoubleStrike) {
            tally.add("ds", 10 + power * 15);
        } else if kw.has(Keyword::FirstStrike) {
            tally.add("fs", 10 + power * 5);
        }
        if kw.has(Keyword::Deathtouch) {
            tally.add("dt", 25);
        }
        if kw.has(Keyword::Lifelink) {
            tally.add("lifelink", power * 10);
        }
        if power > 1 && kw.has(Keyword::Trample) {
            tally.add("trample", (power - 1) * 5);
        }
        if kw.has(Keyword::Vigilance) {
            tally.add("vigilance", power * 5 + toughness * 5);
        }
        if kw.has(Keyword::Infect) {
            tally.add("infect", power * 15);
        } else if kw.has(Keyword::Wither) {
            tally.add("wither", power * 10);
        }
        tally.add("toxic", magnitude(Keyword::Toxic) * 5);
        tally.add("afflict", magnitude(Keyword::Afflict) * 5);
        tally.add("rampage", magnitude(Keyword::Rampage));
    }

    tally.add("eldrazi", magnitude(Keyword::Annihilator) * 50);
    tally.add("absorb", magnitude(Keyword::Absorb) * 11);
    if kw.has(Keyword::Outlast) {
        tally.add("outlast", 10);
    }
    tally.add("bushido", magnitude(Keyword::Bushido) * 16);
    tally.add("flanking", amount(Keyword::Flanking) * 15);
    tally.add("exalted", amount(Keyword::Exalted) * 15);
    tally.add("melee", amount(Keyword::Melee) * 18);
    tally.add("prowess", amount(Keyword::Prowess) * 5);
    tally.finish()
}

pub(crate) fn defensive_keywords(piece: &PieceSnapshot, trace: &mut dyn TraceSink) -> i64 {
    let mut tally = StageTally::new(Stage::Defense, trace);
    if piece.has_keyword(Keyword::Reach) && !piece.has_keyword(Keyword::Flying) {
        tally.add("reach", 5);
    }
    if piece.has_rule(RuleFact::CanBlockShadow) {
        tally.add("shadow-block", 3);
    }
    tally.finish()
}

pub(crate) fn protection_keywords(piece: &PieceSnapshot, trace: &mut dyn TraceSink) -> i64 {
    let mut tally = StageTally::new(Stage::Protection, trace);

    if piece.has_keyword(Keyword::Indestructible) {
        tally.add("darksteel", 70);
    } else {
        tally.add("shielded", i64::from(piece.counter(CounterKind::Shield)) * 20);
    }

    if piece.has_rule(RuleFact::PreventAllDamageDealtTo) {
        tally.add("cho-manno", 60);
    } else if piece.has_rule(RuleFact::PreventCombatDamageDealtTo) {
        tally.add("fogbank", 50);
    }

    if piece.has_keyword(Keyword::Hexproof) {
        tally.add("hexproof", 35);
    } else if piece.has_keyword(Keyword::Shroud) {
        tally.add("shroud", 30);
    } else if piece.has_keyword(Keyword::Ward) {
        tally.add("ward", 10);
    }

    if piece.has_keyword(Keyword::Protection) {
        tally.add("protection", 20);
    }
    tally.finish()
}

pub(crate) fn linkage(piece: &PieceSnapshot, trace: &mut dyn TraceSink) -> i64 {
    let mut tally = StageTally::new(Stage::Linkage, trace);
    if piece.paired {
        tally.add("paired", 14);
    }
    if piece.encoded {
        tally.add("encoded", 24);
    }
    if piece.facts.revives_on_death {
        tally.add("revive", 30);
    }
    tally.finish()
}
