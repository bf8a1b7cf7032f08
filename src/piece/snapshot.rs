//! The read-only view of one creature that a single evaluation consumes.
//!
//! The host rules engine builds a `PieceSnapshot` immediately before an
//! evaluation call. Rule text the evaluator cares about is reduced to the
//! closed `RuleFact` vocabulary, and board-dependent static ability queries
//! are answered up front in `StaticFacts`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::ability::{AbilityClass, GrantedAbility};
use super::counter::{CounterKind, Counters};
use super::keyword::{Keyword, KeywordInstance, KeywordSet};

/// A rules fact about a piece that is not a plain keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFact {
    /// Prevent all combat damage that would be dealt by this piece.
    PreventCombatDamageDealtBy,
    /// Prevent all damage that would be dealt by this piece.
    PreventAllDamageDealtBy,
    /// Prevent all combat damage that would be dealt to and by this piece.
    PreventCombatDamageDealtToAndBy,
    /// Prevent all damage that would be dealt to and by this piece.
    PreventAllDamageDealtToAndBy,
    /// Prevent all damage that would be dealt to this piece.
    PreventAllDamageDealtTo,
    /// Prevent all combat damage that would be dealt to this piece.
    PreventCombatDamageDealtTo,
    /// Can block creatures with shadow as though they didn't have shadow.
    CanBlockShadow,
    CantAttack,
    CantAttackOrBlock,
    CantBlock,
    /// Sacrificed at end of combat if it attacked or blocked.
    SacrificeEndOfCombat,
    /// Destroyed whenever it is dealt damage.
    DestroyWhenDamaged,
    /// Dies when it becomes the target of a spell or ability.
    DiesWhenTargeted,
    /// Doesn't untap during its controller's untap step.
    DoesntUntap,
    /// Leaves the battlefield at the end of the turn.
    EndOfTurnLeavePlay,
    /// An upkeep "pay or sacrifice" cost.
    UpkeepCost,
    /// Deals damage to its controller at the beginning of each upkeep.
    UpkeepSelfDamage,
}

/// Which entities an external effect forces this piece to attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MustAttack {
    #[default]
    None,
    /// The forced-attack list names this piece itself.
    Itself,
    /// Some other entity (a player or planeswalker) must be attacked.
    Entities,
}

/// Derived facts the rules engine computes from the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticFacts {
    /// Can't be blocked by any creature.
    pub unblockable: bool,
    /// May assign combat damage as though it weren't blocked.
    pub assigns_damage_as_unblocked: bool,
    pub must_attack: MustAttack,
    pub came_under_control_since_upkeep: bool,
    /// Has an active undying or persist style return-on-death effect.
    pub revives_on_death: bool,
}

/// Immutable snapshot of one creature for one evaluation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceSnapshot {
    pub name: String,
    pub power: i32,
    pub toughness: i32,
    /// Net combat damage when it differs from power.
    pub combat_damage: Option<i32>,
    pub mana_value: i32,
    pub token: bool,
    pub double_faced: bool,
    pub tapped: bool,
    pub paired: bool,
    pub encoded: bool,
    pub goaded: bool,
    pub keywords: KeywordSet,
    pub counters: Counters,
    /// Counters on the piece's controller, such as the energy pool.
    pub controller_counters: Counters,
    pub abilities: Vec<GrantedAbility>,
    pub rules: BTreeSet<RuleFact>,
    pub facts: StaticFacts,
    pub svars: BTreeMap<String, String>,
}

impl PieceSnapshot {
    /// An untapped, non-token creature with the given stats and nothing else.
    pub fn new(name: impl Into<String>, power: i32, toughness: i32) -> Self {
        PieceSnapshot {
            name: name.into(),
            power,
            toughness,
            ..PieceSnapshot::default()
        }
    }

    /// Net combat damage, which is `power` unless overridden.
    #[inline]
    pub fn combat_damage(&self) -> i32 {
        self.combat_damage.unwrap_or(self.power)
    }

    #[inline]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.has(keyword)
    }

    #[inline]
    pub fn has_rule(&self, fact: RuleFact) -> bool {
        self.rules.contains(&fact)
    }

    #[inline]
    pub fn counter(&self, kind: CounterKind) -> i32 {
        self.counters.signed(kind)
    }

    #[inline]
    pub fn is_untapped(&self) -> bool {
        !self.tapped
    }

    pub fn has_mana_ability(&self) -> bool {
        self.abilities.iter().any(|a| a.class == AbilityClass::Mana)
    }

    pub fn svar(&self, name: &str) -> Option<&str> {
        self.svars.get(name).map(String::as_str)
    }

    pub fn with_mana_value(mut self, mana_value: i32) -> Self {
        self.mana_value = mana_value;
        self
    }

    pub fn with_combat_damage(mut self, damage: i32) -> Self {
        self.combat_damage = Some(damage);
        self
    }

    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keywords.insert(keyword);
        self
    }

    pub fn with_keyword_magnitude(mut self, keyword: Keyword, magnitude: i32) -> Self {
        self.keywords.insert_instance(
            keyword,
            KeywordInstance {
                magnitude,
                amount: 1,
            },
        );
        self
    }

    pub fn with_keyword_amount(mut self, keyword: Keyword, amount: u32) -> Self {
        self.keywords.insert_instance(
            keyword,
            KeywordInstance {
                magnitude: 0,
                amount,
            },
        );
        self
    }

    pub fn with_counter(mut self, kind: CounterKind, count: u32) -> Self {
        self.counters.set(kind, count);
        self
    }

    pub fn with_controller_counter(mut self, kind: CounterKind, count: u32) -> Self {
        self.controller_counters.set(kind, count);
        self
    }

    pub fn with_rule(mut self, fact: RuleFact) -> Self {
        self.rules.insert(fact);
        self
    }

    pub fn with_ability(mut self, ability: GrantedAbility) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn with_svar(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.svars.insert(name.into(), source.into());
        self
    }

    pub fn with_facts(mut self, facts: StaticFacts) -> Self {
        self.facts = facts;
        self
    }

    pub fn as_token(mut self) -> Self {
        self.token = true;
        self
    }

    pub fn as_tapped(mut self) -> Self {
        self.tapped = true;
        self
    }
}
