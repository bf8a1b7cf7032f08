//! Granted abilities and the metadata the evaluator reads from them.

use serde::{Deserialize, Serialize};

/// Whether an entry is a castable spell or an ability of the permanent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityClass {
    Spell,
    #[default]
    Activated,
    Mana,
}

impl AbilityClass {
    /// Spells are cast from hand; everything else is an ability of the piece.
    #[inline]
    pub const fn is_ability(self) -> bool {
        !matches!(self, AbilityClass::Spell)
    }
}

/// What the ability does, as far as the evaluator distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityApi {
    Pump,
    #[default]
    Other,
}

/// A power or toughness modification amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PumpAmount {
    Fixed(i32),
    /// `+X`, where X is chosen on activation.
    X,
}

/// The `+A/+D` a pump ability grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PumpSpec {
    pub attack: PumpAmount,
    pub defense: PumpAmount,
}

impl PumpSpec {
    #[inline]
    pub fn is_plus_x_plus_x(&self) -> bool {
        self.attack == PumpAmount::X && self.defense == PumpAmount::X
    }
}

/// Which object an untargeted ability affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Defined {
    #[default]
    SelfOnly,
    Other,
}

/// One component of an ability's activation cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostPart {
    Mana(u32),
    Tap,
    Energy(u32),
    RemoveCounters,
    Sacrifice,
    Other,
}

/// An ability the piece currently has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrantedAbility {
    pub class: AbilityClass,
    pub api: AbilityApi,
    pub pump: Option<PumpSpec>,
    pub uses_targeting: bool,
    pub defined: Defined,
    pub cost: Vec<CostPart>,
}

impl GrantedAbility {
    /// A generic activated ability with no recognised shape.
    pub fn activated() -> Self {
        GrantedAbility::default()
    }

    /// A mana ability (a "mana dork" tap ability).
    pub fn mana() -> Self {
        GrantedAbility {
            class: AbilityClass::Mana,
            cost: vec![CostPart::Tap],
            ..GrantedAbility::default()
        }
    }

    pub fn spell() -> Self {
        GrantedAbility {
            class: AbilityClass::Spell,
            ..GrantedAbility::default()
        }
    }

    /// An untargeted `+X/+X` self pump with the given cost.
    pub fn self_pump_x(cost: Vec<CostPart>) -> Self {
        GrantedAbility {
            class: AbilityClass::Activated,
            api: AbilityApi::Pump,
            pump: Some(PumpSpec {
                attack: PumpAmount::X,
                defense: PumpAmount::X,
            }),
            uses_targeting: false,
            defined: Defined::SelfOnly,
            cost,
        }
    }

    /// True if the cost is non-empty and every part of it is energy.
    pub fn costs_only_energy(&self) -> bool {
        !self.cost.is_empty() && self.cost.iter().all(|c| matches!(c, CostPart::Energy(_)))
    }

    /// Total energy paid per activation.
    pub fn energy_cost(&self) -> u32 {
        self.cost
            .iter()
            .map(|c| match c {
                CostPart::Energy(n) => *n,
                _ => 0,
            })
            .sum()
    }
}
