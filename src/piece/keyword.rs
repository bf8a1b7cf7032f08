//! Keyword vocabulary and per-piece keyword sets.
//!
//! Each keyword a piece carries has an optional magnitude (a single stacking
//! value such as toxic N) and an amount (the number of independent instances,
//! such as flanking granted twice).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named rules keyword understood by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    // Evasion
    Flying,
    Horsemanship,
    Fear,
    Intimidate,
    Menace,
    Skulk,
    Shadow,

    // Combat
    DoubleStrike,
    FirstStrike,
    Deathtouch,
    Lifelink,
    Trample,
    Vigilance,
    Haste,
    Infect,
    Wither,
    Toxic,
    Afflict,
    Rampage,
    Annihilator,
    Absorb,
    Outlast,
    Bushido,
    Flanking,
    Exalted,
    Melee,
    Prowess,

    // Defensive
    Reach,
    Indestructible,
    Hexproof,
    Shroud,
    Ward,
    Protection,

    // Drawbacks
    Defender,
    CumulativeUpkeep,
    Echo,
    Fading,
    Vanishing,
    Phasing,

    // Transform
    Daybound,
}

/// One keyword entry on a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordInstance {
    #[serde(default)]
    pub magnitude: i32,
    #[serde(default = "one")]
    pub amount: u32,
}

fn one() -> u32 {
    1
}

impl Default for KeywordInstance {
    fn default() -> Self {
        KeywordInstance {
            magnitude: 0,
            amount: 1,
        }
    }
}

/// The keywords a piece currently has.
///
/// Absent keywords read as zero magnitude and zero amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet {
    entries: BTreeMap<Keyword, KeywordInstance>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a keyword with no magnitude and a single instance.
    pub fn insert(&mut self, keyword: Keyword) {
        self.entries.insert(keyword, KeywordInstance::default());
    }

    /// Adds or replaces a keyword entry.
    pub fn insert_instance(&mut self, keyword: Keyword, instance: KeywordInstance) {
        self.entries.insert(keyword, instance);
    }

    pub fn remove(&mut self, keyword: Keyword) {
        self.entries.remove(&keyword);
    }

    #[inline]
    pub fn has(&self, keyword: Keyword) -> bool {
        self.entries.contains_key(&keyword)
    }

    #[inline]
    pub fn magnitude(&self, keyword: Keyword) -> i32 {
        self.entries.get(&keyword).map_or(0, |k| k.magnitude)
    }

    #[inline]
    pub fn amount(&self, keyword: Keyword) -> i32 {
        self.entries
            .get(&keyword)
            .map_or(0, |k| i32::try_from(k.amount).unwrap_or(i32::MAX))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Keyword, KeywordInstance)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<Keyword> for KeywordSet {
    fn from_iter<T: IntoIterator<Item = Keyword>>(iter: T) -> Self {
        let mut set = KeywordSet::new();
        for k in iter {
            set.insert(k);
        }
        set
    }
}
