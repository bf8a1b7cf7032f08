//! Piece snapshot types.
//!
//! Contains the data model for one creature as seen by the evaluator:
//! keywords, counters, granted abilities, rule facts, and custom SVars.

pub mod ability;
pub mod counter;
pub mod keyword;
pub mod snapshot;

pub use ability::{AbilityApi, AbilityClass, CostPart, Defined, GrantedAbility, PumpAmount, PumpSpec};
pub use counter::{CounterKind, Counters, UnknownCounterKind};
pub use keyword::{Keyword, KeywordInstance, KeywordSet};
pub use snapshot::{MustAttack, PieceSnapshot, RuleFact, StaticFacts};
