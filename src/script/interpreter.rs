//! Reference SVar interpreter.
//!
//! Grammar, one expression per SVar:
//!
//! ```text
//! expr    := ['-' | '+'] term ['/' math]
//! term    := integer | svar-name | "Number$" integer | "Count$" property
//! math    := op ['.' operand]          operand := integer | svar-name
//! ```
//!
//! Properties: `CardPower`, `CardToughness`, `CardManaCost`,
//! `CardCounters.<KIND>`, `YourCounters.<KIND>`. Math ops: `Plus`, `Minus`,
//! `NMinus`, `Times`, `Twice`, `Half`/`HalfDown`, `HalfUp`, `Negative`,
//! `Abs`, `DivideEvenlyDown`, `LimitMax`, `LimitMin`.

use crate::eval::ExpressionInterpreter;
use crate::piece::{CounterKind, Counters, PieceSnapshot};

use super::ScriptError;

/// Default bound on SVar indirection, which also stops reference cycles.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Evaluates SVar expressions against a piece snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SvarInterpreter {
    max_depth: usize,
}

impl SvarInterpreter {
    pub fn new() -> Self {
        SvarInterpreter {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        SvarInterpreter { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn resolve(&self, expr: &str, piece: &PieceSnapshot, depth: usize) -> Result<i32, ScriptError> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(ScriptError::Empty);
        }
        if depth > self.max_depth {
            return Err(ScriptError::RecursionLimit(expr.to_string()));
        }

        if let Some(rest) = expr.strip_prefix('-') {
            return self.resolve(rest, piece, depth).map(i32::saturating_neg);
        }
        if let Some(rest) = expr.strip_prefix('+') {
            return self.resolve(rest, piece, depth);
        }

        match expr.split_once('/') {
            Some((head, math)) => {
                let value = self.term(head.trim(), piece, depth)?;
                self.apply_math(value, math.trim(), piece, depth)
            }
            None => self.term(expr, piece, depth),
        }
    }

    fn term(&self, term: &str, piece: &PieceSnapshot, depth: usize) -> Result<i32, ScriptError> {
        if let Ok(n) = term.parse::<i32>() {
            return Ok(n);
        }
        if let Some(number) = term.strip_prefix("Number$") {
            return parse_number(number);
        }
        if let Some(property) = term.strip_prefix("Count$") {
            return count(property, piece);
        }
        if let Some(svar) = piece.svar(term) {
            return self.resolve(svar, piece, depth + 1);
        }
        Err(ScriptError::UnknownReference(term.to_string()))
    }

    fn operand(
        &self,
        operand: Option<&str>,
        math: &str,
        piece: &PieceSnapshot,
        depth: usize,
    ) -> Result<i32, ScriptError> {
        match operand {
            Some(op) if !op.is_empty() => self.term(op, piece, depth + 1),
            _ => Err(ScriptError::UnknownMath(math.to_string())),
        }
    }

    fn apply_math(
        &self,
        value: i32,
        math: &str,
        piece: &PieceSnapshot,
        depth: usize,
    ) -> Result<i32, ScriptError> {
        let (op, operand) = match math.split_once('.') {
            Some((op, rest)) => (op, Some(rest)),
            None => (math, None),
        };

        let result = match op {
            "Twice" => value.saturating_mul(2),
            "Half" | "HalfDown" => value / 2,
            "HalfUp" => value.saturating_add(1) / 2,
            "Negative" => value.saturating_neg(),
            "Abs" => value.saturating_abs(),
            "Plus" => value.saturating_add(self.operand(operand, math, piece, depth)?),
            "Minus" => value.saturating_sub(self.operand(operand, math, piece, depth)?),
            "NMinus" => self.operand(operand, math, piece, depth)?.saturating_sub(value),
            "Times" => value.saturating_mul(self.operand(operand, math, piece, depth)?),
            "DivideEvenlyDown" => {
                let divisor = self.operand(operand, math, piece, depth)?;
                if divisor == 0 {
                    return Err(ScriptError::DivisionByZero(math.to_string()));
                }
                value.saturating_div(divisor)
            }
            "LimitMax" => value.min(self.operand(operand, math, piece, depth)?),
            "LimitMin" => value.max(self.operand(operand, math, piece, depth)?),
            _ => return Err(ScriptError::UnknownMath(math.to_string())),
        };
        Ok(result)
    }
}

impl Default for SvarInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionInterpreter for SvarInterpreter {
    fn evaluate(&self, expression: &str, piece: &PieceSnapshot) -> Result<i32, ScriptError> {
        self.resolve(expression, piece, 0)
    }
}

fn parse_number(s: &str) -> Result<i32, ScriptError> {
    s.trim()
        .parse::<i32>()
        .map_err(|_| ScriptError::InvalidNumber(s.to_string()))
}

fn counter_count(counters: &Counters, kind: &str) -> Result<i32, ScriptError> {
    let kind: CounterKind = kind
        .parse()
        .map_err(|_| ScriptError::UnknownCounter(kind.to_string()))?;
    Ok(counters.signed(kind))
}

fn count(property: &str, piece: &PieceSnapshot) -> Result<i32, ScriptError> {
    match property {
        "CardPower" => Ok(piece.power),
        "CardToughness" => Ok(piece.toughness),
        "CardManaCost" => Ok(piece.mana_value),
        _ => {
            if let Some(kind) = property.strip_prefix("CardCounters.") {
                counter_count(&piece.counters, kind)
            } else if let Some(kind) = property.strip_prefix("YourCounters.") {
                counter_count(&piece.controller_counters, kind)
            } else {
                Err(ScriptError::UnknownProperty(property.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expr: &str, piece: &PieceSnapshot) -> Result<i32, ScriptError> {
        SvarInterpreter::new().evaluate(expr, piece)
    }

    fn piece() -> PieceSnapshot {
        PieceSnapshot::new("Test Creature", 3, 4)
            .with_mana_value(5)
            .with_counter(CounterKind::P1P1, 2)
            .with_controller_counter(CounterKind::Energy, 7)
    }

    #[test]
    fn integer_literals() {
        assert_eq!(eval("25", &piece()), Ok(25));
        assert_eq!(eval(" -10 ", &piece()), Ok(-10));
        assert_eq!(eval("+4", &piece()), Ok(4));
        assert_eq!(eval("Number$12", &piece()), Ok(12));
    }

    #[test]
    fn card_properties() {
        assert_eq!(eval("Count$CardPower", &piece()), Ok(3));
        assert_eq!(eval("Count$CardToughness", &piece()), Ok(4));
        assert_eq!(eval("Count$CardManaCost", &piece()), Ok(5));
        assert_eq!(eval("Count$CardCounters.P1P1", &piece()), Ok(2));
        assert_eq!(eval("Count$CardCounters.SHIELD", &piece()), Ok(0));
        assert_eq!(eval("Count$YourCounters.ENERGY", &piece()), Ok(7));
    }

    #[test]
    fn math_suffixes() {
        let p = piece();
        assert_eq!(eval("Count$CardPower/Plus.2", &p), Ok(5));
        assert_eq!(eval("Count$CardPower/Minus.5", &p), Ok(-2));
        assert_eq!(eval("Count$CardPower/NMinus.5", &p), Ok(2));
        assert_eq!(eval("Count$CardPower/Times.10", &p), Ok(30));
        assert_eq!(eval("Count$CardPower/Twice", &p), Ok(6));
        assert_eq!(eval("Count$CardPower/HalfUp", &p), Ok(2));
        assert_eq!(eval("Count$CardPower/HalfDown", &p), Ok(1));
        assert_eq!(eval("Count$CardPower/Negative", &p), Ok(-3));
        assert_eq!(eval("Count$YourCounters.ENERGY/DivideEvenlyDown.3", &p), Ok(2));
        assert_eq!(eval("Count$CardManaCost/LimitMax.4", &p), Ok(4));
        assert_eq!(eval("Count$CardManaCost/LimitMin.8", &p), Ok(8));
        assert_eq!(eval("-Count$CardPower/Times.2", &p), Ok(-6));
    }

    #[test]
    fn svar_indirection() {
        let p = piece()
            .with_svar("X", "Count$CardCounters.P1P1/Times.Y")
            .with_svar("Y", "15");
        assert_eq!(eval("X", &p), Ok(30));
        assert_eq!(eval("Number$1/Plus.X", &p), Ok(31));
    }

    #[test]
    fn reference_cycle_hits_depth_limit() {
        let p = piece().with_svar("A", "B").with_svar("B", "A");
        assert!(matches!(eval("A", &p), Err(ScriptError::RecursionLimit(_))));
    }

    #[test]
    fn malformed_expressions() {
        let p = piece();
        assert_eq!(eval("", &p), Err(ScriptError::Empty));
        assert_eq!(
            eval("Number$abc", &p),
            Err(ScriptError::InvalidNumber("abc".to_string()))
        );
        assert_eq!(
            eval("Count$Whatever", &p),
            Err(ScriptError::UnknownProperty("Whatever".to_string()))
        );
        assert_eq!(
            eval("Count$CardCounters.BRICK", &p),
            Err(ScriptError::UnknownCounter("BRICK".to_string()))
        );
        assert_eq!(
            eval("Count$CardPower/Cube", &p),
            Err(ScriptError::UnknownMath("Cube".to_string()))
        );
        assert_eq!(
            eval("Count$CardPower/Plus", &p),
            Err(ScriptError::UnknownMath("Plus".to_string()))
        );
        assert_eq!(
            eval("Count$CardPower/DivideEvenlyDown.0", &p),
            Err(ScriptError::DivisionByZero("DivideEvenlyDown.0".to_string()))
        );
        assert_eq!(
            eval("Missing", &p),
            Err(ScriptError::UnknownReference("Missing".to_string()))
        );
    }

    #[test]
    fn depth_limit_is_configurable() {
        let p = piece().with_svar("A", "B").with_svar("B", "4");
        assert_eq!(SvarInterpreter::with_max_depth(2).evaluate("A", &p), Ok(4));
        assert!(matches!(
            SvarInterpreter::with_max_depth(1).evaluate("A", &p),
            Err(ScriptError::RecursionLimit(_))
        ));
    }
}
