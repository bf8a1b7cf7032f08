//! Engine state management.
//!
//! Holds the current piece, engine options, and the evaluator that answers
//! `score` and `explain`.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::eval::{Evaluator, LogTrace};
use crate::piece::PieceSnapshot;
use crate::protocol::{decode_piece, format_report, ProtocolError};

const OPT_CONSIDER_PT: &str = "ConsiderPowerToughness";
const OPT_CONSIDER_MANA_VALUE: &str = "ConsiderManaValue";

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub piece: Option<PieceSnapshot>,
    pub options: HashMap<String, String>,
    evaluator: Evaluator,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates a new engine with no piece and default options.
    pub fn new() -> Self {
        Engine {
            piece: None,
            options: HashMap::new(),
            evaluator: Evaluator::new(),
        }
    }

    /// Forgets the current piece. Options are kept.
    pub fn new_piece(&mut self) {
        self.piece = None;
    }

    /// Sets the current piece from a JSON snapshot. On failure the previous
    /// piece is left in place.
    pub fn set_piece(&mut self, json: &str) -> Result<(), ProtocolError> {
        let piece = decode_piece(json)?;
        log::debug!("piece set: {}", piece.name);
        self.piece = Some(piece);
        Ok(())
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Reads a boolean option. A bare `setoption name <id>` turns it on;
    /// unparseable values fall back to the default.
    fn flag(&self, name: &str, default: bool) -> bool {
        match self.options.get(name).map(|v| v.trim().to_ascii_lowercase()) {
            None => default,
            Some(v) => match v.as_str() {
                "" | "true" | "on" | "1" => true,
                "false" | "off" | "0" => false,
                other => {
                    log::warn!("option {}: not a boolean: {}", name, other);
                    default
                }
            },
        }
    }

    /// Whether power/toughness is scored (default true).
    pub fn consider_pt(&self) -> bool {
        self.flag(OPT_CONSIDER_PT, true)
    }

    /// Whether mana value is scored (default true).
    pub fn consider_mana_value(&self) -> bool {
        self.flag(OPT_CONSIDER_MANA_VALUE, true)
    }

    /// Handles the handshake: writes id, options, protocol_version, and appraiseok.
    pub fn handle_appraise<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name appraiser")?;
        writeln!(out, "id author appraiser")?;
        writeln!(
            out,
            "option name {} type check default true",
            OPT_CONSIDER_PT
        )?;
        writeln!(
            out,
            "option name {} type check default true",
            OPT_CONSIDER_MANA_VALUE
        )?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "appraiseok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Reports a protocol error on the output stream.
    pub fn report_error<W: Write>(&self, out: &mut W, err: &ProtocolError) -> io::Result<()> {
        log::warn!("{}", err);
        writeln!(out, "error {}", err)?;
        out.flush()
    }

    /// Handles the `score` command: writes `score <n>` or `error <message>`.
    pub fn handle_score<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let piece = match &self.piece {
            Some(p) => p,
            None => return self.report_error(out, &ProtocolError::MissingPiece),
        };

        let mut trace = LogTrace::new(&piece.name);
        match self.evaluator.score_traced(
            piece,
            self.consider_pt(),
            self.consider_mana_value(),
            &mut trace,
        ) {
            Ok(score) => writeln!(out, "score {}", score)?,
            Err(e) => writeln!(out, "error {}", e)?,
        }
        out.flush()
    }

    /// Handles the `explain` command: one `info` line per contribution,
    /// then `score <n>`.
    pub fn handle_explain<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let piece = match &self.piece {
            Some(p) => p,
            None => return self.report_error(out, &ProtocolError::MissingPiece),
        };

        match self
            .evaluator
            .explain_with(piece, self.consider_pt(), self.consider_mana_value())
        {
            Ok(report) => {
                for line in format_report(&report) {
                    writeln!(out, "{}", line)?;
                }
                writeln!(out, "score {}", report.total())?;
            }
            Err(e) => writeln!(out, "error {}", e)?,
        }
        out.flush()
    }
}
