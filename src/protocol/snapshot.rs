//! Piece snapshot wire encoding.
//!
//! Snapshots travel as single-line JSON objects following the `piece`
//! command. Score breakdowns go back as one `info` line per contribution.

use thiserror::Error;

use crate::eval::TraceReport;
use crate::piece::PieceSnapshot;

/// Errors raised while serving protocol commands.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("empty snapshot")]
    Empty,

    #[error("no piece set")]
    MissingPiece,

    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses a JSON snapshot.
pub fn decode_piece(s: &str) -> Result<PieceSnapshot, ProtocolError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ProtocolError::Empty);
    }
    Ok(serde_json::from_str(s)?)
}

/// Encodes a snapshot as single-line JSON.
pub fn encode_piece(piece: &PieceSnapshot) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(piece)?)
}

/// Formats a breakdown as `info <stage> <label> <delta>` lines, in
/// evaluation order.
pub fn format_report(report: &TraceReport) -> Vec<String> {
    report
        .entries()
        .iter()
        .map(|e| format!("info {} {} {}", e.stage, e.label, e.delta))
        .collect()
}
