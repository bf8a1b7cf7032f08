//! Appraisal protocol handling.
//!
//! This module implements the line protocol a host uses to drive the
//! evaluator: the command parser for the main loop and the JSON encoding
//! of piece snapshots and score breakdowns.

pub mod parser;
pub mod snapshot;

pub use parser::{parse_command, Command};
pub use snapshot::{decode_piece, encode_piece, format_report, ProtocolError};
