//! Appraiser creature evaluation library.
//!
//! Exposes the piece snapshot model, the evaluator, the SVar expression
//! interpreter, and protocol modules for use by integration tests and the
//! binary entry point.

pub mod engine;
pub mod eval;
pub mod piece;
pub mod protocol;
pub mod script;
