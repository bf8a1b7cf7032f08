//! Appraiser -- a creature evaluator speaking a line protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Logs go to stderr at the level named by `APPRAISER_LOG` (default `warn`).

use std::io::{self, BufRead};

use log::LevelFilter;

use appraiser::engine::Engine;
use appraiser::protocol::parser::{parse_command, Command};

const LOG_ENV: &str = "APPRAISER_LOG";

fn log_level() -> LevelFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() -> io::Result<()> {
    simple_logging::log_to_stderr(log_level());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Appraise => engine.handle_appraise(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewPiece => engine.new_piece(),
            Command::Piece { json } => {
                if let Err(e) = engine.set_piece(&json) {
                    engine.report_error(&mut out, &e)?;
                }
            }
            Command::Score => engine.handle_score(&mut out)?,
            Command::Explain => engine.handle_explain(&mut out)?,
            Command::Quit => break,
        }
    }
    Ok(())
}
