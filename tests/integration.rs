//! Integration tests for the appraiser binary.
//!
//! Tests the full protocol session flow by spawning the engine process,
//! sending commands via stdin, and verifying stdout responses.

use std::io::Write;
use std::process::{Command, Stdio};

/// Feeds one protocol session to a fresh appraiser process and returns
/// everything it printed, line by line. Closing stdin ends the session.
fn session(commands: &[&str]) -> Vec<String> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_appraiser"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("appraiser should start");

    let mut script = commands.join("\n");
    script.push('\n');
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(script.as_bytes())
        .expect("appraiser should accept input");

    let output = child.wait_with_output().expect("appraiser should exit");
    assert!(output.status.success(), "exit status: {}", output.status);
    String::from_utf8(output.stdout)
        .expect("protocol output is UTF-8")
        .lines()
        .map(str::to_owned)
        .collect()
}

/// A tapped vanilla 2/2 for 2.
const BEARS: &str =
    r#"piece {"name":"Grizzly Bears","power":2,"toughness":2,"mana_value":2,"tapped":true}"#;

/// A 4/4 flier with vigilance that dies when targeted.
const ANGEL: &str = r#"piece {"name":"Angel","power":4,"toughness":4,"mana_value":5,"tapped":true,"keywords":{"flying":{},"vigilance":{}},"rules":["dies_when_targeted"]}"#;

#[test]
fn appraise_handshake_with_protocol_version() {
    let lines = session(&["appraise", "quit"]);

    assert!(lines.iter().any(|l| l == "id name appraiser"));
    assert!(lines.iter().any(|l| l == "id author appraiser"));
    assert!(lines.iter().any(|l| l == "protocol_version 1"));

    // appraiseok must be the last line of the handshake
    let ok_idx = lines.iter().position(|l| l == "appraiseok").unwrap();
    let proto_idx = lines.iter().position(|l| l == "protocol_version 1").unwrap();
    assert!(proto_idx < ok_idx, "protocol_version must appear before appraiseok");
    assert_eq!(ok_idx, lines.len() - 1);
}

#[test]
fn appraise_handshake_includes_options() {
    let lines = session(&["appraise", "quit"]);

    let option_lines: Vec<&String> = lines.iter().filter(|l| l.starts_with("option ")).collect();
    assert_eq!(option_lines.len(), 2);
    for opt in &option_lines {
        assert!(opt.contains("type "), "option line missing type: {}", opt);
    }
}

#[test]
fn isready_response() {
    let lines = session(&["isready", "quit"]);
    assert!(lines.contains(&"readyok".to_string()));
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = session(&["foobar", "nonsense", "quit"]);
    assert!(lines.is_empty());
}

#[test]
fn empty_lines_are_ignored() {
    let lines = session(&["", "  ", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn commands_after_quit_are_not_processed() {
    let lines = session(&["quit", "isready"]);
    assert!(lines.is_empty());
}

#[test]
fn piece_then_score() {
    let lines = session(&[BEARS, "score", "quit"]);
    assert_eq!(lines, vec!["score 160".to_string()]);
}

#[test]
fn score_without_piece_reports_error() {
    let lines = session(&["score", "isready", "quit"]);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("error "), "{}", lines[0]);
    assert_eq!(lines[1], "readyok");
}

#[test]
fn bad_piece_reports_error_and_keeps_running() {
    let lines = session(&["piece {oops", BEARS, "score", "quit"]);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("error "), "{}", lines[0]);
    assert_eq!(lines[1], "score 160");
}

#[test]
fn newpiece_clears_piece() {
    let lines = session(&[BEARS, "score", "newpiece", "score", "quit"]);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "score 160");
    assert!(lines[1].starts_with("error "));
}

#[test]
fn setoption_omits_stages() {
    let lines = session(&[
        "setoption name ConsiderPowerToughness value false",
        BEARS,
        "score",
        "setoption name ConsiderManaValue value false",
        "score",
        "setoption name ConsiderPowerToughness value true",
        "score",
        "quit",
    ]);
    assert_eq!(
        lines,
        vec![
            "score 110".to_string(),
            "score 100".to_string(),
            "score 150".to_string(),
        ]
    );
}

#[test]
fn explain_matches_score() {
    let lines = session(&[ANGEL, "score", "explain", "quit"]);

    let score = lines[0].clone();
    assert!(score.starts_with("score "));
    assert_eq!(lines.last(), Some(&score));

    let info: Vec<&String> = lines[1..lines.len() - 1].iter().collect();
    assert!(info.iter().all(|l| l.starts_with("info ")));
    assert!(info.iter().any(|l| *l == "info evasion flying 40"));
    assert!(info.iter().any(|l| l.starts_with("info penalty dies ")));

    let sum: i32 = info
        .iter()
        .map(|l| l.rsplit(' ').next().unwrap().parse::<i32>().unwrap())
        .sum();
    let total: i32 = score.strip_prefix("score ").unwrap().parse().unwrap();
    assert_eq!(80 + sum, total);
}

#[test]
fn extreme_snapshot_scores_at_the_ceiling() {
    let pummeler = r#"piece {"name":"Pummeler","power":1,"toughness":1,"abilities":[{"api":"pump","pump":{"attack":"x","defense":"x"},"cost":[{"energy":1}]}],"controller_counters":{"energy":64}}"#;
    let lines = session(&[
        pummeler,
        "score",
        r#"piece {"name":"Giant","power":200000000,"toughness":1}"#,
        "score",
        "isready",
        "quit",
    ]);
    let ceiling = format!("score {}", i32::MAX);
    assert_eq!(lines, vec![ceiling.clone(), ceiling, "readyok".to_string()]);
}

#[test]
fn explain_lists_zero_contributions_of_called_stages() {
    let lines = session(&[
        r#"piece {"name":"Nothing","power":0,"toughness":0,"tapped":true}"#,
        "explain",
        "setoption name ConsiderPowerToughness value false",
        "explain",
        "quit",
    ]);
    let split = lines.iter().position(|l| l.starts_with("score ")).unwrap();
    let (with_pt, without_pt) = lines.split_at(split + 1);
    assert!(with_pt.iter().any(|l| l == "info pt power 0"));
    assert!(without_pt.iter().all(|l| !l.starts_with("info pt ")));
    assert_eq!(with_pt.last(), without_pt.last());
}
