//! Appraisal protocol command parser.
//!
//! Parses incoming protocol commands from raw text into structured
//! `Command` variants that the main loop can dispatch on.

/// A parsed host-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the protocol handshake.
    Appraise,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Forget the current piece.
    NewPiece,

    /// Set the current piece from a JSON snapshot.
    Piece { json: String },

    /// Score the current piece.
    Score,

    /// Score the current piece and report every contribution.
    Explain,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "appraise" => Some(Command::Appraise),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newpiece" => Some(Command::NewPiece),
        "score" => Some(Command::Score),
        "explain" => Some(Command::Explain),

        "setoption" => parse_setoption(&tokens),
        "piece" => parse_piece(&tokens, trimmed),

        other => {
            log::warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    // Minimum: setoption name <id>
    if tokens.len() < 3 || tokens[1] != "name" {
        log::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                log::warn!("malformed setoption: empty name");
                return None;
            }
            let name = name_parts.join(" ");
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name, value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `piece <json>` -- captures everything after "piece" as raw text,
/// since the JSON may contain spaces.
fn parse_piece(tokens: &[&str], full_line: &str) -> Option<Command> {
    if tokens.len() < 2 {
        log::warn!("malformed piece: expected 'piece <json>'");
        return None;
    }
    let json = full_line
        .strip_prefix("piece")
        .unwrap_or("")
        .trim()
        .to_string();
    Some(Command::Piece { json })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_appraise_command() {
        assert_eq!(parse_command("appraise"), Some(Command::Appraise));
    }

    #[test]
    fn parse_isready_command() {
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
    }

    #[test]
    fn parse_quit_command() {
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn parse_newpiece_command() {
        assert_eq!(parse_command("newpiece"), Some(Command::NewPiece));
    }

    #[test]
    fn parse_score_and_explain() {
        assert_eq!(parse_command("score"), Some(Command::Score));
        assert_eq!(parse_command("explain"), Some(Command::Explain));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        let cmd = parse_command("setoption name ConsiderManaValue value false").unwrap();
        assert_eq!(
            cmd,
            Command::SetOption {
                name: "ConsiderManaValue".to_string(),
                value: Some("false".to_string()),
            }
        );
    }

    #[test]
    fn parse_setoption_no_value() {
        let cmd = parse_command("setoption name ConsiderPowerToughness").unwrap();
        assert_eq!(
            cmd,
            Command::SetOption {
                name: "ConsiderPowerToughness".to_string(),
                value: None,
            }
        );
    }

    #[test]
    fn parse_setoption_malformed_returns_none() {
        assert_eq!(parse_command("setoption"), None);
        assert_eq!(parse_command("setoption foo"), None);
        assert_eq!(parse_command("setoption name value 3"), None);
    }

    #[test]
    fn parse_piece_keeps_spaces() {
        let json = r#"{"name": "Grizzly Bears", "power": 2}"#;
        let cmd = parse_command(&format!("piece {}", json)).unwrap();
        assert_eq!(
            cmd,
            Command::Piece {
                json: json.to_string(),
            }
        );
    }

    #[test]
    fn parse_piece_malformed_returns_none() {
        assert_eq!(parse_command("piece"), None);
    }

    #[test]
    fn parse_with_leading_trailing_whitespace() {
        assert_eq!(parse_command("  appraise  "), Some(Command::Appraise));
        assert_eq!(parse_command("  score  "), Some(Command::Score));
    }
}
