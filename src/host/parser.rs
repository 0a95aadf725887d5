//! Host command parser.

use crate::types::Square;

/// Parsed host command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// "click e2" or a bare square "e2"
    Click(String),
    /// "move e2e4" - two clicks
    Move(String),
    /// "bot" - let the bot move for the side to move
    Bot,
    /// "new" / "reset" - start over
    NewGame,
    /// "d" / "show" - print the current snapshot
    Display,
    /// "history" - committed plies
    History,
    /// "options" - list settings
    Options,
    /// "setoption name X value Y"; the name is lowercased without spaces
    SetOption { name: String, value: Option<String> },
    /// "debug on/off"
    Debug(bool),
    /// "quit"
    Quit,
    /// Blank line
    Empty,
    /// Unknown command
    Unknown(String),
}

/// Parse a command line into a HostCommand
pub fn parse_command(input: &str) -> HostCommand {
    let input = input.trim();
    let mut parts = input.split_whitespace();

    match parts.next() {
        None => HostCommand::Empty,
        Some("click") => match parts.next() {
            Some(sq) => HostCommand::Click(sq.to_string()),
            None => HostCommand::Unknown(input.to_string()),
        },
        Some("move") => match parts.next() {
            Some(m) => HostCommand::Move(m.to_string()),
            None => HostCommand::Unknown(input.to_string()),
        },
        Some("bot") => HostCommand::Bot,
        Some("new") | Some("reset") => HostCommand::NewGame,
        Some("d") | Some("show") => HostCommand::Display,
        Some("history") => HostCommand::History,
        Some("options") => HostCommand::Options,
        Some("setoption") => parse_setoption(parts),
        Some("debug") => {
            let on = parts.next() == Some("on");
            HostCommand::Debug(on)
        }
        Some("quit") => HostCommand::Quit,
        Some(token) if token.parse::<Square>().is_ok() => HostCommand::Click(token.to_string()),
        _ => HostCommand::Unknown(input.to_string()),
    }
}

/// "setoption name <key> [value <v>]". Keys are case-insensitive and may
/// be written with spaces ("Think Time"), so the name comes back lowercased
/// with the spaces removed.
fn parse_setoption<'a>(parts: impl Iterator<Item = &'a str>) -> HostCommand {
    let tokens: Vec<&str> = parts.skip_while(|&t| t != "name").skip(1).collect();
    let (name_tokens, value_tokens) = match tokens.iter().position(|&t| t == "value") {
        Some(at) => (&tokens[..at], Some(&tokens[at + 1..])),
        None => (&tokens[..], None),
    };
    let name = name_tokens.concat().to_lowercase();
    let value = value_tokens.map(|v| v.join(" "));
    HostCommand::SetOption { name, value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clicks() {
        assert_eq!(parse_command("click e2"), HostCommand::Click("e2".into()));
        assert_eq!(parse_command("  e4 "), HostCommand::Click("e4".into()));
        assert_eq!(parse_command("move e2e4"), HostCommand::Move("e2e4".into()));
        assert_eq!(parse_command("click"), HostCommand::Unknown("click".into()));
    }

    #[test]
    fn test_setoption() {
        assert_eq!(
            parse_command("setoption name Think Time value 250"),
            HostCommand::SetOption { name: "thinktime".into(), value: Some("250".into()) }
        );
        assert_eq!(
            parse_command("setoption name ThinkTime value 250"),
            parse_command("setoption name think time value 250")
        );
        assert_eq!(
            parse_command("setoption name Seed"),
            HostCommand::SetOption { name: "seed".into(), value: None }
        );
        assert_eq!(
            parse_command("setoption name Seed value"),
            HostCommand::SetOption { name: "seed".into(), value: Some(String::new()) }
        );
    }

    #[test]
    fn test_misc() {
        assert_eq!(parse_command(""), HostCommand::Empty);
        assert_eq!(parse_command("reset"), HostCommand::NewGame);
        assert_eq!(parse_command("debug on"), HostCommand::Debug(true));
        assert_eq!(parse_command("debug"), HostCommand::Debug(false));
        assert_eq!(parse_command("z9"), HostCommand::Unknown("z9".into()));
    }
}
