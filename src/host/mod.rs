//! Line-oriented host protocol.
//!
//! A small text front end over [`crate::session::Session`], in the spirit of
//! a UCI loop: one command per line on stdin, a snapshot on stdout after
//! every processed event, diagnostics as `info string` lines on stderr.

mod parser;
mod handler;

pub use handler::Host;
pub use parser::{parse_command, HostCommand};

use crate::oracle::{NullOracle, Oracle, RulesOracle};
use crate::session::Session;
use crate::types::Color;
use std::fmt;

/// Program identification
pub const HOST_NAME: &str = "clickchess";

/// Upper bound for the bot's think time (ms)
pub const MAX_THINK_TIME_MS: u64 = 5000;

/// Who plays the second side.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Mode {
    /// Both sides are driven by clicks
    #[default]
    Friend,
    /// The bot answers for `bot_color`
    Bot,
}

impl Mode {
    pub fn parse(s: &str) -> Option<Mode> {
        match s.to_lowercase().as_str() {
            "friend" => Some(Mode::Friend),
            "bot" => Some(Mode::Bot),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Friend => write!(f, "friend"),
            Mode::Bot => write!(f, "bot"),
        }
    }
}

/// Which oracle validates moves.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Rules {
    #[default]
    Strict,
    /// No validation at all
    None,
}

impl Rules {
    pub fn parse(s: &str) -> Option<Rules> {
        match s.to_lowercase().as_str() {
            "strict" => Some(Rules::Strict),
            "none" => Some(Rules::None),
            _ => None,
        }
    }

    /// Fresh session validated by this rule set
    pub fn session(self) -> Session<Box<dyn Oracle>> {
        match self {
            Rules::Strict => Session::new(Box::new(RulesOracle::new()) as Box<dyn Oracle>),
            Rules::None => Session::new(Box::new(NullOracle) as Box<dyn Oracle>),
        }
    }
}

impl fmt::Display for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rules::Strict => write!(f, "strict"),
            Rules::None => write!(f, "none"),
        }
    }
}

/// Host settings, changed at runtime with `setoption`.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub mode: Mode,
    pub rules: Rules,
    /// Delay before the bot moves (ms)
    pub think_time_ms: u64,
    /// Seed for the bot; entropy when unset
    pub seed: Option<u64>,
    /// Side the bot plays in bot mode
    pub bot_color: Color,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Friend,
            rules: Rules::Strict,
            think_time_ms: 500,
            seed: None,
            bot_color: Color::Dark,
        }
    }
}

impl HostConfig {
    /// Bot game with no think time, for scripted runs
    pub fn instant_bot(seed: u64) -> Self {
        Self {
            mode: Mode::Bot,
            think_time_ms: 0,
            seed: Some(seed),
            ..Default::default()
        }
    }
}
