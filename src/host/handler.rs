//! Host command handler and main loop.

use super::parser::{parse_command, HostCommand};
use super::{HostConfig, Mode, Rules, HOST_NAME, MAX_THINK_TIME_MS};
use crate::opponent::RandomPolicy;
use crate::oracle::Oracle;
use crate::session::{Selection, Session, Snapshot, Transition};
use crate::types::{Color, Kind, Move, Square};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

/// Host protocol handler
pub struct Host<W: Write = io::Stdout> {
    /// Current game
    session: Session<Box<dyn Oracle>>,
    /// Active settings
    config: HostConfig,
    /// Move picker for the bot
    policy: RandomPolicy,
    /// Debug mode enabled
    debug: bool,
    /// Should the host quit
    quit: bool,
    /// Where snapshots go
    out: W,
}

impl Default for Host {
    fn default() -> Self {
        Self::new(HostConfig::default())
    }
}

impl Host {
    pub fn new(config: HostConfig) -> Self {
        Self::with_output(config, io::stdout())
    }
}

impl<W: Write> Host<W> {
    pub fn with_output(config: HostConfig, out: W) -> Self {
        let policy = policy_for(config.seed);
        Self {
            session: config.rules.session(),
            config,
            policy,
            debug: false,
            quit: false,
            out,
        }
    }

    pub fn session(&self) -> &Session<Box<dyn Oracle>> {
        &self.session
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run the main loop until "quit" or end of input (blocking)
    pub fn run(&mut self) {
        let stdin = io::stdin();
        let reader = stdin.lock();

        self.start();
        for line in reader.lines() {
            match line {
                Ok(input) => {
                    if self.debug {
                        eprintln!("< {}", input);
                    }
                    self.handle_input(&input);
                    if self.quit {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    }

    /// Greet, show the opening snapshot, and let the bot open if it plays light
    pub fn start(&mut self) {
        self.send(&format!("{} ready", HOST_NAME));
        self.send_snapshot();
        self.bot_reply();
    }

    /// Handle a single command line
    pub fn handle_input(&mut self, input: &str) {
        let cmd = parse_command(input);
        self.handle_command(cmd);
    }

    fn handle_command(&mut self, cmd: HostCommand) {
        match cmd {
            HostCommand::Click(sq) => self.cmd_click(&sq),
            HostCommand::Move(m) => self.cmd_move(&m),
            HostCommand::Bot => self.cmd_bot(),
            HostCommand::NewGame => self.cmd_newgame(),
            HostCommand::Display => self.send_snapshot(),
            HostCommand::History => self.cmd_history(),
            HostCommand::Options => self.cmd_options(),
            HostCommand::SetOption { name, value } => self.cmd_setoption(&name, value.as_deref()),
            HostCommand::Debug(on) => self.debug = on,
            HostCommand::Quit => self.quit = true,
            HostCommand::Empty => {}
            HostCommand::Unknown(s) => {
                eprintln!("info string unknown command: {}", s);
            }
        }
    }

    /// Send a line to the front end
    fn send(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
        self.out.flush().ok();
    }

    fn log(&self, msg: &str) {
        if self.debug {
            eprintln!("info string {}", msg);
        }
    }

    // === Commands ===

    fn cmd_click(&mut self, text: &str) {
        let Ok(sq) = text.parse::<Square>() else {
            eprintln!("info string invalid square: {}", text);
            return;
        };
        self.click(sq);
        self.send_snapshot();
        self.bot_reply();
    }

    fn cmd_move(&mut self, text: &str) {
        let Ok(m) = text.parse::<Move>() else {
            eprintln!("info string invalid move: {}", text);
            return;
        };
        // A stale selection would turn the first click into a move attempt
        if let Selection::Selected(sq) = self.session.selection() {
            self.click(sq);
        }
        if self.click(m.from).changed() {
            self.click(m.to);
        }
        self.send_snapshot();
        self.bot_reply();
    }

    fn cmd_bot(&mut self) {
        let side = self.session.active_color();
        let t = self.session.opponent_move(side, &mut self.policy);
        self.log(&format!("bot {}: {:?}", side, t));
        self.send_snapshot();
    }

    fn cmd_newgame(&mut self) {
        self.session.reset();
        self.log("new game");
        self.send_snapshot();
        self.bot_reply();
    }

    fn cmd_history(&mut self) {
        let lines: Vec<String> = self
            .session
            .plies()
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| {
                let moves: Vec<String> = pair.iter().map(Move::to_string).collect();
                format!("{}. {}", i + 1, moves.join(" "))
            })
            .collect();
        for line in lines {
            self.send(&line);
        }
        self.send("historyok");
    }

    fn cmd_options(&mut self) {
        let seed = self.config.seed.map(|s| s.to_string()).unwrap_or_default();
        self.send(&format!(
            "option name Mode type combo default {} var friend var bot",
            self.config.mode
        ));
        self.send(&format!(
            "option name Rules type combo default {} var strict var none",
            self.config.rules
        ));
        self.send(&format!(
            "option name ThinkTime type spin default {} min 0 max {}",
            self.config.think_time_ms, MAX_THINK_TIME_MS
        ));
        self.send(&format!("option name Seed type string default {}", seed));
        self.send("optionsok");
    }

    fn cmd_setoption(&mut self, name: &str, value: Option<&str>) {
        match name {
            "mode" => match value.and_then(Mode::parse) {
                Some(mode) => {
                    self.config.mode = mode;
                    self.cmd_newgame();
                }
                None => eprintln!("info string bad Mode value: {:?}", value),
            },
            "rules" => match value.and_then(Rules::parse) {
                Some(rules) => {
                    self.config.rules = rules;
                    self.session = rules.session();
                    self.log(&format!("rules {}", rules));
                    self.send_snapshot();
                    self.bot_reply();
                }
                None => eprintln!("info string bad Rules value: {:?}", value),
            },
            "thinktime" => {
                if let Some(ms) = value.and_then(|v| v.parse::<u64>().ok()) {
                    self.config.think_time_ms = ms.min(MAX_THINK_TIME_MS);
                }
            }
            "seed" => {
                self.config.seed = value.and_then(|v| v.parse().ok());
                self.policy = policy_for(self.config.seed);
            }
            _ => {
                eprintln!("info string unknown option: {}", name);
            }
        }
    }

    fn click(&mut self, sq: Square) -> Transition {
        // The bot's side is not clickable in bot mode
        if self.bot_to_move() {
            self.log(&format!("click {}: bot to move", sq));
            return Transition::Ignored;
        }
        let t = self.session.click(sq);
        self.log(&format!("click {}: {:?}", sq, t));
        t
    }

    fn bot_to_move(&self) -> bool {
        self.config.mode == Mode::Bot
            && self.session.active_color() == self.config.bot_color
            && !self.session.status().is_over()
    }

    /// In bot mode, think and answer if the bot is to move
    fn bot_reply(&mut self) {
        if !self.bot_to_move() {
            return;
        }
        if self.config.think_time_ms > 0 {
            thread::sleep(Duration::from_millis(self.config.think_time_ms));
        }
        // Checked again by the session: a reset may have raced us
        let t = self.session.opponent_move(self.config.bot_color, &mut self.policy);
        self.log(&format!("bot {}: {:?}", self.config.bot_color, t));
        if t.changed() {
            self.send_snapshot();
        }
    }

    fn send_snapshot(&mut self) {
        let snap = self.session.snapshot();
        for line in render(&snap) {
            self.send(&line);
        }
    }
}

fn policy_for(seed: Option<u64>) -> RandomPolicy {
    match seed {
        Some(s) => RandomPolicy::seeded(s),
        None => RandomPolicy::new(),
    }
}

fn lost_line(kinds: &[Kind]) -> String {
    let letters: Vec<String> = kinds
        .iter()
        .map(|k| k.to_char().to_ascii_uppercase().to_string())
        .collect();
    letters.join(" ")
}

fn side_name(color: Color) -> &'static str {
    match color {
        Color::Light => "white",
        Color::Dark => "black",
    }
}

/// Text form of a snapshot
fn render(snap: &Snapshot) -> Vec<String> {
    let mut lines: Vec<String> = snap.board.to_string().lines().map(str::to_string).collect();
    let selected = match snap.selection {
        Selection::Idle => "none".to_string(),
        Selection::Selected(sq) => sq.to_string(),
    };
    lines.push(format!("selected {}", selected));
    lines.push(format!("turn {}", side_name(snap.active)));
    lines.push(format!("status {}", snap.status));
    lines.push(format!("white lost: {}", lost_line(&snap.lost.light)).trim_end().to_string());
    lines.push(format!("black lost: {}", lost_line(&snap.lost.dark)).trim_end().to_string());
    lines
}
