//! Headless driver - text commands in, JSON lines out
//!
//! Stands in for a presentation layer: every command read from the input
//! produces exactly one JSON object on its own output line.
//!
//! # Commands
//!
//! - `swap x1 y1 x2 y2`: request a swap of two cells
//! - `new`: start the next game
//! - `snapshot`: print the current board and counters
//! - `moves`: report whether any legal swap exists
//! - `quit`: stop reading input
//!
//! Blank lines and lines starting with `#` are ignored.
//!
//! # Environment Variables
//!
//! - `VEGGIE_WIDTH`, `VEGGIE_HEIGHT`: board size (default: 8x8)
//! - `VEGGIE_KINDS`: number of tile kinds (default: 7)
//! - `VEGGIE_MAX_MOVES`: committed swaps per game (default: 100)
//! - `VEGGIE_SEED`: fixed seed for a reproducible session
//! - `VEGGIE_LOG_PREFIX`: tag added to stderr log lines

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::EngineError;
use crate::engine::{
    DeltaStream, GameConfig, GameOverReason, GameSession, GameSnapshot, SwapOutcome,
};
use crate::log;
use crate::types::Coord;

/// Driver configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverConfig {
    pub game: GameConfig,
    pub log_prefix: Option<String>,
}

impl DriverConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values keep their defaults.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
            lookup(key).and_then(|s| s.trim().parse().ok())
        }

        let defaults = GameConfig::default();
        let game = GameConfig {
            width: parsed(&lookup, "VEGGIE_WIDTH").unwrap_or(defaults.width),
            height: parsed(&lookup, "VEGGIE_HEIGHT").unwrap_or(defaults.height),
            kind_count: parsed(&lookup, "VEGGIE_KINDS").unwrap_or(defaults.kind_count),
            max_moves: parsed(&lookup, "VEGGIE_MAX_MOVES").unwrap_or(defaults.max_moves),
            seed: parsed(&lookup, "VEGGIE_SEED"),
        };

        let log_prefix = lookup("VEGGIE_LOG_PREFIX")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self { game, log_prefix }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Swap(Coord, Coord),
    New,
    Snapshot,
    Moves,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    WrongArity { command: &'static str, expected: usize },
    BadNumber(String),
}

impl CommandError {
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Unknown(_) => "unknown_command",
            CommandError::WrongArity { .. } | CommandError::BadNumber(_) => "bad_arguments",
        }
    }

    pub fn message(&self) -> String {
        match self {
            CommandError::Unknown(word) => format!("unknown command {word:?}"),
            CommandError::WrongArity { command, expected } => {
                format!("{command} takes {expected} arguments")
            }
            CommandError::BadNumber(word) => format!("{word:?} is not a coordinate"),
        }
    }
}

/// Parse one input line. `Ok(None)` for blank lines and comments.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = words.collect();

    let no_args = |command: &'static str, cmd: Command| {
        if args.is_empty() {
            Ok(Some(cmd))
        } else {
            Err(CommandError::WrongArity {
                command,
                expected: 0,
            })
        }
    };

    match head.as_str() {
        "swap" => {
            if args.len() != 4 {
                return Err(CommandError::WrongArity {
                    command: "swap",
                    expected: 4,
                });
            }
            let nums = args
                .iter()
                .map(|w| w.parse::<i32>().map_err(|_| CommandError::BadNumber(w.to_string())))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(Command::Swap(
                Coord::new(nums[0], nums[1]),
                Coord::new(nums[2], nums[3]),
            )))
        }
        "new" => no_args("new", Command::New),
        "snapshot" => no_args("snapshot", Command::Snapshot),
        "moves" => no_args("moves", Command::Moves),
        "quit" | "exit" => no_args("quit", Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// One output line.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    NewGame {
        deltas: DeltaStream,
        snapshot: GameSnapshot,
    },
    Swap {
        committed: bool,
        score_gained: u32,
        passes: usize,
        game_over: Option<GameOverReason>,
        deltas: DeltaStream,
        snapshot: GameSnapshot,
    },
    Snapshot {
        snapshot: GameSnapshot,
    },
    Moves {
        has_legal_move: bool,
    },
    Error {
        code: &'static str,
        message: String,
    },
    Bye,
}

impl Reply {
    fn error(code: &'static str, message: impl Into<String>) -> Self {
        Reply::Error {
            code,
            message: message.into(),
        }
    }
}

impl From<EngineError> for Reply {
    fn from(err: EngineError) -> Self {
        Reply::error(err.code(), err.to_string())
    }
}

impl From<CommandError> for Reply {
    fn from(err: CommandError) -> Self {
        Reply::error(err.code(), err.message())
    }
}

pub struct Driver {
    session: GameSession,
}

impl Driver {
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        let session = GameSession::new(config)?;
        log!(
            "new game {}x{} kinds={} max_moves={} seed={:?}",
            config.width,
            config.height,
            config.kind_count,
            config.max_moves,
            session.seed()
        );
        Ok(Self { session })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The opening reply: deltas of the initial fill plus a snapshot.
    pub fn opening(&mut self) -> Reply {
        Reply::NewGame {
            deltas: self.session.take_opening(),
            snapshot: self.session.snapshot(),
        }
    }

    pub fn handle(&mut self, command: Command) -> Reply {
        match command {
            Command::Swap(a, b) => match self.session.request_swap(a, b) {
                Ok(outcome) => self.swap_reply(outcome),
                Err(err) => {
                    log!("rejected swap {} -> {}: {}", a, b, err);
                    err.into()
                }
            },
            Command::New => {
                let deltas = self.session.restart();
                log!("restart, episode {}", self.session.episode_id());
                Reply::NewGame {
                    deltas,
                    snapshot: self.session.snapshot(),
                }
            }
            Command::Snapshot => Reply::Snapshot {
                snapshot: self.session.snapshot(),
            },
            Command::Moves => Reply::Moves {
                has_legal_move: self.session.has_legal_move(),
            },
            Command::Quit => Reply::Bye,
        }
    }

    fn swap_reply(&mut self, outcome: SwapOutcome) -> Reply {
        let committed = outcome.is_committed();
        let score_gained = outcome.score_gained();
        let (passes, game_over) = match &outcome {
            SwapOutcome::Committed {
                passes, game_over, ..
            } => (passes.len(), *game_over),
            SwapOutcome::Reverted { .. } => (0, None),
        };
        if let Some(reason) = game_over {
            log!(
                "game over ({:?}), final score {}",
                reason,
                self.session.score()
            );
        }
        Reply::Swap {
            committed,
            score_gained,
            passes,
            game_over,
            deltas: outcome.into_deltas(),
            snapshot: self.session.snapshot(),
        }
    }
}

/// Read commands until `quit` or end of input, writing one JSON line per reply.
pub fn run<I: BufRead, O: Write>(driver: &mut Driver, input: I, mut output: O) -> Result<()> {
    emit(&mut output, &driver.opening())?;

    for line in input.lines() {
        let line = line.context("failed to read command")?;
        let reply = match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => driver.handle(command),
            Err(err) => {
                log!("bad command {:?}: {}", line, err.message());
                err.into()
            }
        };
        emit(&mut output, &reply)?;
        if matches!(reply, Reply::Bye) {
            break;
        }
    }
    Ok(())
}

fn emit<O: Write>(output: &mut O, reply: &Reply) -> Result<()> {
    let line = serde_json::to_string(reply).context("failed to encode reply")?;
    writeln!(output, "{}", line).context("failed to write reply")?;
    output.flush().context("failed to flush output")?;
    Ok(())
}
