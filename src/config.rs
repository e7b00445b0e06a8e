//! Command-line configuration for Keyboard Ping
//!
//! Options come in flag/value pairs. `-h` and `-l` stand alone and stop the
//! scan; `-r` is a toggle and may sit anywhere between pairs.
//!
//! ## Example
//!
//! ```
//! use keyboard_ping::config::{Action, Config};
//!
//! let args = ["-n", "2", "-k", "A", "-r"];
//! match Config::from_args(&args).unwrap() {
//!     Action::Run(config) => {
//!         assert_eq!(config.ping_count, 2);
//!         assert!(config.revert);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use crate::keyboard::KeyStroke;
use crate::launcher::CommandSpec;
use std::io::{self, Write};
use std::time::Duration;
use thiserror::Error;

pub const OPT_COMMAND: &str = "-c";
pub const OPT_COUNT: &str = "-n";
pub const OPT_HELP: &str = "-h";
pub const OPT_INTERVAL: &str = "-i";
pub const OPT_KEY: &str = "-k";
pub const OPT_LIST: &str = "-l";
pub const OPT_REVERT: &str = "-r";

pub const DEFAULT_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_PING_COUNT: i32 = 4;

/// Malformed command-line input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    #[error("Command is not specified.")]
    MissingCommand,
    #[error("Count is not specified.")]
    MissingCount,
    #[error("Interval is not specified.")]
    MissingInterval,
    #[error("Key is not specified.")]
    MissingKey,
    #[error("{0} is invalid value for the count.")]
    InvalidCount(String),
    #[error("{0} is invalid value for the interval.")]
    InvalidInterval(String),
    #[error("Interval must be more than zero.")]
    NonPositiveInterval,
    #[error("Unknown Option: {0}.")]
    UnknownOption(String),
}

/// What the program should do after parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run(Config),
    Help,
    ListKeys,
}

/// Settings for one pinging session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Keystrokes sent on every ping
    pub key: KeyStroke,
    /// Wait before each ping, always non-zero
    pub interval: Duration,
    /// Stop threshold; zero or lower pings until interrupted
    pub ping_count: i32,
    /// Count successes instead of failures
    pub revert: bool,
    /// Launched once the threshold is reached
    pub command: Option<CommandSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key: KeyStroke::default(),
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            ping_count: DEFAULT_PING_COUNT,
            revert: false,
            command: None,
        }
    }
}

impl Config {
    /// True when the session only ends on interruption
    pub fn is_infinite(&self) -> bool {
        self.ping_count <= 0
    }

    /// Parse arguments (without the program name).
    ///
    /// Stops at the first malformed option and returns it as an error.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Action, ArgError> {
        let mut config = Config::default();
        let mut i = 0;

        while i < args.len() {
            let flag = args[i].as_ref();
            let value: Option<&str> = args.get(i + 1).map(|s| s.as_ref());

            match flag {
                OPT_COMMAND => {
                    let value = value.ok_or(ArgError::MissingCommand)?;
                    config.command = Some(CommandSpec::parse(value));
                }
                OPT_COUNT => {
                    let value = value.ok_or(ArgError::MissingCount)?;
                    config.ping_count =
                        parse_int(value).ok_or_else(|| ArgError::InvalidCount(value.to_string()))?;
                }
                OPT_HELP => return Ok(Action::Help),
                OPT_INTERVAL => {
                    let value = value.ok_or(ArgError::MissingInterval)?;
                    let ms = parse_int(value)
                        .ok_or_else(|| ArgError::InvalidInterval(value.to_string()))?;
                    if ms <= 0 {
                        return Err(ArgError::NonPositiveInterval);
                    }
                    config.interval = Duration::from_millis(ms as u64);
                }
                OPT_KEY => {
                    let value = value.ok_or(ArgError::MissingKey)?;
                    config.key = KeyStroke::parse(value);
                }
                OPT_LIST => return Ok(Action::ListKeys),
                OPT_REVERT => {
                    config.revert = true;
                    // Toggle consumes only the flag itself
                    i += 1;
                    continue;
                }
                other => return Err(ArgError::UnknownOption(other.to_string())),
            }

            i += 2;
        }

        Ok(Action::Run(config))
    }
}

/// Parse arguments, reporting a malformed option on `err` and falling back to help
pub fn parse_args<S: AsRef<str>, W: Write>(args: &[S], err: &mut W) -> io::Result<Action> {
    match Config::from_args(args) {
        Ok(action) => Ok(action),
        Err(e) => {
            writeln!(err, "{}", e)?;
            Ok(Action::Help)
        }
    }
}

fn parse_int(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}
