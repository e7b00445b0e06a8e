//! The sleep, send, count loop
//!
//! Each iteration waits for the configured interval, sends the keystroke once
//! and prints a timestamped status line. In the default mode failures count
//! down towards the stop threshold; with `revert` successes do.

use crate::config::Config;
use crate::keyboard::KeySender;
use crate::launcher::Launcher;
use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Timestamp format for status lines
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Result of a single ping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Carries the reason the keystroke could not be sent
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The threshold was reached under the active counting mode
    Exhausted,
    Interrupted,
}

/// How a wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    Elapsed,
    Interrupted,
}

/// The single suspension point of the loop
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration) -> Wake;
}

impl<T: Sleeper + ?Sized> Sleeper for &mut T {
    fn sleep(&mut self, duration: Duration) -> Wake {
        (**self).sleep(duration)
    }
}

/// Sleep that returns early when an interrupt arrives on its channel
pub struct InterruptibleSleep {
    interrupts: Option<Receiver<()>>,
}

impl InterruptibleSleep {
    pub fn new(interrupts: Receiver<()>) -> Self {
        Self {
            interrupts: Some(interrupts),
        }
    }

    /// Sleep without any interrupt source
    pub fn uninterruptible() -> Self {
        Self { interrupts: None }
    }

    /// Route Ctrl+C into the sleeper.
    ///
    /// Falls back to an uninterruptible sleep if the handler cannot be set.
    pub fn with_ctrlc() -> Self {
        let (tx, rx) = mpsc::channel();
        match ctrlc::set_handler(move || {
            let _ = tx.send(());
        }) {
            Ok(()) => Self::new(rx),
            Err(e) => {
                log::warn!("failed to install Ctrl+C handler: {}", e);
                Self::uninterruptible()
            }
        }
    }
}

impl Sleeper for InterruptibleSleep {
    fn sleep(&mut self, duration: Duration) -> Wake {
        let Some(rx) = &self.interrupts else {
            thread::sleep(duration);
            return Wake::Elapsed;
        };

        match rx.recv_timeout(duration) {
            Ok(()) => Wake::Interrupted,
            Err(RecvTimeoutError::Timeout) => Wake::Elapsed,
            Err(RecvTimeoutError::Disconnected) => {
                self.interrupts = None;
                thread::sleep(duration);
                Wake::Elapsed
            }
        }
    }
}

/// Counters for the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    /// Matching outcomes still needed before stopping
    pub remaining: i32,
    pub last_outcome: Option<Outcome>,
    pub pings: u64,
    pub successes: u64,
    pub failures: u64,
}

impl RunState {
    pub fn new(ping_count: i32) -> Self {
        Self {
            remaining: ping_count,
            last_outcome: None,
            pings: 0,
            successes: 0,
            failures: 0,
        }
    }

    /// Whether the counter is evaluated at all
    pub fn is_bounded(&self) -> bool {
        self.remaining > 0
    }

    /// Record a ping; returns true once the counter is exhausted
    pub fn record(&mut self, outcome: Outcome, revert: bool) -> bool {
        self.pings += 1;
        if outcome.is_success() {
            self.successes += 1;
        } else {
            self.failures += 1;
        }

        let counts = outcome.is_success() == revert;
        self.last_outcome = Some(outcome);

        if !self.is_bounded() || !counts {
            return false;
        }

        self.remaining -= 1;
        self.remaining == 0
    }
}

/// What happened during a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub reason: StopReason,
    pub pings: u64,
    pub successes: u64,
    pub failures: u64,
}

/// Which console stream a status line goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Out,
    Err,
}

/// Drives one pinging session
pub struct Pinger<'a, K, L, S, O, E> {
    config: &'a Config,
    sender: K,
    launcher: L,
    sleeper: S,
    out: O,
    err: E,
    /// First console write failure; never stops the loop
    write_error: Option<io::Error>,
}

impl<'a, K, L, S, O, E> Pinger<'a, K, L, S, O, E>
where
    K: KeySender,
    L: Launcher,
    S: Sleeper,
    O: Write,
    E: Write,
{
    pub fn new(config: &'a Config, sender: K, launcher: L, sleeper: S, out: O, err: E) -> Self {
        Self {
            config,
            sender,
            launcher,
            sleeper,
            out,
            err,
            write_error: None,
        }
    }

    /// Run until the counter is exhausted or an interrupt arrives.
    ///
    /// Console write failures do not interrupt the session. The first one is
    /// returned after the loop and the follow-up command have completed.
    pub fn run(&mut self) -> io::Result<Summary> {
        self.preamble();

        let mut state = RunState::new(self.config.ping_count);
        let reason = loop {
            if self.sleeper.sleep(self.config.interval) == Wake::Interrupted {
                self.emit(Stream::Out, format!("{}: Interrupted.", timestamp()));
                break StopReason::Interrupted;
            }

            let outcome = match self.sender.send(&self.config.key) {
                Ok(()) => {
                    self.emit(Stream::Out, format!("{}: Succeeded.", timestamp()));
                    Outcome::Success
                }
                Err(e) => {
                    let reason = e.to_string();
                    self.emit(Stream::Err, format!("{}: Failed({}).", timestamp(), reason));
                    Outcome::Failure(reason)
                }
            };

            if state.record(outcome, self.config.revert) {
                self.launch();
                break StopReason::Exhausted;
            }
        };

        log::info!(
            "stopped ({:?}) after {} pings: {} succeeded, {} failed",
            reason,
            state.pings,
            state.successes,
            state.failures
        );

        if let Some(e) = self.write_error.take() {
            return Err(e);
        }

        Ok(Summary {
            reason,
            pings: state.pings,
            successes: state.successes,
            failures: state.failures,
        })
    }

    fn preamble(&mut self) {
        let config = self.config;
        if config.is_infinite() {
            self.emit(Stream::Out, "Keep pinging infinitely.".to_string());
        }

        if let Some(command) = &config.command {
            self.emit(Stream::Out, format!("Run \"{}\" after stop.", command));
        }
    }

    fn launch(&mut self) {
        let config = self.config;
        let Some(command) = &config.command else {
            return;
        };

        if let Err(e) = self.launcher.launch(command) {
            log::warn!("{}", e);
            self.emit(Stream::Err, e.to_string());
        }
    }

    fn emit(&mut self, stream: Stream, line: String) {
        let result = match stream {
            Stream::Out => writeln!(self.out, "{}", line),
            Stream::Err => writeln!(self.err, "{}", line),
        };

        if let Err(e) = result {
            log::warn!("failed to write status line: {}", e);
            if self.write_error.is_none() {
                self.write_error = Some(e);
            }
        }
    }
}

fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
