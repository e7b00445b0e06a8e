//! Keyboard Ping - Send echo requests to the keyboard
//!
//! Periodically types a keystroke to keep a session from going idle, counts
//! successes or failures, and optionally runs a command once a threshold is
//! reached.

pub mod config;
pub mod help;
pub mod keyboard;
pub mod launcher;
pub mod pinger;

pub use config::{parse_args, Action, Config};
pub use pinger::{Pinger, StopReason, Summary};
