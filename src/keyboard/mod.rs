//! Key catalog and keystroke injection

pub mod keymap;
mod sender;

pub use keymap::{KeyStroke, KeyToken, SpecialKey, SpecialKeyInfo, ORDINARY_KEYS, SPECIAL_KEYS};
pub use sender::{KeySender, SendError, VirtualKeySender};
