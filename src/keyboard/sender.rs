//! Keystroke injection
//!
//! Note: real key sending uses the default 'virtual-send' feature, which
//! needs the appropriate system libraries (libxdo on Linux, etc.). Building
//! with `--no-default-features` leaves a stub that fails every send.

use super::keymap::KeyStroke;
#[cfg(feature = "virtual-send")]
use super::keymap::{KeyToken, SpecialKey};
use thiserror::Error;

/// Why a keystroke could not be sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("Virtual sending not available - rebuild with the virtual-send feature")]
    Unavailable,
    #[error("Failed to init: {0}")]
    Init(String),
    #[error("Input failed: {0}")]
    Input(String),
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
}

/// Something that can type a keystroke sequence
pub trait KeySender {
    fn send(&mut self, stroke: &KeyStroke) -> Result<(), SendError>;
}

impl<T: KeySender + ?Sized> KeySender for &mut T {
    fn send(&mut self, stroke: &KeyStroke) -> Result<(), SendError> {
        (**self).send(stroke)
    }
}

/// Virtual key sender - conditionally compiled
#[cfg(feature = "virtual-send")]
pub struct VirtualKeySender {
    enigo: Option<enigo::Enigo>,
}

#[cfg(feature = "virtual-send")]
impl VirtualKeySender {
    pub fn new() -> Self {
        Self { enigo: None }
    }

    pub fn is_available() -> bool {
        true
    }

    fn connection(&mut self) -> Result<&mut enigo::Enigo, SendError> {
        use enigo::{Enigo, Settings};

        if self.enigo.is_none() {
            let enigo =
                Enigo::new(&Settings::default()).map_err(|e| SendError::Init(e.to_string()))?;
            log::debug!("keyboard connection established");
            self.enigo = Some(enigo);
        }

        self.enigo
            .as_mut()
            .ok_or_else(|| SendError::Init("no connection".to_string()))
    }
}

#[cfg(feature = "virtual-send")]
impl KeySender for VirtualKeySender {
    fn send(&mut self, stroke: &KeyStroke) -> Result<(), SendError> {
        use enigo::{Direction, Keyboard};

        let enigo = self.connection()?;

        for token in stroke.tokens() {
            match token {
                KeyToken::Text(text) => enigo
                    .text(text)
                    .map_err(|e| SendError::Input(e.to_string()))?,
                KeyToken::Special(key) => {
                    let key = platform_key(*key)?;
                    enigo
                        .key(key, Direction::Click)
                        .map_err(|e| SendError::Input(e.to_string()))?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(feature = "virtual-send")]
impl Default for VirtualKeySender {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a catalog key onto the platform key enigo understands
#[cfg(feature = "virtual-send")]
fn platform_key(key: SpecialKey) -> Result<enigo::Key, SendError> {
    use enigo::Key;

    let mapped = match key {
        SpecialKey::Backspace => Key::Backspace,
        SpecialKey::CapsLock => Key::CapsLock,
        SpecialKey::Delete => Key::Delete,
        SpecialKey::DownArrow => Key::DownArrow,
        SpecialKey::End => Key::End,
        SpecialKey::Enter => Key::Return,
        SpecialKey::Escape => Key::Escape,
        SpecialKey::Home => Key::Home,
        SpecialKey::LeftArrow => Key::LeftArrow,
        SpecialKey::PageDown => Key::PageDown,
        SpecialKey::PageUp => Key::PageUp,
        SpecialKey::RightArrow => Key::RightArrow,
        SpecialKey::Tab => Key::Tab,
        SpecialKey::UpArrow => Key::UpArrow,
        SpecialKey::F1 => Key::F1,
        SpecialKey::F2 => Key::F2,
        SpecialKey::F3 => Key::F3,
        SpecialKey::F4 => Key::F4,
        SpecialKey::F5 => Key::F5,
        SpecialKey::F6 => Key::F6,
        SpecialKey::F7 => Key::F7,
        SpecialKey::F8 => Key::F8,
        SpecialKey::F9 => Key::F9,
        SpecialKey::F10 => Key::F10,
        SpecialKey::F11 => Key::F11,
        SpecialKey::F12 => Key::F12,
        SpecialKey::F13 => Key::F13,
        SpecialKey::F14 => Key::F14,
        SpecialKey::F15 => Key::F15,
        SpecialKey::F16 => Key::F16,
        other => {
            let code = native_code(other).ok_or(SendError::Unsupported(other.name()))?;
            Key::Other(code)
        }
    };

    Ok(mapped)
}

/// X11 keysyms for keys without a portable enigo variant
#[cfg(all(feature = "virtual-send", all(unix, not(target_os = "macos"))))]
fn native_code(key: SpecialKey) -> Option<u32> {
    match key {
        SpecialKey::Break => Some(0xff6b),
        SpecialKey::Help => Some(0xff6a),
        SpecialKey::Insert => Some(0xff63),
        SpecialKey::NumLock => Some(0xff7f),
        SpecialKey::PrintScreen => Some(0xff61),
        SpecialKey::ScrollLock => Some(0xff14),
        SpecialKey::KeypadAdd => Some(0xffab),
        SpecialKey::KeypadSubtract => Some(0xffad),
        SpecialKey::KeypadMultiply => Some(0xffaa),
        SpecialKey::KeypadDivide => Some(0xffaf),
        _ => None,
    }
}

/// Windows virtual-key codes
#[cfg(all(feature = "virtual-send", target_os = "windows"))]
fn native_code(key: SpecialKey) -> Option<u32> {
    match key {
        SpecialKey::Break => Some(0x03),
        SpecialKey::Help => Some(0x2f),
        SpecialKey::Insert => Some(0x2d),
        SpecialKey::NumLock => Some(0x90),
        SpecialKey::PrintScreen => Some(0x2c),
        SpecialKey::ScrollLock => Some(0x91),
        SpecialKey::KeypadAdd => Some(0x6b),
        SpecialKey::KeypadSubtract => Some(0x6d),
        SpecialKey::KeypadMultiply => Some(0x6a),
        SpecialKey::KeypadDivide => Some(0x6f),
        _ => None,
    }
}

/// macOS virtual keycodes; NUMLOCK maps to the keypad Clear key
#[cfg(all(feature = "virtual-send", target_os = "macos"))]
fn native_code(key: SpecialKey) -> Option<u32> {
    match key {
        SpecialKey::Help => Some(0x72),
        SpecialKey::NumLock => Some(0x47),
        SpecialKey::KeypadAdd => Some(0x45),
        SpecialKey::KeypadSubtract => Some(0x4e),
        SpecialKey::KeypadMultiply => Some(0x43),
        SpecialKey::KeypadDivide => Some(0x4b),
        _ => None,
    }
}

/// Stub implementation when virtual-send feature is not enabled
#[cfg(not(feature = "virtual-send"))]
pub struct VirtualKeySender;

#[cfg(not(feature = "virtual-send"))]
impl VirtualKeySender {
    pub fn new() -> Self {
        Self
    }

    pub fn is_available() -> bool {
        false
    }
}

#[cfg(not(feature = "virtual-send"))]
impl KeySender for VirtualKeySender {
    fn send(&mut self, _stroke: &KeyStroke) -> Result<(), SendError> {
        Err(SendError::Unavailable)
    }
}

#[cfg(not(feature = "virtual-send"))]
impl Default for VirtualKeySender {
    fn default() -> Self {
        Self::new()
    }
}
