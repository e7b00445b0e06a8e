//! Key catalog and keystroke descriptors
//!
//! A key descriptor is either literal text to type or a symbolic key written
//! in braces, e.g. `{ENTER}`. Both can be mixed: `Hello{ENTER}`.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Printable characters that can be typed as-is
pub const ORDINARY_KEYS: &str = "!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// Keys that have no printable representation
///
/// Declaration order matches `SPECIAL_KEYS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Backspace,
    Break,
    CapsLock,
    Delete,
    DownArrow,
    End,
    Enter,
    Escape,
    Help,
    Home,
    Insert,
    LeftArrow,
    NumLock,
    PageDown,
    PageUp,
    PrintScreen,
    RightArrow,
    ScrollLock,
    Tab,
    UpArrow,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    KeypadAdd,
    KeypadSubtract,
    KeypadMultiply,
    KeypadDivide,
}

impl SpecialKey {
    /// Catalog entry for this key
    pub fn info(self) -> &'static SpecialKeyInfo {
        // Variants are declared in SPECIAL_KEYS order.
        &SPECIAL_KEYS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn descriptor(self) -> &'static str {
        self.info().descriptor
    }
}

/// Information about a special key
#[derive(Debug, Clone)]
pub struct SpecialKeyInfo {
    /// Symbolic name accepted by `-k`
    pub name: &'static str,
    /// Brace form used inside key sequences
    pub descriptor: &'static str,
    pub key: SpecialKey,
}

impl SpecialKeyInfo {
    const fn new(name: &'static str, descriptor: &'static str, key: SpecialKey) -> Self {
        Self { name, descriptor, key }
    }
}

/// All special keys, in catalog order
pub static SPECIAL_KEYS: &[SpecialKeyInfo] = &[
    SpecialKeyInfo::new("BACKSPACE", "{BACKSPACE}", SpecialKey::Backspace),
    SpecialKeyInfo::new("BREAK", "{BREAK}", SpecialKey::Break),
    SpecialKeyInfo::new("CAPSLOCK", "{CAPSLOCK}", SpecialKey::CapsLock),
    SpecialKeyInfo::new("DEL", "{DELETE}", SpecialKey::Delete),
    SpecialKeyInfo::new("DOWNARROW", "{DOWN}", SpecialKey::DownArrow),
    SpecialKeyInfo::new("END", "{END}", SpecialKey::End),
    SpecialKeyInfo::new("ENTER", "{ENTER}", SpecialKey::Enter),
    SpecialKeyInfo::new("ESC", "{ESC}", SpecialKey::Escape),
    SpecialKeyInfo::new("HELP", "{HELP}", SpecialKey::Help),
    SpecialKeyInfo::new("HOME", "{HOME}", SpecialKey::Home),
    SpecialKeyInfo::new("INS", "{INSERT}", SpecialKey::Insert),
    SpecialKeyInfo::new("LEFTARROW", "{LEFT}", SpecialKey::LeftArrow),
    SpecialKeyInfo::new("NUMLOCK", "{NUMLOCK}", SpecialKey::NumLock),
    SpecialKeyInfo::new("PAGEDOWN", "{PGDN}", SpecialKey::PageDown),
    SpecialKeyInfo::new("PAGEUP", "{PGUP}", SpecialKey::PageUp),
    SpecialKeyInfo::new("PRINTSCREEN", "{PRTSC}", SpecialKey::PrintScreen),
    SpecialKeyInfo::new("RIGHTARROW", "{RIGHT}", SpecialKey::RightArrow),
    SpecialKeyInfo::new("SCROLLLOCK", "{SCROLLLOCK}", SpecialKey::ScrollLock),
    SpecialKeyInfo::new("TAB", "{TAB}", SpecialKey::Tab),
    SpecialKeyInfo::new("UPARROW", "{UP}", SpecialKey::UpArrow),
    SpecialKeyInfo::new("F1", "{F1}", SpecialKey::F1),
    SpecialKeyInfo::new("F2", "{F2}", SpecialKey::F2),
    SpecialKeyInfo::new("F3", "{F3}", SpecialKey::F3),
    SpecialKeyInfo::new("F4", "{F4}", SpecialKey::F4),
    SpecialKeyInfo::new("F5", "{F5}", SpecialKey::F5),
    SpecialKeyInfo::new("F6", "{F6}", SpecialKey::F6),
    SpecialKeyInfo::new("F7", "{F7}", SpecialKey::F7),
    SpecialKeyInfo::new("F8", "{F8}", SpecialKey::F8),
    SpecialKeyInfo::new("F9", "{F9}", SpecialKey::F9),
    SpecialKeyInfo::new("F10", "{F10}", SpecialKey::F10),
    SpecialKeyInfo::new("F11", "{F11}", SpecialKey::F11),
    SpecialKeyInfo::new("F12", "{F12}", SpecialKey::F12),
    SpecialKeyInfo::new("F13", "{F13}", SpecialKey::F13),
    SpecialKeyInfo::new("F14", "{F14}", SpecialKey::F14),
    SpecialKeyInfo::new("F15", "{F15}", SpecialKey::F15),
    SpecialKeyInfo::new("F16", "{F16}", SpecialKey::F16),
    SpecialKeyInfo::new("KEYPADADD", "{ADD}", SpecialKey::KeypadAdd),
    SpecialKeyInfo::new("KEYPADSUBTRACT", "{SUBTRACT}", SpecialKey::KeypadSubtract),
    SpecialKeyInfo::new("KEYPADMULTIPLY", "{MULTIPLY}", SpecialKey::KeypadMultiply),
    SpecialKeyInfo::new("KEYPADDIVIDE", "{DIVIDE}", SpecialKey::KeypadDivide),
];

/// Special keys by symbolic name
static BY_NAME: LazyLock<HashMap<&'static str, SpecialKey>> = LazyLock::new(|| {
    SPECIAL_KEYS.iter().map(|info| (info.name, info.key)).collect()
});

/// Special keys by upper-cased descriptor body (without braces)
static BY_DESCRIPTOR: LazyLock<HashMap<&'static str, SpecialKey>> = LazyLock::new(|| {
    SPECIAL_KEYS
        .iter()
        .map(|info| {
            let body = info.descriptor.trim_start_matches('{').trim_end_matches('}');
            (body, info.key)
        })
        .collect()
});

/// Look up a special key by its exact (upper-case) symbolic name
pub fn lookup_name(name: &str) -> Option<SpecialKey> {
    BY_NAME.get(name).copied()
}

/// Look up a special key by its descriptor body, e.g. `PGDN` (case-insensitive)
pub fn lookup_descriptor(body: &str) -> Option<SpecialKey> {
    BY_DESCRIPTOR.get(body.to_ascii_uppercase().as_str()).copied()
}

/// One element of a keystroke sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyToken {
    Text(String),
    Special(SpecialKey),
}

/// The keystrokes sent on every ping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStroke {
    tokens: Vec<KeyToken>,
}

impl KeyStroke {
    pub fn special(key: SpecialKey) -> Self {
        Self {
            tokens: vec![KeyToken::Special(key)],
        }
    }

    /// Resolve a `-k` argument.
    ///
    /// A bare catalog name (`ENTER`) selects that key. Anything else is
    /// scanned for `{DESCRIPTOR}` groups; the rest is typed literally.
    pub fn parse(input: &str) -> Self {
        if let Some(key) = lookup_name(input) {
            return Self::special(key);
        }

        let mut tokens = Vec::new();
        let mut text = String::new();
        let mut rest = input;

        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let resolved = after
                .find('}')
                .and_then(|close| lookup_descriptor(&after[..close]).map(|key| (close, key)));

            match resolved {
                Some((close, key)) => {
                    text.push_str(&rest[..open]);
                    if !text.is_empty() {
                        tokens.push(KeyToken::Text(std::mem::take(&mut text)));
                    }
                    tokens.push(KeyToken::Special(key));
                    rest = &after[close + 1..];
                }
                None => {
                    // Not a known descriptor, keep the brace as text
                    text.push_str(&rest[..=open]);
                    rest = after;
                }
            }
        }

        text.push_str(rest);
        if !text.is_empty() {
            tokens.push(KeyToken::Text(text));
        }

        Self { tokens }
    }

    pub fn tokens(&self) -> &[KeyToken] {
        &self.tokens
    }
}

impl Default for KeyStroke {
    fn default() -> Self {
        Self::special(SpecialKey::NumLock)
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                KeyToken::Text(text) => f.write_str(text)?,
                KeyToken::Special(key) => f.write_str(key.descriptor())?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_forty_special_keys() {
        assert_eq!(SPECIAL_KEYS.len(), 40);
        assert_eq!(BY_NAME.len(), 40);
        assert_eq!(BY_DESCRIPTOR.len(), 40);
    }

    #[test]
    fn every_variant_resolves_to_its_own_entry() {
        for info in SPECIAL_KEYS {
            assert_eq!(info.key.name(), info.name);
            assert_eq!(info.key.descriptor(), info.descriptor);
        }
    }

    #[test]
    fn names_and_descriptors_can_differ() {
        assert_eq!(SpecialKey::Delete.name(), "DEL");
        assert_eq!(SpecialKey::Delete.descriptor(), "{DELETE}");
        assert_eq!(SpecialKey::PageDown.descriptor(), "{PGDN}");
        assert_eq!(SpecialKey::KeypadAdd.descriptor(), "{ADD}");
    }

    #[test]
    fn default_key_is_numlock() {
        assert_eq!(KeyStroke::default(), KeyStroke::special(SpecialKey::NumLock));
        assert_eq!(KeyStroke::default().to_string(), "{NUMLOCK}");
    }

    #[test]
    fn bare_name_resolves_to_special_key() {
        assert_eq!(KeyStroke::parse("ENTER"), KeyStroke::special(SpecialKey::Enter));
        assert_eq!(KeyStroke::parse("F5"), KeyStroke::special(SpecialKey::F5));
    }

    #[test]
    fn lower_case_words_are_typed_not_pressed() {
        for word in ["tab", "end", "home", "help", "Enter", "f5"] {
            let stroke = KeyStroke::parse(word);
            assert_eq!(stroke.tokens(), &[KeyToken::Text(word.to_string())]);
        }
        assert_eq!(lookup_name("tab"), None);
        assert_eq!(lookup_name("TAB"), Some(SpecialKey::Tab));
    }

    #[test]
    fn variant_order_matches_catalog_order() {
        for (index, info) in SPECIAL_KEYS.iter().enumerate() {
            assert_eq!(info.key as usize, index, "{} is out of order", info.name);
        }
    }

    #[test]
    fn descriptor_resolves_to_special_key() {
        assert_eq!(KeyStroke::parse("{PGUP}"), KeyStroke::special(SpecialKey::PageUp));
        assert_eq!(KeyStroke::parse("{numlock}"), KeyStroke::special(SpecialKey::NumLock));
    }

    #[test]
    fn literal_text_is_kept() {
        let stroke = KeyStroke::parse("Hello");
        assert_eq!(stroke.tokens(), &[KeyToken::Text("Hello".to_string())]);
    }

    #[test]
    fn single_character_is_text() {
        let stroke = KeyStroke::parse("A");
        assert_eq!(stroke.tokens(), &[KeyToken::Text("A".to_string())]);
    }

    #[test]
    fn text_and_descriptors_mix() {
        let stroke = KeyStroke::parse("Hi{TAB}there{ENTER}");
        assert_eq!(
            stroke.tokens(),
            &[
                KeyToken::Text("Hi".to_string()),
                KeyToken::Special(SpecialKey::Tab),
                KeyToken::Text("there".to_string()),
                KeyToken::Special(SpecialKey::Enter),
            ]
        );
        assert_eq!(stroke.to_string(), "Hi{TAB}there{ENTER}");
    }

    #[test]
    fn unknown_or_unterminated_braces_stay_literal() {
        let stroke = KeyStroke::parse("a{NOPE}b{ENTER");
        assert_eq!(stroke.tokens(), &[KeyToken::Text("a{NOPE}b{ENTER".to_string())]);
    }

    #[test]
    fn brace_before_descriptor_is_literal() {
        let stroke = KeyStroke::parse("{{ESC}");
        assert_eq!(
            stroke.tokens(),
            &[
                KeyToken::Text("{".to_string()),
                KeyToken::Special(SpecialKey::Escape),
            ]
        );
    }

    #[test]
    fn ordinary_keys_are_printable_ascii() {
        assert_eq!(ORDINARY_KEYS.len(), 94);
        assert!(ORDINARY_KEYS.chars().all(|c| c.is_ascii_graphic()));
    }
}
