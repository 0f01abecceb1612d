//! Core types for the keymap system: Chord, Modifiers, KeyCode, Platform

use std::fmt;

/// Modifier keys as a bitfield for efficient storage and comparison
///
/// `ctrl` is the platform's control-equivalent (Cmd on macOS) and `meta`
/// its meta-equivalent (Ctrl on macOS).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000);

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0001;
        }
        if shift {
            bits |= 0b0010;
        }
        if alt {
            bits |= 0b0100;
        }
        if meta {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// A single modifier key, as named in chord descriptions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Ctrl,
    Meta,
    Shift,
    Alt,
}

impl Modifier {
    pub const fn flag(self) -> Modifiers {
        match self {
            Modifier::Ctrl => Modifiers::CTRL,
            Modifier::Meta => Modifiers::META,
            Modifier::Shift => Modifiers::SHIFT,
            Modifier::Alt => Modifiers::ALT,
        }
    }
}

/// Platform whose modifier vocabulary applies to chord descriptions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Identifier used by the `platform:` field of keymap files
    pub fn name(self) -> &'static str {
        match self {
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
            Platform::Linux => "linux",
        }
    }

    /// Name of a modifier in chord descriptions
    ///
    /// On macOS the control-equivalent is spelled `cmd` and the
    /// meta-equivalent `ctrl`.
    pub fn modifier_name(self, modifier: Modifier) -> &'static str {
        match (self, modifier) {
            (Platform::MacOs, Modifier::Ctrl) => "cmd",
            (Platform::MacOs, Modifier::Meta) => "ctrl",
            (_, Modifier::Ctrl) => "ctrl",
            (_, Modifier::Meta) => "meta",
            (_, Modifier::Shift) => "shift",
            (_, Modifier::Alt) => "alt",
        }
    }

    /// Reverse of [`modifier_name`](Self::modifier_name), on a lowercased segment
    pub fn modifier_named(self, name: &str) -> Option<Modifier> {
        [Modifier::Ctrl, Modifier::Meta, Modifier::Shift, Modifier::Alt]
            .into_iter()
            .find(|&m| self.modifier_name(m) == name)
    }
}

/// A key code: either a character or a named symbolic key
///
/// Tab, Backspace and Space are characters (`'\t'`, `'\u{8}'`, `' '`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key (normalized to lowercase)
    Char(char),

    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Delete,
}

impl KeyCode {
    pub const TAB: KeyCode = KeyCode::Char('\t');
    pub const BACKSPACE: KeyCode = KeyCode::Char('\u{8}');
    pub const SPACE: KeyCode = KeyCode::Char(' ');

    /// Lowercase character keys, leave symbolic keys alone
    pub fn normalized(self) -> KeyCode {
        match self {
            KeyCode::Char(c) if c.is_uppercase() => {
                let mut lower = c.to_lowercase();
                match (lower.next(), lower.next()) {
                    (Some(l), None) => KeyCode::Char(l),
                    _ => self,
                }
            }
            other => other,
        }
    }

    pub fn is_char(self) -> bool {
        matches!(self, KeyCode::Char(_))
    }

    /// Look up a symbolic key or a character alias by its description name
    pub fn named(name: &str) -> Option<KeyCode> {
        let key = match name {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "delete" => KeyCode::Delete,
            "tab" => KeyCode::TAB,
            "backspace" => KeyCode::BACKSPACE,
            "space" => KeyCode::SPACE,
            _ => return None,
        };
        Some(key)
    }
}

/// Uppercase form of `c` when it is one char that lowercases back to `c`
fn display_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if u.to_lowercase().eq(std::iter::once(c)) => u,
        _ => c,
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char('\t') => write!(f, "Tab"),
            KeyCode::Char('\u{8}') => write!(f, "Backspace"),
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "{}", display_char(*c)),
            KeyCode::Left => write!(f, "Left"),
            KeyCode::Right => write!(f, "Right"),
            KeyCode::Up => write!(f, "Up"),
            KeyCode::Down => write!(f, "Down"),
            KeyCode::PageUp => write!(f, "PageUp"),
            KeyCode::PageDown => write!(f, "PageDown"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::Delete => write!(f, "Delete"),
        }
    }
}

/// A normalized key event: one key code plus modifier state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Chord {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Chord {
    pub fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self {
            key: key.normalized(),
            mods,
        }
    }

    /// A chord with no modifiers
    pub fn key(key: KeyCode) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::NONE)
    }

    pub fn char_with_mods(c: char, mods: Modifiers) -> Self {
        Self::new(KeyCode::Char(c), mods)
    }

    /// Description in the chord syntax of `platform`, e.g. `Cmd-Shift-S`
    pub fn describe(&self, platform: Platform) -> String {
        let mut parts: Vec<String> = Vec::new();
        for modifier in [Modifier::Ctrl, Modifier::Meta, Modifier::Alt, Modifier::Shift] {
            if self.mods.contains(modifier.flag()) {
                parts.push(capitalize(platform.modifier_name(modifier)));
            }
        }
        parts.push(self.key.to_string());
        parts.join("-")
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(Platform::current()))
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
