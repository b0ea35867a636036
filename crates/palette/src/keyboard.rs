//! Document-level key and click arbitration between the palette and the rest
//! of the page.
//!
//! | Key             | Palette open, input focused | Palette open | Palette closed          |
//! |-----------------|-----------------------------|--------------|-------------------------|
//! | toggle combo    | close                       | close        | open                    |
//! | Escape          | close                       | close        | open unless modal open  |
//! | ArrowUp/Down    | move selection (wraps)      | ignored      | ignored                 |
//! | Enter           | execute selected            | ignored      | ignored                 |

use std::{fmt, str::FromStr};

use shared::{
    error::PaletteError,
    protocol::{ClickTarget, KeyEvent},
};

pub const ESCAPE: &str = "Escape";
pub const ARROW_UP: &str = "ArrowUp";
pub const ARROW_DOWN: &str = "ArrowDown";
pub const ENTER: &str = "Enter";

/// A modifier+key chord. Listed modifiers must be held; others are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    /// Lowercased key name.
    pub key: String,
}

impl KeyCombo {
    pub fn matches(&self, event: &KeyEvent) -> bool {
        (!self.ctrl || event.ctrl)
            && (!self.shift || event.shift)
            && (!self.alt || event.alt)
            && (!self.meta || event.meta)
            && event.key.to_lowercase() == self.key
    }
}

impl Default for KeyCombo {
    fn default() -> Self {
        Self {
            ctrl: true,
            shift: true,
            alt: false,
            meta: false,
            key: "p".into(),
        }
    }
}

impl FromStr for KeyCombo {
    type Err = PaletteError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut combo = KeyCombo {
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
            key: String::new(),
        };

        for part in raw.split('+').map(|part| part.trim().to_lowercase()) {
            match part.as_str() {
                "ctrl" | "control" => combo.ctrl = true,
                "shift" => combo.shift = true,
                "alt" | "option" => combo.alt = true,
                "meta" | "cmd" | "super" => combo.meta = true,
                "" => return Err(PaletteError::InvalidShortcut(raw.to_string())),
                key if combo.key.is_empty() => combo.key = key.to_string(),
                _ => return Err(PaletteError::InvalidShortcut(raw.to_string())),
            }
        }

        if combo.key.is_empty() {
            return Err(PaletteError::InvalidShortcut(raw.to_string()));
        }
        Ok(combo)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (held, name) in [
            (self.ctrl, "Ctrl"),
            (self.shift, "Shift"),
            (self.alt, "Alt"),
            (self.meta, "Meta"),
        ] {
            if held {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.key.to_uppercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteIntent {
    Toggle,
    Open,
    Close,
    MoveUp,
    MoveDown,
    ExecuteSelected,
    ExecuteAt(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    pub palette_open: bool,
    pub input_focused: bool,
    /// Another modal interface holds the keyboard.
    pub other_interface_open: bool,
}

/// `None` leaves the event to the rest of the page.
pub fn arbitrate_key(toggle: &KeyCombo, event: &KeyEvent, cx: KeyContext) -> Option<PaletteIntent> {
    if toggle.matches(event) {
        return Some(PaletteIntent::Toggle);
    }

    if event.key == ESCAPE {
        return if cx.palette_open {
            Some(PaletteIntent::Close)
        } else if !cx.other_interface_open {
            Some(PaletteIntent::Open)
        } else {
            None
        };
    }

    if !(cx.palette_open && cx.input_focused) {
        return None;
    }

    match event.key.as_str() {
        ARROW_UP => Some(PaletteIntent::MoveUp),
        ARROW_DOWN => Some(PaletteIntent::MoveDown),
        ENTER => Some(PaletteIntent::ExecuteSelected),
        _ => None,
    }
}

pub fn arbitrate_click(target: ClickTarget, palette_open: bool) -> Option<PaletteIntent> {
    if !palette_open {
        return None;
    }
    match target {
        ClickTarget::Backdrop => Some(PaletteIntent::Close),
        ClickTarget::ListItem { index } => Some(PaletteIntent::ExecuteAt(index)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/keyboard_tests.rs"]
mod tests;
