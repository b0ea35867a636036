use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(TimerId);

pub const DEFAULT_COMMAND_ICON: &str = "terminal";
pub const NO_RESULTS_TEXT: &str = "No commands found.";
pub const HIDDEN_CLASS: &str = "hidden";
pub const SCROLLED_CLASS: &str = "scrolled";

/// Identifies one modal interface competing for keyboard ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct InterfaceId(pub &'static str);

pub const PALETTE_INTERFACE: InterfaceId = InterfaceId("command-palette");

/// A layout-width preset offered once the viewport reaches `min_viewport_width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WidthPreset {
    pub name: &'static str,
    /// Target content width in pixels; `None` is unconstrained.
    pub width: Option<u32>,
    pub icon: &'static str,
    pub min_viewport_width: u32,
}

pub const WIDTH_PRESETS: [WidthPreset; 3] = [
    WidthPreset {
        name: "normal",
        width: Some(800),
        icon: "fullscreen_exit",
        min_viewport_width: 0,
    },
    WidthPreset {
        name: "wide",
        width: Some(1200),
        icon: "arrow_range",
        min_viewport_width: 800,
    },
    WidthPreset {
        name: "full",
        width: None,
        icon: "fullscreen",
        min_viewport_width: 1200,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventDisposition {
    /// Handled here; the host must suppress its default behavior.
    Consumed,
    Ignored,
}

impl EventDisposition {
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }
}
