use serde::{Deserialize, Serialize};

use crate::domain::TimerId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum ClickTarget {
    /// The dimmed area of the overlay outside its content box.
    Backdrop,
    /// Anywhere inside the overlay's content box other than a list item.
    Content,
    ListItem { index: usize },
    PaletteInput,
    WidthIndicator,
    /// Page content outside every tracked element.
    Elsewhere,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PageEvent {
    KeyDown(KeyEvent),
    Input { value: String },
    Click(ClickTarget),
    Resize { width: u32 },
    HashChange { url: String },
    Scroll { offset: u32 },
    AnimationFrame,
    TimerFired { timer: TimerId },
    /// Fires every timer currently armed on the document.
    TimersElapsed,
    RegisterCommands { commands: serde_json::Value },
    UnregisterCommand { id: String },
}

/// Declarative command description used by configuration files and scripts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub action: Option<ActionSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSpec {
    Navigate(String),
    SetWidth(usize),
    Log(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_events_use_tagged_wire_format() {
        let raw = r#"[
            {"type": "key_down", "payload": {"key": "p", "ctrl": true, "shift": true}},
            {"type": "click", "payload": {"target": "list_item", "index": 2}},
            {"type": "animation_frame"}
        ]"#;
        let events: Vec<PageEvent> = serde_json::from_str(raw).expect("events");

        assert_eq!(
            events[0],
            PageEvent::KeyDown(KeyEvent::new("p").with_ctrl().with_shift())
        );
        assert_eq!(
            events[1],
            PageEvent::Click(ClickTarget::ListItem { index: 2 })
        );
        assert_eq!(events[2], PageEvent::AnimationFrame);
    }

    #[test]
    fn command_spec_action_is_externally_tagged() {
        let spec: CommandSpec = serde_json::from_str(
            r#"{"name": "Docs", "group": "Navigation", "action": {"navigate": "/docs"}}"#,
        )
        .expect("spec");

        assert_eq!(spec.action, Some(ActionSpec::Navigate("/docs".into())));
        assert_eq!(spec.id, None);
    }
}
