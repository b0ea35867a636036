//! Layout-width presets: root markers, the cycling indicator control, and
//! the "Set Width" palette commands.

use std::{cell::Cell, rc::Rc};

use page_dom::{require_elements, Document, Element, Indicator};
use palette::{Action, NewCommand, PaletteHandle};
use shared::{
    domain::{WidthPreset, WIDTH_PRESETS},
    error::PaletteError,
};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct WidthOptions {
    pub presets: Vec<WidthPreset>,
    /// Shown instead of hiding the indicator when fewer than two presets fit.
    pub neutral_icon: Option<String>,
}

impl Default for WidthOptions {
    fn default() -> Self {
        Self {
            presets: WIDTH_PRESETS.to_vec(),
            neutral_icon: None,
        }
    }
}

/// A preset offered at the current viewport width, with its position in the
/// full preset list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailablePreset {
    pub index: usize,
    pub preset: WidthPreset,
}

pub struct WidthController {
    doc: Rc<dyn Document>,
    presets: Vec<WidthPreset>,
    neutral_icon: Option<String>,
    last_applied: Cell<usize>,
}

impl WidthController {
    pub fn new(doc: Rc<dyn Document>, options: WidthOptions) -> Result<Rc<Self>, PaletteError> {
        require_elements(doc.as_ref(), &[Element::Root, Element::WidthIndicator])?;
        Ok(Rc::new(Self {
            doc,
            presets: options.presets,
            neutral_icon: options.neutral_icon,
            last_applied: Cell::new(0),
        }))
    }

    /// Applies the render-time preset index, then syncs the indicator.
    pub fn initialize(&self, raw_initial_index: &str) {
        let index = parse_initial_index(raw_initial_index);
        self.apply_width_class(index);
        self.refresh_indicator();
    }

    pub fn last_applied(&self) -> usize {
        self.last_applied.get()
    }

    pub fn determine_available_list(&self) -> Vec<AvailablePreset> {
        let viewport = self.doc.viewport_width();
        self.presets
            .iter()
            .enumerate()
            .filter(|(index, preset)| *index == 0 || viewport >= preset.min_viewport_width)
            .map(|(index, preset)| AvailablePreset {
                index,
                preset: *preset,
            })
            .collect()
    }

    /// Index 0 is the baseline and carries no marker.
    pub fn apply_width_class(&self, index: usize) {
        for preset in &self.presets {
            self.doc.remove_class(Element::Root, preset.name);
        }
        if index > 0 && index < self.presets.len() {
            self.doc.add_class(Element::Root, self.presets[index].name);
            self.last_applied.set(index);
        } else {
            self.last_applied.set(0);
        }
        debug!(index, "applied width preset");
        self.refresh_indicator();
    }

    /// Position of the active preset within `available`, defaulting to the first.
    fn active_position(&self, available: &[AvailablePreset]) -> usize {
        available
            .iter()
            .position(|entry| self.doc.has_class(Element::Root, entry.preset.name))
            .unwrap_or(0)
    }

    pub fn refresh_indicator(&self) {
        let available = self.determine_available_list();
        if available.len() < 2 {
            let indicator = match &self.neutral_icon {
                Some(icon) => Indicator::Icon(icon.clone()),
                None => Indicator::Hidden,
            };
            self.doc.set_indicator(indicator);
            return;
        }

        let next = (self.active_position(&available) + 1) % available.len();
        self.doc
            .set_indicator(Indicator::Icon(available[next].preset.icon.to_string()));
    }

    pub fn on_indicator_click(&self) {
        let available = self.determine_available_list();
        if available.len() < 2 {
            self.refresh_indicator();
            return;
        }

        let next = (self.active_position(&available) + 1) % available.len();
        self.apply_width_class(available[next].index);
    }

    pub fn on_resize(&self) {
        self.refresh_indicator();
    }

    pub fn commands(self: &Rc<Self>) -> Vec<NewCommand> {
        ["Normal", "Wide", "Full"]
            .into_iter()
            .enumerate()
            .filter_map(|(index, label)| {
                let preset = self.presets.get(index)?;
                Some(
                    NewCommand::new(
                        format!("Set Width: {label}"),
                        SetWidth {
                            controller: Rc::clone(self),
                            index,
                        },
                    )
                    .with_icon(preset.icon)
                    .with_group("View"),
                )
            })
            .collect()
    }

    /// A missing palette only logs; the width control works without it.
    pub fn register_commands(
        self: &Rc<Self>,
        palette: Option<&PaletteHandle>,
    ) -> Result<usize, PaletteError> {
        match palette {
            Some(palette) => palette.register_commands(self.commands()),
            None => {
                warn!("command palette not loaded; width commands not registered");
                Ok(0)
            }
        }
    }
}

pub struct SetWidth {
    controller: Rc<WidthController>,
    index: usize,
}

impl SetWidth {
    pub fn new(controller: Rc<WidthController>, index: usize) -> Self {
        Self { controller, index }
    }
}

impl Action for SetWidth {
    fn invoke(&self) {
        self.controller.apply_width_class(self.index);
    }
}

/// Integer-prefix parse of the render-time index; anything else is 0.
pub fn parse_initial_index(raw: &str) -> usize {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    match digits.parse::<usize>() {
        Ok(index) => index,
        Err(_) => {
            warn!(raw, "initial width index is not a number; using baseline");
            0
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
