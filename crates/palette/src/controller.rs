//! Palette lifecycle and session state.
//!
//! The controller is `Closed` or `Open`. Opening shows the overlay with the
//! `hidden` class still applied and lifts it on the next animation frame so
//! the host animates the transition; closing re-applies `hidden` but leaves
//! the overlay in layout unless a hide delay is configured.

use std::{rc::Rc, time::Duration};

use page_dom::{require_elements, Document, Element};
use shared::{
    domain::{TimerId, HIDDEN_CLASS, PALETTE_INTERFACE},
    error::PaletteError,
};
use tracing::{debug, info};

use crate::{
    command::{Command, NewCommand},
    keyboard::{KeyCombo, KeyContext, PaletteIntent},
    modal::ModalStack,
    registry::CommandRegistry,
    render::build_list_view,
};

#[derive(Debug, Clone)]
pub struct PaletteOptions {
    pub toggle: KeyCombo,
    /// URL fragment (without `#`) that opens the palette.
    pub deep_link_fragment: String,
    /// When set, a closed overlay is taken out of layout after this delay.
    pub hide_delay: Option<Duration>,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            toggle: KeyCombo::default(),
            deep_link_fragment: "cmd".into(),
            hide_delay: None,
        }
    }
}

pub struct PaletteController {
    doc: Rc<dyn Document>,
    modals: Rc<ModalStack>,
    options: PaletteOptions,
    registry: CommandRegistry,
    visible: Vec<Rc<Command>>,
    selected: Option<usize>,
    open: bool,
    reveal_pending: bool,
    hide_timer: Option<TimerId>,
}

impl PaletteController {
    pub fn new(
        doc: Rc<dyn Document>,
        modals: Rc<ModalStack>,
        options: PaletteOptions,
    ) -> Result<Self, PaletteError> {
        require_elements(
            doc.as_ref(),
            &[Element::Overlay, Element::PaletteInput, Element::PaletteList],
        )?;
        doc.add_class(Element::Overlay, HIDDEN_CLASS);

        Ok(Self {
            doc,
            modals,
            options,
            registry: CommandRegistry::new(),
            visible: Vec::new(),
            selected: None,
            open: false,
            reveal_pending: false,
            hide_timer: None,
        })
    }

    pub fn options(&self) -> &PaletteOptions {
        &self.options
    }

    pub fn register_command(&mut self, command: NewCommand) -> Result<String, PaletteError> {
        let id = self.registry.register(command)?;
        debug!(%id, "registered palette command");
        Ok(id)
    }

    pub fn register_commands(
        &mut self,
        commands: impl IntoIterator<Item = NewCommand>,
    ) -> Result<usize, PaletteError> {
        self.registry.register_all(commands)
    }

    pub fn unregister_command(&mut self, id: &str) -> bool {
        self.registry.unregister(id)
    }

    pub fn commands(&self) -> Vec<Rc<Command>> {
        self.registry.commands()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn filter_text(&self) -> String {
        self.doc.input_value()
    }

    pub fn visible_items(&self) -> &[Rc<Command>] {
        &self.visible
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_command(&self) -> Option<Rc<Command>> {
        self.selected.and_then(|index| self.command_at(index))
    }

    pub fn command_at(&self, index: usize) -> Option<Rc<Command>> {
        self.visible.get(index).cloned()
    }

    pub fn open(&mut self) {
        if let Some(timer) = self.hide_timer.take() {
            self.doc.clear_timeout(timer);
        }

        self.doc.set_displayed(Element::Overlay, true);
        self.doc.add_class(Element::Overlay, HIDDEN_CLASS);
        self.reveal_pending = true;
        self.doc.request_animation_frame();

        self.open = true;
        self.show(self.registry.commands());
        self.modals.push(PALETTE_INTERFACE);
        debug!(commands = self.registry.len(), "palette opened");
    }

    pub fn close(&mut self) {
        self.doc.add_class(Element::Overlay, HIDDEN_CLASS);
        self.doc.set_input_value("");
        self.open = false;
        self.reveal_pending = false;

        self.show(self.registry.commands());
        self.modals.remove(PALETTE_INTERFACE);

        if let Some(delay) = self.options.hide_delay {
            if let Some(stale) = self.hide_timer.take() {
                self.doc.clear_timeout(stale);
            }
            self.hide_timer = Some(self.doc.set_timeout(delay));
        }
        debug!("palette closed");
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Lifts the `hidden` class requested by [`Self::open`] and lists the
    /// registry again, picking up commands registered since the open call.
    pub fn on_animation_frame(&mut self) {
        if !std::mem::take(&mut self.reveal_pending) || !self.open {
            return;
        }
        self.doc.remove_class(Element::Overlay, HIDDEN_CLASS);
        self.doc.focus(Element::PaletteInput);
        self.show(self.registry.commands());
    }

    /// Returns whether `timer` was the pending hide timer.
    pub fn on_timer(&mut self, timer: TimerId) -> bool {
        if self.hide_timer != Some(timer) {
            return false;
        }
        self.hide_timer = None;
        if !self.open && self.doc.has_class(Element::Overlay, HIDDEN_CLASS) {
            self.doc.set_displayed(Element::Overlay, false);
        }
        true
    }

    pub fn on_input(&mut self) {
        let query = self.doc.input_value();
        self.filter(&query);
    }

    pub fn filter(&mut self, query: &str) {
        let items = self.registry.filter(query);
        debug!(query, matches = items.len(), "filtered palette commands");
        self.show(items);
    }

    pub fn move_selection_up(&mut self) {
        let Some(current) = self.selected else {
            return;
        };
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        self.selected = Some(if current > 0 { current - 1 } else { len - 1 });
        self.doc.mark_selected(self.selected);
    }

    pub fn move_selection_down(&mut self) {
        let Some(current) = self.selected else {
            return;
        };
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        self.selected = Some(if current + 1 < len { current + 1 } else { 0 });
        self.doc.mark_selected(self.selected);
    }

    /// Runs the selected action while `self` stays borrowed; owners sharing
    /// the controller should go through [`crate::PaletteHandle`] instead.
    pub fn execute_selected(&mut self) -> bool {
        let Some(command) = self.selected_command() else {
            return false;
        };
        command.invoke();
        self.close();
        true
    }

    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            palette_open: self.open,
            input_focused: self.doc.active_element() == Some(Element::PaletteInput),
            other_interface_open: self.modals.any_open_except(PALETTE_INTERFACE),
        }
    }

    pub fn apply(&mut self, intent: PaletteIntent) {
        match intent {
            PaletteIntent::Toggle => self.toggle(),
            PaletteIntent::Open => self.open(),
            PaletteIntent::Close => self.close(),
            PaletteIntent::MoveUp => self.move_selection_up(),
            PaletteIntent::MoveDown => self.move_selection_down(),
            PaletteIntent::ExecuteSelected => {
                self.execute_selected();
            }
            PaletteIntent::ExecuteAt(index) => {
                if let Some(command) = self.command_at(index) {
                    command.invoke();
                    self.close();
                }
            }
        }
    }

    /// Opens the palette when the location carries the deep-link fragment,
    /// then strips the fragment without adding a history entry.
    pub fn check_deep_link(&mut self) -> bool {
        let mut location = self.doc.location();
        if location.fragment() != Some(self.options.deep_link_fragment.as_str()) {
            return false;
        }

        info!(%location, "opening command palette from url fragment");
        self.open();
        location.set_fragment(None);
        self.doc.replace_location(location);
        true
    }

    fn show(&mut self, items: Vec<Rc<Command>>) {
        self.visible = items;
        self.selected = first_index(&self.visible);
        self.doc
            .render_list(&build_list_view(&self.visible, self.selected));
    }
}

fn first_index(items: &[Rc<Command>]) -> Option<usize> {
    (!items.is_empty()).then_some(0)
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
