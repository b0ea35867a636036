//! Page runtime: installs the palette singleton and the width controller on a
//! document and routes page events to their handlers.

use std::rc::Rc;

use page_dom::Document;
use palette::{ModalStack, PaletteController, PaletteHandle, PaletteOptions};
use shared::{
    domain::EventDisposition,
    error::PaletteError,
    protocol::{ClickTarget, CommandSpec, PageEvent},
};
use tracing::{debug, info, warn};
use width::WidthController;

pub mod config;
pub mod harness;
pub mod header;
pub mod navigation;

pub use config::{load_settings, Settings};
pub use harness::{PageHarness, PageSnapshot};

use header::HeaderController;

pub struct Page {
    doc: Rc<dyn Document>,
    modals: Rc<ModalStack>,
    palette_options: PaletteOptions,
    palette: Option<PaletteHandle>,
    width: Rc<WidthController>,
    header: HeaderController,
}

impl Page {
    /// Mirrors page start-up: palette first (including the `#cmd` check),
    /// then the width control with its render-time index, then the width
    /// commands once content has loaded.
    pub fn load(doc: Rc<dyn Document>, settings: &Settings) -> Result<Self, PaletteError> {
        let width = WidthController::new(Rc::clone(&doc), settings.width_options())?;
        let header = HeaderController::new(Rc::clone(&doc))?;
        let mut page = Self {
            doc,
            modals: Rc::new(ModalStack::new()),
            palette_options: settings.palette_options()?,
            palette: None,
            width,
            header,
        };

        let palette = page.install_palette()?;
        for spec in &settings.commands {
            palette.register_command(page.command_from_spec(spec.clone()))?;
        }

        page.width.initialize(&settings.initial_width_index);
        page.width.register_commands(page.palette.as_ref())?;

        info!(
            commands = palette.commands().len(),
            viewport = page.doc.viewport_width(),
            "page loaded"
        );
        Ok(page)
    }

    /// Returns the existing palette when one is already installed.
    pub fn install_palette(&mut self) -> Result<PaletteHandle, PaletteError> {
        if let Some(existing) = &self.palette {
            debug!("command palette already initialized");
            return Ok(existing.clone());
        }

        info!("initializing command palette");
        let controller = PaletteController::new(
            Rc::clone(&self.doc),
            Rc::clone(&self.modals),
            self.palette_options.clone(),
        )?;
        let handle = PaletteHandle::new(controller);
        handle.register_commands(navigation::default_commands(&self.doc))?;
        self.palette = Some(handle.clone());

        handle.check_deep_link();
        Ok(handle)
    }

    pub fn palette(&self) -> Option<&PaletteHandle> {
        self.palette.as_ref()
    }

    pub fn width(&self) -> &Rc<WidthController> {
        &self.width
    }

    pub fn modals(&self) -> &Rc<ModalStack> {
        &self.modals
    }

    pub fn document(&self) -> &Rc<dyn Document> {
        &self.doc
    }

    pub fn command_from_spec(&self, spec: CommandSpec) -> palette::NewCommand {
        navigation::command_from_spec(spec, &self.doc, &self.width)
    }

    /// Script-facing batch registration. Entries are applied in order and
    /// the first invalid one stops the batch.
    pub fn register_command_specs(&self, value: &serde_json::Value) -> Result<usize, PaletteError> {
        let Some(items) = value.as_array() else {
            return Err(PaletteError::NotASequence {
                found: json_kind(value),
            });
        };
        let Some(palette) = &self.palette else {
            warn!("command palette not loaded; ignoring command registration");
            return Ok(0);
        };

        let mut registered = 0;
        for item in items {
            let spec: CommandSpec = serde_json::from_value(item.clone())
                .map_err(|err| PaletteError::MalformedSpec(err.to_string()))?;
            palette.register_command(self.command_from_spec(spec))?;
            registered += 1;
        }
        Ok(registered)
    }

    /// Runs the handlers for `event` in registration order: palette first,
    /// then width, then header.
    pub fn dispatch(&mut self, event: &PageEvent) -> Result<EventDisposition, PaletteError> {
        let palette = self.palette.clone();
        let disposition = match event {
            PageEvent::KeyDown(key) => palette
                .map(|palette| palette.handle_keydown(key))
                .unwrap_or(EventDisposition::Ignored),
            PageEvent::Input { .. } => {
                if let Some(palette) = palette {
                    palette.on_input();
                }
                EventDisposition::Ignored
            }
            PageEvent::Click(target) => {
                let mut disposition = palette
                    .map(|palette| palette.handle_click(*target))
                    .unwrap_or(EventDisposition::Ignored);
                if *target == ClickTarget::WidthIndicator {
                    self.width.on_indicator_click();
                    disposition = EventDisposition::Consumed;
                }
                disposition
            }
            PageEvent::Resize { .. } => {
                self.width.on_resize();
                EventDisposition::Ignored
            }
            PageEvent::HashChange { .. } => match palette {
                Some(palette) if palette.check_deep_link() => EventDisposition::Consumed,
                _ => EventDisposition::Ignored,
            },
            PageEvent::Scroll { offset } => {
                self.header.on_scroll(*offset);
                EventDisposition::Ignored
            }
            PageEvent::AnimationFrame => {
                if let Some(palette) = palette {
                    palette.on_animation_frame();
                }
                EventDisposition::Ignored
            }
            PageEvent::TimerFired { timer } => match palette {
                Some(palette) if palette.on_timer(*timer) => EventDisposition::Consumed,
                _ => EventDisposition::Ignored,
            },
            PageEvent::TimersElapsed => EventDisposition::Ignored,
            PageEvent::RegisterCommands { commands } => {
                self.register_command_specs(commands)?;
                EventDisposition::Consumed
            }
            PageEvent::UnregisterCommand { id } => match palette {
                Some(palette) if palette.unregister_command(id) => EventDisposition::Consumed,
                _ => EventDisposition::Ignored,
            },
        };
        Ok(disposition)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
