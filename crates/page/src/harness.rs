//! Drives a [`Page`] over a [`MemoryDocument`], playing the browser's part:
//! native input effects, animation frames and elapsed timers.

use std::rc::Rc;

use page_dom::{Document, Element, Indicator, ListView, MemoryDocument};
use serde::Serialize;
use shared::{
    domain::{EventDisposition, HIDDEN_CLASS},
    error::PaletteError,
    protocol::PageEvent,
};
use tracing::debug;

use crate::{config::Settings, Page};

pub struct PageHarness {
    doc: Rc<MemoryDocument>,
    page: Page,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub palette_open: bool,
    pub filter_text: String,
    pub selected_index: Option<usize>,
    pub visible: Vec<String>,
    pub list: Option<ListView>,
    pub root_classes: Vec<String>,
    pub overlay_classes: Vec<String>,
    pub header_classes: Vec<String>,
    pub overlay_displayed: bool,
    pub indicator: Indicator,
    pub location: String,
    pub history_len: usize,
    pub focused: Option<Element>,
    pub commands: Vec<String>,
}

impl PageHarness {
    pub fn load(settings: &Settings) -> Result<Self, PaletteError> {
        let doc = Rc::new(MemoryDocument::new(
            settings.viewport_width,
            settings.location_url()?,
        ));
        Self::with_document(doc, settings)
    }

    pub fn with_document(doc: Rc<MemoryDocument>, settings: &Settings) -> Result<Self, PaletteError> {
        let page = Page::load(Rc::clone(&doc) as Rc<dyn Document>, settings)?;
        let harness = Self { doc, page };
        harness.flush_frames();
        Ok(harness)
    }

    pub fn doc(&self) -> &MemoryDocument {
        &self.doc
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Applies `event` and then runs every animation frame it requested.
    pub fn step(&mut self, event: PageEvent) -> Result<EventDisposition, PaletteError> {
        let disposition = if matches!(event, PageEvent::TimersElapsed) {
            let mut disposition = EventDisposition::Ignored;
            for timer in self.doc.take_armed_timers() {
                if self.page.dispatch(&PageEvent::TimerFired { timer })?.is_consumed() {
                    disposition = EventDisposition::Consumed;
                }
            }
            disposition
        } else {
            self.doc.simulate(&event);
            self.page.dispatch(&event)?
        };

        self.flush_frames();
        Ok(disposition)
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let (palette_open, selected_index, visible, commands) = match self.page.palette() {
            Some(palette) => {
                let controller = palette.controller();
                (
                    controller.is_open(),
                    controller.selected_index(),
                    controller
                        .visible_items()
                        .iter()
                        .map(|command| command.name.clone())
                        .collect(),
                    controller
                        .commands()
                        .iter()
                        .map(|command| command.id.clone())
                        .collect(),
                )
            }
            None => (false, None, Vec::new(), Vec::new()),
        };

        PageSnapshot {
            palette_open,
            filter_text: self.doc.input_value(),
            selected_index,
            visible,
            list: self.doc.list(),
            root_classes: self.doc.classes(Element::Root),
            overlay_classes: self.doc.classes(Element::Overlay),
            header_classes: self.doc.classes(Element::Header),
            overlay_displayed: self.doc.is_displayed(Element::Overlay),
            indicator: self.doc.indicator(),
            location: self.doc.location().to_string(),
            history_len: self.doc.history_len(),
            focused: self.doc.active_element(),
            commands,
        }
    }

    pub fn overlay_hidden(&self) -> bool {
        self.doc.has_class(Element::Overlay, HIDDEN_CLASS)
    }

    fn flush_frames(&self) {
        let mut frames = 0;
        while self.doc.take_animation_frame() {
            if let Some(palette) = self.page.palette() {
                palette.on_animation_frame();
            }
            frames += 1;
        }
        if frames > 0 {
            debug!(frames, "ran animation frames");
        }
    }
}
