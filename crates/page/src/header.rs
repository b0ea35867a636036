use std::rc::Rc;

use page_dom::{require_elements, Document, Element};
use shared::{domain::SCROLLED_CLASS, error::PaletteError};

/// Scroll offset at which the header switches to its condensed style.
pub const SCROLL_THRESHOLD: u32 = 16;

pub struct HeaderController {
    doc: Rc<dyn Document>,
}

impl HeaderController {
    pub fn new(doc: Rc<dyn Document>) -> Result<Self, PaletteError> {
        require_elements(doc.as_ref(), &[Element::Header])?;
        Ok(Self { doc })
    }

    pub fn on_scroll(&self, offset: u32) {
        if offset < SCROLL_THRESHOLD {
            self.doc.remove_class(Element::Header, SCROLLED_CLASS);
        } else {
            self.doc.add_class(Element::Header, SCROLLED_CLASS);
        }
    }
}
