//! Host seam between the palette/width controllers and the page they drive.
//!
//! Every method takes `&self`: a document is a shared, single-threaded handle
//! and implementations keep their own interior state, the same way DOM
//! bindings do.

use std::time::Duration;

use serde::Serialize;
use shared::domain::TimerId;
use url::Url;

mod memory;

pub use memory::MemoryDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    /// The document root that carries layout-width markers.
    Root,
    Overlay,
    PaletteInput,
    PaletteList,
    WidthIndicator,
    Header,
}

impl Element {
    pub const ALL: [Element; 6] = [
        Element::Root,
        Element::Overlay,
        Element::PaletteInput,
        Element::PaletteList,
        Element::WidthIndicator,
        Element::Header,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            Self::Root => "body",
            Self::Overlay => "#cmd-palette",
            Self::PaletteInput => "#cmd-input",
            Self::PaletteList => "#cmd-list",
            Self::WidthIndicator => "#main-width",
            Self::Header => ".header",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub icon: String,
    /// Rendered bold ahead of the name, e.g. `"Navigation - "`.
    pub group_prefix: Option<String>,
    pub name: String,
    pub selected: bool,
}

impl ListRow {
    pub fn label(&self) -> String {
        match &self.group_prefix {
            Some(prefix) => format!("{prefix}{}", self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListView {
    Items { rows: Vec<ListRow> },
    Empty { placeholder: String },
}

impl ListView {
    pub fn rows(&self) -> &[ListRow] {
        match self {
            Self::Items { rows } => rows,
            Self::Empty { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "icon", rename_all = "snake_case")]
pub enum Indicator {
    Hidden,
    Icon(String),
}

pub trait Document {
    fn has_element(&self, element: Element) -> bool;

    fn add_class(&self, element: Element, class: &str);
    fn remove_class(&self, element: Element, class: &str);
    fn has_class(&self, element: Element, class: &str) -> bool;

    /// Whether the element takes part in layout at all.
    fn set_displayed(&self, element: Element, displayed: bool);
    fn is_displayed(&self, element: Element) -> bool;

    fn focus(&self, element: Element);
    fn active_element(&self) -> Option<Element>;

    fn input_value(&self) -> String;
    fn set_input_value(&self, value: &str);

    /// Replaces the palette list contents.
    fn render_list(&self, view: &ListView);
    /// Moves the selected marker across already rendered rows.
    fn mark_selected(&self, index: Option<usize>);

    fn set_indicator(&self, indicator: Indicator);

    fn viewport_width(&self) -> u32;

    fn location(&self) -> Url;
    /// Rewrites the current history entry without adding a new one.
    fn replace_location(&self, url: Url);
    fn navigate(&self, target: &str);

    /// Asks for one animation-frame callback before the next paint.
    fn request_animation_frame(&self);
    fn set_timeout(&self, delay: Duration) -> TimerId;
    fn clear_timeout(&self, timer: TimerId);
}

/// Fails with the first required element missing from `doc`.
pub fn require_elements(
    doc: &dyn Document,
    elements: &[Element],
) -> Result<(), shared::error::PaletteError> {
    match elements.iter().find(|element| !doc.has_element(**element)) {
        Some(missing) => Err(shared::error::PaletteError::MissingElement(
            missing.selector(),
        )),
        None => Ok(()),
    }
}
