use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    time::Duration,
};

use shared::{
    domain::TimerId,
    protocol::{ClickTarget, PageEvent},
};
use tracing::warn;
use url::Url;

use crate::{Document, Element, Indicator, ListView};

/// In-process document used by tests and the replay harness.
#[derive(Debug)]
pub struct MemoryDocument {
    inner: RefCell<Inner>,
}

#[derive(Debug)]
struct Inner {
    present: BTreeSet<Element>,
    classes: BTreeMap<Element, BTreeSet<String>>,
    out_of_layout: BTreeSet<Element>,
    focused: Option<Element>,
    input_value: String,
    list: Option<ListView>,
    list_renders: usize,
    indicator: Indicator,
    viewport_width: u32,
    location: Url,
    history: Vec<Url>,
    pending_frames: usize,
    timers: BTreeMap<TimerId, Duration>,
    next_timer: u64,
}

impl MemoryDocument {
    pub fn new(viewport_width: u32, location: Url) -> Self {
        Self {
            inner: RefCell::new(Inner {
                present: Element::ALL.into_iter().collect(),
                classes: BTreeMap::new(),
                out_of_layout: BTreeSet::new(),
                focused: None,
                input_value: String::new(),
                list: None,
                list_renders: 0,
                indicator: Indicator::Hidden,
                viewport_width,
                location: location.clone(),
                history: vec![location],
                pending_frames: 0,
                timers: BTreeMap::new(),
                next_timer: 1,
            }),
        }
    }

    pub fn without(self, element: Element) -> Self {
        self.inner.borrow_mut().present.remove(&element);
        self
    }

    pub fn classes(&self, element: Element) -> Vec<String> {
        self.inner
            .borrow()
            .classes
            .get(&element)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn list(&self) -> Option<ListView> {
        self.inner.borrow().list.clone()
    }

    /// Number of full list rebuilds so far.
    pub fn list_renders(&self) -> usize {
        self.inner.borrow().list_renders
    }

    pub fn indicator(&self) -> Indicator {
        self.inner.borrow().indicator.clone()
    }

    pub fn history_len(&self) -> usize {
        self.inner.borrow().history.len()
    }

    pub fn set_viewport_width(&self, width: u32) {
        self.inner.borrow_mut().viewport_width = width;
    }

    pub fn push_location(&self, url: Url) {
        let mut inner = self.inner.borrow_mut();
        inner.history.push(url.clone());
        inner.location = url;
    }

    pub fn blur(&self) {
        self.inner.borrow_mut().focused = None;
    }

    /// Consumes one requested animation frame, if any.
    pub fn take_animation_frame(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.pending_frames == 0 {
            return false;
        }
        inner.pending_frames -= 1;
        true
    }

    pub fn armed_timers(&self) -> Vec<(TimerId, Duration)> {
        self.inner
            .borrow()
            .timers
            .iter()
            .map(|(id, delay)| (*id, *delay))
            .collect()
    }

    pub fn take_armed_timers(&self) -> Vec<TimerId> {
        let timers = std::mem::take(&mut self.inner.borrow_mut().timers);
        timers.into_keys().collect()
    }

    /// Applies what a browser does on its own before page handlers see `event`.
    pub fn simulate(&self, event: &PageEvent) {
        match event {
            PageEvent::Input { value } => self.set_input_value(value),
            PageEvent::Resize { width } => self.set_viewport_width(*width),
            PageEvent::HashChange { url } => match self.location().join(url) {
                Ok(url) => self.push_location(url),
                Err(err) => warn!(%url, error = %err, "ignoring unparsable hash change"),
            },
            PageEvent::Click(ClickTarget::PaletteInput) => self.focus(Element::PaletteInput),
            PageEvent::Click(ClickTarget::Elsewhere | ClickTarget::WidthIndicator) => self.blur(),
            _ => {}
        }
    }
}

impl Document for MemoryDocument {
    fn has_element(&self, element: Element) -> bool {
        self.inner.borrow().present.contains(&element)
    }

    fn add_class(&self, element: Element, class: &str) {
        if !self.has_element(element) {
            return;
        }
        self.inner
            .borrow_mut()
            .classes
            .entry(element)
            .or_default()
            .insert(class.to_string());
    }

    fn remove_class(&self, element: Element, class: &str) {
        if let Some(set) = self.inner.borrow_mut().classes.get_mut(&element) {
            set.remove(class);
        }
    }

    fn has_class(&self, element: Element, class: &str) -> bool {
        self.inner
            .borrow()
            .classes
            .get(&element)
            .is_some_and(|set| set.contains(class))
    }

    fn set_displayed(&self, element: Element, displayed: bool) {
        let mut inner = self.inner.borrow_mut();
        if displayed {
            inner.out_of_layout.remove(&element);
        } else {
            inner.out_of_layout.insert(element);
        }
    }

    fn is_displayed(&self, element: Element) -> bool {
        let inner = self.inner.borrow();
        inner.present.contains(&element) && !inner.out_of_layout.contains(&element)
    }

    fn focus(&self, element: Element) {
        if self.has_element(element) {
            self.inner.borrow_mut().focused = Some(element);
        }
    }

    fn active_element(&self) -> Option<Element> {
        self.inner.borrow().focused
    }

    fn input_value(&self) -> String {
        self.inner.borrow().input_value.clone()
    }

    fn set_input_value(&self, value: &str) {
        self.inner.borrow_mut().input_value = value.to_string();
    }

    fn render_list(&self, view: &ListView) {
        let mut inner = self.inner.borrow_mut();
        inner.list = Some(view.clone());
        inner.list_renders += 1;
    }

    fn mark_selected(&self, index: Option<usize>) {
        if let Some(ListView::Items { rows }) = self.inner.borrow_mut().list.as_mut() {
            for (i, row) in rows.iter_mut().enumerate() {
                row.selected = Some(i) == index;
            }
        }
    }

    fn set_indicator(&self, indicator: Indicator) {
        self.inner.borrow_mut().indicator = indicator;
    }

    fn viewport_width(&self) -> u32 {
        self.inner.borrow().viewport_width
    }

    fn location(&self) -> Url {
        self.inner.borrow().location.clone()
    }

    fn replace_location(&self, url: Url) {
        let mut inner = self.inner.borrow_mut();
        if let Some(current) = inner.history.last_mut() {
            *current = url.clone();
        }
        inner.location = url;
    }

    fn navigate(&self, target: &str) {
        match self.location().join(target) {
            Ok(url) => self.push_location(url),
            Err(err) => warn!(destination = target, error = %err, "navigation target is not a valid url"),
        }
    }

    fn request_animation_frame(&self) {
        self.inner.borrow_mut().pending_frames += 1;
    }

    fn set_timeout(&self, delay: Duration) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId(inner.next_timer);
        inner.next_timer += 1;
        inner.timers.insert(id, delay);
        id
    }

    fn clear_timeout(&self, timer: TimerId) {
        self.inner.borrow_mut().timers.remove(&timer);
    }
}
