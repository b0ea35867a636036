use std::cell::RefCell;

use shared::domain::InterfaceId;

/// Tracks which modal interfaces currently own the keyboard. Shared by `Rc`
/// between every component that needs to arbitrate Escape.
#[derive(Debug, Default)]
pub struct ModalStack {
    open: RefCell<Vec<InterfaceId>>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// An interface already open is moved to the top rather than duplicated.
    pub fn push(&self, id: InterfaceId) {
        let mut open = self.open.borrow_mut();
        open.retain(|existing| *existing != id);
        open.push(id);
    }

    pub fn remove(&self, id: InterfaceId) -> bool {
        let mut open = self.open.borrow_mut();
        let before = open.len();
        open.retain(|existing| *existing != id);
        open.len() != before
    }

    pub fn is_open(&self, id: InterfaceId) -> bool {
        self.open.borrow().contains(&id)
    }

    pub fn any_open(&self) -> bool {
        !self.open.borrow().is_empty()
    }

    pub fn any_open_except(&self, id: InterfaceId) -> bool {
        self.open.borrow().iter().any(|existing| *existing != id)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    const HELP: InterfaceId = InterfaceId("help");
    const SEARCH: InterfaceId = InterfaceId("search");

    #[test]
    fn push_does_not_duplicate_entries() {
        let modals = ModalStack::new();
        modals.push(HELP);
        modals.push(SEARCH);
        modals.push(HELP);

        assert!(modals.remove(HELP));
        assert!(!modals.is_open(HELP));
        assert!(modals.is_open(SEARCH));
        assert!(!modals.any_open_except(SEARCH));
    }

    #[test]
    fn any_open_except_ignores_the_asking_interface() {
        let modals = ModalStack::new();
        modals.push(HELP);

        assert!(modals.any_open());
        assert!(!modals.any_open_except(HELP));
        assert!(modals.any_open_except(SEARCH));
        assert!(!modals.remove(SEARCH));
    }
}
