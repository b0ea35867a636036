use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use shared::{
    domain::{EventDisposition, TimerId},
    error::PaletteError,
    protocol::{ClickTarget, KeyEvent},
};
use tracing::debug;

use crate::{
    command::{Command, NewCommand},
    controller::PaletteController,
    keyboard::{arbitrate_click, arbitrate_key, PaletteIntent},
};

/// Shared handle to the page's palette. Actions run after the controller
/// borrow is released, so an action may itself register or unregister
/// commands through a clone of the handle.
#[derive(Clone)]
pub struct PaletteHandle {
    inner: Rc<RefCell<PaletteController>>,
}

impl PaletteHandle {
    pub fn new(controller: PaletteController) -> Self {
        Self {
            inner: Rc::new(RefCell::new(controller)),
        }
    }

    pub fn controller(&self) -> Ref<'_, PaletteController> {
        self.inner.borrow()
    }

    pub fn register_command(&self, command: NewCommand) -> Result<String, PaletteError> {
        self.inner.borrow_mut().register_command(command)
    }

    pub fn register_commands(
        &self,
        commands: impl IntoIterator<Item = NewCommand>,
    ) -> Result<usize, PaletteError> {
        self.inner.borrow_mut().register_commands(commands)
    }

    pub fn unregister_command(&self, id: &str) -> bool {
        self.inner.borrow_mut().unregister_command(id)
    }

    pub fn commands(&self) -> Vec<Rc<Command>> {
        self.inner.borrow().commands()
    }

    pub fn is_open(&self) -> bool {
        self.inner.borrow().is_open()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.inner.borrow().selected_index()
    }

    pub fn open(&self) {
        self.inner.borrow_mut().open();
    }

    pub fn close(&self) {
        self.inner.borrow_mut().close();
    }

    pub fn toggle(&self) {
        self.inner.borrow_mut().toggle();
    }

    pub fn on_input(&self) {
        self.inner.borrow_mut().on_input();
    }

    pub fn on_animation_frame(&self) {
        self.inner.borrow_mut().on_animation_frame();
    }

    pub fn on_timer(&self, timer: TimerId) -> bool {
        self.inner.borrow_mut().on_timer(timer)
    }

    pub fn check_deep_link(&self) -> bool {
        self.inner.borrow_mut().check_deep_link()
    }

    pub fn execute_selected(&self) -> bool {
        let command = self.inner.borrow().selected_command();
        self.run(command)
    }

    pub fn handle_keydown(&self, event: &KeyEvent) -> EventDisposition {
        let intent = {
            let controller = self.inner.borrow();
            arbitrate_key(
                &controller.options().toggle,
                event,
                controller.key_context(),
            )
        };
        self.dispatch(intent)
    }

    pub fn handle_click(&self, target: ClickTarget) -> EventDisposition {
        let intent = arbitrate_click(target, self.is_open());
        self.dispatch(intent)
    }

    fn dispatch(&self, intent: Option<PaletteIntent>) -> EventDisposition {
        let Some(intent) = intent else {
            return EventDisposition::Ignored;
        };
        debug!(?intent, "palette handling event");

        match intent {
            PaletteIntent::ExecuteSelected => {
                self.execute_selected();
            }
            PaletteIntent::ExecuteAt(index) => {
                let command = self.inner.borrow().command_at(index);
                self.run(command);
            }
            other => self.inner.borrow_mut().apply(other),
        }
        EventDisposition::Consumed
    }

    fn run(&self, command: Option<Rc<Command>>) -> bool {
        let Some(command) = command else {
            return false;
        };
        debug!(id = %command.id, "executing palette command");
        command.invoke();
        self.inner.borrow_mut().close();
        true
    }
}
