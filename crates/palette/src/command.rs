use std::{fmt, rc::Rc};

use shared::domain::DEFAULT_COMMAND_ICON;

/// Something the palette can run. Implemented for plain closures and for
/// small command objects owned by whichever component registers them.
pub trait Action {
    fn invoke(&self);
}

impl<F: Fn()> Action for F {
    fn invoke(&self) {
        self()
    }
}

pub struct Command {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub group: Option<String>,
    action: Rc<dyn Action>,
}

impl Command {
    pub fn invoke(&self) {
        self.action.invoke();
    }

    /// `lower_query` must already be lowercased.
    pub fn matches(&self, lower_query: &str) -> bool {
        self.name.to_lowercase().contains(lower_query)
            || self
                .group
                .as_ref()
                .is_some_and(|group| group.to_lowercase().contains(lower_query))
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("icon", &self.icon)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

/// An unvalidated registration request.
#[derive(Default)]
pub struct NewCommand {
    pub id: Option<String>,
    pub name: String,
    pub action: Option<Rc<dyn Action>>,
    pub icon: Option<String>,
    pub group: Option<String>,
}

impl NewCommand {
    pub fn new(name: impl Into<String>, action: impl Action + 'static) -> Self {
        Self {
            name: name.into(),
            action: Some(Rc::new(action)),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub(crate) fn into_command(self, action: Rc<dyn Action>) -> Command {
        Command {
            id: self.id.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            icon: self
                .icon
                .unwrap_or_else(|| DEFAULT_COMMAND_ICON.to_string()),
            group: self.group,
            action,
        }
    }
}

impl fmt::Debug for NewCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewCommand")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("has_action", &self.action.is_some())
            .field("icon", &self.icon)
            .field("group", &self.group)
            .finish()
    }
}
