use std::rc::Rc;

use indexmap::IndexMap;
use shared::error::PaletteError;

use crate::command::{Command, NewCommand};

/// Insertion-ordered commands keyed by id. Re-registering an id replaces the
/// entry in place.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, Rc<Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id the command was stored under.
    pub fn register(&mut self, command: NewCommand) -> Result<String, PaletteError> {
        if command.name.is_empty() {
            return Err(PaletteError::MissingName);
        }
        let Some(action) = command.action.clone() else {
            return Err(PaletteError::MissingAction {
                name: command.name,
            });
        };

        let command = command.into_command(action);
        let id = command.id.clone();
        self.commands.insert(id.clone(), Rc::new(command));
        Ok(id)
    }

    /// Registers in order and stops at the first invalid entry; earlier
    /// entries stay registered.
    pub fn register_all(
        &mut self,
        commands: impl IntoIterator<Item = NewCommand>,
    ) -> Result<usize, PaletteError> {
        let mut count = 0;
        for command in commands {
            self.register(command)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn unregister(&mut self, id: &str) -> bool {
        self.commands.shift_remove(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<Rc<Command>> {
        self.commands.get(id).cloned()
    }

    pub fn commands(&self) -> Vec<Rc<Command>> {
        self.commands.values().cloned().collect()
    }

    /// Case-insensitive substring match on name or group.
    pub fn filter(&self, query: &str) -> Vec<Rc<Command>> {
        let lower = query.to_lowercase();
        self.commands
            .values()
            .filter(|command| command.matches(&lower))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
