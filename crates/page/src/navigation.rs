use std::rc::Rc;

use page_dom::Document;
use palette::{Action, NewCommand};
use shared::protocol::{ActionSpec, CommandSpec};
use tracing::info;
use width::{SetWidth, WidthController};

pub struct Navigate {
    doc: Rc<dyn Document>,
    target: String,
}

impl Navigate {
    pub fn new(doc: Rc<dyn Document>, target: impl Into<String>) -> Self {
        Self {
            doc,
            target: target.into(),
        }
    }
}

impl Action for Navigate {
    fn invoke(&self) {
        info!(destination = %self.target, "navigating");
        self.doc.navigate(&self.target);
    }
}

pub fn default_commands(doc: &Rc<dyn Document>) -> Vec<NewCommand> {
    [
        ("Go to Home", "/", "home"),
        ("Markdown Editor", "/editor", "edit"),
        ("Dashboard", "/dash", "dashboard"),
    ]
    .into_iter()
    .map(|(name, target, icon)| {
        NewCommand::new(name, Navigate::new(Rc::clone(doc), target))
            .with_icon(icon)
            .with_group("Navigation")
    })
    .collect()
}

/// Builds a registration request from a declarative spec. A spec without an
/// action yields a request the registry rejects.
pub fn command_from_spec(
    spec: CommandSpec,
    doc: &Rc<dyn Document>,
    width: &Rc<WidthController>,
) -> NewCommand {
    let action: Option<Rc<dyn Action>> = spec.action.map(|action| -> Rc<dyn Action> {
        match action {
            ActionSpec::Navigate(target) => Rc::new(Navigate::new(Rc::clone(doc), target)),
            ActionSpec::SetWidth(index) => Rc::new(SetWidth::new(Rc::clone(width), index)),
            ActionSpec::Log(message) => Rc::new(move || info!(%message, "palette action")),
        }
    });

    NewCommand {
        id: spec.id,
        name: spec.name,
        action,
        icon: spec.icon,
        group: spec.group,
    }
}
