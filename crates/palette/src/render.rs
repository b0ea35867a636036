use std::rc::Rc;

use page_dom::{ListRow, ListView};
use shared::domain::NO_RESULTS_TEXT;

use crate::command::Command;

pub fn build_list_view(items: &[Rc<Command>], selected: Option<usize>) -> ListView {
    if items.is_empty() {
        return ListView::Empty {
            placeholder: NO_RESULTS_TEXT.to_string(),
        };
    }

    let rows = items
        .iter()
        .enumerate()
        .map(|(index, command)| ListRow {
            icon: command.icon.clone(),
            group_prefix: command.group.as_ref().map(|group| format!("{group} - ")),
            name: command.name.clone(),
            selected: Some(index) == selected,
        })
        .collect();
    ListView::Items { rows }
}
