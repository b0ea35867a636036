use super::*;

fn noop(name: &str) -> NewCommand {
    NewCommand::new(name, || {})
}

fn names(registry: &CommandRegistry) -> Vec<String> {
    registry
        .commands()
        .iter()
        .map(|command| command.name.clone())
        .collect()
}

#[test]
fn empty_name_is_rejected_without_changing_registry() {
    let mut registry = CommandRegistry::new();
    registry.register(noop("Go to Home")).expect("register");

    let err = registry.register(noop("")).expect_err("empty name");
    assert!(matches!(err, PaletteError::MissingName));
    assert_eq!(registry.len(), 1);
}

#[test]
fn missing_action_is_rejected_without_changing_registry() {
    let mut registry = CommandRegistry::new();
    let command = NewCommand {
        name: "Dashboard".into(),
        ..NewCommand::default()
    };

    let err = registry.register(command).expect_err("no action");
    assert!(matches!(err, PaletteError::MissingAction { ref name } if name == "Dashboard"));
    assert!(registry.is_empty());
}

#[test]
fn id_and_icon_fall_back_to_defaults() {
    let mut registry = CommandRegistry::new();
    let id = registry.register(noop("Dashboard")).expect("register");

    let command = registry.get(&id).expect("stored");
    assert_eq!(command.id, "Dashboard");
    assert_eq!(command.icon, "terminal");
    assert_eq!(command.group, None);
}

#[test]
fn duplicate_id_replaces_entry_in_place() {
    let mut registry = CommandRegistry::new();
    registry
        .register(noop("Home").with_id("nav.home"))
        .expect("home");
    registry.register(noop("Editor")).expect("editor");
    registry
        .register(
            noop("Go to Home")
                .with_id("nav.home")
                .with_icon("home")
                .with_group("Navigation"),
        )
        .expect("replace");

    assert_eq!(registry.len(), 2);
    assert_eq!(names(&registry), vec!["Go to Home", "Editor"]);
    let home = registry.get("nav.home").expect("home");
    assert_eq!(home.icon, "home");
    assert_eq!(home.group.as_deref(), Some("Navigation"));
}

#[test]
fn ids_stay_unique_across_register_and_unregister() {
    let mut registry = CommandRegistry::new();
    for name in ["a", "b", "a", "c", "b"] {
        registry.register(noop(name)).expect("register");
    }
    assert!(registry.unregister("c"));
    registry.register(noop("c")).expect("register c again");
    registry.register(noop("a")).expect("register a again");

    let mut ids: Vec<String> = registry.commands().iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    ids.dedup();
    assert_eq!(ids.len(), registry.len());
}

#[test]
fn batch_registration_stops_at_first_invalid_entry() {
    let mut registry = CommandRegistry::new();
    let err = registry
        .register_all(vec![noop("first"), noop(""), noop("third")])
        .expect_err("second entry is invalid");

    assert!(matches!(err, PaletteError::MissingName));
    assert_eq!(names(&registry), vec!["first"]);
}

#[test]
fn unregister_reports_whether_anything_was_removed() {
    let mut registry = CommandRegistry::new();
    registry.register(noop("Dashboard")).expect("register");

    assert!(registry.unregister("Dashboard"));
    assert!(!registry.unregister("Dashboard"));
    assert!(registry.is_empty());
}

#[test]
fn filter_matches_name_or_group_case_insensitively() {
    let mut registry = CommandRegistry::new();
    registry
        .register(noop("Go to Home").with_group("Navigation"))
        .expect("home");
    registry
        .register(noop("Set Width: Wide").with_group("View"))
        .expect("wide");
    registry.register(noop("Reload")).expect("reload");

    let by_group: Vec<_> = registry.filter("VIEW").iter().map(|c| c.name.clone()).collect();
    assert_eq!(by_group, vec!["Set Width: Wide"]);

    let by_name: Vec<_> = registry.filter("home").iter().map(|c| c.name.clone()).collect();
    assert_eq!(by_name, vec!["Go to Home"]);

    assert_eq!(registry.filter("").len(), 3);
    assert!(registry.filter("zzz").is_empty());
}
