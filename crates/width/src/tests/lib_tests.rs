use super::*;

use page_dom::MemoryDocument;
use palette::{ModalStack, PaletteController, PaletteOptions};
use url::Url;

fn setup(viewport: u32) -> (Rc<MemoryDocument>, Rc<WidthController>) {
    setup_with(viewport, WidthOptions::default())
}

fn setup_with(viewport: u32, options: WidthOptions) -> (Rc<MemoryDocument>, Rc<WidthController>) {
    let doc = Rc::new(MemoryDocument::new(
        viewport,
        Url::parse("http://localhost/").expect("url"),
    ));
    let controller = WidthController::new(doc.clone(), options).expect("width controller");
    (doc, controller)
}

fn available_names(controller: &WidthController) -> Vec<&'static str> {
    controller
        .determine_available_list()
        .iter()
        .map(|entry| entry.preset.name)
        .collect()
}

fn icon(name: &str) -> Indicator {
    Indicator::Icon(name.to_string())
}

#[test]
fn availability_follows_viewport_gates() {
    let (doc, controller) = setup(700);
    assert_eq!(available_names(&controller), vec!["normal"]);

    doc.set_viewport_width(800);
    assert_eq!(available_names(&controller), vec!["normal", "wide"]);

    doc.set_viewport_width(1200);
    assert_eq!(available_names(&controller), vec!["normal", "wide", "full"]);
}

#[test]
fn applying_presets_never_leaves_two_markers() {
    let (doc, controller) = setup(1440);

    controller.apply_width_class(1);
    assert_eq!(doc.classes(Element::Root), vec!["wide"]);

    controller.apply_width_class(2);
    assert_eq!(doc.classes(Element::Root), vec!["full"]);
    assert_eq!(controller.last_applied(), 2);

    controller.apply_width_class(0);
    assert!(doc.classes(Element::Root).is_empty());
    assert_eq!(controller.last_applied(), 0);
}

#[test]
fn out_of_range_index_only_clears_markers() {
    let (doc, controller) = setup(1440);
    controller.apply_width_class(2);
    controller.apply_width_class(7);

    assert!(doc.classes(Element::Root).is_empty());
}

#[test]
fn indicator_shows_the_next_available_preset() {
    let (doc, controller) = setup(1440);

    controller.refresh_indicator();
    assert_eq!(doc.indicator(), icon("arrow_range"));

    controller.apply_width_class(1);
    assert_eq!(doc.indicator(), icon("fullscreen"));

    controller.apply_width_class(2);
    assert_eq!(doc.indicator(), icon("fullscreen_exit"));
}

#[test]
fn indicator_hides_or_goes_neutral_on_narrow_viewports() {
    let (doc, controller) = setup(600);
    doc.set_indicator(icon("arrow_range"));
    controller.refresh_indicator();
    assert_eq!(doc.indicator(), Indicator::Hidden);

    let options = WidthOptions {
        neutral_icon: Some("width".into()),
        ..WidthOptions::default()
    };
    let (doc, controller) = setup_with(600, options);
    controller.refresh_indicator();
    assert_eq!(doc.indicator(), icon("width"));
}

#[test]
fn clicks_cycle_through_available_presets() {
    let (doc, controller) = setup(1440);
    let mut seen = Vec::new();
    for _ in 0..3 {
        controller.on_indicator_click();
        seen.push(doc.classes(Element::Root));
    }

    assert_eq!(
        seen,
        vec![vec!["wide".to_string()], vec!["full".to_string()], vec![]]
    );
}

#[test]
fn clicks_wrap_within_the_reduced_list() {
    let (doc, controller) = setup(1000);
    controller.apply_width_class(1);

    controller.on_indicator_click();
    assert!(doc.classes(Element::Root).is_empty());
    assert_eq!(doc.indicator(), icon("arrow_range"));
}

#[test]
fn clicks_with_one_option_only_refresh() {
    let (doc, controller) = setup(600);
    controller.apply_width_class(2);

    controller.on_indicator_click();
    assert_eq!(doc.classes(Element::Root), vec!["full"]);
    assert_eq!(doc.indicator(), Indicator::Hidden);
}

#[test]
fn resize_keeps_an_unavailable_active_preset() {
    let (doc, controller) = setup(1440);
    controller.apply_width_class(2);

    doc.set_viewport_width(900);
    controller.on_resize();

    assert_eq!(doc.classes(Element::Root), vec!["full"]);
    assert_eq!(doc.indicator(), icon("arrow_range"));
}

#[test]
fn initialize_applies_render_time_index() {
    let (doc, controller) = setup(1440);
    controller.initialize("2");
    assert_eq!(doc.classes(Element::Root), vec!["full"]);
    assert_eq!(doc.indicator(), icon("fullscreen_exit"));
}

#[test]
fn initial_index_parses_like_an_integer_prefix() {
    assert_eq!(parse_initial_index("1"), 1);
    assert_eq!(parse_initial_index(" 2px"), 2);
    assert_eq!(parse_initial_index("{{ initial_width_index }}"), 0);
    assert_eq!(parse_initial_index(""), 0);
}

#[test]
fn width_commands_apply_their_preset() {
    let (doc, controller) = setup(1440);
    let palette = PaletteHandle::new(
        PaletteController::new(
            doc.clone(),
            Rc::new(ModalStack::new()),
            PaletteOptions::default(),
        )
        .expect("palette"),
    );

    assert_eq!(controller.register_commands(Some(&palette)).expect("register"), 3);
    let names: Vec<String> = palette.commands().iter().map(|c| c.name.clone()).collect();
    assert_eq!(
        names,
        vec!["Set Width: Normal", "Set Width: Wide", "Set Width: Full"]
    );

    let wide = palette.commands()[1].clone();
    assert_eq!(wide.icon, "arrow_range");
    assert_eq!(wide.group.as_deref(), Some("View"));
    wide.invoke();
    assert_eq!(doc.classes(Element::Root), vec!["wide"]);
}

#[test]
fn missing_palette_is_not_an_error() {
    let (_doc, controller) = setup(1440);
    assert_eq!(controller.register_commands(None).expect("soft failure"), 0);
}

#[test]
fn requires_indicator_element() {
    let doc = Rc::new(
        MemoryDocument::new(1440, Url::parse("http://localhost/").expect("url"))
            .without(Element::WidthIndicator),
    );
    let err = WidthController::new(doc, WidthOptions::default())
        .err()
        .expect("missing indicator");
    assert!(matches!(err, PaletteError::MissingElement("#main-width")));
}
