//! End-to-end tests: stored widgets to stylesheet and classes.

use widgetlayer::registry::builtin::{
    base_options, HIDE_ON_MOBILE, PUSH_DOWN, PUSH_DOWN_TABLET, TEXT_ALIGN, VERT_ALIGN, WIDTH,
};
use widgetlayer::{
    assemble, build_rule_set, compile_classes, compile_rules, Hooks, Instance, LayerConfig,
    OptionSpecs, RenderContext, Scope, Snapshot, WidgetLayer, WidgetOccurrence, WidgetParams,
};

const AREA: &str = "home-widgetlayer-1";

fn specs() -> OptionSpecs {
    OptionSpecs::from_raw(base_options())
}

#[test]
fn test_centered_middle_widget() {
    let store = Snapshot::new().place(AREA, "text-4").store(
        "text",
        4,
        Instance::new()
            .with(VERT_ALIGN, "middle")
            .with(TEXT_ALIGN, "center"),
    );
    let layer = WidgetLayer::new(LayerConfig::default(), store);

    let occurrences = layer.occurrences();
    let rules = build_rule_set(&occurrences[0], layer.option_specs(), layer.hooks());
    assert_eq!(
        rules.declarations(Scope::Tablet),
        &["display:flex", "flex-direction:column", "justify-content:center"]
    );
    assert_eq!(
        rules.declarations(Scope::Common),
        &["order:0", "text-align:center"]
    );

    assert_eq!(
        layer.aggregated_stylesheet(&RenderContext::page()),
        ".brick .text-4{order:0;text-align:center}\
         @media (min-width:768px){.brick .text-4{display:flex;flex-direction:column;justify-content:center}}"
    );
}

#[test]
fn test_push_down_sorts_after_next_sibling() {
    let store = Snapshot::new()
        .place(AREA, "text-1")
        .place(AREA, "text-2")
        .store("text", 1, Instance::new().with(PUSH_DOWN, "yes"))
        .store("text", 2, Instance::new());
    let layer = WidgetLayer::new(LayerConfig::default(), store);

    assert_eq!(
        layer.aggregated_stylesheet(&RenderContext::page()),
        ".brick .text-1{order:0}.brick .text-2{order:2}\
         @media (max-width:767px){.brick .text-1{order:3}}"
    );
}

#[test]
fn test_unrecognized_settings_only() {
    let occurrence = WidgetOccurrence::new(
        "calendar-3",
        AREA,
        0,
        "calendar",
        Instance::new().with("title", "Events"),
    );
    let rules = build_rule_set(&occurrence, &specs(), &Hooks::new());
    for scope in Scope::ALL.into_iter().filter(|s| *s != Scope::Common) {
        assert!(rules.declarations(scope).is_empty());
    }
    assert_eq!(rules.declarations(Scope::Common), &["order:0"]);

    assert_eq!(
        compile_classes(&occurrence, &specs(), &Hooks::new()),
        vec!["brick-0", "fw-tabr-12", "fw-tab-12"]
    );
}

#[test]
fn test_area_traversal_order() {
    let store = Snapshot::new()
        .place("home-widgetlayer-2", "text-9")
        .place(AREA, "text-1")
        .store("text", 1, Instance::new())
        .store("text", 9, Instance::new().with(HIDE_ON_MOBILE, "yes"));
    let layer = WidgetLayer::new(LayerConfig::default(), store);

    let ids: Vec<String> = layer.occurrences().into_iter().map(|o| o.id).collect();
    assert_eq!(ids, vec!["text-1", "text-9"]);
    assert_eq!(
        layer.aggregated_stylesheet(&RenderContext::page()),
        ".brick .text-1{order:0}.brick .text-9{order:0}\
         @media (max-width:767px){.brick .text-9{display:none}}"
    );
}

#[test]
fn test_all_scopes_in_emission_order() {
    let store = Snapshot::new().place(AREA, "text-1").store(
        "text",
        1,
        Instance::new()
            .with(VERT_ALIGN, "bottom")
            .with(PUSH_DOWN_TABLET, "yes")
            .with(HIDE_ON_MOBILE, "yes"),
    );
    let mut hooks = Hooks::new();
    hooks.on_rules(|mut rules, _| {
        rules.push(Scope::Desktop, "min-height:10rem");
        rules
    });
    let layer = WidgetLayer::new(LayerConfig::default(), store).with_hooks(hooks);

    assert_eq!(
        layer.aggregated_stylesheet(&RenderContext::page()),
        ".brick .text-1{order:0}\
         @media (max-width:767px){.brick .text-1{display:none}}\
         @media (min-width:768px){.brick .text-1{display:flex;flex-direction:column;justify-content:flex-end}}\
         @media (min-width:768px) and (max-width:1024px){.brick .text-1{order:3}}\
         @media (min-width:1025px){.brick .text-1{min-height:10rem}}"
    );
}

#[test]
fn test_raw_rules_target_sibling() {
    let store = Snapshot::new()
        .place(AREA, "text-1")
        .place(AREA, "text-2")
        .store("text", 1, Instance::new())
        .store("text", 2, Instance::new());
    let mut hooks = Hooks::new();
    hooks.on_rules(|mut rules, occurrence| {
        if occurrence.id == "text-1" {
            rules.push_raw(Scope::Tablet, ".brick .text-1 + .brick{margin-top:0}");
        }
        rules
    });
    let layer = WidgetLayer::new(LayerConfig::default(), store).with_hooks(hooks);

    assert_eq!(
        layer.aggregated_stylesheet(&RenderContext::page()),
        ".brick .text-1{order:0}.brick .text-2{order:2}\
         @media (min-width:768px){.brick .text-1+.brick{margin-top:0}}"
    );
}

#[test]
fn test_pipeline_is_idempotent() {
    let store = Snapshot::new()
        .place(AREA, "text-1")
        .place(AREA, "text-2")
        .store("text", 1, Instance::new().with(WIDTH, "4").with(PUSH_DOWN, "yes"))
        .store("text", 2, Instance::new().with(TEXT_ALIGN, "right"));
    let layer = WidgetLayer::new(LayerConfig::default(), store).with_builtin_extensions();

    let first = layer.aggregated_stylesheet(&RenderContext::page());
    let second = layer.aggregated_stylesheet(&RenderContext::page());
    assert_eq!(first, second);
    assert_eq!(
        layer.occurrence_classes("text-1"),
        layer.occurrence_classes("text-1")
    );
}

#[test]
fn test_assembled_parts_match_whole() {
    let specs = specs();
    let hooks = Hooks::new();
    let compiled: Vec<_> = (0..3)
        .map(|p| {
            let occ = WidgetOccurrence::new(
                format!("text-{}", p),
                AREA,
                p,
                "text",
                Instance::new().with(PUSH_DOWN, "yes"),
            );
            compile_rules(&occ, &specs, &hooks, "brick")
        })
        .collect();

    let whole = assemble(&compiled, &Default::default());
    assert!(whole.starts_with(".brick .text-0{order:0}.brick .text-1{order:2}.brick .text-2{order:4}"));
    assert!(whole.ends_with(
        "@media (max-width:767px){.brick .text-0{order:3}.brick .text-1{order:5}.brick .text-2{order:7}}"
    ));
}

#[test]
fn test_snapshot_file_to_markup() {
    let yaml = r#"
sidebars:
  home-widgetlayer-1: [text-2, bayleaf_blank_widget-1, search-3]
widgets:
  text:
    2: { title: Welcome, bayleaf_width: "6", text: "" }
  bayleaf_blank_widget:
    1: { bayleaf_blank_widget_height: "", bayleaf_show_divider_line: full-bleed }
"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widgets.yaml");
    std::fs::write(&path, yaml).unwrap();

    let layer = WidgetLayer::new(LayerConfig::default(), Snapshot::load(&path).unwrap())
        .with_builtin_extensions();

    assert_eq!(
        layer.occurrence_classes("text-2"),
        "brick-0 fw-tabr-6 fw-tab-6 only-title"
    );
    assert_eq!(
        layer.occurrence_classes("bayleaf_blank_widget-1"),
        "brick-1 has-fb-line"
    );
    assert_eq!(layer.occurrence_classes("search-3"), "");

    let divider = layer.decorate(
        WidgetParams::new(
            "bayleaf_blank_widget-1",
            "<section class=\"widget brick\">",
            "</section>",
        ),
        &RenderContext::page(),
    );
    assert_eq!(
        divider.before_widget,
        "<span aria-hidden=\"true\" class=\"widget brick bayleaf_blank_widget-1 brick-1 has-fb-line\">"
    );
    assert_eq!(divider.after_widget, "</span>");

    assert_eq!(
        layer.aggregated_stylesheet(&RenderContext::page()),
        ".brick .text-2{order:0}\
         .brick .bayleaf_blank_widget-1{order:2;margin-bottom:0;padding-top:0;padding-bottom:0}\
         @media (min-width:1025px){.brick .bayleaf_blank_widget-1{height:3.5rem}}"
    );
}

#[test]
fn test_markup_in_values_is_stripped() {
    let mut hooks = Hooks::new();
    hooks.on_rules(|mut rules, _| {
        rules.push(Scope::Common, "color:red</style><script>alert(1)</script>");
        rules
    });
    let store = Snapshot::new()
        .place(AREA, "text-1")
        .store("text", 1, Instance::new());
    let layer = WidgetLayer::new(LayerConfig::default(), store).with_hooks(hooks);

    let css = layer.aggregated_stylesheet(&RenderContext::page());
    assert!(!css.contains('<'));
    assert!(!css.contains("alert"));
}
