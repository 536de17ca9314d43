//! End-to-end sessions driven through the simulator.

use quickclick_config::{Language, Settings, SettingsPatch, Tuning};
use quickclick_core::dom::{StyleProperty, ViewportInfo};
use quickclick_core::{
    Direction, Document, MatchEngine, NavState, Navigator, NodeSpec, Page, PageSpec, Script,
    Simulator,
};

// ============================================================================
// Helpers
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn english() -> Settings {
    Settings {
        language: Language::En,
        ..Default::default()
    }
}

fn page(children: Vec<NodeSpec>) -> Page {
    Page::from_spec(&PageSpec {
        viewport: ViewportInfo::default(),
        body: NodeSpec::new("body").children(children),
    })
}

fn shop() -> Page {
    page(vec![
        NodeSpec::new("form").id("checkout").children([
            NodeSpec::new("button").id("submit").text("Submit now"),
            NodeSpec::new("div").id("fake").text("Submit now"),
        ]),
        NodeSpec::new("div")
            .id("card")
            .attr("role", "button")
            .child(NodeSpec::new("a").id("details").attr("href", "/item").text("Item details")),
        NodeSpec::new("button")
            .id("close")
            .attr("aria-label", "Close cart"),
        NodeSpec::new("a").id("cart").attr("href", "/cart").text("Cart (2)"),
    ])
}

fn simulator(page: Page) -> Simulator {
    init_tracing();
    let mut sim = Simulator::new(page, english(), Tuning::default()).unwrap();
    sim.start();
    sim
}

fn ids(sim: &Simulator) -> Vec<String> {
    sim.widget()
        .matches()
        .iter()
        .map(|n| sim.page().attribute(n, "id").unwrap().unwrap_or_default())
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_empty_query_prompts_to_type() {
    let mut sim = simulator(shop());
    sim.input("");
    sim.advance(120);

    assert!(sim.widget().matches().is_empty());
    assert_eq!(sim.widget().status(), Some("Type to search..."));
}

#[test]
fn test_submit_matches_button_not_plain_div() {
    let mut sim = simulator(shop());
    sim.input("submit");
    sim.advance(120);

    assert_eq!(ids(&sim), vec!["submit"]);
    assert_eq!(sim.widget().status(), Some("1 match(es). Selected: 1"));
}

#[test]
fn test_inner_match_replaces_outer() {
    let mut sim = simulator(shop());
    sim.input("details");
    sim.advance(120);

    assert_eq!(ids(&sim), vec!["details"]);
}

#[test]
fn test_aria_label_ignored_without_attribute_matching() {
    let mut sim = simulator(shop());
    sim.input("close");
    sim.advance(120);
    assert!(sim.widget().matches().is_empty());
    assert_eq!(sim.widget().status(), Some("No results found."));

    sim.update_settings(&SettingsPatch {
        include_attrs: Some(true),
        ..Default::default()
    })
    .unwrap();
    sim.input("close");
    sim.advance(120);
    assert_eq!(ids(&sim), vec!["close"]);
}

#[test]
fn test_activate_with_zero_matches_clicks_fresh_result() {
    let mut sim = simulator(shop());
    sim.input("cart");
    assert!(sim.widget().matches().is_empty());

    sim.key("Enter");

    let cart = sim.page().get_by_id("cart").unwrap();
    assert_eq!(sim.page().clicks().len(), 1);
    assert_eq!(sim.page().clicks()[0].target, cart);
    assert!(sim.page().clicks()[0].synthetic);
    assert_eq!(sim.widget().status(), Some("Element activated."));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_no_match_contains_another() {
    let page = page(vec![
        NodeSpec::new("div").id("outer").on_click().text("Open").children([
            NodeSpec::new("span").id("mid").attr("role", "button").text("Open").child(
                NodeSpec::new("button").id("inner").text("Open"),
            ),
            NodeSpec::new("a").id("sibling").attr("href", "#").text("Open tab"),
        ]),
    ]);
    let result = MatchEngine::default().search(&page, "open", &Settings::default());

    assert!(!result.is_empty());
    for outer in result.iter() {
        for inner in result.iter() {
            if outer != inner {
                assert!(!page.contains(outer, inner).unwrap());
            }
        }
    }
}

#[test]
fn test_repeated_search_is_identical() {
    let page = shop();
    let engine = MatchEngine::default();
    for query in ["", "submit", "a", "item", "zzz"] {
        assert_eq!(
            engine.search(&page, query, &Settings::default()),
            engine.search(&page, query, &Settings::default())
        );
    }
}

#[test]
fn test_next_n_times_returns_to_start() {
    let set = [1, 2, 3, 4, 5]
        .into_iter()
        .map(quickclick_core::NodeId)
        .collect();
    let mut nav = Navigator::new();
    nav.resolve(set, false);
    nav.step(Direction::Next);
    nav.step(Direction::Next);
    let start = nav.index();

    for _ in 0..5 {
        nav.step(Direction::Next);
    }
    assert_eq!(nav.index(), start);
    assert_eq!(nav.state(), NavState::HasMatches(start));
}

#[test]
fn test_close_restores_original_styles() {
    let page = page(vec![
        NodeSpec::new("button")
            .id("styled")
            .text("Pay")
            .outline("2px solid orange")
            .box_shadow("1px 1px 0 gray"),
        NodeSpec::new("button").id("plain").text("Pay later"),
    ]);
    let mut sim = simulator(page);
    sim.input("pay");
    sim.advance(120);
    sim.key("Tab");
    assert_eq!(sim.widget().matches().len(), 2);

    sim.page_key("-");
    assert!(!sim.widget().is_open());

    let styled = sim.page().get_by_id("styled").unwrap();
    let plain = sim.page().get_by_id("plain").unwrap();
    let style = |node, prop| sim.page().inline_style(node, prop).unwrap();
    assert_eq!(style(styled, StyleProperty::Outline), "2px solid orange");
    assert_eq!(style(styled, StyleProperty::BoxShadow), "1px 1px 0 gray");
    assert_eq!(style(plain, StyleProperty::Outline), "");
    assert_eq!(style(plain, StyleProperty::BoxShadow), "");
    assert!(sim.widget().scheduler().pending().is_empty());
}

#[test]
fn test_page_changes_trigger_research() {
    let mut sim = simulator(shop());
    sim.input("submit");
    sim.advance(300);
    assert_eq!(ids(&sim), vec!["submit"]);

    sim.set_text("submit", "Send").unwrap();
    assert!(sim.widget().is_search_pending());
    sim.settle();
    assert!(sim.widget().matches().is_empty());

    sim.set_text("submit", "Submit order").unwrap();
    sim.remove("fake").unwrap();
    sim.settle();
    assert_eq!(ids(&sim), vec!["submit"]);
}

#[test]
fn test_own_style_writes_do_not_loop() {
    let mut sim = simulator(shop());
    sim.input("a");
    sim.settle();

    assert!(!sim.widget().is_search_pending());
    assert!(sim.widget().scheduler().pending().is_empty());
    assert!(!sim.widget().matches().is_empty());
}

#[test]
fn test_scripted_session() {
    let script = Script::from_toml(
        r#"
        [[step]]
        action = "input"
        text = "cart"

        [[step]]
        action = "advance"
        ms = 120

        [[step]]
        action = "key"
        key = "Enter"

        [[step]]
        action = "settings"
        patch = { autoOpen = false }
        "#,
    )
    .unwrap();

    let mut sim = simulator(shop());
    let reports = sim.run_script(&script).unwrap();

    assert_eq!(reports.len(), 4);
    assert_eq!(reports[1].matches, vec!["a#cart"]);
    assert_eq!(reports[1].selected.as_deref(), Some("a#cart"));
    assert_eq!(reports[2].clicks, vec!["a#cart"]);
    assert_eq!(reports[2].status.as_deref(), Some("Element activated."));
    assert!(!reports[3].open);
    assert_eq!(reports[3].to_string(), "[   120ms] closed");
}
