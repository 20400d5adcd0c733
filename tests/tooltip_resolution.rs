use emissions_chart::chart::payload_for_year;
use emissions_chart::gate::{PointerEvent, TooltipGate};
use emissions_chart::legend::{Category, LegendRegistry};
use emissions_chart::models::{EmissionsRecord, PayloadEntry};
use emissions_chart::tooltip::{LineKind, TooltipSection, render_tooltip, resolve_tooltip};

fn with_bounds(year: i32, lower: f64, upper: f64) -> EmissionsRecord {
    EmissionsRecord {
        uncertainty_lower: Some(lower),
        uncertainty_upper: Some(upper),
        ..EmissionsRecord::for_year(year)
    }
}

fn names_and_values(items: &[emissions_chart::tooltip::TooltipItem]) -> Vec<(&str, f64)> {
    items.iter().map(|i| (i.name.as_str(), i.value)).collect()
}

#[test]
fn hovered_2015_shows_history_band_and_gases() {
    let registry = LegendRegistry::australia();
    let dataset = vec![with_bounds(2015, 580.0, 640.0)];
    let payload = vec![
        PayloadEntry::new("CO₂ (FFI)", Some(250.0)),
        PayloadEntry::new("Historical", Some(610.0)),
    ];

    let tip = render_tooltip(true, &payload, 2015, registry, &dataset).unwrap();

    let categories: Vec<Category> = tip.groups.iter().map(|g| g.category).collect();
    assert_eq!(
        categories,
        vec![Category::Scenarios, Category::UncertaintyRange, Category::Gases]
    );
    assert_eq!(names_and_values(&tip.groups[0].items), vec![("Historical", 610.0)]);
    assert_eq!(
        names_and_values(&tip.groups[1].items),
        vec![("Upper Uncertainty", 640.0), ("Lower Uncertainty", 580.0)]
    );
    assert_eq!(names_and_values(&tip.groups[2].items), vec![("CO₂ (FFI)", 250.0)]);
    assert_eq!(tip.groups[2].items[0].color, "#b3b89f");
}

#[test]
fn band_delta_from_the_chart_is_replaced_by_the_true_bound() {
    let registry = LegendRegistry::australia();
    let dataset = vec![EmissionsRecord {
        historical: Some(610.0),
        ..with_bounds(2015, 580.0, 640.0)
    }];
    let payload = payload_for_year(&dataset, 2015);
    let upper = payload
        .iter()
        .find(|p| p.name == "Upper Uncertainty")
        .and_then(|p| p.value);
    assert_eq!(upper, Some(60.0));

    let tip = resolve_tooltip(registry, &dataset, &payload, 2015);
    let band = tip
        .groups
        .iter()
        .find(|g| g.category == Category::UncertaintyRange)
        .unwrap();
    assert_eq!(
        names_and_values(&band.items),
        vec![("Upper Uncertainty", 640.0), ("Lower Uncertainty", 580.0)]
    );
}

#[test]
fn no_band_before_2010_even_with_bounds() {
    let registry = LegendRegistry::australia();
    let dataset = vec![EmissionsRecord {
        historical: Some(600.0),
        ..with_bounds(2005, 570.0, 630.0)
    }];
    let payload = payload_for_year(&dataset, 2005);

    let tip = resolve_tooltip(registry, &dataset, &payload, 2005);
    assert!(!tip.uncertainty.visible);
    assert!(
        tip.groups
            .iter()
            .all(|g| g.category != Category::UncertaintyRange)
    );
    assert!(tip.groups.iter().any(|g| g.category == Category::Scenarios));
}

#[test]
fn gate_controls_whether_anything_renders() {
    let registry = LegendRegistry::australia();
    let dataset = vec![with_bounds(2020, 480.0, 520.0)];
    let payload = payload_for_year(&dataset, 2020);

    let mut gate = TooltipGate::new();
    assert!(render_tooltip(gate.is_active(), &payload, 2020, registry, &dataset).is_none());

    gate.handle(PointerEvent::Move { inside: true });
    assert!(render_tooltip(gate.is_active(), &payload, 2020, registry, &dataset).is_some());

    gate.handle(PointerEvent::ClickOutside);
    assert!(render_tooltip(gate.is_active(), &payload, 2020, registry, &dataset).is_none());
}

#[test]
fn empty_payload_renders_nothing_even_when_active() {
    let registry = LegendRegistry::australia();
    let dataset = vec![with_bounds(2020, 480.0, 520.0)];
    assert!(render_tooltip(true, &[], 2020, registry, &dataset).is_none());
}

#[test]
fn text_lines_and_sections() {
    let registry = LegendRegistry::australia();
    let dataset = vec![with_bounds(2015, 580.0, 640.0)];
    let payload = vec![
        PayloadEntry::new("CO₂ (FFI)", Some(1250.5)),
        PayloadEntry::new("Historical", Some(610.0)),
    ];
    let tip = resolve_tooltip(registry, &dataset, &payload, 2015);

    let lines = tip.lines("en");
    assert_eq!(lines[0].kind, LineKind::Title);
    assert_eq!(lines[0].text, "Year: 2015");
    assert!(
        lines
            .iter()
            .any(|l| l.text == "CO₂ (FFI): 1,250.50 Mt CO₂eq/yr")
    );
    let headings: Vec<&str> = lines
        .iter()
        .filter(|l| l.kind == LineKind::Heading)
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(headings, vec!["Gases", "Scenarios", "Uncertainty Range"]);
    let section_lines: Vec<&str> = lines
        .iter()
        .filter(|l| l.kind == LineKind::Section)
        .map(|l| l.text.as_str())
        .collect();
    assert_eq!(section_lines, vec!["Historical", "Scenarios"]);
    // the heading directly after a section line belongs to that section
    let gases_at = lines.iter().position(|l| l.text == "Gases").unwrap();
    assert_eq!(lines[gases_at - 1].text, "Historical");

    let sections: Vec<TooltipSection> = tip.sections().iter().map(|s| s.section).collect();
    assert_eq!(
        sections,
        vec![TooltipSection::Historical, TooltipSection::Scenarios]
    );
}
