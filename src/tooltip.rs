//! Tooltip resolver: turn a hover event into grouped, ordered tooltip lines.
//!
//! The chart hands the tooltip a flat payload of `(name, value)` pairs for the
//! hovered year. This module joins that payload against the [`LegendRegistry`],
//! drops everything without a value, and groups what is left by category in
//! registry order.
//!
//! The uncertainty band is special: the chart draws it as a transparent lower
//! baseline plus a stacked upper-minus-lower delta, so the payload values for
//! the two bound series are not the bounds. Those series are resolved from the
//! dataset record of the hovered year instead (see [`resolve_uncertainty`]).

use std::collections::HashMap;

use serde::Serialize;

use crate::format::format_value;
use crate::legend::{Category, LegendRegistry, SeriesDescriptor};
use crate::models::{EmissionsRecord, PayloadEntry};

/// First year for which the uncertainty range is shown.
pub const UNCERTAINTY_START_YEAR: i32 = 2010;

/// Unit appended to every tooltip value.
pub const VALUE_UNIT: &str = "Mt CO₂eq/yr";

pub const UPPER_UNCERTAINTY: &str = "Upper Uncertainty";
pub const LOWER_UNCERTAINTY: &str = "Lower Uncertainty";

/// Which end of the uncertainty range a reserved series stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UncertaintyBound {
    Upper,
    Lower,
}

/// Series names whose value always comes from the dataset bounds, never from the payload.
const RESERVED_BOUNDS: [UncertaintyBound; 2] = [UncertaintyBound::Upper, UncertaintyBound::Lower];

impl UncertaintyBound {
    pub fn for_series(name: &str) -> Option<Self> {
        RESERVED_BOUNDS
            .into_iter()
            .find(|bound| bound.series_name() == name)
    }

    pub fn series_name(self) -> &'static str {
        match self {
            UncertaintyBound::Upper => UPPER_UNCERTAINTY,
            UncertaintyBound::Lower => LOWER_UNCERTAINTY,
        }
    }
}

/// Series name → value for the hovered point. Never holds missing values.
pub type PayloadMap = HashMap<String, f64>;

/// Build the lookup map from the chart payload.
///
/// Entries without a value are dropped; on duplicate names the last entry wins.
pub fn build_payload_map(payload: &[PayloadEntry]) -> PayloadMap {
    payload
        .iter()
        .filter_map(|p| p.value.map(|v| (p.name.clone(), v)))
        .collect()
}

/// Uncertainty range for the hovered year, looked up from the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct UncertaintyBounds {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub visible: bool,
}

impl UncertaintyBounds {
    pub fn get(&self, bound: UncertaintyBound) -> Option<f64> {
        match bound {
            UncertaintyBound::Upper => self.upper,
            UncertaintyBound::Lower => self.lower,
        }
    }
}

/// Find the first record whose year equals `hovered` (exact match only) and
/// report its bounds. Visible only from `threshold` onwards and when both
/// bounds are present.
pub fn resolve_uncertainty(
    dataset: &[EmissionsRecord],
    hovered: i32,
    threshold: i32,
) -> UncertaintyBounds {
    let Some(row) = dataset.iter().find(|r| r.year == hovered) else {
        return UncertaintyBounds::default();
    };
    let (lower, upper) = (row.uncertainty_lower, row.uncertainty_upper);
    UncertaintyBounds {
        lower,
        upper,
        visible: hovered >= threshold && lower.is_some() && upper.is_some(),
    }
}

/// One displayed tooltip line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipItem {
    pub name: String,
    pub value: f64,
    pub color: String,
}

impl TooltipItem {
    /// `name: value unit`, value with two decimals.
    pub fn text(&self, locale_tag: &str) -> String {
        format!(
            "{}: {} {}",
            self.name,
            format_value(self.value, locale_tag),
            VALUE_UNIT
        )
    }
}

/// A non-empty category section of the tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub items: Vec<TooltipItem>,
}

fn resolve_value(
    d: &SeriesDescriptor,
    payload_map: &PayloadMap,
    uncertainty: &UncertaintyBounds,
) -> Option<f64> {
    match UncertaintyBound::for_series(&d.name) {
        Some(bound) if uncertainty.visible => uncertainty.get(bound),
        Some(_) => None,
        None => payload_map.get(&d.name).copied(),
    }
}

/// Whether any of `items` would produce a tooltip line.
pub fn has_visible_items(
    items: &[SeriesDescriptor],
    payload_map: &PayloadMap,
    uncertainty: &UncertaintyBounds,
) -> bool {
    items
        .iter()
        .any(|d| resolve_value(d, payload_map, uncertainty).is_some())
}

/// Group the resolvable series by category, in registry order, omitting empty categories.
pub fn build_category_groups(
    registry: &LegendRegistry,
    payload_map: &PayloadMap,
    uncertainty: &UncertaintyBounds,
) -> Vec<CategoryGroup> {
    registry
        .groups()
        .iter()
        .filter(|group| has_visible_items(&group.items, payload_map, uncertainty))
        .map(|group| CategoryGroup {
            category: group.category,
            items: group
                .items
                .iter()
                .filter_map(|d| {
                    resolve_value(d, payload_map, uncertainty).map(|value| TooltipItem {
                        name: d.name.clone(),
                        value,
                        color: d.color.clone(),
                    })
                })
                .collect(),
        })
        .collect()
}

/// Top-level tooltip sections: observed data first, projections second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TooltipSection {
    Historical,
    Scenarios,
}

impl TooltipSection {
    pub fn title(self) -> &'static str {
        match self {
            TooltipSection::Historical => "Historical",
            TooltipSection::Scenarios => "Scenarios",
        }
    }

    pub fn categories(self) -> &'static [Category] {
        match self {
            TooltipSection::Historical => &[Category::Variable, Category::Gases],
            TooltipSection::Scenarios => &[
                Category::Scenarios,
                Category::Targets,
                Category::UncertaintyRange,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub section: TooltipSection,
    pub groups: Vec<CategoryGroup>,
}

/// Split category groups into the two sections, keeping group order. Empty sections are dropped.
pub fn build_sections(groups: &[CategoryGroup]) -> Vec<SectionView> {
    [TooltipSection::Historical, TooltipSection::Scenarios]
        .into_iter()
        .filter_map(|section| {
            let wanted = section.categories();
            let groups: Vec<CategoryGroup> = groups
                .iter()
                .filter(|g| wanted.contains(&g.category))
                .cloned()
                .collect();
            (!groups.is_empty()).then_some(SectionView { section, groups })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Title,
    /// Historical or Scenarios.
    Section,
    /// Category label.
    Heading,
    Item,
}

/// A rendered text line; items carry their series color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipLine {
    pub kind: LineKind,
    pub text: String,
    pub color: Option<String>,
}

/// Everything the tooltip shows for one hovered year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipFragment {
    pub label: i32,
    pub uncertainty: UncertaintyBounds,
    pub groups: Vec<CategoryGroup>,
}

impl TooltipFragment {
    pub fn title(&self) -> String {
        format!("Year: {}", self.label)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn sections(&self) -> Vec<SectionView> {
        build_sections(&self.groups)
    }

    /// Title, then per section its heading and each category with its
    /// `name: value unit` lines.
    pub fn lines(&self, locale_tag: &str) -> Vec<TooltipLine> {
        let mut out = vec![TooltipLine {
            kind: LineKind::Title,
            text: self.title(),
            color: None,
        }];
        for view in self.sections() {
            out.push(TooltipLine {
                kind: LineKind::Section,
                text: view.section.title().to_string(),
                color: None,
            });
            for group in &view.groups {
                out.push(TooltipLine {
                    kind: LineKind::Heading,
                    text: group.category.label().to_string(),
                    color: None,
                });
                out.extend(group.items.iter().map(|item| TooltipLine {
                    kind: LineKind::Item,
                    text: item.text(locale_tag),
                    color: Some(item.color.clone()),
                }));
            }
        }
        out
    }
}

/// Resolve the full tooltip for `label` regardless of activation state.
pub fn resolve_tooltip(
    registry: &LegendRegistry,
    dataset: &[EmissionsRecord],
    payload: &[PayloadEntry],
    label: i32,
) -> TooltipFragment {
    let payload_map = build_payload_map(payload);
    let uncertainty = resolve_uncertainty(dataset, label, UNCERTAINTY_START_YEAR);
    let groups = build_category_groups(registry, &payload_map, &uncertainty);
    log::debug!(
        "tooltip {label}: {} payload values, uncertainty visible={}, {} groups",
        payload_map.len(),
        uncertainty.visible,
        groups.len()
    );
    TooltipFragment {
        label,
        uncertainty,
        groups,
    }
}

/// Tooltip content callback: `(active, payload, label)` from the chart.
///
/// Returns `None` while the tooltip is inactive or the chart has nothing under the cursor.
pub fn render_tooltip(
    active: bool,
    payload: &[PayloadEntry],
    label: i32,
    registry: &LegendRegistry,
    dataset: &[EmissionsRecord],
) -> Option<TooltipFragment> {
    if !active || payload.is_empty() {
        return None;
    }
    Some(resolve_tooltip(registry, dataset, payload, label))
}
