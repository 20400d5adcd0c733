//! Legend registry: the canonical table of chart series and its category grouping.
//!
//! Every series the chart can show is described once here (display name,
//! color, legend icon, category). The tooltip resolver and the legend panel
//! both read the same registry, so category order and item order are defined
//! in exactly one place: declaration order.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ConfigError;

/// Display category a series is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Variable,
    Scenarios,
    Targets,
    UncertaintyRange,
    Gases,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Variable,
        Category::Scenarios,
        Category::Targets,
        Category::UncertaintyRange,
        Category::Gases,
    ];

    /// Human-readable label, also the accepted spelling in registry files.
    pub fn label(self) -> &'static str {
        match self {
            Category::Variable => "Variable",
            Category::Scenarios => "Scenarios",
            Category::Targets => "Targets",
            Category::UncertaintyRange => "Uncertainty Range",
            Category::Gases => "Gases",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or(())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Legend marker hint. Carries no numeric meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IconStyle {
    Dashed,
    Triangle,
    Line,
    Area,
}

impl IconStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            IconStyle::Dashed => "dashed",
            IconStyle::Triangle => "triangle",
            IconStyle::Line => "line",
            IconStyle::Area => "area",
        }
    }

    /// Parse a style name; unknown names fall back to [`IconStyle::Area`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashed" => IconStyle::Dashed,
            "triangle" => IconStyle::Triangle,
            "line" => IconStyle::Line,
            "area" => IconStyle::Area,
            other => {
                log::warn!("unknown legend icon style {other:?}, drawing it as an area swatch");
                IconStyle::Area
            }
        }
    }
}

impl From<String> for IconStyle {
    fn from(s: String) -> Self {
        IconStyle::parse(&s)
    }
}

impl From<IconStyle> for String {
    fn from(style: IconStyle) -> Self {
        style.as_str().to_string()
    }
}

/// Shape drawn as a legend swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconShape {
    /// Short horizontal segment drawn as alternating dashes.
    DashedSegment,
    /// Solid filled triangle, same glyph as the target markers in the plot.
    Triangle,
    /// Short solid horizontal segment.
    LineSegment,
    /// Filled square.
    Square,
}

/// How to draw a legend swatch. The color is applied by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSpec {
    pub shape: IconShape,
    pub width: u32,
    pub height: u32,
}

impl IconSpec {
    /// `(dash, gap)` lengths in pixels for dashed swatches.
    pub fn dash_pattern(&self) -> Option<(u32, u32)> {
        match self.shape {
            IconShape::DashedSegment => Some((3, 3)),
            _ => None,
        }
    }

    /// True when the swatch is a thin stroke rather than a filled glyph.
    pub fn is_stroke(&self) -> bool {
        matches!(self.shape, IconShape::DashedSegment | IconShape::LineSegment)
    }
}

/// Map an icon style to its swatch.
pub fn resolve_icon_style(style: IconStyle) -> IconSpec {
    match style {
        IconStyle::Dashed => IconSpec {
            shape: IconShape::DashedSegment,
            width: 16,
            height: 2,
        },
        IconStyle::Triangle => IconSpec {
            shape: IconShape::Triangle,
            width: 12,
            height: 12,
        },
        IconStyle::Line => IconSpec {
            shape: IconShape::LineSegment,
            width: 16,
            height: 2,
        },
        IconStyle::Area => IconSpec {
            shape: IconShape::Square,
            width: 12,
            height: 12,
        },
    }
}

/// One named series of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesDescriptor {
    pub name: String,
    /// Hex color such as `#62b947`.
    pub color: String,
    pub icon_style: IconStyle,
    pub category: Category,
    /// Hover hint shown next to the legend entry.
    pub description: Option<String>,
}

impl SeriesDescriptor {
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        icon_style: IconStyle,
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            icon_style,
            category,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn icon(&self) -> IconSpec {
        resolve_icon_style(self.icon_style)
    }
}

/// A category and its series, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendGroup {
    pub category: Category,
    pub items: Vec<SeriesDescriptor>,
}

/// Group descriptors by category, keeping first-seen category order and
/// declaration order inside each category. Never sorts.
pub fn group_by_category(descriptors: &[SeriesDescriptor]) -> Vec<LegendGroup> {
    let mut groups: Vec<LegendGroup> = Vec::new();
    for d in descriptors {
        match groups.iter_mut().find(|g| g.category == d.category) {
            Some(group) => group.items.push(d.clone()),
            None => groups.push(LegendGroup {
                category: d.category,
                items: vec![d.clone()],
            }),
        }
    }
    groups
}

/// Check the registry invariants: non-empty, unique names.
pub fn validate(descriptors: &[SeriesDescriptor]) -> Result<(), ConfigError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for (index, d) in descriptors.iter().enumerate() {
        if d.name.trim().is_empty() {
            return Err(ConfigError::EmptyName { index });
        }
        if !seen.insert(d.name.as_str()) {
            return Err(ConfigError::DuplicateName {
                name: d.name.clone(),
            });
        }
    }
    Ok(())
}

/// Validated, immutable series table with its grouping computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendRegistry {
    items: Vec<SeriesDescriptor>,
    groups: Vec<LegendGroup>,
}

impl LegendRegistry {
    pub fn new(items: Vec<SeriesDescriptor>) -> Result<Self, ConfigError> {
        validate(&items)?;
        let groups = group_by_category(&items);
        log::debug!(
            "legend registry: {} series in {} categories",
            items.len(),
            groups.len()
        );
        Ok(Self { items, groups })
    }

    /// The built-in registry for the Australian emissions chart.
    pub fn australia() -> &'static LegendRegistry {
        static REGISTRY: OnceLock<LegendRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            let items = default_descriptors();
            debug_assert!(validate(&items).is_ok(), "built-in legend table is invalid");
            LegendRegistry {
                groups: group_by_category(&items),
                items,
            }
        })
    }

    /// Parse a registry from a JSON array of
    /// `{ "name", "color", "style", "category", "tooltip"? }` objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: Vec<RawSeriesDescriptor> =
            serde_json::from_str(json).context("invalid legend registry JSON")?;
        let items = raw
            .into_iter()
            .map(SeriesDescriptor::try_from)
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self::new(items)?)
    }

    pub fn items(&self) -> &[SeriesDescriptor] {
        &self.items
    }

    /// Memoized [`group_by_category`] view.
    pub fn groups(&self) -> &[LegendGroup] {
        &self.groups
    }

    pub fn get(&self, name: &str) -> Option<&SeriesDescriptor> {
        self.items.iter().find(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RawSeriesDescriptor {
    name: String,
    color: String,
    #[serde(default = "default_style")]
    style: IconStyle,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, alias = "tooltip")]
    description: Option<String>,
}

fn default_style() -> IconStyle {
    IconStyle::Area
}

impl TryFrom<RawSeriesDescriptor> for SeriesDescriptor {
    type Error = ConfigError;

    fn try_from(raw: RawSeriesDescriptor) -> Result<Self, Self::Error> {
        let label = match raw.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => return Err(ConfigError::MissingCategory { name: raw.name }),
        };
        let category = label
            .parse::<Category>()
            .map_err(|_| ConfigError::UnknownCategory {
                name: raw.name.clone(),
                category: label.clone(),
            })?;
        Ok(SeriesDescriptor {
            name: raw.name,
            color: raw.color,
            icon_style: raw.style,
            category,
            description: raw.description,
        })
    }
}

fn default_descriptors() -> Vec<SeriesDescriptor> {
    use Category::*;
    use IconStyle::*;
    const TABLE: [(&str, &str, IconStyle, Category, &str); 12] = [
        ("Electricity CO₂", "#000000", Dashed, Variable, "CO₂ emissions from electricity production"),
        ("Total GHG", "#000000", Line, Variable, "Total greenhouse gas emissions"),
        ("High Ambition", "#6accc2", Line, Scenarios, "High ambition scenario for emissions reduction"),
        ("Historical", "#000000", Line, Scenarios, "Historical emissions data"),
        ("NDC Target", "#9370db", Triangle, Targets, "Nationally Determined Contribution target"),
        ("Net-Zero Target", "#ff0000", Triangle, Targets, "Year targeted for net-zero emissions"),
        ("Upper Uncertainty", "#7fcac0", Area, UncertaintyRange, "Upper bound of uncertainty range"),
        ("Lower Uncertainty", "#7fcac0", Area, UncertaintyRange, "Lower bound of uncertainty range"),
        ("F-Gases", "#e6c420", Area, Gases, "Fluorinated gases emissions"),
        ("N₂O", "#a05da4", Area, Gases, "Nitrous oxide emissions"),
        ("CH₄", "#62b947", Area, Gases, "Methane emissions"),
        ("CO₂ (FFI)", "#b3b89f", Area, Gases, "CO₂ from fossil fuels and industry"),
    ];
    TABLE
        .iter()
        .map(|(name, color, style, category, hint)| {
            SeriesDescriptor::new(*name, *color, *style, *category).with_description(*hint)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_is_valid() {
        let reg = LegendRegistry::australia();
        assert_eq!(reg.len(), 12);
        assert!(validate(reg.items()).is_ok());
        let order: Vec<Category> = reg.groups().iter().map(|g| g.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Variable,
                Category::Scenarios,
                Category::Targets,
                Category::UncertaintyRange,
                Category::Gases
            ]
        );
    }

    #[test]
    fn grouping_keeps_first_seen_order_without_sorting() {
        let items = vec![
            SeriesDescriptor::new("b", "#000000", IconStyle::Line, Category::Gases),
            SeriesDescriptor::new("a", "#000000", IconStyle::Line, Category::Variable),
            SeriesDescriptor::new("c", "#000000", IconStyle::Line, Category::Gases),
        ];
        let groups = group_by_category(&items);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, Category::Gases);
        let names: Vec<&str> = groups[0].items.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["b", "c"]);
        assert_eq!(groups[1].category, Category::Variable);
    }

    #[test]
    fn grouping_empty_input_is_empty() {
        assert!(group_by_category(&[]).is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let items = vec![
            SeriesDescriptor::new("CH₄", "#62b947", IconStyle::Area, Category::Gases),
            SeriesDescriptor::new("CH₄", "#62b947", IconStyle::Area, Category::Targets),
        ];
        assert_eq!(
            LegendRegistry::new(items).unwrap_err(),
            ConfigError::DuplicateName {
                name: "CH₄".into()
            }
        );
    }

    #[test]
    fn blank_names_are_rejected() {
        let items = vec![SeriesDescriptor::new(
            "  ",
            "#000000",
            IconStyle::Line,
            Category::Variable,
        )];
        assert_eq!(
            validate(&items).unwrap_err(),
            ConfigError::EmptyName { index: 0 }
        );
    }

    #[test]
    fn icon_styles_map_to_four_distinct_shapes() {
        let shapes: HashSet<_> = [
            IconStyle::Dashed,
            IconStyle::Triangle,
            IconStyle::Line,
            IconStyle::Area,
        ]
        .into_iter()
        .map(|s| resolve_icon_style(s).shape)
        .collect();
        assert_eq!(shapes.len(), 4);
        assert_eq!(
            resolve_icon_style(IconStyle::Dashed).dash_pattern(),
            Some((3, 3))
        );
        assert!(resolve_icon_style(IconStyle::Area).dash_pattern().is_none());
        assert!(resolve_icon_style(IconStyle::Line).is_stroke());
        assert!(!resolve_icon_style(IconStyle::Triangle).is_stroke());
    }

    #[test]
    fn unknown_icon_style_falls_back_to_area() {
        assert_eq!(IconStyle::parse("hexagon"), IconStyle::Area);
        assert_eq!(IconStyle::parse(" Dashed "), IconStyle::Dashed);
    }

    #[test]
    fn json_registry_parses_and_validates() {
        let json = r##"[
            {"name": "Historical", "color": "#000000", "style": "line", "category": "Scenarios"},
            {"name": "CH₄", "color": "#62b947", "style": "blob", "category": "gases", "tooltip": "Methane emissions"}
        ]"##;
        let reg = LegendRegistry::from_json_str(json).unwrap();
        let ch4 = reg.get("CH₄").unwrap();
        assert_eq!(ch4.icon_style, IconStyle::Area);
        assert_eq!(ch4.category, Category::Gases);
        assert_eq!(ch4.description.as_deref(), Some("Methane emissions"));
    }

    #[test]
    fn json_registry_without_category_fails() {
        let json = r##"[{"name": "Orphan", "color": "#000000", "style": "line"}]"##;
        let err = LegendRegistry::from_json_str(json).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::MissingCategory {
                name: "Orphan".into()
            })
        );
    }

    #[test]
    fn json_registry_with_unknown_category_fails() {
        let json = r##"[{"name": "X", "color": "#000000", "category": "Misc"}]"##;
        let err = LegendRegistry::from_json_str(json).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::UnknownCategory { .. })
        ));
    }
}
