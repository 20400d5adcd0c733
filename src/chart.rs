//! The plotted series of the emissions chart and the hover payload they produce.
//!
//! This mirrors what a declarative charting layer does: each series binds a
//! display name to a record column and a mark kind. The payload built here is
//! what the tooltip receives for a hovered year, including the band delta that
//! the tooltip resolver has to replace with the true upper bound.

use crate::models::{EmissionsRecord, PayloadEntry, RecordField};
use crate::tooltip::{LOWER_UNCERTAINTY, UPPER_UNCERTAINTY};

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    /// Filled area stacked on the previous stacked areas.
    StackedArea,
    /// Invisible band floor at the lower bound.
    BandBaseline,
    /// Filled band from the lower to the upper bound; its value is `upper - lower`.
    BandDelta,
    Line,
    DashedLine,
    /// Triangle marker at each defined point, no connecting line.
    TargetMarker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSeries {
    pub name: &'static str,
    pub field: RecordField,
    pub kind: MarkKind,
}

impl ChartSeries {
    /// Value this series reports for `record`.
    pub fn value(&self, record: &EmissionsRecord) -> Option<f64> {
        match self.kind {
            MarkKind::BandDelta => match (record.uncertainty_lower, record.uncertainty_upper) {
                (Some(lo), Some(hi)) => Some(hi - lo),
                _ => None,
            },
            _ => record.get(self.field),
        }
    }
}

/// Series in drawing order (back to front).
pub const CHART_SERIES: [ChartSeries; 12] = [
    ChartSeries { name: "CO₂ (FFI)", field: RecordField::Co2, kind: MarkKind::StackedArea },
    ChartSeries { name: "CH₄", field: RecordField::Ch4, kind: MarkKind::StackedArea },
    ChartSeries { name: "N₂O", field: RecordField::N2o, kind: MarkKind::StackedArea },
    ChartSeries { name: "F-Gases", field: RecordField::FGases, kind: MarkKind::StackedArea },
    ChartSeries { name: LOWER_UNCERTAINTY, field: RecordField::UncertaintyLower, kind: MarkKind::BandBaseline },
    ChartSeries { name: UPPER_UNCERTAINTY, field: RecordField::UncertaintyUpper, kind: MarkKind::BandDelta },
    ChartSeries { name: "High Ambition", field: RecordField::HighAmbition, kind: MarkKind::Line },
    ChartSeries { name: "Historical", field: RecordField::Historical, kind: MarkKind::Line },
    ChartSeries { name: "Total GHG", field: RecordField::TotalGhg, kind: MarkKind::Line },
    ChartSeries { name: "Electricity CO₂", field: RecordField::Electricity, kind: MarkKind::DashedLine },
    ChartSeries { name: "NDC Target", field: RecordField::NdcTarget, kind: MarkKind::TargetMarker },
    ChartSeries { name: "Net-Zero Target", field: RecordField::NetZero, kind: MarkKind::TargetMarker },
];

/// X axis: domain and tick positions.
pub const X_DOMAIN: (i32, i32) = (1990, 2060);
pub const X_TICKS: [i32; 8] = [1990, 2000, 2010, 2020, 2030, 2040, 2050, 2060];
/// Y axis: domain and tick positions, Mt CO₂eq/yr.
pub const Y_DOMAIN: (f64, f64) = (-100.0, 700.0);
pub const Y_TICKS: [f64; 4] = [0.0, 200.0, 400.0, 600.0];
pub const Y_AXIS_LABEL: &str = "Emissions GHG (Mt CO₂eq/yr)";
pub const DEFAULT_TITLE: &str = "Emissions - Australia";

/// Payload the chart hands to the tooltip for the hovered `year`.
///
/// Uses the first record with exactly that year; no record yields an empty payload.
/// Series without a value are still listed, with `value: None`.
pub fn payload_for_year(records: &[EmissionsRecord], year: i32) -> Vec<PayloadEntry> {
    let Some(record) = records.iter().find(|r| r.year == year) else {
        return Vec::new();
    };
    CHART_SERIES
        .iter()
        .map(|s| PayloadEntry::new(s.name, s.value(record)))
        .collect()
}

/// Points `(year, value)` of one series, skipping years without a value.
pub fn series_points(records: &[EmissionsRecord], series: &ChartSeries) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter_map(|r| series.value(r).map(|v| (r.year as f64, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legend::LegendRegistry;

    fn record_2015() -> EmissionsRecord {
        EmissionsRecord {
            co2: Some(250.0),
            historical: Some(610.0),
            uncertainty_lower: Some(580.0),
            uncertainty_upper: Some(640.0),
            ..EmissionsRecord::for_year(2015)
        }
    }

    #[test]
    fn every_chart_series_is_in_the_builtin_registry() {
        let reg = LegendRegistry::australia();
        for s in CHART_SERIES {
            assert!(reg.get(s.name).is_some(), "{} missing from registry", s.name);
        }
    }

    #[test]
    fn band_delta_reports_the_difference_not_the_bound() {
        let payload = payload_for_year(&[record_2015()], 2015);
        let upper = payload.iter().find(|p| p.name == UPPER_UNCERTAINTY).unwrap();
        assert_eq!(upper.value, Some(60.0));
        let lower = payload.iter().find(|p| p.name == LOWER_UNCERTAINTY).unwrap();
        assert_eq!(lower.value, Some(580.0));
    }

    #[test]
    fn payload_lists_unset_series_as_none() {
        let payload = payload_for_year(&[record_2015()], 2015);
        assert_eq!(payload.len(), CHART_SERIES.len());
        let ch4 = payload.iter().find(|p| p.name == "CH₄").unwrap();
        assert_eq!(ch4.value, None);
    }

    #[test]
    fn unknown_year_yields_empty_payload() {
        assert!(payload_for_year(&[record_2015()], 2016).is_empty());
    }

    #[test]
    fn series_points_skip_missing_years() {
        let records = vec![
            record_2015(),
            EmissionsRecord::for_year(2016),
            EmissionsRecord {
                co2: Some(240.0),
                ..EmissionsRecord::for_year(2017)
            },
        ];
        let pts = series_points(&records, &CHART_SERIES[0]);
        assert_eq!(pts, vec![(2015.0, 250.0), (2017.0, 240.0)]);
    }
}
