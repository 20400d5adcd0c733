use serde::{Deserialize, Serialize};

/// One yearly row of the emissions dataset (all values in Mt CO₂eq/yr).
///
/// Every series column is optional: a missing value means the series is not
/// plotted for that year. Column names follow the camelCase keys of the
/// upstream data export (`fGases`, `uncertaintyLower`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmissionsRecord {
    pub year: i32,
    pub co2: Option<f64>,
    pub ch4: Option<f64>,
    pub n2o: Option<f64>,
    pub f_gases: Option<f64>,
    pub total_ghg: Option<f64>,
    pub electricity: Option<f64>,
    pub historical: Option<f64>,
    pub high_ambition: Option<f64>,
    pub ndc_target: Option<f64>,
    pub net_zero: Option<f64>,
    pub uncertainty_lower: Option<f64>,
    pub uncertainty_upper: Option<f64>,
}

impl EmissionsRecord {
    /// Empty record for `year`; fill fields with struct update syntax.
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    pub fn get(&self, field: RecordField) -> Option<f64> {
        match field {
            RecordField::Co2 => self.co2,
            RecordField::Ch4 => self.ch4,
            RecordField::N2o => self.n2o,
            RecordField::FGases => self.f_gases,
            RecordField::TotalGhg => self.total_ghg,
            RecordField::Electricity => self.electricity,
            RecordField::Historical => self.historical,
            RecordField::HighAmbition => self.high_ambition,
            RecordField::NdcTarget => self.ndc_target,
            RecordField::NetZero => self.net_zero,
            RecordField::UncertaintyLower => self.uncertainty_lower,
            RecordField::UncertaintyUpper => self.uncertainty_upper,
        }
    }
}

/// Named numeric column of an [`EmissionsRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Co2,
    Ch4,
    N2o,
    FGases,
    TotalGhg,
    Electricity,
    Historical,
    HighAmbition,
    NdcTarget,
    NetZero,
    UncertaintyLower,
    UncertaintyUpper,
}

/// One `(name, value)` pair handed to the tooltip by the chart for the hovered point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadEntry {
    pub name: String,
    pub value: Option<f64>,
}

impl PayloadEntry {
    pub fn new(name: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
