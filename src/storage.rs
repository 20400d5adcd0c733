//! Loading the emissions dataset and legend registry files.

use crate::legend::LegendRegistry;
use crate::models::EmissionsRecord;
use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Load records from a `.csv` (header row required) or `.json` (array of objects) file.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<EmissionsRecord>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let records = match ext.as_str() {
        "csv" => {
            let f = fs::File::open(path)
                .with_context(|| format!("cannot open dataset {}", path.display()))?;
            read_records_csv(f)?
        }
        "json" => {
            let s = fs::read_to_string(path)
                .with_context(|| format!("cannot read dataset {}", path.display()))?;
            serde_json::from_str(&s)
                .with_context(|| format!("invalid dataset JSON in {}", path.display()))?
        }
        other => bail!("unsupported dataset format: {:?} (expected csv or json)", other),
    };
    warn_duplicate_years(&records);
    log::info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse CSV records with camelCase headers (`year,co2,ch4,...`). Empty cells are missing values.
pub fn read_records_csv<R: Read>(reader: R) -> Result<Vec<EmissionsRecord>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut out = Vec::new();
    for (i, row) in rdr.deserialize::<EmissionsRecord>().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let rec = row.with_context(|| format!("invalid dataset row at line {}", i + 2))?;
        out.push(rec);
    }
    Ok(out)
}

/// Load and validate a legend registry JSON file.
pub fn load_registry<P: AsRef<Path>>(path: P) -> Result<LegendRegistry> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .with_context(|| format!("cannot read legend registry {}", path.display()))?;
    LegendRegistry::from_json_str(&s)
        .with_context(|| format!("legend registry {} is invalid", path.display()))
}

fn warn_duplicate_years(records: &[EmissionsRecord]) {
    let mut seen = HashSet::new();
    for r in records {
        if !seen.insert(r.year) {
            log::warn!("year {} appears more than once; lookups use the first row", r.year);
        }
    }
}
