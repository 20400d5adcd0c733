use emissions_chart::legend::LegendRegistry;
use emissions_chart::models::EmissionsRecord;
use emissions_chart::viz::{self, ChartOptions, LegendMode};
use std::fs;

fn sample_records() -> Vec<EmissionsRecord> {
    (2008..=2016)
        .map(|y| {
            let t = (y - 2008) as f64;
            EmissionsRecord {
                co2: Some(360.0 - t),
                ch4: Some(120.0),
                n2o: Some(22.0),
                f_gases: Some(9.0),
                total_ghg: Some(511.0 - t),
                electricity: Some(190.0 - 2.0 * t),
                historical: Some(515.0 - t),
                uncertainty_lower: (y >= 2010).then_some(495.0 - t),
                uncertainty_upper: (y >= 2010).then_some(535.0 - t),
                ndc_target: (y == 2016).then_some(450.0),
                ..EmissionsRecord::for_year(y)
            }
        })
        .collect()
}

#[test]
fn svg_string_has_title_axis_and_legend() {
    let svg = viz::render_svg_string(
        &sample_records(),
        LegendRegistry::australia(),
        &ChartOptions::default(),
    )
    .unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Emissions - Australia"));
    assert!(svg.contains("Emissions GHG (Mt CO₂eq/yr)"));
    assert!(svg.contains("UNCERTAINTY RANGE"));
    assert!(svg.contains("Net-Zero Target"));
}

#[test]
fn hover_snapshot_draws_the_tooltip_text() {
    let options = ChartOptions {
        hover: Some(2015),
        ..ChartOptions::default()
    };
    let svg =
        viz::render_svg_string(&sample_records(), LegendRegistry::australia(), &options).unwrap();
    assert!(svg.contains("Year: 2015"));
    // the true upper bound, not the band thickness
    assert!(svg.contains("Upper Uncertainty: 528.00 Mt CO₂eq/yr"));
}

#[test]
fn hover_on_missing_year_draws_no_tooltip() {
    let options = ChartOptions {
        hover: Some(1995),
        ..ChartOptions::default()
    };
    let svg =
        viz::render_svg_string(&sample_records(), LegendRegistry::australia(), &options).unwrap();
    assert!(!svg.contains("Year: 1995"));
}

#[test]
fn hidden_legend_and_empty_title() {
    let options = ChartOptions {
        title: String::new(),
        legend: LegendMode::Hidden,
        ..ChartOptions::default()
    };
    let svg =
        viz::render_svg_string(&sample_records(), LegendRegistry::australia(), &options).unwrap();
    assert!(!svg.contains("Emissions - Australia"));
    assert!(!svg.contains("UNCERTAINTY RANGE"));
}

#[test]
fn writes_svg_and_png_files() {
    let dir = tempfile::tempdir().unwrap();
    let records = sample_records();
    let options = ChartOptions {
        width: 800,
        height: 480,
        legend: LegendMode::Bottom,
        ..ChartOptions::default()
    };

    for name in ["chart.svg", "chart.png"] {
        let path = dir.path().join(name);
        viz::plot_emissions(&records, LegendRegistry::australia(), &path, &options).unwrap();
        let meta = fs::metadata(&path).expect("file created");
        assert!(meta.len() > 0, "{name} has content");
    }
}

#[test]
fn empty_dataset_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.svg");
    let err = viz::plot_emissions(
        &[],
        LegendRegistry::australia(),
        &path,
        &ChartOptions::default(),
    );
    assert!(err.is_err());
}
