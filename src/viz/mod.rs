//! Visualization: render the emissions chart to **SVG** or **PNG**.
//!
//! - Stacked gas areas, uncertainty band, scenario/history lines, target markers
//! - Fixed axes (1990–2060, −100..700 Mt CO₂eq/yr) with decade and 200-step ticks
//! - Grouped legend panel (right or bottom) drawn from the legend registry
//! - Optional hover snapshot: cursor line plus the resolved tooltip box

pub mod legend;
pub mod text;
pub mod tooltip;
pub mod types;
pub mod util;

pub use types::{ChartOptions, DEFAULT_LEGEND_MODE, LegendMode};

use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;
use std::sync::Once;

use crate::chart::{
    CHART_SERIES, MarkKind, X_DOMAIN, X_TICKS, Y_AXIS_LABEL, Y_DOMAIN, Y_TICKS, payload_for_year,
    series_points,
};
use crate::format::format_tick;
use crate::gate::{PointerEvent, TooltipGate};
use crate::legend::LegendRegistry;
use crate::models::EmissionsRecord;
use crate::tooltip::{UPPER_UNCERTAINTY, render_tooltip};

use legend::{draw_grouped_legend, estimate_bottom_legend_height_px, estimate_right_legend_width_px};
use tooltip::{draw_cursor, draw_tooltip_box};
use util::{compute_left_label_area_px, dash_polyline, series_color};

const MARGIN: u32 = 16;
const LEGEND_TITLE: &str = "Legend";
const DASH_PX: f64 = 5.0;
const TARGET_MARKER_PX: i32 = 6;

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Render the chart to `out_path`; `.svg` selects the SVG backend, anything else PNG.
pub fn plot_emissions<P: AsRef<Path>>(
    records: &[EmissionsRecord],
    registry: &LegendRegistry,
    out_path: P,
    options: &ChartOptions,
) -> Result<()> {
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (options.width, options.height);

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_chart(root, records, registry, options)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_chart(root, records, registry, options)?;
    }
    log::info!("wrote chart to {}", out_path.display());
    Ok(())
}

/// Render the chart as an SVG document in memory.
pub fn render_svg_string(
    records: &[EmissionsRecord],
    registry: &LegendRegistry,
    options: &ChartOptions,
) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (options.width, options.height))
            .into_drawing_area();
        draw_chart(root, records, registry, options)?;
    }
    Ok(buf)
}

fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    records: &[EmissionsRecord],
    registry: &LegendRegistry,
    options: &ChartOptions,
) -> Result<()>
where
    DB: DrawingBackend,
{
    if records.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    ensure_fonts_registered();

    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| r.year);

    // ----------------------------
    // 1) Split drawing areas
    // ----------------------------
    let groups = registry.groups();
    let (root_w_u32, root_h_u32) = root.dim_in_pixel();
    let (root_w, root_h) = (root_w_u32 as i32, root_h_u32 as i32);

    // The plot always starts at the root origin, so pixel coordinates from
    // `backend_coord` can be drawn straight onto `plot_area`.
    let (plot_area, legend_area_opt): (DrawingArea<DB, Shift>, Option<DrawingArea<DB, Shift>>) =
        match options.legend {
            LegendMode::Right => {
                let w = estimate_right_legend_width_px(groups, LEGEND_TITLE);
                let (plot, legend) = root.split_horizontally((root_w - w).max(40));
                (plot, Some(legend))
            }
            LegendMode::Bottom => {
                let h = estimate_bottom_legend_height_px(groups, LEGEND_TITLE);
                let (plot, legend) = root.split_vertically((root_h - h).max(40));
                (plot, Some(legend))
            }
            LegendMode::Hidden => (root, None),
        };

    plot_area
        .fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // ----------------------------
    // 2) Axes
    // ----------------------------
    let locale = options.locale.as_str();
    let y_tick_labels: Vec<String> = Y_TICKS
        .iter()
        .chain(std::iter::once(&Y_DOMAIN.0))
        .map(|v| format_tick(*v, locale))
        .collect();
    let left_label_width_px = compute_left_label_area_px(&y_tick_labels, 12);

    // Label-count hints chosen so Plotters lands exactly on X_TICKS / Y_TICKS.
    let x_range = X_DOMAIN.0 as f64..X_DOMAIN.1 as f64;
    let y_range = Y_DOMAIN.0..Y_DOMAIN.1;

    let mut builder = ChartBuilder::on(&plot_area);
    builder
        .margin(MARGIN)
        .set_label_area_size(LabelAreaPosition::Left, left_label_width_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 40);
    let title = options.title.trim();
    if !title.is_empty() {
        builder.caption(title, (FontFamily::SansSerif, 24));
    }
    let mut chart = builder
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let x_label_fmt = |x: &f64| (x.round() as i32).to_string();
    let y_label_fmt = |v: &f64| format_tick(*v, locale);
    chart
        .configure_mesh()
        .y_desc(Y_AXIS_LABEL)
        .x_labels(X_TICKS.len())
        .y_labels(Y_TICKS.len())
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // ----------------------------
    // 3) Stacked gas areas
    // ----------------------------
    let stacked: Vec<(usize, _)> = CHART_SERIES
        .iter()
        .enumerate()
        .filter(|(_, s)| s.kind == MarkKind::StackedArea)
        .collect();
    let stack_rows: Vec<&EmissionsRecord> = sorted
        .iter()
        .filter(|r| stacked.iter().any(|(_, s)| s.value(r).is_some()))
        .collect();
    let mut cum: Vec<f64> = vec![0.0; stack_rows.len()];

    for (idx, series) in &stacked {
        if stack_rows.len() < 2 {
            break;
        }
        let color = series_color(registry, series.name, *idx);
        let mut lower: Vec<(f64, f64)> = Vec::with_capacity(stack_rows.len());
        let mut upper: Vec<(f64, f64)> = Vec::with_capacity(stack_rows.len());
        for (i, r) in stack_rows.iter().enumerate() {
            let x = r.year as f64;
            lower.push((x, cum[i]));
            cum[i] += series.value(r).unwrap_or(0.0).max(0.0);
            upper.push((x, cum[i]));
        }
        // polygon: lower (forward) + upper (reverse)
        let mut poly = lower;
        poly.extend(upper.into_iter().rev());
        chart
            .draw_series(std::iter::once(Polygon::new(poly, color.filled())))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    // ----------------------------
    // 4) Uncertainty band
    // ----------------------------
    let band: Vec<(f64, f64, f64)> = sorted
        .iter()
        .filter_map(|r| match (r.uncertainty_lower, r.uncertainty_upper) {
            (Some(lo), Some(hi)) => Some((r.year as f64, lo, hi)),
            _ => None,
        })
        .collect();
    if band.len() >= 2 {
        let color = series_color(registry, UPPER_UNCERTAINTY, 0);
        let mut poly: Vec<(f64, f64)> = band.iter().map(|(x, lo, _)| (*x, *lo)).collect();
        poly.extend(band.iter().rev().map(|(x, _, hi)| (*x, *hi)));
        chart
            .draw_series(std::iter::once(Polygon::new(poly, color.mix(0.7).filled())))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    // ----------------------------
    // 5) Lines and target markers
    // ----------------------------
    for (idx, series) in CHART_SERIES.iter().enumerate() {
        let color = series_color(registry, series.name, idx);
        let points = series_points(&sorted, series);
        match series.kind {
            MarkKind::Line => {
                let style = ShapeStyle {
                    color: color.to_rgba(),
                    filled: false,
                    stroke_width: 2,
                };
                chart
                    .draw_series(LineSeries::new(points, style))
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            }
            MarkKind::DashedLine => {
                let px: Vec<(i32, i32)> = points.iter().map(|p| chart.backend_coord(p)).collect();
                for seg in dash_polyline(&px, DASH_PX, DASH_PX) {
                    plot_area
                        .draw(&PathElement::new(seg, color.stroke_width(2)))
                        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                }
            }
            MarkKind::TargetMarker => {
                let s = TARGET_MARKER_PX;
                chart
                    .draw_series(points.iter().map(|&(x, y)| {
                        EmptyElement::at((x, y))
                            + Polygon::new(vec![(0, -s), (-s, s), (s, s)], color.filled())
                            + PathElement::new(
                                vec![(0, -s), (-s, s), (s, s), (0, -s)],
                                BLACK.stroke_width(1),
                            )
                    }))
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            }
            MarkKind::StackedArea | MarkKind::BandBaseline | MarkKind::BandDelta => {}
        }
    }

    // ----------------------------
    // 6) Hover snapshot
    // ----------------------------
    if let Some(year) = options.hover {
        let mut gate = TooltipGate::new();
        gate.handle(PointerEvent::Move {
            inside: (X_DOMAIN.0..=X_DOMAIN.1).contains(&year),
        });
        let payload = payload_for_year(records, year);
        match render_tooltip(gate.is_active(), &payload, year, registry, records) {
            Some(fragment) if !fragment.is_empty() => {
                let (x, top) = chart.backend_coord(&(year as f64, Y_DOMAIN.1));
                let (_, bottom) = chart.backend_coord(&(year as f64, Y_DOMAIN.0));
                draw_cursor(&plot_area, x, top, bottom)?;
                draw_tooltip_box(&plot_area, &fragment, (x, (top + bottom) / 2), locale)?;
            }
            _ => log::info!("nothing to show in the tooltip for {year}"),
        }
    }

    // ----------------------------
    // 7) Legend and present
    // ----------------------------
    if let Some(ref legend_area) = legend_area_opt {
        draw_grouped_legend(legend_area, groups, LEGEND_TITLE, options.legend)?;
    }

    plot_area
        .present()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if let Some(ref legend_area) = legend_area_opt {
        legend_area
            .present()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::coord::types::RangedCoordf64;

    #[test]
    fn label_hints_land_on_the_published_ticks() {
        let x: RangedCoordf64 = (X_DOMAIN.0 as f64..X_DOMAIN.1 as f64).into();
        let want_x: Vec<f64> = X_TICKS.iter().map(|y| *y as f64).collect();
        assert_eq!(x.key_points(X_TICKS.len()), want_x);

        let y: RangedCoordf64 = (Y_DOMAIN.0..Y_DOMAIN.1).into();
        assert_eq!(y.key_points(Y_TICKS.len()), Y_TICKS.to_vec());
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let err = render_svg_string(&[], LegendRegistry::australia(), &ChartOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("no data"));
    }
}
