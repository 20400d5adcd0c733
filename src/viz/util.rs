//! Utility functions for visualization: colors, dash geometry, label gutters.

use anyhow::{Result, anyhow};
use plotters::prelude::*;

use super::text::estimate_text_width_px;
use crate::legend::LegendRegistry;

/// Microsoft Office (2013+) chart series palette, used for series missing from the registry.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

#[inline]
pub fn office_color(idx: usize) -> RGBColor {
    OFFICE10[idx % OFFICE10.len()]
}

/// Parse `#rgb` or `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Result<RGBColor> {
    let hex = s.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return Err(anyhow!("invalid hex color {:?}", s));
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return Err(anyhow!("invalid hex color {:?}", s)),
    };
    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .map_err(|_| anyhow!("invalid hex color {:?}", s))
    };
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Color for a named series: the registry color, else a palette color.
pub fn series_color(registry: &LegendRegistry, name: &str, idx: usize) -> RGBColor {
    match registry.get(name) {
        Some(d) => color_or_black(&d.color),
        None => {
            log::debug!("series {name:?} not in legend registry, using palette color");
            office_color(idx)
        }
    }
}

/// Parse a configured color; unparsable colors are drawn black.
pub fn color_or_black(s: &str) -> RGBColor {
    parse_hex_color(s).unwrap_or_else(|e| {
        log::warn!("{e}; drawing in black");
        BLACK
    })
}

/// Split a pixel polyline into dash segments of `dash` px separated by `gap` px.
pub fn dash_polyline(points: &[(i32, i32)], dash: f64, gap: f64) -> Vec<Vec<(i32, i32)>> {
    let mut out: Vec<Vec<(i32, i32)>> = Vec::new();
    if points.len() < 2 || dash <= 0.0 {
        return out;
    }
    let period = dash + gap.max(0.0);
    let mut phase = 0.0f64; // distance travelled within the current period
    let mut cur: Vec<(i32, i32)> = Vec::new();

    for w in points.windows(2) {
        let (x0, y0) = (w[0].0 as f64, w[0].1 as f64);
        let (x1, y1) = (w[1].0 as f64, w[1].1 as f64);
        let len = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
        if len == 0.0 {
            continue;
        }
        let at = |t: f64| {
            (
                (x0 + (x1 - x0) * t / len).round() as i32,
                (y0 + (y1 - y0) * t / len).round() as i32,
            )
        };
        let mut t = 0.0f64;
        while t < len {
            if phase < dash {
                if cur.is_empty() {
                    cur.push(at(t));
                }
                let step = (dash - phase).min(len - t);
                t += step;
                phase += step;
                cur.push(at(t));
                if phase >= dash {
                    out.push(std::mem::take(&mut cur));
                }
            } else {
                let step = (period - phase).min(len - t);
                t += step;
                phase += step;
            }
            if phase >= period {
                phase = 0.0;
            }
        }
    }
    if cur.len() >= 2 {
        out.push(cur);
    }
    out
}

/// Left label gutter wide enough for the widest formatted Y tick.
pub fn compute_left_label_area_px(tick_labels: &[String], font_px: u32) -> u32 {
    let max_px = tick_labels
        .iter()
        .map(|s| estimate_text_width_px(s, font_px))
        .max()
        .unwrap_or(0);
    // room for tick marks and the rotated axis description
    max_px.saturating_add(40).clamp(56, 140)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex_color("#62b947").unwrap(), RGBColor(0x62, 0xb9, 0x47));
        assert_eq!(parse_hex_color("fff").unwrap(), RGBColor(255, 255, 255));
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#zzzzzz").is_err());
    }

    #[test]
    fn bad_colors_draw_black() {
        assert_eq!(color_or_black("teal"), BLACK);
    }

    #[test]
    fn dashes_alternate_along_a_straight_line() {
        let dashes = dash_polyline(&[(0, 0), (20, 0)], 5.0, 5.0);
        assert_eq!(
            dashes,
            vec![vec![(0, 0), (5, 0)], vec![(10, 0), (15, 0)]]
        );
    }

    #[test]
    fn dashes_continue_across_vertices() {
        let dashes = dash_polyline(&[(0, 0), (3, 0), (3, 4)], 5.0, 2.0);
        // first dash bends around the corner at (3, 0)
        assert_eq!(dashes[0], vec![(0, 0), (3, 0), (3, 2)]);
    }

    #[test]
    fn degenerate_polylines_have_no_dashes() {
        assert!(dash_polyline(&[(1, 1)], 5.0, 5.0).is_empty());
        assert!(dash_polyline(&[(0, 0), (10, 0)], 0.0, 5.0).is_empty());
    }
}
