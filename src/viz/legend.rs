//! Grouped legend panel: one block per category, each entry drawn with its icon swatch.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_text_width_px, truncate_to_width};
use super::types::LegendMode;
use super::util::{color_or_black, dash_polyline};
use crate::legend::{IconShape, IconSpec, LegendGroup};

// Layout constants shared by the estimators and the drawing code.
const FONT_PX: u32 = 12;
const TITLE_FONT_PX: u32 = 14;
const LINE_H: i32 = 18;
const GROUP_GAP: i32 = 12;
const PAD: i32 = 12;
const SWATCH_W: i32 = 16;
const SWATCH_TO_TEXT: i32 = 8;
const COLUMN_GAP: i32 = 24;
const MAX_LABEL_PX: u32 = 220;

const HEADER_COLOR: RGBColor = RGBColor(55, 65, 81);

fn label_width_px(group: &LegendGroup) -> i32 {
    let header = estimate_text_width_px(&group.category.label().to_uppercase(), FONT_PX);
    let items = group
        .items
        .iter()
        .map(|d| estimate_text_width_px(&d.name, FONT_PX).min(MAX_LABEL_PX))
        .max()
        .unwrap_or(0);
    header.max(items + (SWATCH_W + SWATCH_TO_TEXT) as u32) as i32
}

fn title_block_h(title: &str) -> i32 {
    if title.trim().is_empty() {
        0
    } else {
        TITLE_FONT_PX as i32 + GROUP_GAP
    }
}

/// Width of the right-hand legend panel in pixels.
pub fn estimate_right_legend_width_px(groups: &[LegendGroup], title: &str) -> i32 {
    let title_w = estimate_text_width_px(&title.to_uppercase(), TITLE_FONT_PX) as i32;
    let content = groups.iter().map(label_width_px).max().unwrap_or(0);
    (content.max(title_w) + 2 * PAD).clamp(140, 320)
}

/// Height of the bottom legend band in pixels (tallest category column).
pub fn estimate_bottom_legend_height_px(groups: &[LegendGroup], title: &str) -> i32 {
    let tallest = groups
        .iter()
        .map(|g| (g.items.len() as i32 + 1) * LINE_H)
        .max()
        .unwrap_or(0);
    PAD + title_block_h(title) + tallest + PAD
}

/// Draw the legend into `legend_area` (Right: stacked blocks; Bottom: side-by-side columns).
pub fn draw_grouped_legend<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    groups: &[LegendGroup],
    title: &str,
    placement: LegendMode,
) -> Result<()> {
    legend_area
        .fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let title_style = TextStyle::from((FontFamily::SansSerif, TITLE_FONT_PX))
        .pos(Pos::new(HPos::Left, VPos::Top));

    let top = if title.trim().is_empty() {
        PAD
    } else {
        legend_area
            .draw(&Text::new(title.to_uppercase(), (PAD, PAD), title_style))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        PAD + title_block_h(title)
    };

    match placement {
        LegendMode::Right => {
            let mut y = top;
            for group in groups {
                y = draw_group(legend_area, group, PAD, y)? + GROUP_GAP;
            }
        }
        LegendMode::Bottom => {
            let mut x = PAD;
            for group in groups {
                draw_group(legend_area, group, x, top)?;
                x += label_width_px(group) + COLUMN_GAP;
            }
        }
        LegendMode::Hidden => {}
    }
    Ok(())
}

/// Draw one category block starting at `(x, y_top)`; returns the y below it.
fn draw_group<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    group: &LegendGroup,
    x: i32,
    y_top: i32,
) -> Result<i32> {
    let header_style = TextStyle::from((FontFamily::SansSerif, FONT_PX))
        .pos(Pos::new(HPos::Left, VPos::Center))
        .color(&HEADER_COLOR);
    let label_style =
        TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));

    let mut y = y_top;
    area.draw(&Text::new(
        group.category.label().to_uppercase(),
        (x, y + LINE_H / 2),
        header_style,
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    y += LINE_H;

    for d in &group.items {
        let center_y = y + LINE_H / 2;
        draw_swatch(area, x, center_y, d.icon(), color_or_black(&d.color))?;
        let text = truncate_to_width(&d.name, FONT_PX, MAX_LABEL_PX);
        area.draw(&Text::new(
            text,
            (x + SWATCH_W + SWATCH_TO_TEXT, center_y),
            label_style.clone(),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        y += LINE_H;
    }
    Ok(y)
}

/// Draw an icon swatch whose left edge is `x`, vertically centered on `y`.
pub fn draw_swatch<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    x: i32,
    y: i32,
    spec: IconSpec,
    color: RGBColor,
) -> Result<()> {
    let (w, h) = (spec.width as i32, spec.height as i32);
    if spec.is_stroke() {
        let stroke = ShapeStyle {
            color: color.to_rgba(),
            filled: false,
            stroke_width: spec.height,
        };
        let segment = vec![(x, y), (x + w, y)];
        let pieces = match spec.dash_pattern() {
            Some((dash, gap)) => dash_polyline(&segment, dash as f64, gap as f64),
            None => vec![segment],
        };
        for piece in pieces {
            area.draw(&PathElement::new(piece, stroke))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
        return Ok(());
    }
    match spec.shape {
        IconShape::Triangle => {
            area.draw(&Polygon::new(
                vec![(x + w / 2, y - h / 2), (x, y + h / 2), (x + w, y + h / 2)],
                color.filled(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
        _ => {
            area.draw(&Rectangle::new(
                [(x, y - h / 2), (x + w, y + h / 2)],
                color.filled(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
    }
    Ok(())
}
