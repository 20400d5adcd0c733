//! Static tooltip snapshot: cursor line plus the resolved tooltip box.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::estimate_text_width_px;
use super::util::color_or_black;
use crate::tooltip::{LineKind, TooltipFragment};

const FONT_PX: u32 = 12;
const LINE_H: i32 = 18;
const PAD: i32 = 8;
const OFFSET: i32 = 12;

const BORDER: RGBColor = RGBColor(209, 213, 219);
const HEADING: RGBColor = RGBColor(55, 65, 81);

/// Pixel size of the box needed for `lines`.
pub fn tooltip_box_size(lines: &[String]) -> (i32, i32) {
    let w = lines
        .iter()
        .map(|l| estimate_text_width_px(l, FONT_PX))
        .max()
        .unwrap_or(0) as i32;
    (w + 2 * PAD, lines.len() as i32 * LINE_H + 2 * PAD)
}

/// Top-left corner for a box of `size` next to `anchor`, kept inside `bounds`.
///
/// Prefers the right of the anchor and flips to the left when it would overflow.
pub fn place_box(size: (i32, i32), anchor: (i32, i32), bounds: (i32, i32)) -> (i32, i32) {
    let (w, h) = size;
    let (bw, bh) = bounds;
    let mut x = anchor.0 + OFFSET;
    if x + w > bw {
        x = anchor.0 - OFFSET - w;
    }
    let y = (anchor.1 - h / 2).min(bh - h).max(0);
    (x.max(0), y)
}

/// Draw the tooltip box for `fragment` next to `anchor` (pixel coordinates in `area`).
pub fn draw_tooltip_box<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    fragment: &TooltipFragment,
    anchor: (i32, i32),
    locale_tag: &str,
) -> Result<()> {
    let lines = fragment.lines(locale_tag);
    let texts: Vec<String> = lines.iter().map(|l| l.text.clone()).collect();
    let size = tooltip_box_size(&texts);
    let (aw, ah) = area.dim_in_pixel();
    let (x, y) = place_box(size, anchor, (aw as i32, ah as i32));

    area.draw(&Rectangle::new(
        [(x, y), (x + size.0, y + size.1)],
        WHITE.filled(),
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    area.draw(&Rectangle::new(
        [(x, y), (x + size.0, y + size.1)],
        BORDER.stroke_width(1),
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    for (i, line) in lines.iter().enumerate() {
        let color = match (line.kind, line.color.as_deref()) {
            (LineKind::Item, Some(c)) => color_or_black(c),
            (LineKind::Heading, _) => HEADING,
            _ => BLACK,
        };
        let style = TextStyle::from((FontFamily::SansSerif, FONT_PX))
            .pos(Pos::new(HPos::Left, VPos::Center))
            .color(&color);
        let cy = y + PAD + i as i32 * LINE_H + LINE_H / 2;
        area.draw(&Text::new(line.text.as_str(), (x + PAD, cy), style))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    Ok(())
}

/// Vertical hover cursor from `top` to `bottom` at pixel column `x`.
pub fn draw_cursor<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    x: i32,
    top: i32,
    bottom: i32,
) -> Result<()> {
    area.draw(&PathElement::new(
        vec![(x, top), (x, bottom)],
        RGBColor(156, 163, 175).stroke_width(1),
    ))
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}
