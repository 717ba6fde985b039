//! Overlay placement on the canonical card.
//!
//! All constants are canonical (scale factor 1) logical units. [`layout`] multiplies every
//! font size, margin and track dimension by the scale factor, so one function serves both the
//! responsive preview and the 1200x1200 export.

use crate::bean::model::format_ratio;
use crate::card::composition::{CardComposition, CardFont};
use crate::foundation::core::{CANONICAL_SIZE, Point, Rect, Size};
use crate::foundation::error::{CardError, CardResult};
use crate::layout::wrap::{TextMeasure, wrap_words};

pub const CARD_INSET: f64 = 72.0;
pub const CORNER_RADIUS: f64 = 48.0;

pub const NAME_FONT_SIZE: f64 = 116.0;
pub const NAME_LINE_HEIGHT: f64 = 1.2;
pub const NAME_MAX_WIDTH_FRACTION: f64 = 0.8;

pub const BLEND_GAP: f64 = 24.0;
pub const BLEND_FONT_SIZE: f64 = 36.0;

pub const BODY_LINE_HEIGHT: f64 = 1.5;

pub const FLAVOR_FONT_SIZE: f64 = 38.0;
pub const MAX_FLAVOR_NOTES: usize = 5;
pub const FLAVOR_PREFIX: &str = "# ";

pub const INTENSITY_ROW_GAP: f64 = 24.0;
pub const INTENSITY_LABEL_FONT_SIZE: f64 = 36.0;
pub const INTENSITY_LABEL_GAP: f64 = 12.0;
pub const TRACK_WIDTH: f64 = 384.0;
pub const TRACK_HEIGHT: f64 = 6.0;

#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Line box; glyphs are centered vertically inside it.
    pub bounds: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub font: CardFont,
    pub font_size: f64,
    pub lines: Vec<TextLine>,
    pub bounds: Rect,
}

impl TextBlock {
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntensityRow {
    pub label: TextBlock,
    pub value: u8,
    /// `(value / 10) * 100`.
    pub fill_percent: f64,
    pub track: Rect,
    pub fill: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntensityBlock {
    pub rows: Vec<IntensityRow>,
    pub bounds: Rect,
}

/// Positioned overlay regions for one scale factor.
#[derive(Clone, Debug, PartialEq)]
pub struct CardLayout {
    pub scale: f64,
    pub size: Size,
    pub corner_radius: f64,
    pub name: Option<TextBlock>,
    pub blend: Option<TextBlock>,
    pub flavor: Option<TextBlock>,
    pub intensity: Option<IntensityBlock>,
}

impl CardLayout {
    pub fn has_overlays(&self) -> bool {
        self.name.is_some()
            || self.blend.is_some()
            || self.flavor.is_some()
            || self.intensity.is_some()
    }

    /// Every text block, in paint order.
    pub fn text_blocks(&self) -> Vec<&TextBlock> {
        let mut out: Vec<&TextBlock> = [&self.name, &self.blend, &self.flavor]
            .into_iter()
            .flatten()
            .collect();
        if let Some(intensity) = &self.intensity {
            out.extend(intensity.rows.iter().map(|r| &r.label));
        }
        out
    }
}

pub fn fill_percent(value: u8) -> f64 {
    (f64::from(value.min(10)) / 10.0) * 100.0
}

/// Place overlays for `comp` at `scale` (1.0 = canonical export size).
#[tracing::instrument(level = "debug", skip(comp, measure))]
pub fn layout(
    comp: &CardComposition,
    scale: f64,
    measure: &mut dyn TextMeasure,
) -> CardResult<CardLayout> {
    if !scale.is_finite() || scale < 0.0 {
        return Err(CardError::validation(format!(
            "scale factor must be finite and >= 0, got {scale}"
        )));
    }

    let edge = f64::from(CANONICAL_SIZE) * scale;
    let inset = CARD_INSET * scale;
    let display = &comp.display;
    let font = display.font;

    let name = display.name_visible().then(|| {
        let font_size = NAME_FONT_SIZE * scale;
        let max_width = edge * NAME_MAX_WIDTH_FRACTION;
        let lines = wrap_words(&comp.display_name, max_width, font_size, measure);
        stack_lines(
            lines,
            Point::new(inset, inset),
            font,
            font_size,
            font_size * NAME_LINE_HEIGHT,
            measure,
        )
    });

    // The breakdown hangs off the name block and disappears with it.
    let blend = match (comp.bean.origin.as_blend(), &name) {
        (Some(b), Some(name)) if display.blend_visible(&comp.bean) => {
            let font_size = BLEND_FONT_SIZE * scale;
            let max_width = edge * NAME_MAX_WIDTH_FRACTION;
            let top = name.bounds.y1 + BLEND_GAP * scale;
            let mut lines = Vec::with_capacity(b.components.len());
            for c in &b.components {
                let text = format!("{}: {}%", c.country, format_ratio(c.ratio));
                lines.extend(wrap_words(&text, max_width, font_size, measure));
            }
            Some(stack_lines(
                lines,
                Point::new(inset, top),
                font,
                font_size,
                font_size * BODY_LINE_HEIGHT,
                measure,
            ))
        }
        _ => None,
    };

    let flavor = display.flavor_visible(&comp.bean).then(|| {
        let font_size = FLAVOR_FONT_SIZE * scale;
        let line_height = font_size * BODY_LINE_HEIGHT;
        let lines: Vec<String> = comp
            .bean
            .flavor_notes
            .iter()
            .take(MAX_FLAVOR_NOTES)
            .map(|note| format!("{FLAVOR_PREFIX}{note}"))
            .collect();
        let top = edge - inset - line_height * lines.len() as f64;
        stack_lines(
            lines,
            Point::new(inset, top),
            font,
            font_size,
            line_height,
            measure,
        )
    });

    let intensity = display
        .intensity_visible()
        .then(|| intensity_block(comp, edge, inset, scale, measure));

    Ok(CardLayout {
        scale,
        size: Size::new(edge, edge),
        corner_radius: CORNER_RADIUS * scale,
        name,
        blend,
        flavor,
        intensity,
    })
}

fn stack_lines(
    lines: Vec<String>,
    origin: Point,
    font: CardFont,
    font_size: f64,
    line_height: f64,
    measure: &mut dyn TextMeasure,
) -> TextBlock {
    let mut width = 0.0f64;
    let mut y = origin.y;
    let mut out = Vec::with_capacity(lines.len());
    for text in lines {
        let w = measure.advance(&text, font_size);
        width = width.max(w);
        out.push(TextLine {
            text,
            bounds: Rect::new(origin.x, y, origin.x + w, y + line_height),
        });
        y += line_height;
    }
    TextBlock {
        font,
        font_size,
        lines: out,
        bounds: Rect::new(origin.x, origin.y, origin.x + width, y),
    }
}

fn intensity_block(
    comp: &CardComposition,
    edge: f64,
    inset: f64,
    scale: f64,
    measure: &mut dyn TextMeasure,
) -> IntensityBlock {
    let font_size = INTENSITY_LABEL_FONT_SIZE * scale;
    let label_height = font_size * BODY_LINE_HEIGHT;
    let track_w = TRACK_WIDTH * scale;
    let track_h = TRACK_HEIGHT * scale;
    let row_gap = INTENSITY_ROW_GAP * scale;
    let label_gap = INTENSITY_LABEL_GAP * scale;
    let row_height = row_gap + label_height + label_gap + track_h;

    let rows_src = comp.bean.intensity.rows();
    let label_w = rows_src
        .iter()
        .map(|(label, _)| measure.advance(label, font_size))
        .fold(0.0, f64::max);
    let width = track_w.max(label_w);
    let right = edge - inset;
    let bottom = edge - inset;
    let left = right - width;
    let top = bottom - row_height * rows_src.len() as f64;

    let mut rows = Vec::with_capacity(rows_src.len());
    let mut y = top;
    for (label, value) in rows_src {
        let label_top = y + row_gap;
        let label_block = stack_lines(
            vec![label.to_owned()],
            Point::new(left, label_top),
            comp.display.font,
            font_size,
            label_height,
            measure,
        );
        let track_top = label_top + label_height + label_gap;
        let track = Rect::new(left, track_top, left + track_w, track_top + track_h);
        let pct = fill_percent(value);
        let fill = Rect::new(
            left,
            track_top,
            left + track_w * pct / 100.0,
            track_top + track_h,
        );
        rows.push(IntensityRow {
            label: label_block,
            value,
            fill_percent: pct,
            track,
            fill,
        });
        y += row_height;
    }

    IntensityBlock {
        rows,
        bounds: Rect::new(left, top, right, bottom),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/card.rs"]
mod tests;
