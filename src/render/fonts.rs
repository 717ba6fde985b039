use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::card::composition::CardFont;
use crate::foundation::error::{CardError, CardResult};
use crate::layout::wrap::{EmMeasure, TextMeasure};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TextBrushRgba8 {
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Font bytes for the selectable card fonts.
#[derive(Clone, Default)]
pub struct FontBook {
    fonts: HashMap<CardFont, Arc<Vec<u8>>>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut loaded: Vec<&'static str> = self.fonts.keys().map(|k| k.family_name()).collect();
        loaded.sort_unstable();
        f.debug_struct("FontBook").field("loaded", &loaded).finish()
    }
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every [`CardFont::file_name`] present in `dir`. Missing files are skipped.
    pub fn from_dir(dir: impl AsRef<Path>) -> CardResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(CardError::validation(format!(
                "font directory '{}' does not exist",
                dir.display()
            )));
        }

        let mut book = Self::new();
        for font in CardFont::ALL {
            let path = dir.join(font.file_name());
            if !path.is_file() {
                tracing::debug!(font = font.family_name(), path = %path.display(), "font file missing");
                continue;
            }
            let bytes = std::fs::read(&path)
                .with_context(|| format!("read font '{}'", path.display()))?;
            book.insert(font, bytes);
        }
        tracing::debug!(loaded = book.len(), dir = %dir.display(), "loaded card fonts");
        Ok(book)
    }

    pub fn insert(&mut self, font: CardFont, bytes: Vec<u8>) {
        self.fonts.insert(font, Arc::new(bytes));
    }

    pub fn get(&self, font: CardFont) -> Option<&Arc<Vec<u8>>> {
        self.fonts.get(&font)
    }

    pub fn contains(&self, font: CardFont) -> bool {
        self.fonts.contains_key(&font)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Stateful helper for building Parley single-line layouts from card fonts.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<CardFont, String>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, font: CardFont, font_bytes: &[u8]) -> CardResult<String> {
        if let Some(name) = self.families.get(&font) {
            return Ok(name.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CardError::render(format!(
                "no font families registered for {}",
                font.family_name()
            ))
        })?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::render("registered font family has no name"))?
            .to_string();
        self.families.insert(font, name.clone());
        Ok(name)
    }

    /// Shape `text` as one unbroken line.
    pub fn layout_line(
        &mut self,
        text: &str,
        font: CardFont,
        font_bytes: &[u8],
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> CardResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::render("text size must be finite and > 0"));
        }
        let family = self.family_for(font, font_bytes)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Advance and height of a shaped layout.
pub(crate) fn layout_extent(layout: &parley::Layout<TextBrushRgba8>) -> (f64, f64) {
    let mut w = 0.0f64;
    let mut h = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(f64::from(m.advance));
        h += f64::from(m.ascent + m.descent + m.leading);
    }
    (w, h)
}

/// Font-backed [`TextMeasure`]. Falls back to [`EmMeasure`] when the font is not loaded.
pub struct FontMeasure<'a> {
    engine: &'a mut TextEngine,
    font: CardFont,
    bytes: Option<Arc<Vec<u8>>>,
}

impl<'a> FontMeasure<'a> {
    pub fn new(engine: &'a mut TextEngine, book: &FontBook, font: CardFont) -> Self {
        Self {
            engine,
            font,
            bytes: book.get(font).cloned(),
        }
    }
}

impl TextMeasure for FontMeasure<'_> {
    fn advance(&mut self, text: &str, font_size: f64) -> f64 {
        let Some(bytes) = &self.bytes else {
            return EmMeasure.advance(text, font_size);
        };
        match self.engine.layout_line(
            text,
            self.font,
            bytes,
            font_size as f32,
            TextBrushRgba8::WHITE,
        ) {
            Ok(layout) => layout_extent(&layout).0,
            Err(_) => EmMeasure.advance(text, font_size),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fonts.rs"]
mod tests;
