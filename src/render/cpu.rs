use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::card::composition::{CardComposition, CardFont};
use crate::foundation::core::{CANONICAL_SIZE, Rect};
use crate::foundation::error::{CardError, CardResult};
use crate::foundation::math::{premul_over_px, scale_px};
use crate::gradient::compose::MeshBackground;
use crate::layout::card::{CardLayout, IntensityBlock, TextBlock, layout};
use crate::render::backend::FrameRGBA;
use crate::render::fonts::{FontBook, FontMeasure, TextBrushRgba8, TextEngine, layout_extent};

const TRACK_RGBA: [u8; 4] = [255, 255, 255, 77];
const FILL_RGBA: [u8; 4] = [255, 255, 255, 255];
const BACKGROUND_CACHE_CAPACITY: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct BackgroundKey {
    fingerprint: u64,
    width: u32,
    height: u32,
}

/// CPU renderer for card compositions.
///
/// The mesh background is evaluated per pixel (rows in parallel) and cached by content
/// fingerprint and size; overlays are drawn with `vello_cpu` on a separate layer and
/// composited source-over.
pub struct CardRasterizer {
    fonts: FontBook,
    text: TextEngine,
    font_data: HashMap<CardFont, vello_cpu::peniko::FontData>,
    background_cache: HashMap<BackgroundKey, Arc<Vec<u8>>>,
}

impl std::fmt::Debug for CardRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardRasterizer")
            .field("fonts", &self.fonts)
            .field("cached_backgrounds", &self.background_cache.len())
            .finish()
    }
}

impl CardRasterizer {
    pub fn new(fonts: FontBook) -> Self {
        Self {
            fonts,
            text: TextEngine::new(),
            font_data: HashMap::new(),
            background_cache: HashMap::new(),
        }
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Overlay layout measured with the composition's font when loaded.
    pub fn layout(&mut self, comp: &CardComposition, scale: f64) -> CardResult<CardLayout> {
        let mut measure = FontMeasure::new(&mut self.text, &self.fonts, comp.display.font);
        layout(comp, scale, &mut measure)
    }

    /// Render at a preview width in pixels (`scale = width / 1200`).
    pub fn render_preview(&mut self, comp: &CardComposition, width: u32) -> CardResult<FrameRGBA> {
        self.render(comp, f64::from(width) / f64::from(CANONICAL_SIZE))
    }

    /// Render `comp` at `scale`; the frame edge is `round(1200 * scale)` pixels.
    #[tracing::instrument(level = "debug", skip(self, comp), fields(layers = comp.background.layers.len()))]
    pub fn render(&mut self, comp: &CardComposition, scale: f64) -> CardResult<FrameRGBA> {
        let card = self.layout(comp, scale)?;
        let edge = card.size.width.round();
        if edge < 1.0 || edge > f64::from(u16::MAX) {
            return Err(CardError::render(format!(
                "card edge {edge}px is outside 1..={}",
                u16::MAX
            )));
        }
        let edge = edge as u32;

        let background = self.background(&comp.background, edge, edge);
        let mut data = background.as_ref().clone();

        if card.has_overlays() {
            let overlay = self.draw_overlays(&card, edge)?;
            for (dst, src) in data.chunks_exact_mut(4).zip(overlay.chunks_exact(4)) {
                let out = premul_over_px(
                    [dst[0], dst[1], dst[2], dst[3]],
                    [src[0], src[1], src[2], src[3]],
                );
                dst.copy_from_slice(&out);
            }
        }

        apply_corner_mask(&mut data, edge, edge, card.corner_radius);
        tracing::debug!(edge, overlays = card.has_overlays(), "rendered card");

        Ok(FrameRGBA {
            width: edge,
            height: edge,
            data,
            premultiplied: true,
        })
    }

    fn background(&mut self, bg: &MeshBackground, width: u32, height: u32) -> Arc<Vec<u8>> {
        let key = BackgroundKey {
            fingerprint: bg.fingerprint(),
            width,
            height,
        };
        if let Some(hit) = self.background_cache.get(&key) {
            return Arc::clone(hit);
        }
        if self.background_cache.len() >= BACKGROUND_CACHE_CAPACITY {
            self.background_cache.clear();
        }
        let pixels = Arc::new(render_background(bg, width, height));
        self.background_cache.insert(key, Arc::clone(&pixels));
        pixels
    }

    fn font_data_for(
        &mut self,
        font: CardFont,
    ) -> CardResult<(Arc<Vec<u8>>, vello_cpu::peniko::FontData)> {
        let bytes = self.fonts.get(font).cloned().ok_or_else(|| {
            CardError::render(format!("font {} is not loaded", font.family_name()))
        })?;
        if let Some(data) = self.font_data.get(&font) {
            return Ok((bytes, data.clone()));
        }
        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
            0,
        );
        self.font_data.insert(font, data.clone());
        Ok((bytes, data))
    }

    fn draw_overlays(&mut self, card: &CardLayout, edge: u32) -> CardResult<Vec<u8>> {
        let edge_u16: u16 = edge
            .try_into()
            .map_err(|_| CardError::render("card edge exceeds u16"))?;
        let mut ctx = vello_cpu::RenderContext::new(edge_u16, edge_u16);

        for block in card.text_blocks() {
            self.draw_text(&mut ctx, block)?;
        }
        if let Some(intensity) = &card.intensity {
            draw_tracks(&mut ctx, intensity);
        }

        let mut pixmap = vello_cpu::Pixmap::new(edge_u16, edge_u16);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        Ok(pixmap.data_as_u8_slice().to_vec())
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        block: &TextBlock,
    ) -> CardResult<()> {
        let (bytes, font) = self.font_data_for(block.font)?;
        let brush = TextBrushRgba8::WHITE;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            brush.r, brush.g, brush.b, brush.a,
        ));

        for line in &block.lines {
            let shaped = self.text.layout_line(
                &line.text,
                block.font,
                &bytes,
                block.font_size as f32,
                brush,
            )?;
            let (_, shaped_h) = layout_extent(&shaped);
            let dy = line.bounds.y0 + (line.bounds.height() - shaped_h) / 2.0;
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((line.bounds.x0, dy)));

            for shaped_line in shaped.lines() {
                for item in shaped_line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let mut x = run.offset();
                    let baseline = run.baseline();
                    let glyphs = run.glyphs().map(|g| {
                        let glyph = vello_cpu::Glyph {
                            id: g.id,
                            x: x + g.x,
                            y: baseline - g.y,
                        };
                        x += g.advance;
                        glyph
                    });
                    ctx.glyph_run(&font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }
        Ok(())
    }
}

fn draw_tracks(ctx: &mut vello_cpu::RenderContext, intensity: &IntensityBlock) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    for row in &intensity.rows {
        fill_pill(ctx, row.track, TRACK_RGBA);
        if row.fill.width() > 0.0 {
            fill_pill(ctx, row.fill, FILL_RGBA);
        }
    }
}

fn fill_pill(ctx: &mut vello_cpu::RenderContext, rect: Rect, rgba: [u8; 4]) {
    use vello_cpu::kurbo::Shape as _;

    let radius = rect.height().min(rect.width()) / 2.0;
    let pill = vello_cpu::kurbo::RoundedRect::new(rect.x0, rect.y0, rect.x1, rect.y1, radius);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        rgba[0], rgba[1], rgba[2], rgba[3],
    ));
    ctx.fill_path(&pill.to_path(0.1));
}

/// Premultiplied RGBA8 pixels of the mesh background at `width` x `height`.
///
/// Layers stack like CSS `background-image`: the first layer is on top, the base color is
/// underneath everything.
pub fn render_background(bg: &MeshBackground, width: u32, height: u32) -> Vec<u8> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let base = bg.base_rgb();
    let base_px = [base.r, base.g, base.b, 255];
    let layers: Vec<_> = bg.layers.iter().rev().map(|l| (l, l.rgb())).collect();
    let (w, h) = (f64::from(width), f64::from(height));

    let mut data = vec![0u8; width as usize * height as usize * 4];
    data.par_chunks_mut(width as usize * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let py = y as f64 + 0.5;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let pxc = x as f64 + 0.5;
                let mut dst = base_px;
                for (layer, rgb) in &layers {
                    let a = layer.alpha_at(pxc, py, w, h);
                    if a > 0.0 {
                        dst = premul_over_px(dst, rgb.with_alpha(a).to_array());
                    }
                }
                px.copy_from_slice(&dst);
            }
        });
    data
}

/// Anti-aliased rounded-corner mask with corner `radius` in pixels.
pub(crate) fn apply_corner_mask(data: &mut [u8], width: u32, height: u32, radius: f64) {
    if radius <= 0.0 {
        return;
    }
    let (w, h) = (f64::from(width), f64::from(height));
    let r = radius.min(w / 2.0).min(h / 2.0);
    let band = r.ceil() as u32;

    for y in 0..height {
        let py = f64::from(y) + 0.5;
        let cy = if py < r {
            r
        } else if py > h - r {
            h - r
        } else {
            continue;
        };
        let xs = (0..band.min(width)).chain(width.saturating_sub(band).max(band.min(width))..width);
        for x in xs {
            let px = f64::from(x) + 0.5;
            let cx = if px < r {
                r
            } else if px > w - r {
                w - r
            } else {
                continue;
            };
            let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
            let coverage = (r - d + 0.5).clamp(0.0, 1.0);
            if coverage >= 1.0 {
                continue;
            }
            let i = ((y as usize) * (width as usize) + (x as usize)) * 4;
            let Some(slot) = data.get_mut(i..i + 4) else {
                continue;
            };
            let out = scale_px(
                [slot[0], slot[1], slot[2], slot[3]],
                (coverage * 255.0).round() as u8,
            );
            slot.copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
