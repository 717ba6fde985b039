use std::fmt::Write as _;

use crate::foundation::core::Rgb8;
use crate::foundation::math::Fingerprint;
use crate::gradient::anchors::{AnchorPoint, anchor_at, anchors_for};
use crate::palette::swatch::ColorSwatch;

/// Falloff radius of the first layer at zero spread, in percent.
pub const BASE_FALLOFF: f64 = 40.0;
/// Extra falloff per layer index, in percent.
pub const FALLOFF_STEP: f64 = 5.0;
/// Opacity of the first layer.
pub const BASE_OPACITY: f64 = 0.8;
/// Opacity gained per layer index (clamped at 1).
pub const OPACITY_STEP: f64 = 0.1;

pub const MIN_SPREAD: f64 = 0.0;
pub const MAX_SPREAD: f64 = 100.0;

/// Base color used when no colors are selected.
pub const EMPTY_BASE_HEX: &str = "#000000";

/// One radial falloff: opaque `color` at `anchor`, transparent at `falloff_radius` percent.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientLayer {
    pub anchor: AnchorPoint,
    pub color_hex: String,
    pub opacity: f64,
    pub falloff_radius: f64,
}

impl GradientLayer {
    /// Layer alpha at pixel center `(px, py)` in a `width` x `height` box, in `0..=opacity`.
    ///
    /// Follows CSS `radial-gradient(at X% Y%, ...)`: an ellipse sized to the farthest
    /// corner, keeping the farthest-side aspect ratio.
    pub fn alpha_at(&self, px: f64, py: f64, width: f64, height: f64) -> f64 {
        let stop = self.falloff_radius / 100.0;
        if stop <= 0.0 || width <= 0.0 || height <= 0.0 {
            return 0.0;
        }
        let (rx, ry) = self.ellipse_radii(width, height);
        if rx <= 0.0 || ry <= 0.0 {
            return 0.0;
        }
        let dx = (px - self.anchor.x * width) / rx;
        let dy = (py - self.anchor.y * height) / ry;
        let t = (dx * dx + dy * dy).sqrt() / stop;
        if t >= 1.0 {
            0.0
        } else {
            self.opacity * (1.0 - t)
        }
    }

    pub(crate) fn ellipse_radii(&self, width: f64, height: f64) -> (f64, f64) {
        let cx = self.anchor.x * width;
        let cy = self.anchor.y * height;
        let fx = cx.max(width - cx);
        let fy = cy.max(height - cy);
        (fx * std::f64::consts::SQRT_2, fy * std::f64::consts::SQRT_2)
    }

    pub fn rgb(&self) -> Rgb8 {
        Rgb8::parse_hex(&self.color_hex).unwrap_or(Rgb8::BLACK)
    }

    fn css(&self) -> String {
        let (x, y) = self.anchor.percent();
        let c = self.rgb();
        format!(
            "radial-gradient(at {x}% {y}%, rgba({}, {}, {}, {}) 0%, transparent {}%)",
            c.r, c.g, c.b, self.opacity, self.falloff_radius
        )
    }
}

/// Mesh gradient background: base fill plus ordered radial layers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshBackground {
    pub base_hex: String,
    pub layers: Vec<GradientLayer>,
}

impl MeshBackground {
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn base_rgb(&self) -> Rgb8 {
        Rgb8::parse_hex(&self.base_hex).unwrap_or(Rgb8::BLACK)
    }

    /// Declarative rendition (`background` + `background-image`) for styling layers.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "background: {};", self.base_hex);
        if self.layers.is_empty() {
            out.push_str(" background-image: none;");
        } else {
            let images: Vec<String> = self.layers.iter().map(GradientLayer::css).collect();
            let _ = write!(out, " background-image: {};", images.join(", "));
        }
        out
    }

    pub(crate) fn fingerprint(&self) -> u64 {
        let mut h = Fingerprint::new();
        h.write_str(&self.base_hex);
        for l in &self.layers {
            h.write_f64(l.anchor.x);
            h.write_f64(l.anchor.y);
            h.write_str(&l.color_hex);
            h.write_f64(l.opacity);
            h.write_f64(l.falloff_radius);
        }
        h.finish()
    }
}

pub fn falloff_radius(spread: f64, index: usize) -> f64 {
    BASE_FALLOFF + (clamp_spread(spread) / 20.0) * 10.0 + (index as f64) * FALLOFF_STEP
}

pub fn layer_opacity(index: usize) -> f64 {
    (BASE_OPACITY + (index as f64) * OPACITY_STEP).min(1.0)
}

fn clamp_spread(spread: f64) -> f64 {
    if spread.is_finite() {
        spread.clamp(MIN_SPREAD, MAX_SPREAD)
    } else {
        MIN_SPREAD
    }
}

/// Map ordered colors onto mesh anchors. Pure; equal inputs give equal output.
#[tracing::instrument(level = "debug", skip(colors), fields(colors = colors.len()))]
pub fn compose(colors: &[ColorSwatch], spread: f64) -> MeshBackground {
    let Some(first) = colors.first() else {
        return MeshBackground {
            base_hex: EMPTY_BASE_HEX.to_owned(),
            layers: Vec::new(),
        };
    };

    let pool = anchors_for(colors.len());
    let layers = colors
        .iter()
        .enumerate()
        .filter_map(|(i, c)| {
            anchor_at(&pool, i).map(|anchor| GradientLayer {
                anchor,
                color_hex: c.hex().to_owned(),
                opacity: layer_opacity(i),
                falloff_radius: falloff_radius(spread, i),
            })
        })
        .collect();

    MeshBackground {
        base_hex: first.hex().to_owned(),
        layers,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gradient/compose.rs"]
mod tests;
