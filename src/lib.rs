//! beancard renders coffee-bean "mesh gradient" cards.
//!
//! A card is a bean description, an ordered palette and a set of display toggles. The crate
//! turns that into a canonical 1200x1200 composition and then into pixels.
//!
//! # Pipeline overview
//!
//! 1. **Anchor**: colors are placed on a fixed pool of mesh anchors ([`anchors_for`]).
//! 2. **Compose**: colors + spread become a [`MeshBackground`] of radial layers ([`compose`]).
//! 3. **Lay out**: overlays (name, blend ratios, flavor notes, intensity bars) are positioned
//!    on the canonical box at a single scale factor ([`layout`]).
//! 4. **Render**: [`CardRasterizer`] produces a premultiplied [`FrameRGBA`]; [`ExportTarget`]
//!    always renders at scale 1 and encodes PNG.
//!
//! Previews scale the same composition with [`ResponsiveScaler`]; the composition itself is never
//! modified by preview scaling, so export output does not depend on the screen it was previewed
//! on.
//!
//! The color advisor and the display-name translator are external async capabilities
//! ([`ColorAdvisor`], [`NameTranslator`]); [`GeminiClient`] implements both. Palette failures fall
//! back to [`fallback_palette`].
#![forbid(unsafe_code)]

mod bean;
mod card;
mod foundation;
mod gradient;
mod layout;
mod palette;
mod preview;
mod render;
mod services;

pub use bean::model::{
    Bean, BeanDescriptor, Blend, BlendComponent, IntensityProfile, RoastLevel, SingleOrigin,
};
pub use card::composition::{CardComposition, CardFont, DisplayConfig};
pub use card::document::CardDocument;
pub use foundation::core::{
    Affine, CANONICAL_SIZE, Canvas, Point, Rect, Rgb8, Rgba8Premul, RoundedRect, Size, Vec2,
};
pub use foundation::error::{CardError, CardResult};
pub use gradient::anchors::{AnchorPoint, CORNER_ANCHORS, INTERIOR_ANCHORS, anchor_at, anchors_for};
pub use gradient::compose::{
    GradientLayer, MeshBackground, compose, falloff_radius, layer_opacity,
};
pub use layout::card::{
    CardLayout, IntensityBlock, IntensityRow, TextBlock, TextLine, fill_percent, layout,
};
pub use layout::wrap::{EmMeasure, TextMeasure, wrap_words};
pub use palette::swatch::{ColorSwatch, PALETTE_SIZE, dedup_swatches, fallback_palette};
pub use preview::scaler::{
    ContainerSizeObserver, PreviewTransform, ResizeFeed, ResponsiveScaler, SizeCallback,
};
pub use render::backend::FrameRGBA;
pub use render::cpu::{CardRasterizer, render_background};
pub use render::export::{ExportTarget, encode_png, export_file_name};
pub use render::fonts::{FontBook, FontMeasure, TextBrushRgba8, TextEngine};
pub use services::gemini::{GeminiClient, GeminiConfig};
pub use services::palette::{
    ColorAdvisor, ColorRecommender, build_palette_prompt, parse_palette_response,
    recommend_colors, strip_code_fences, validate_palette,
};
pub use services::request::{RequestGuard, RequestStatus, RequestTicket};
pub use services::translate::{
    DisplayNameState, Lang, NameTranslator, ToggleStep, build_translation_prompt,
};

/// Gradient constants and layout constants in canonical (scale factor 1) units.
pub mod metrics {
    pub use crate::gradient::compose::{
        BASE_FALLOFF, BASE_OPACITY, EMPTY_BASE_HEX, FALLOFF_STEP, MAX_SPREAD, MIN_SPREAD,
        OPACITY_STEP,
    };
    pub use crate::layout::card::{
        BLEND_FONT_SIZE, BLEND_GAP, BODY_LINE_HEIGHT, CARD_INSET, CORNER_RADIUS,
        FLAVOR_FONT_SIZE, FLAVOR_PREFIX, INTENSITY_LABEL_FONT_SIZE, INTENSITY_LABEL_GAP,
        INTENSITY_ROW_GAP, MAX_FLAVOR_NOTES, NAME_FONT_SIZE, NAME_LINE_HEIGHT,
        NAME_MAX_WIDTH_FRACTION, TRACK_HEIGHT, TRACK_WIDTH,
    };
}

/// Environment variable names and defaults used by [`GeminiConfig::from_env`].
pub mod env {
    pub use crate::services::gemini::{API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL, MODEL_ENV};

    /// Font directory used by the command line when `--fonts` is not given.
    pub const FONT_DIR_ENV: &str = "BEANCARD_FONT_DIR";
}

#[cfg(test)]
#[path = "../tests/unit/fixtures.rs"]
mod fixtures;
