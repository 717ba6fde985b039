use crate::bean::model::Bean;
use crate::foundation::core::Canvas;
use crate::gradient::compose::{MeshBackground, compose};
use crate::palette::swatch::ColorSwatch;

/// Selectable display fonts for card text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardFont {
    #[default]
    Ranade,
    Hahmlet,
    NanumSquareNeo,
    HsSantokki,
}

impl CardFont {
    pub const ALL: [CardFont; 4] = [
        CardFont::Ranade,
        CardFont::Hahmlet,
        CardFont::NanumSquareNeo,
        CardFont::HsSantokki,
    ];

    pub fn family_name(self) -> &'static str {
        match self {
            Self::Ranade => "Ranade",
            Self::Hahmlet => "Hahmlet",
            Self::NanumSquareNeo => "NanumSquare Neo",
            Self::HsSantokki => "HS Santokki",
        }
    }

    /// File name looked up in a font directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Ranade => "Ranade-Bold.ttf",
            Self::Hahmlet => "Hahmlet-Bold.ttf",
            Self::NanumSquareNeo => "NanumSquareNeo-Bold.ttf",
            Self::HsSantokki => "HSSantokki-Regular.ttf",
        }
    }
}

/// Overlay toggles for a card. `background_only` overrides every `show_*` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_name: bool,
    pub show_flavor: bool,
    pub show_intensity: bool,
    pub show_blend: bool,
    pub background_only: bool,
    pub font: CardFont,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_name: true,
            show_flavor: true,
            show_intensity: true,
            show_blend: true,
            background_only: false,
            font: CardFont::default(),
        }
    }
}

impl DisplayConfig {
    pub fn background_only() -> Self {
        Self {
            background_only: true,
            ..Self::default()
        }
    }

    pub fn name_visible(&self) -> bool {
        !self.background_only && self.show_name
    }

    pub fn blend_visible(&self, bean: &Bean) -> bool {
        self.name_visible() && self.show_blend && bean.origin.as_blend().is_some()
    }

    pub fn flavor_visible(&self, bean: &Bean) -> bool {
        !self.background_only && self.show_flavor && !bean.flavor_notes.is_empty()
    }

    pub fn intensity_visible(&self) -> bool {
        !self.background_only && self.show_intensity
    }
}

/// Canonical, resolution-independent card description.
///
/// Always authored against the 1200x1200 canonical box; preview scaling never writes here.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CardComposition {
    pub background: MeshBackground,
    pub display: DisplayConfig,
    /// Display name already resolved to the current language.
    pub display_name: String,
    pub bean: Bean,
}

impl CardComposition {
    pub fn new(
        bean: Bean,
        colors: &[ColorSwatch],
        spread: f64,
        display: DisplayConfig,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            background: compose(colors, spread),
            display,
            display_name: display_name.into(),
            bean,
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::CANONICAL
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/composition.rs"]
mod tests;
