use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::bean::model::Bean;
use crate::card::composition::{CardComposition, DisplayConfig};
use crate::foundation::error::{CardError, CardResult};
use crate::gradient::compose::{MAX_SPREAD, MIN_SPREAD};
use crate::palette::swatch::{ColorSwatch, ensure_unique_hex};

fn default_spread() -> f64 {
    50.0
}

/// JSON-facing card description: bean, selected colors and display settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CardDocument {
    pub bean: Bean,
    #[serde(default)]
    pub colors: Vec<ColorSwatch>,
    #[serde(default = "default_spread")]
    pub spread: f64,
    #[serde(default)]
    pub display: DisplayConfig,
    /// Overrides `bean.display_name` (e.g. an already translated name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl CardDocument {
    /// Parse a card document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CardResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CardError::validation(format!("parse card JSON: {e}")))
    }

    /// Parse a card document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CardError::validation(format!("open card JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> CardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CardError::serde(e.to_string()))
    }

    pub fn validate(&self) -> CardResult<()> {
        self.bean.validate()?;
        ensure_unique_hex(&self.colors)?;
        if !self.spread.is_finite() || !(MIN_SPREAD..=MAX_SPREAD).contains(&self.spread) {
            return Err(CardError::validation(format!(
                "spread must be in 0..=100, got {}",
                self.spread
            )));
        }
        Ok(())
    }

    pub fn resolved_display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or(&self.bean.display_name)
    }

    /// Validate and build the canonical composition.
    pub fn to_composition(&self) -> CardResult<CardComposition> {
        self.validate()?;
        Ok(CardComposition::new(
            self.bean.clone(),
            &self.colors,
            self.spread,
            self.display,
            self.resolved_display_name(),
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/card/document.rs"]
mod tests;
