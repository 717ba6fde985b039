use std::collections::HashSet;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{CardError, CardResult};

/// One recommended color. Identity is the normalized `#RRGGBB` hex.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ColorSwatch {
    hex: String,
    name: String,
    description: String,
}

impl ColorSwatch {
    pub fn new(
        hex: impl AsRef<str>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> CardResult<Self> {
        let rgb = Rgb8::parse_hex(hex.as_ref())?;
        Ok(Self {
            hex: rgb.to_hex(),
            name: name.into(),
            description: description.into(),
        })
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn rgb(&self) -> Rgb8 {
        // Constructor guarantees a valid hex.
        Rgb8::parse_hex(&self.hex).unwrap_or(Rgb8::BLACK)
    }
}

impl<'de> serde::Deserialize<'de> for ColorSwatch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Repr {
            hex: String,
            #[serde(default)]
            name: String,
            #[serde(default)]
            description: String,
        }

        let r = Repr::deserialize(deserializer)?;
        Self::new(&r.hex, r.name, r.description).map_err(serde::de::Error::custom)
    }
}

/// Drop later swatches whose hex repeats an earlier one.
pub fn dedup_swatches(swatches: Vec<ColorSwatch>) -> Vec<ColorSwatch> {
    let mut seen = HashSet::with_capacity(swatches.len());
    swatches
        .into_iter()
        .filter(|s| seen.insert(s.hex.clone()))
        .collect()
}

pub(crate) fn ensure_unique_hex(swatches: &[ColorSwatch]) -> CardResult<()> {
    let mut seen = HashSet::with_capacity(swatches.len());
    for s in swatches {
        if !seen.insert(s.hex()) {
            return Err(CardError::validation(format!(
                "duplicate swatch hex {}",
                s.hex()
            )));
        }
    }
    Ok(())
}

/// Number of swatches the color advisor must return.
pub const PALETTE_SIZE: usize = 5;

const FALLBACK: [(&str, &str, &str); PALETTE_SIZE] = [
    (
        "#8B4513",
        "Saddle Brown",
        "A classic brown carrying the depth of traditional coffee",
    ),
    (
        "#D2691E",
        "Chocolate",
        "A warm tone for the gentle sweetness of the cup",
    ),
    (
        "#CD853F",
        "Peru",
        "A golden brown for the balance of a medium roast",
    ),
    (
        "#F4A460",
        "Sand",
        "The bright, refreshing feel of a light roast",
    ),
    (
        "#2F4F4F",
        "Dark Slate",
        "A deep, intense tone for the character of a dark roast",
    ),
];

/// Fixed palette used whenever color recommendation fails.
pub fn fallback_palette() -> Vec<ColorSwatch> {
    FALLBACK
        .iter()
        .map(|(hex, name, description)| ColorSwatch {
            hex: (*hex).to_owned(),
            name: (*name).to_owned(),
            description: (*description).to_owned(),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/palette/swatch.rs"]
mod tests;
