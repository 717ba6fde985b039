use std::fmt::Write as _;

use crate::bean::model::{Bean, BeanDescriptor, format_ratio};
use crate::foundation::error::{CardError, CardResult};
use crate::palette::swatch::{ColorSwatch, PALETTE_SIZE, ensure_unique_hex, fallback_palette};
use crate::services::request::{RequestGuard, RequestTicket};

/// External color recommendation capability.
#[async_trait::async_trait]
pub trait ColorAdvisor: Send + Sync {
    async fn generate_colors(&self, bean: &Bean) -> CardResult<Vec<ColorSwatch>>;
}

/// Exactly [`PALETTE_SIZE`] swatches with distinct hex codes.
pub fn validate_palette(colors: &[ColorSwatch]) -> CardResult<()> {
    if colors.len() != PALETTE_SIZE {
        return Err(CardError::external(format!(
            "expected {PALETTE_SIZE} colors, got {}",
            colors.len()
        )));
    }
    ensure_unique_hex(colors).map_err(|e| CardError::external(e.to_string()))
}

/// Ask `advisor` for a palette; any failure yields [`fallback_palette`].
#[tracing::instrument(level = "debug", skip_all, fields(bean = %bean.bean_name))]
pub async fn recommend_colors(advisor: &dyn ColorAdvisor, bean: &Bean) -> Vec<ColorSwatch> {
    checked_palette(advisor.generate_colors(bean).await).unwrap_or_else(|_| fallback_palette())
}

/// Advisor result with the palette shape enforced; failures are logged once here.
fn checked_palette(result: CardResult<Vec<ColorSwatch>>) -> CardResult<Vec<ColorSwatch>> {
    result
        .and_then(|colors| validate_palette(&colors).map(|()| colors))
        .inspect_err(|err| {
            tracing::warn!(error = %err, "color recommendation failed, using fallback palette");
        })
}

/// Palette recommendation with a single in-flight request.
#[derive(Debug)]
pub struct ColorRecommender {
    guard: RequestGuard,
    colors: Option<Vec<ColorSwatch>>,
}

impl Default for ColorRecommender {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorRecommender {
    pub fn new() -> Self {
        Self {
            guard: RequestGuard::new("color recommendation"),
            colors: None,
        }
    }

    pub fn guard(&self) -> &RequestGuard {
        &self.guard
    }

    pub fn colors(&self) -> Option<&[ColorSwatch]> {
        self.colors.as_deref()
    }

    pub fn begin(&mut self) -> CardResult<RequestTicket> {
        self.guard.begin()
    }

    /// Apply an advisor result. A stale ticket leaves the current colors untouched.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: CardResult<Vec<ColorSwatch>>,
    ) -> Option<&[ColorSwatch]> {
        if !self.guard.is_current(ticket) {
            tracing::debug!("discarding stale color recommendation");
            return None;
        }
        match checked_palette(result) {
            Ok(colors) => {
                self.colors = Some(colors);
                self.guard.resolve(ticket);
            }
            Err(_) => {
                self.colors = Some(fallback_palette());
                self.guard.fail(ticket);
            }
        }
        self.colors.as_deref()
    }

    pub async fn recommend(
        &mut self,
        advisor: &dyn ColorAdvisor,
        bean: &Bean,
    ) -> CardResult<Vec<ColorSwatch>> {
        let ticket = self.begin()?;
        let result = advisor.generate_colors(bean).await;
        Ok(self.complete(ticket, result).map(<[ColorSwatch]>::to_vec).unwrap_or_default())
    }

    /// The caller left the color step; a pending result will be dropped.
    pub fn invalidate(&mut self) {
        self.guard.invalidate();
    }
}

/// Prompt describing `bean` for a five-color palette answered as a JSON array.
pub fn build_palette_prompt(bean: &Bean) -> String {
    let origin = match &bean.origin {
        BeanDescriptor::SingleOrigin(o) => match &o.region {
            Some(region) if !region.trim().is_empty() => {
                format!("- Origin: {}, {region}", o.country)
            }
            _ => format!("- Origin: {}", o.country),
        },
        BeanDescriptor::Blend(b) => {
            let parts: Vec<String> = b
                .components
                .iter()
                .map(|c| format!("{} {}%", c.country, format_ratio(c.ratio)))
                .collect();
            format!("- Blend: {}", parts.join(", "))
        }
    };
    let roast = bean.roast_level.map_or("unspecified", |r| r.label());
    let i = &bean.intensity;

    let mut p = String::new();
    let _ = writeln!(p, "You are a coffee expert and a color designer.");
    let _ = writeln!(
        p,
        "Analyze the coffee below and recommend {PALETTE_SIZE} colors. Be varied: the colors do \
         not have to be brown just because this is coffee. They must not be too similar and \
         should work together."
    );
    let _ = writeln!(p);
    let _ = writeln!(p, "Coffee:");
    let _ = writeln!(p, "{origin}");
    let _ = writeln!(p, "- Bean name: {}", bean.bean_name);
    let _ = writeln!(p, "- Roast: {roast}");
    let _ = writeln!(p, "- Flavor notes: {}", bean.flavor_notes.join(", "));
    let _ = writeln!(
        p,
        "- Intensity: acidity {}/10, sweetness {}/10, body {}/10",
        i.acidity, i.sweetness, i.body
    );
    let _ = writeln!(p);
    let _ = writeln!(p, "Requirements:");
    let _ = writeln!(p, "1. Give every color as a #RRGGBB hex code");
    let _ = writeln!(p, "2. Give every color a short name");
    let _ = writeln!(p, "3. Explain why the color suits this coffee");
    let _ = writeln!(p, "4. Consider the emotional character of the coffee");
    let _ = writeln!(p, "5. Keep the palette modern and refined");
    let _ = writeln!(p);
    let _ = writeln!(p, "Response format:");
    let _ = writeln!(
        p,
        r##"[{{"hex": "#RRGGBB", "name": "color name", "description": "why it fits"}}]"##
    );
    let _ = writeln!(p);
    let _ = write!(p, "Answer with JSON only.");
    p
}

/// Inner text of a ```` ```json ```` (or bare ```` ``` ````) fence, else the trimmed input.
pub fn strip_code_fences(text: &str) -> &str {
    let (marker, start) = if let Some(i) = text.find("```json") {
        ("```json", i)
    } else if let Some(i) = text.find("```") {
        ("```", i)
    } else {
        return text.trim();
    };
    let body_start = start + marker.len();
    match text.rfind("```") {
        Some(end) if end > body_start => text[body_start..end].trim(),
        _ => text.trim(),
    }
}

/// Parse a model reply into swatches. Hex codes are validated and normalized.
pub fn parse_palette_response(text: &str) -> CardResult<Vec<ColorSwatch>> {
    serde_json::from_str(strip_code_fences(text))
        .map_err(|e| CardError::external(format!("parse palette response: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/services/palette.rs"]
mod tests;
