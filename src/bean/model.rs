use crate::foundation::error::{CardError, CardResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoastLevel {
    Light,
    Medium,
    Dark,
    Espresso,
}

impl RoastLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Dark => "dark",
            Self::Espresso => "espresso",
        }
    }
}

/// Acidity, sweetness and body, each on a 1..=10 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IntensityProfile {
    pub acidity: u8,
    pub sweetness: u8,
    pub body: u8,
}

impl IntensityProfile {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(acidity: u8, sweetness: u8, body: u8) -> CardResult<Self> {
        let p = Self {
            acidity,
            sweetness,
            body,
        };
        p.validate()?;
        Ok(p)
    }

    pub fn validate(&self) -> CardResult<()> {
        for (label, v) in self.rows() {
            if !(Self::MIN..=Self::MAX).contains(&v) {
                return Err(CardError::validation(format!(
                    "intensity {label} must be in 1..=10, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Rows in display order: Acidity, Sweetness, Body.
    pub fn rows(&self) -> [(&'static str, u8); 3] {
        [
            ("Acidity", self.acidity),
            ("Sweetness", self.sweetness),
            ("Body", self.body),
        ]
    }
}

impl Default for IntensityProfile {
    fn default() -> Self {
        Self {
            acidity: 5,
            sweetness: 5,
            body: 5,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SingleOrigin {
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlendComponent {
    pub country: String,
    pub ratio: f64,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Blend {
    pub components: Vec<BlendComponent>,
}

impl Blend {
    /// Sum of component ratios. Not required to be 100 here.
    pub fn ratio_total(&self) -> f64 {
        self.components.iter().map(|c| c.ratio).sum()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "origin_type", rename_all = "snake_case")]
pub enum BeanDescriptor {
    SingleOrigin(SingleOrigin),
    Blend(Blend),
}

impl BeanDescriptor {
    pub fn as_blend(&self) -> Option<&Blend> {
        match self {
            Self::Blend(b) => Some(b),
            Self::SingleOrigin(_) => None,
        }
    }

    /// One-line origin summary, e.g. `Ethiopia, Yirgacheffe` or `Brazil 60%, Colombia 40%`.
    pub fn summary(&self) -> String {
        match self {
            Self::SingleOrigin(o) => match &o.region {
                Some(region) if !region.trim().is_empty() => format!("{}, {region}", o.country),
                _ => o.country.clone(),
            },
            Self::Blend(b) => b
                .components
                .iter()
                .map(|c| format!("{} {}%", c.country, format_ratio(c.ratio)))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bean {
    pub display_name: String,
    pub bean_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roast_level: Option<RoastLevel>,
    #[serde(default)]
    pub flavor_notes: Vec<String>,
    #[serde(default)]
    pub intensity: IntensityProfile,
    pub origin: BeanDescriptor,
}

impl Bean {
    pub fn validate(&self) -> CardResult<()> {
        if self.bean_name.trim().is_empty() {
            return Err(CardError::validation("bean_name must not be empty"));
        }
        self.intensity.validate()?;
        match &self.origin {
            BeanDescriptor::SingleOrigin(o) => {
                if o.country.trim().is_empty() {
                    return Err(CardError::validation("single origin country must not be empty"));
                }
            }
            BeanDescriptor::Blend(b) => {
                if b.components.is_empty() {
                    return Err(CardError::validation("blend must have at least one component"));
                }
                if let Some(c) = b
                    .components
                    .iter()
                    .find(|c| !c.ratio.is_finite() || c.ratio < 0.0)
                {
                    return Err(CardError::validation(format!(
                        "blend ratio for {} must be finite and >= 0",
                        c.country
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Ratios print without a trailing `.0` when integral.
pub(crate) fn format_ratio(ratio: f64) -> String {
    if ratio.fract() == 0.0 && ratio.abs() < 1e15 {
        format!("{}", ratio as i64)
    } else {
        format!("{ratio}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bean/model.rs"]
mod tests;
