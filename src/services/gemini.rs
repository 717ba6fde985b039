//! Gemini `generateContent` client backing both the color advisor and the name translator.

use crate::bean::model::Bean;
use crate::foundation::error::{CardError, CardResult};
use crate::palette::swatch::ColorSwatch;
use crate::services::palette::{ColorAdvisor, build_palette_prompt, parse_palette_response};
use crate::services::translate::{Lang, NameTranslator, build_translation_prompt};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "BEANCARD_GEMINI_MODEL";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Clone)]
pub struct GeminiConfig {
    api_key: String,
    pub model: String,
    pub endpoint: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> CardResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CardError::validation("Gemini API key must not be empty"));
        }
        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_owned(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
        })
    }

    pub fn from_env() -> CardResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (`GEMINI_API_KEY`, `BEANCARD_GEMINI_MODEL`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CardResult<Self> {
        let key = lookup(API_KEY_ENV)
            .ok_or_else(|| CardError::validation(format!("{API_KEY_ENV} is not set")))?;
        let mut config = Self::new(key)?;
        if let Some(model) = lookup(MODEL_ENV).filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_owned();
        }
        Ok(config)
    }

    pub fn url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, serde::Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, serde::Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, serde::Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    pub(crate) fn text(&self) -> CardResult<String> {
        let candidate = self
            .candidates
            .first()
            .ok_or_else(|| CardError::external("Gemini returned no candidates"))?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        if text.trim().is_empty() {
            return Err(CardError::external("Gemini returned an empty answer"));
        }
        Ok(text)
    }
}

#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn from_env() -> CardResult<Self> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    #[tracing::instrument(level = "debug", skip_all, fields(model = %self.config.model))]
    pub async fn generate_text(&self, prompt: &str) -> CardResult<String> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
        };
        let resp = self
            .http
            .post(self.config.url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CardError::external(format!("Gemini request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(CardError::external(format!(
                "Gemini answered {status}: {}",
                detail.trim()
            )));
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| CardError::external(format!("decode Gemini response: {e}")))?;
        let text = parsed.text()?;
        tracing::debug!(chars = text.len(), "Gemini answered");
        Ok(text)
    }
}

#[async_trait::async_trait]
impl ColorAdvisor for GeminiClient {
    async fn generate_colors(&self, bean: &Bean) -> CardResult<Vec<ColorSwatch>> {
        let text = self.generate_text(&build_palette_prompt(bean)).await?;
        parse_palette_response(&text)
    }
}

#[async_trait::async_trait]
impl NameTranslator for GeminiClient {
    async fn translate(&self, text: &str, target: Lang) -> CardResult<String> {
        let answer = self
            .generate_text(&build_translation_prompt(text, target))
            .await?;
        Ok(answer.trim().trim_matches('"').trim().to_owned())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/gemini.rs"]
mod tests;
