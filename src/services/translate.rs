use crate::foundation::error::{CardError, CardResult};
use crate::services::request::{RequestGuard, RequestTicket};

/// Display-name languages. Names are authored in Korean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lang {
    #[default]
    Ko,
    En,
}

impl Lang {
    pub fn english_name(self) -> &'static str {
        match self {
            Self::Ko => "Korean",
            Self::En => "English",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Ko => Self::En,
            Self::En => Self::Ko,
        }
    }
}

/// External translation capability.
#[async_trait::async_trait]
pub trait NameTranslator: Send + Sync {
    async fn translate(&self, text: &str, target: Lang) -> CardResult<String>;
}

/// Outcome of starting a language toggle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleStep {
    /// Switched without a request.
    Switched(Lang),
    /// A translation of `text` is needed; finish with [`DisplayNameState::finish_toggle`].
    Translate { ticket: RequestTicket, text: String },
}

/// Korean display name plus an on-demand, cached English translation.
#[derive(Clone, Debug)]
pub struct DisplayNameState {
    original: String,
    translated: Option<String>,
    lang: Lang,
    guard: RequestGuard,
}

impl DisplayNameState {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: None,
            lang: Lang::Ko,
            guard: RequestGuard::new("display name translation"),
        }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn cached_translation(&self) -> Option<&str> {
        self.translated.as_deref()
    }

    pub fn is_translating(&self) -> bool {
        self.guard.is_pending()
    }

    /// Name shown for the current language.
    pub fn current(&self) -> &str {
        match (self.lang, &self.translated) {
            (Lang::En, Some(t)) => t,
            _ => &self.original,
        }
    }

    pub fn start_toggle(&mut self) -> CardResult<ToggleStep> {
        if self.guard.is_pending() {
            return Err(CardError::RequestInFlight(self.guard.kind()));
        }
        match self.lang {
            Lang::En => {
                self.lang = Lang::Ko;
                Ok(ToggleStep::Switched(Lang::Ko))
            }
            Lang::Ko if self.translated.is_some() => {
                self.lang = Lang::En;
                Ok(ToggleStep::Switched(Lang::En))
            }
            Lang::Ko => Ok(ToggleStep::Translate {
                ticket: self.guard.begin()?,
                text: self.original.clone(),
            }),
        }
    }

    /// Apply a translation result. On failure the previous name stays visible.
    pub fn finish_toggle(
        &mut self,
        ticket: RequestTicket,
        result: CardResult<String>,
    ) -> CardResult<&str> {
        if !self.guard.is_current(ticket) {
            return Ok(self.current());
        }
        let outcome = result.and_then(|t| {
            let t = t.trim();
            if t.is_empty() {
                Err(CardError::external("translation was empty"))
            } else {
                Ok(t.to_owned())
            }
        });
        match outcome {
            Ok(translated) => {
                self.guard.resolve(ticket);
                self.translated = Some(translated);
                self.lang = Lang::En;
                Ok(self.current())
            }
            Err(err) => {
                self.guard.fail(ticket);
                tracing::warn!(error = %err, "display name translation failed");
                Err(match err {
                    CardError::ExternalService(msg) => CardError::ExternalService(msg),
                    other => CardError::external(other.to_string()),
                })
            }
        }
    }

    /// Switch Ko <-> En, translating at most once.
    pub async fn toggle_language(&mut self, translator: &dyn NameTranslator) -> CardResult<String> {
        match self.start_toggle()? {
            ToggleStep::Switched(_) => Ok(self.current().to_owned()),
            ToggleStep::Translate { ticket, text } => {
                let result = translator.translate(&text, Lang::En).await;
                self.finish_toggle(ticket, result).map(str::to_owned)
            }
        }
    }

    /// The caller moved on; a pending translation result will be dropped.
    pub fn invalidate(&mut self) {
        self.guard.invalidate();
    }
}

/// Prompt asking for a plain translation of a display name.
pub fn build_translation_prompt(text: &str, target: Lang) -> String {
    format!(
        "Translate this coffee bean display name into natural {}. Keep proper nouns such as \
         countries, regions and farms recognizable. Answer with the translated name only, \
         without quotes or explanations.\n\n{text}",
        target.english_name()
    )
}

#[cfg(test)]
#[path = "../../tests/unit/services/translate.rs"]
mod tests;
