/// Convenience result type used across beancard.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy used by card APIs.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Invalid user-provided document, color or bean data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An external AI or translation service failed or answered garbage.
    #[error("external service error: {0}")]
    ExternalService(String),

    /// Export was requested before the canonical render target was mounted.
    #[error("render target unavailable: {0}")]
    RenderTargetUnavailable(String),

    /// A request of the same kind is still pending.
    #[error("request already in flight: {0}")]
    RequestInFlight(&'static str),

    /// Errors while rasterizing or encoding a card.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::ExternalService`] value.
    pub fn external(msg: impl Into<String>) -> Self {
        Self::ExternalService(msg.into())
    }

    /// Build a [`CardError::RenderTargetUnavailable`] value.
    pub fn target_unavailable(msg: impl Into<String>) -> Self {
        Self::RenderTargetUnavailable(msg.into())
    }

    /// Build a [`CardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CardError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the session can continue after this error (fallback or notice).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ExternalService(_) | Self::RequestInFlight(_) | Self::RenderTargetUnavailable(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
