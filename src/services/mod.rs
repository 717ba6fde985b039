pub(crate) mod gemini;
pub(crate) mod palette;
pub(crate) mod request;
pub(crate) mod translate;
