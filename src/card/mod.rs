pub(crate) mod composition;
pub(crate) mod document;
