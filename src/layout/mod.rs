pub(crate) mod hints;
pub(crate) mod source;
