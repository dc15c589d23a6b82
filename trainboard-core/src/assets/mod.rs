pub(crate) mod atlas;
pub(crate) mod decode;
