pub(crate) mod encode;
pub(crate) mod headers;
pub(crate) mod observe;
pub(crate) mod redact;
pub(crate) mod time;
