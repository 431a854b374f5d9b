pub(crate) mod auth;
pub(crate) mod context;
pub(crate) mod trace;
