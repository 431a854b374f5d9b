pub mod database;
pub mod logging;
pub(crate) mod password;
pub(crate) mod session;
pub mod settings;
