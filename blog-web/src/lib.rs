mod application;
mod data;
mod domain;
pub mod infrastructure;
mod presentation;
mod server;

pub use infrastructure::database::Database;
pub use infrastructure::settings::Settings;
pub use presentation::AppState;
pub use server::{build_app, build_router, run_http};
