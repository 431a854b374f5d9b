use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

// sqlx logs every statement at info; keep it quiet unless RUST_LOG asks for it.
const QUIET_DIRECTIVES: &str = "sqlx=warn";

pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(default_level)))
        .unwrap_or_else(|_| EnvFilter::new(default_filter("info")));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn default_filter(level: &str) -> String {
    if level.contains("sqlx") {
        return level.to_string();
    }
    format!("{level},{QUIET_DIRECTIVES}")
}
