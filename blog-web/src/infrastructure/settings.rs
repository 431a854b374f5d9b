use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub session_secret: String,
    pub session_ttl_seconds: i64,
    pub session_cookie_secure: bool,
    pub http_addr: String,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "sqlite://blog.sqlite".to_string());
        let session_secret =
            get_required(&lookup, "SESSION_SECRET").context("SESSION_SECRET is required")?;
        let session_ttl_seconds: i64 = lookup("SESSION_TTL_SECONDS")
            .unwrap_or_else(|| "86400".to_string())
            .parse()
            .context("Failed to parse SESSION_TTL_SECONDS, expecting integer")?;

        if session_secret.chars().count() < 32 {
            return Err(anyhow!("SESSION_SECRET must be at least 32 characters"));
        }
        if session_ttl_seconds <= 0 {
            return Err(anyhow!("SESSION_TTL_SECONDS must be > 0"));
        }

        let session_cookie_secure = parse_bool(&lookup, "SESSION_COOKIE_SECURE", false)?;
        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let http_request_body_limit_bytes =
            parse_usize(&lookup, "HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = parse_usize(&lookup, "HTTP_CONCURRENCY_LIMIT", 256)?;

        Ok(Self {
            database_url,
            session_secret,
            session_ttl_seconds,
            session_cookie_secure,
            http_addr,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
        })
    }
}

fn get_required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    let value = lookup(key).ok_or_else(|| anyhow!("{key} is not set"))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_usize(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: usize,
) -> Result<usize> {
    let value = lookup(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> Result<bool> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            other => Err(anyhow!("Failed to parse {key}, expecting boolean, got '{other}'")),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::Settings;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn settings_from(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let settings = settings_from(&[("SESSION_SECRET", SECRET)]).expect("must parse");

        assert_eq!(settings.database_url, "sqlite://blog.sqlite");
        assert_eq!(settings.http_addr, "0.0.0.0:8080");
        assert_eq!(settings.session_ttl_seconds, 86400);
        assert!(!settings.session_cookie_secure);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.http_request_body_limit_bytes, 1024 * 1024);
        assert_eq!(settings.http_concurrency_limit, 256);
    }

    #[test]
    fn overrides_are_applied() {
        let settings = settings_from(&[
            ("SESSION_SECRET", SECRET),
            ("DATABASE_URL", "sqlite::memory:"),
            ("SESSION_COOKIE_SECURE", "true"),
            ("RUST_LOG", "debug"),
            ("HTTP_CONCURRENCY_LIMIT", "8"),
        ])
        .expect("must parse");

        assert_eq!(settings.database_url, "sqlite::memory:");
        assert!(settings.session_cookie_secure);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.http_concurrency_limit, 8);
    }

    #[test]
    fn missing_secret_is_an_error() {
        assert!(settings_from(&[]).is_err());
    }

    #[test]
    fn short_secret_is_an_error() {
        assert!(settings_from(&[("SESSION_SECRET", "too-short")]).is_err());
    }

    #[test]
    fn zero_limits_are_rejected() {
        let result = settings_from(&[
            ("SESSION_SECRET", SECRET),
            ("HTTP_REQUEST_BODY_LIMIT_BYTES", "0"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn non_positive_ttl_is_rejected() {
        let result = settings_from(&[("SESSION_SECRET", SECRET), ("SESSION_TTL_SECONDS", "0")]);
        assert!(result.is_err());
    }
}
