use std::env;

use crate::models::MAX_SESSION_TTL_MINUTES;

const DEFAULT_SESSION_TTL_MINUTES: i64 = 30;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub admin_token: String,
    /// Operator-supplied clinic data; the built-in data is used when unset.
    pub knowledge_base_path: Option<String>,
    pub conditions_path: Option<String>,
    pub session_ttl_minutes: i64,
    /// Fixes the reply template sequence, for demos and reproducible runs.
    pub template_seed: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| ":memory:".to_string()),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            knowledge_base_path: env::var("KNOWLEDGE_BASE_PATH").ok().filter(|v| !v.is_empty()),
            conditions_path: env::var("CONDITIONS_PATH").ok().filter(|v| !v.is_empty()),
            session_ttl_minutes: session_ttl(env::var("SESSION_TTL_MINUTES").ok().as_deref()),
            template_seed: env::var("TEMPLATE_SEED").ok().and_then(|v| v.parse().ok()),
        }
    }
}

/// Unset, unparsable or out-of-range values fall back to the default.
fn session_ttl(raw: Option<&str>) -> i64 {
    match raw.and_then(|v| v.trim().parse::<i64>().ok()) {
        Some(minutes) if (1..=MAX_SESSION_TTL_MINUTES).contains(&minutes) => minutes,
        Some(minutes) => {
            tracing::warn!(minutes, "SESSION_TTL_MINUTES out of range, using default");
            DEFAULT_SESSION_TTL_MINUTES
        }
        None => DEFAULT_SESSION_TTL_MINUTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ttl_parsing() {
        assert_eq!(session_ttl(None), 30);
        assert_eq!(session_ttl(Some("45")), 45);
        assert_eq!(session_ttl(Some("soon")), 30);
        assert_eq!(session_ttl(Some("0")), 30);
        assert_eq!(session_ttl(Some("1000000000000")), 30);
        assert_eq!(session_ttl(Some("525600")), MAX_SESSION_TTL_MINUTES);
    }
}
