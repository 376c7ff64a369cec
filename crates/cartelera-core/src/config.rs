use crate::app_config::AppConfig;
use crate::ConfigError;

/// Default browser User-Agent sent with every page request. Most of the
/// supported sites serve different (or no) markup to obvious bot agents.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var has an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var has an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup, no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("CARTELERA_LOG_LEVEL", "info");
    let sources_path = PathBuf::from(or_default(
        "CARTELERA_SOURCES_PATH",
        "./config/sources.yaml",
    ));
    let selectors_path = lookup("CARTELERA_SELECTORS_PATH").ok().map(PathBuf::from);
    let output_path = PathBuf::from(or_default("CARTELERA_OUTPUT_PATH", "./peliculas.csv"));

    let request_timeout_secs = parse_u64("CARTELERA_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("CARTELERA_USER_AGENT", DEFAULT_USER_AGENT);
    let delay_min_ms = parse_u64("CARTELERA_DELAY_MIN_MS", "1000")?;
    let delay_max_ms = parse_u64("CARTELERA_DELAY_MAX_MS", "3000")?;
    let fallback_image_cap = parse_usize("CARTELERA_FALLBACK_IMAGE_CAP", "20")?;

    if delay_min_ms > delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "CARTELERA_DELAY_MIN_MS ({delay_min_ms}) must not exceed CARTELERA_DELAY_MAX_MS ({delay_max_ms})"
        )));
    }

    Ok(AppConfig {
        log_level,
        sources_path,
        selectors_path,
        output_path,
        request_timeout_secs,
        user_agent,
        delay_min_ms,
        delay_max_ms,
        fallback_image_cap,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.sources_path.to_str().unwrap(), "./config/sources.yaml");
        assert!(cfg.selectors_path.is_none());
        assert_eq!(cfg.output_path.to_str().unwrap(), "./peliculas.csv");
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.delay_min_ms, 1000);
        assert_eq!(cfg.delay_max_ms, 3000);
        assert_eq!(cfg.fallback_image_cap, 20);
        assert!(cfg.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn build_app_config_honours_overrides() {
        let mut map = HashMap::new();
        map.insert("CARTELERA_REQUEST_TIMEOUT_SECS", "30");
        map.insert("CARTELERA_USER_AGENT", "cartelera-test/0.1");
        map.insert("CARTELERA_SELECTORS_PATH", "./config/selectors.yaml");
        map.insert("CARTELERA_FALLBACK_IMAGE_CAP", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "cartelera-test/0.1");
        assert_eq!(
            cfg.selectors_path.as_deref().and_then(|p| p.to_str()),
            Some("./config/selectors.yaml")
        );
        assert_eq!(cfg.fallback_image_cap, 5);
    }

    #[test]
    fn build_app_config_fails_with_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("CARTELERA_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARTELERA_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(CARTELERA_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_fallback_cap() {
        let mut map = HashMap::new();
        map.insert("CARTELERA_FALLBACK_IMAGE_CAP", "-3");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARTELERA_FALLBACK_IMAGE_CAP"),
            "expected InvalidEnvVar(CARTELERA_FALLBACK_IMAGE_CAP), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_inverted_delay_bounds() {
        let mut map = HashMap::new();
        map.insert("CARTELERA_DELAY_MIN_MS", "5000");
        map.insert("CARTELERA_DELAY_MAX_MS", "1000");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(_))),
            "expected Validation error, got: {result:?}"
        );
    }
}
