use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_ADDRESS: &str = "Nishi-Shinjuku 1-1-1, Shinjuku, Tokyo";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default; only malformed values are rejected.
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

    let env = parse_environment(&or_default("STOREFINDER_ENV", "development"));
    let log_level = or_default("STOREFINDER_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default(
        "STOREFINDER_CATALOG_PATH",
        "./config/stores.yaml",
    ));
    let default_address = or_default("STOREFINDER_DEFAULT_ADDRESS", DEFAULT_ADDRESS);

    let geocoder_url = or_default("STOREFINDER_GEOCODER_URL", DEFAULT_GEOCODER_URL);
    if !(geocoder_url.starts_with("http://") || geocoder_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOREFINDER_GEOCODER_URL".to_string(),
            reason: format!("'{geocoder_url}' is not an http(s) URL"),
        });
    }
    let geocoder_language = or_default("STOREFINDER_GEOCODER_LANGUAGE", "ja");
    let geocoder_timeout_secs = parse_u64("STOREFINDER_GEOCODER_TIMEOUT_SECS", "10")?;
    if geocoder_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOREFINDER_GEOCODER_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let user_agent = or_default("STOREFINDER_USER_AGENT", "storefinder/0.1 (store-search)");
    let maps_api_key = lookup("STOREFINDER_MAPS_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        default_address,
        geocoder_url,
        geocoder_language,
        geocoder_timeout_secs,
        user_agent,
        maps_api_key,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
