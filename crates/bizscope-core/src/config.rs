use crate::app_config::AppConfig;
use crate::business::FieldDefault;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let yelp_api_key = require("YELP_API_KEY")?;
    let log_level = or_default("BIZSCOPE_LOG_LEVEL", "info");
    let yelp_base_url = or_default(
        "BIZSCOPE_YELP_BASE_URL",
        "https://api.yelp.com/v3/businesses/search",
    );
    let request_timeout_secs = parse_u64("BIZSCOPE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BIZSCOPE_USER_AGENT", "bizscope/0.1 (local-business-survey)");

    let rating_threshold = parse_rating_threshold(&or_default("BIZSCOPE_RATING_THRESHOLD", "4.0"))
        .map_err(|reason| invalid("BIZSCOPE_RATING_THRESHOLD", reason))?;

    let missing_field_default = or_default("BIZSCOPE_MISSING_FIELD_DEFAULT", "empty")
        .parse::<FieldDefault>()
        .map_err(|reason| invalid("BIZSCOPE_MISSING_FIELD_DEFAULT", reason))?;

    let output_dir = PathBuf::from(or_default("BIZSCOPE_OUTPUT_DIR", "."));

    Ok(AppConfig {
        log_level,
        yelp_api_key,
        yelp_base_url,
        request_timeout_secs,
        user_agent,
        rating_threshold,
        missing_field_default,
        output_dir,
    })
}

/// Parse a marker rating threshold; it must be a finite star value.
///
/// # Errors
///
/// Returns a human-readable reason when the value is not a number in
/// `0.0..=5.0`.
pub fn parse_rating_threshold(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("\"{raw}\" is not a number: {e}"))?;
    if !(0.0..=5.0).contains(&value) {
        return Err(format!("{value} is outside the 0.0..=5.0 rating scale"));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
