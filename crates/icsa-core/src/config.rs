use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Default zero-shot NLI checkpoint used when `ICSA_MODEL_ID` is unset.
pub const DEFAULT_MODEL_ID: &str = "MoritzLaurer/ModernBERT-base-zeroshot-v2.0";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if env var values fail to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if env var values fail to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
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

    let env = parse_environment(&or_default("ICSA_ENV", "development"));

    let bind_addr = parse_addr("ICSA_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("ICSA_LOG_LEVEL", "info");
    let model_id = or_default("ICSA_MODEL_ID", DEFAULT_MODEL_ID);
    let text_column = or_default("ICSA_TEXT_COLUMN", "comment");
    let header_skip_rows = parse_usize("ICSA_HEADER_SKIP_ROWS", "6")?;
    let download_dir = PathBuf::from(or_default("ICSA_DOWNLOAD_DIR", "./extracted_comments"));

    let exporter_base_url = lookup("ICSA_EXPORTER_URL").ok();
    let exporter_api_key = lookup("ICSA_EXPORTER_API_KEY").ok();
    let exporter_request_timeout_secs = parse_u64("ICSA_EXPORTER_TIMEOUT_SECS", "30")?;
    let export_poll_timeout_secs = parse_u64("ICSA_EXPORT_POLL_TIMEOUT_SECS", "60")?;
    let export_poll_interval_ms = parse_u64("ICSA_EXPORT_POLL_INTERVAL_MS", "1000")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        model_id,
        text_column,
        header_skip_rows,
        download_dir,
        exporter_base_url,
        exporter_api_key,
        exporter_request_timeout_secs,
        export_poll_timeout_secs,
        export_poll_interval_ms,
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
