//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::BoardConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a file.
///
/// `.json` files use the JSON layout; everything else is parsed as TOML.
pub fn load_config(path: &Path) -> Result<BoardConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config = if is_json {
        parse_json(&content)?
    } else {
        parse_toml(&content)?
    };

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

pub fn parse_toml(content: &str) -> Result<BoardConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

pub fn parse_json(content: &str) -> Result<BoardConfig, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOML_CONFIG: &str = r#"
interval_seconds = 30
timeout_ms = 2000
concurrency = 2

[slack]
channel_id = "C123"

[[services]]
name = "api"
url = "https://api.example.com/health"
env = "production"

[[services]]
name = "web"
address = "https://dev.example.com"
env = "development"
"#;

    #[test]
    fn test_parse_toml_with_defaults() {
        let config = parse_toml(TOML_CONFIG).unwrap();
        assert_eq!(config.interval_seconds, 30);
        assert_eq!(config.timeout_ms, 2000);
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.failure_threshold, 4);
        assert_eq!(config.services.len(), 2);
        assert_eq!(config.services[1].url, "https://dev.example.com");
        assert_eq!(config.slack.channel_id, "C123");
        assert_eq!(config.slack.board_handle_path, ".board_ts");
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_load_legacy_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{
                "interval_seconds": 60,
                "timeout_ms": 5000,
                "concurrency": 5,
                "services": [
                    {{"name": "api", "url": "https://api.example.com", "env": "production"}}
                ]
            }}"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.services[0].name, "api");
        assert_eq!(config.services[0].env, "production");
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "interval_seconds = 0").unwrap();

        match load_config(file.path()) {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.contains(&ValidationError::ZeroInterval));
                assert!(errors.contains(&ValidationError::NoServices));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("/nonexistent/services.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
