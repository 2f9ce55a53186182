//! PharmaCalc Host
//!
//! Accepts JSON calculation requests, routes them to the calculator crates,
//! and renders either the result or the validation reason as JSON.

use calc_validator::ValidationError;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;
pub mod config;
mod request;

pub use cli::Cli;
pub use config::HostConfig;
pub use request::{dispatch, CalculationRequest, CalculationResponse};

/// Host errors
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Malformed request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Logging already initialized")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Wire envelope around every response
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Reply {
    Ok(CalculationResponse),
    Error {
        calculator: &'static str,
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<&'static str>,
    },
}

/// Initialize logging
pub fn init_logging(config: &HostConfig) -> Result<(), HostError> {
    let level = Level::from_str(&config.log_level)
        .map_err(|_| HostError::InvalidLogLevel(config.log_level.clone()))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Parse a JSON request, run it, and serialize the outcome.
///
/// Validation failures become `{"status":"error",...}` replies; only
/// malformed JSON is returned as an error.
pub fn handle_json(config: &HostConfig, body: &str) -> Result<String, HostError> {
    let request: CalculationRequest = serde_json::from_str(body)?;
    let calculator = request.name();
    info!("Dispatching {} calculation", calculator);

    let reply = match dispatch(config, request) {
        Ok(response) => Reply::Ok(response),
        Err(e) => {
            warn!("Rejected {} request: {}", calculator, e);
            Reply::Error {
                calculator,
                reason: e.reason(),
                field: e.field(),
            }
        }
    };

    Ok(serde_json::to_string(&reply)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_ok_envelope() {
        let out = handle_json(
            &HostConfig::default(),
            r#"{"calculator":"bmi","height_cm":200,"weight_kg":100}"#,
        )
        .unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["status"], "ok");
        assert_eq!(v["calculator"], "bmi");
        assert_eq!(v["category"], "overweight");
    }

    #[test]
    fn test_error_envelope() {
        let out = handle_json(
            &HostConfig::default(),
            r#"{"calculator":"bmi","height_cm":0,"weight_kg":100}"#,
        )
        .unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["status"], "error");
        assert_eq!(v["calculator"], "bmi");
        assert_eq!(v["field"], "height_cm");
        assert!(v["reason"].as_str().unwrap().contains("height_cm"));
    }

    #[test]
    fn test_malformed_json() {
        let err = handle_json(&HostConfig::default(), "{not json").unwrap_err();
        assert!(matches!(err, HostError::Json(_)));
    }

    #[test]
    fn test_unknown_calculator() {
        let err = handle_json(&HostConfig::default(), r#"{"calculator":"astrology"}"#).unwrap_err();
        assert!(matches!(err, HostError::Json(_)));
    }

    #[test]
    fn test_invalid_log_level() {
        let config = HostConfig {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            init_logging(&config),
            Err(HostError::InvalidLogLevel(_))
        ));
    }
}
