use axum::http::{HeaderValue, Method, header};
use core_config::{ConfigError, Environment};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// CORS layer restricted to `allowed_origins`.
///
/// Methods: GET, POST, PUT, PATCH, DELETE, OPTIONS. Headers: Content-Type,
/// Accept. Preflight responses are cached for one hour.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Allows any origin. Development only.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Build the CORS layer from `CORS_ALLOWED_ORIGIN` (comma-separated).
///
/// When the variable is unset, development falls back to a permissive
/// layer while production fails to start.
pub fn cors_layer_from_env(environment: &Environment) -> Result<CorsLayer, ConfigError> {
    let Ok(raw) = std::env::var("CORS_ALLOWED_ORIGIN") else {
        if environment.is_production() {
            return Err(ConfigError::MissingEnvVar("CORS_ALLOWED_ORIGIN".to_string()));
        }
        warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
        return Ok(create_permissive_cors_layer());
    };

    let origins = parse_origins(&raw)?;
    info!(origins = %raw, "CORS configured");
    Ok(create_cors_layer(origins))
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ConfigError::ParseError {
            key: "CORS_ALLOWED_ORIGIN".to_string(),
            details: e.to_string(),
        })?;

    if origins.is_empty() {
        return Err(ConfigError::ParseError {
            key: "CORS_ALLOWED_ORIGIN".to_string(),
            details: "no origins given".to_string(),
        });
    }

    Ok(origins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_splits_and_trims() {
        let origins = parse_origins("http://localhost:3000, https://shop.example.com,").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://shop.example.com");
    }

    #[test]
    fn test_parse_origins_rejects_empty() {
        let err = parse_origins(" , ").unwrap_err();
        assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
    }

    #[test]
    fn test_missing_origin_is_permissive_in_development() {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            assert!(cors_layer_from_env(&Environment::Development).is_ok());
        });
    }

    #[test]
    fn test_missing_origin_fails_in_production() {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            let err = cors_layer_from_env(&Environment::Production).unwrap_err();
            assert!(matches!(err, ConfigError::MissingEnvVar(_)));
        });
    }
}
