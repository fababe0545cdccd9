//! CORS layer configuration.

use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

use farmhub_core::config::CorsConfig;

/// Builds a CORS tower layer from configuration.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age_seconds));

    if config.allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    layer.allow_origin(origins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_origins_are_accepted() {
        let config = CorsConfig {
            allowed_origins: vec!["https://farmhub.example".into(), "not a header\n".into()],
            max_age_seconds: 60,
        };
        // Malformed origins are skipped rather than rejected.
        let _layer = build_cors_layer(&config);
    }
}
