//! Application configuration loaded from environment variables.
//!
//! Every knob defaults to the San Francisco deployment values, so a bare
//! `cargo run` serves the playable area the mobile client expects.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Playable area as `lng_min,lat_min,lng_max,lat_max`
    pub bbox: [f64; 4],
    /// Hexagon circumradius in meters
    pub hex_radius_m: f64,
    /// How long a user's latest fix counts as "active"
    pub active_ttl_seconds: i64,
    /// Retention window for per-user timelines
    pub history_ttl_seconds: i64,
    /// Maximum retained timeline entries per user (oldest evicted)
    pub history_max_entries: usize,
    /// Score awarded per distinct explored hexagon
    pub points_per_hex: u32,
    /// Path to the challenge catalog (GeoJSON FeatureCollection)
    pub challenges_path: String,
}

// San Francisco bounding box (approx)
const DEFAULT_BBOX: [f64; 4] = [-122.5149, 37.7081, -122.3569, 37.8324];

impl Default for Config {
    /// Default config, also used by tests.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:3000".to_string(),
            bbox: DEFAULT_BBOX,
            hex_radius_m: 100.0,
            active_ttl_seconds: 120,
            history_ttl_seconds: 24 * 60 * 60,
            history_max_entries: 1000,
            points_per_hex: 10,
            challenges_path: "data/challenges.geojson".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// defaults above for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            bbox: match env::var("GAME_BBOX") {
                Ok(raw) => parse_bbox(&raw)?,
                Err(_) => defaults.bbox,
            },
            hex_radius_m: parse_var("HEX_RADIUS_M", defaults.hex_radius_m)?,
            active_ttl_seconds: parse_var("ACTIVE_TTL_SECONDS", defaults.active_ttl_seconds)?,
            history_ttl_seconds: parse_var("HISTORY_TTL_SECONDS", defaults.history_ttl_seconds)?,
            history_max_entries: parse_var("HISTORY_MAX_ENTRIES", defaults.history_max_entries)?,
            points_per_hex: parse_var("POINTS_PER_HEX", defaults.points_per_hex)?,
            challenges_path: env::var("CHALLENGES_PATH").unwrap_or(defaults.challenges_path),
        })
    }
}

/// Parse an optional numeric env var, erroring only if it is set but
/// malformed.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Parse `lng_min,lat_min,lng_max,lat_max`.
fn parse_bbox(raw: &str) -> Result<[f64; 4], ConfigError> {
    let parts: Vec<f64> = raw
        .split(',')
        .map(|p| p.trim().parse())
        .collect::<Result<_, _>>()
        .map_err(|_| ConfigError::Invalid("GAME_BBOX"))?;
    let parts: [f64; 4] = parts
        .try_into()
        .map_err(|_| ConfigError::Invalid("GAME_BBOX"))?;
    Ok(parts)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_deployment_constants() {
        let config = Config::default();
        assert_eq!(config.bbox, [-122.5149, 37.7081, -122.3569, 37.8324]);
        assert_eq!(config.hex_radius_m, 100.0);
        assert_eq!(config.active_ttl_seconds, 120);
        assert_eq!(config.history_ttl_seconds, 86_400);
        assert_eq!(config.points_per_hex, 10);
    }

    #[test]
    fn test_parse_bbox() {
        let bbox = parse_bbox("-122.5, 37.7, -122.3, 37.8").unwrap();
        assert_eq!(bbox, [-122.5, 37.7, -122.3, 37.8]);

        assert!(parse_bbox("-122.5,37.7,-122.3").is_err());
        assert!(parse_bbox("a,b,c,d").is_err());
    }
}
