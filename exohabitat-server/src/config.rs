//! Configuration module

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Root directory of versioned model artifacts
    pub artifact_dir: PathBuf,

    /// Planet store snapshot file; empty string selects a volatile store
    pub planet_store: Option<PathBuf>,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            artifact_dir: env::var("ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| exohabitat_core::config::default_artifact_dir()),

            planet_store: match env::var("PLANET_STORE") {
                Ok(value) if value.is_empty() => None,
                Ok(value) => Some(PathBuf::from(value)),
                Err(_) => Some(default_planet_store()),
            },

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn default_planet_store() -> PathBuf {
    dirs_fallback().join("planets.json")
}

fn dirs_fallback() -> PathBuf {
    exohabitat_core::config::default_artifact_dir()
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
