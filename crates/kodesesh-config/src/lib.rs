//! KodeSesh configuration system.
//!
//! TOML-based configuration with validation. All sections use defaults
//! so partial configs work out of the box.
//!
//! ```rust,no_run
//! let config = kodesesh_config::load_config().expect("failed to load config");
//! println!("{}", config.relay.url);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    ExecutionConfig, IdentityConfig, KodeseshConfig, LogLevel, LoggingConfig, RelayConfig,
    SessionConfig, CONFIG_SCHEMA_VERSION,
};
pub use toml_loader::config_dir;

use std::path::Path;

use kodesesh_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a documented default file if none exists.
pub fn load_config() -> Result<KodeseshConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path and validate it.
pub fn load_config_from(path: &Path) -> Result<KodeseshConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[relay]\nurl = \"ftp://nope\"\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = KodeseshConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: KodeseshConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.relay.url, config.relay.url);
        assert_eq!(parsed.session.default_session_id, "demo-session");
    }
}
