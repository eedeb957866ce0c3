//! Full configuration validation.
//!
//! Each section has its own check; this orchestrator calls them all and
//! collects errors into a single `ConfigError`.

mod helpers;
mod sections;

#[cfg(test)]
mod tests;

use crate::schema::KodeseshConfig;
use kodesesh_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &KodeseshConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_relay(&mut errors, config);
    sections::validate_execution(&mut errors, config);
    sections::validate_session(&mut errors, config);
    sections::validate_identity(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
