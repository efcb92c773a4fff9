//! Digestion tuning constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, VisceraError};

/// Configuration for the digestion simulation
///
/// These values set the pacing of reagent absorption. Changing them shifts
/// how quickly ingested substances take effect on the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestionConfig {
    /// Seconds between digestion steps for a stomach
    ///
    /// The stomach banks frame time and fires one step each time a full
    /// interval has been crossed. Frame rate does not affect pacing: a
    /// stomach at the default 1.0 s interval digests once per simulated
    /// second whether the server runs at 10 or 60 frames per second.
    pub update_interval: f32,

    /// Minimum seconds a parcel must sit in the stomach before its
    /// contents move to the body
    ///
    /// Measured on the digestion clock (whole intervals), not wall time.
    /// At the default 20.0 s, a meal starts reaching the bloodstream on
    /// the first step after 20 simulated seconds of digestion.
    pub digestion_delay: f32,

    /// Capacity applied to a freshly created stomach solution (units)
    ///
    /// Ingestion is all-or-nothing against this bound; a batch that does
    /// not fit is refused outright rather than partially accepted.
    pub initial_max_volume: f32,

    /// Name of the destination solution on the parent body
    ///
    /// Digested reagents are deposited here in one combined batch per
    /// step, so the destination's capacity check sees the whole batch.
    pub body_solution_name: String,
}

impl Default for DigestionConfig {
    fn default() -> Self {
        Self {
            update_interval: 1.0,
            digestion_delay: 20.0,
            initial_max_volume: 50.0,
            body_solution_name: "bloodstream".to_string(),
        }
    }
}

impl DigestionConfig {
    /// Parse a config from TOML, falling back to defaults for absent keys
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DigestionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.update_interval <= 0.0 {
            return Err(VisceraError::InvalidConfig(format!(
                "update_interval must be positive, got {}",
                self.update_interval
            )));
        }
        if self.digestion_delay < 0.0 {
            return Err(VisceraError::InvalidConfig(format!(
                "digestion_delay must not be negative, got {}",
                self.digestion_delay
            )));
        }
        if self.initial_max_volume < 0.0 {
            return Err(VisceraError::InvalidConfig(format!(
                "initial_max_volume must not be negative, got {}",
                self.initial_max_volume
            )));
        }
        if self.body_solution_name.is_empty() {
            return Err(VisceraError::InvalidConfig(
                "body_solution_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DigestionConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.update_interval - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DigestionConfig::from_toml_str("digestion_delay = 5.0").unwrap();
        assert!((config.digestion_delay - 5.0).abs() < f32::EPSILON);
        // Unspecified keys fall back to defaults
        assert!((config.update_interval - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.body_solution_name, "bloodstream");
    }

    #[test]
    fn test_nonpositive_interval_rejected() {
        let result = DigestionConfig::from_toml_str("update_interval = 0.0");
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(DigestionConfig::from_toml_str("update_interval = ").is_err());
    }
}
