//! App configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! history_days = 7
//! default_campus = "daejeon"
//! log_filter = "cafeteria_store=debug,info"
//! widget_placeholder = "등록된 메뉴가 없습니다"
//! ```

use crate::error::ConfigError;
use cafeteria_model::Campus;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How many days back the menu screen may navigate
    pub history_days: u32,
    /// Campus shown before anyone signs in
    pub default_campus: Campus,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Text the widget shows when a meal has no lines
    pub widget_placeholder: String,
}

impl AppConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With history window
    #[inline]
    #[must_use]
    pub fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days;
        self
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_days == 0 {
            return Err(ConfigError::Invalid(
                "history_days must be at least 1".to_string(),
            ));
        }
        if !self.default_campus.is_available() {
            return Err(ConfigError::Invalid(format!(
                "default_campus {} is not available",
                self.default_campus
            )));
        }
        if self.widget_placeholder.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "widget_placeholder must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_days: 7,
            default_campus: Campus::Daejeon,
            log_filter: "info".to_string(),
            widget_placeholder: "등록된 메뉴가 없습니다".to_string(),
        }
    }
}
