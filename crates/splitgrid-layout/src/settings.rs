//! Host-tunable layout settings.
//!
//! Settings can be built in code or parsed from TOML/JSON with the
//! `settings-config` feature (enabled by default):
//!
//! ```toml
//! splitter_thickness = 4.0
//! edit_mode = true
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Default splitter bar thickness in layout units.
pub const DEFAULT_SPLITTER_THICKNESS: f64 = 5.0;

/// Layout-wide settings. Missing fields take their defaults when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Thickness of every splitter bar. Default: 5.0.
    pub splitter_thickness: f64,
    /// Gates panel actions and drag-to-swap. Default: false.
    pub edit_mode: bool,
    /// Whether drop-target hit testing counts rectangle edges as inside.
    /// Default: true.
    pub hit_test_inclusive: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            splitter_thickness: DEFAULT_SPLITTER_THICKNESS,
            edit_mode: false,
            hit_test_inclusive: true,
        }
    }
}

impl LayoutSettings {
    /// Parse from a TOML string and validate.
    #[cfg(feature = "settings-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(s).map_err(SettingsError::Toml)?;
        settings.validated()
    }

    /// Parse from a JSON string and validate.
    #[cfg(feature = "settings-config")]
    pub fn from_json_str(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(s).map_err(SettingsError::Json)?;
        settings.validated()
    }

    /// Serialize to pretty TOML.
    #[cfg(feature = "settings-config")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate all parameters. Returns every problem found.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.splitter_thickness.is_finite() {
            errors.push(format!(
                "splitter_thickness must be finite, got {}",
                self.splitter_thickness
            ));
        } else if self.splitter_thickness < 0.0 {
            errors.push(format!(
                "splitter_thickness must be >= 0, got {}",
                self.splitter_thickness
            ));
        }
        errors
    }

    /// `self` if valid, otherwise the validation errors.
    pub fn validated(self) -> Result<Self, SettingsError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(SettingsError::Validation(errors))
        }
    }
}
