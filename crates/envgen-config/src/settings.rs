//! Editor settings stored as TOML.
//!
//! ```toml
//! log_filter = "envgen=debug"
//!
//! [view]
//! precision = 2
//! slider_step = 0.001
//!
//! [lanes]
//! colours = ["#00ffaa", "#ff8c00"]
//! ```
//!
//! Every key is optional. Missing keys take their defaults, and a missing
//! file means all defaults. Lane colours override the built-in palette
//! entry by entry; lanes past the end of the list keep the built-in colour.

use std::path::Path;

use envgen_core::{DEFAULT_PRECISION, MAX_LANES, lane_colour};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest readout precision accepted.
pub const MAX_PRECISION: usize = 6;

/// Default slider resolution, in slider-position units.
pub const DEFAULT_SLIDER_STEP: f64 = 0.001;

/// How values are shown and dragged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Decimal places for non-integer readouts.
    pub precision: usize,
    /// Slider positions snap to multiples of this.
    pub slider_step: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            slider_step: DEFAULT_SLIDER_STEP,
        }
    }
}

/// Lane appearance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanesConfig {
    /// Palette overrides, by 0-based lane position.
    pub colours: Vec<String>,
}

/// Editor settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    /// Readout and slider settings.
    pub view: ViewConfig,
    /// Lane appearance.
    pub lanes: LanesConfig,
}

impl EditorConfig {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load settings from a file, or defaults if it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.view.precision > MAX_PRECISION {
            return Err(ConfigError::invalid(
                "view.precision",
                format!("{} exceeds {MAX_PRECISION}", self.view.precision),
            ));
        }
        let step = self.view.slider_step;
        if !(step > 0.0 && step <= 1.0) {
            return Err(ConfigError::invalid(
                "view.slider_step",
                format!("{step} is not in (0, 1]"),
            ));
        }
        if self.lanes.colours.len() > MAX_LANES {
            return Err(ConfigError::invalid(
                "lanes.colours",
                format!("{} entries for {MAX_LANES} lanes", self.lanes.colours.len()),
            ));
        }
        if let Some(bad) = self.lanes.colours.iter().find(|c| !is_hex_colour(c)) {
            return Err(ConfigError::invalid(
                "lanes.colours",
                format!("'{bad}' is not a #rrggbb colour"),
            ));
        }
        Ok(())
    }

    /// Colour for the lane at 0-based `index`.
    pub fn lane_colour(&self, index: usize) -> &str {
        self.lanes
            .colours
            .get(index)
            .map_or_else(|| lane_colour(index), String::as_str)
    }
}

fn is_hex_colour(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}
