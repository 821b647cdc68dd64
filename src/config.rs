//! Background style configuration.
//!
//! Handles loading and validating the TOML file that describes which selector
//! gets a responsive background and which image size to use at each
//! breakpoint.
//!
//! ## Configuration Options
//!
//! ```toml
//! # CSS selector that receives the background image
//! selector = ".hero"
//!
//! # One entry per breakpoint, in output order.
//! # min_width = 0 is the default rule (no media query).
//! [[breakpoints]]
//! min_width = 0
//! size = "thumbnail"            # a size the host already knows
//!
//! [[breakpoints]]
//! min_width = 768
//! size = { name = "hero-md", width = 1024, height = 600, crop = true }
//! ```
//!
//! A `size` table is a registration request: the size is registered with the
//! host when the registry is built. `crop` defaults to `false`.
//!
//! Unknown keys are rejected to catch typos early.

use crate::breakpoints::{BreakpointError, BreakpointMap, ImageSizeSpec, SizeRegistration};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Config validation error: {0}")]
    Breakpoints(#[from] BreakpointError),
}

/// Background configuration loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    /// CSS selector the background rules apply to.
    pub selector: String,
    /// Breakpoints in output order.
    pub breakpoints: Vec<BreakpointConfig>,
}

/// One `[[breakpoints]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BreakpointConfig {
    /// Minimum viewport width in CSS pixels; `0` means no media query.
    pub min_width: u32,
    /// Size name, or a size registration table.
    pub size: ImageSizeSpec,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            selector: ".hero".to_string(),
            breakpoints: vec![
                BreakpointConfig {
                    min_width: 0,
                    size: ImageSizeSpec::from("medium"),
                },
                BreakpointConfig {
                    min_width: 768,
                    size: ImageSizeSpec::from("large"),
                },
                BreakpointConfig {
                    min_width: 1200,
                    size: ImageSizeSpec::from(SizeRegistration::new(
                        "background-wide",
                        1920,
                        1080,
                        true,
                    )),
                },
            ],
        }
    }
}

impl BackgroundConfig {
    /// Validate config values before building a registry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.selector.trim().is_empty() {
            return Err(ConfigError::Validation(
                "selector must not be empty".into(),
            ));
        }
        if self.breakpoints.is_empty() {
            return Err(ConfigError::Validation(
                "breakpoints must not be empty".into(),
            ));
        }
        for bp in &self.breakpoints {
            if bp.size.name().trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "breakpoint {}px: size name must not be empty",
                    bp.min_width
                )));
            }
        }
        self.breakpoint_map()?;
        Ok(())
    }

    /// The configured breakpoints as a [`BreakpointMap`].
    pub fn breakpoint_map(&self) -> Result<BreakpointMap, ConfigError> {
        let map = BreakpointMap::from_entries(
            self.breakpoints
                .iter()
                .map(|bp| (bp.min_width, bp.size.clone())),
        )?;
        Ok(map)
    }
}

/// Load and validate a configuration file.
pub fn load_config(path: &Path) -> Result<BackgroundConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: BackgroundConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Responsive Background Configuration
# ===================================
# Values shown below are the defaults.
# Unknown keys will cause an error.

# CSS selector that receives the background image.
# Emitted as-is: no escaping is applied.
selector = ".hero"

# ---------------------------------------------------------------------------
# Breakpoints
# ---------------------------------------------------------------------------
# One [[breakpoints]] entry per viewport width, in output order.
#
#   min_width = 0     -> default rule, no media query
#   min_width = N     -> @media (min-width: Npx) { ... }
#
# `size` is either the name of an image size the host already knows,
# or a table registering a new size with the host:
#
#   size = { name = "hero-md", width = 1024, height = 600, crop = true }
#
# Breakpoints whose image cannot be resolved to a URL are left out.

[[breakpoints]]
min_width = 0
size = "medium"

[[breakpoints]]
min_width = 768
size = "large"

[[breakpoints]]
min_width = 1200
size = { name = "background-wide", width = 1920, height = 1080, crop = true }
"##
}
