//! Configuration schema types for `qstr.toml`
//!
//! Defines the structure and validation rules for rendering configuration.

use serde::{Deserialize, Serialize};

use crate::color::parse_hex_code;
use crate::decode::{DecodeRule, Decoder};
use crate::palette;
use crate::renderer::{RenderOptions, HEX_LIGHTNESS_CEILING, HEX_LIGHTNESS_FLOOR};

/// General rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Color of text before the first code, as three hex digits (e.g. "fff")
    #[serde(default = "default_leading_color")]
    pub leading_color: String,
}

fn default_leading_color() -> String {
    "fff".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            leading_color: default_leading_color(),
        }
    }
}

/// HTML output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlConfig {
    /// Minimum lightness for hex colors
    #[serde(default = "default_floor")]
    pub lightness_floor: f64,
    /// Maximum lightness for hex colors
    #[serde(default = "default_ceiling")]
    pub lightness_ceiling: f64,
}

fn default_floor() -> f64 {
    HEX_LIGHTNESS_FLOOR
}

fn default_ceiling() -> f64 {
    HEX_LIGHTNESS_CEILING
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            lightness_floor: default_floor(),
            lightness_ceiling: default_ceiling(),
        }
    }
}

/// Complete qstr.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QstrConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub html: HtmlConfig,
    /// Ordered substitutions (`[[decode]]` tables)
    #[serde(default)]
    pub decode: Vec<DecodeRule>,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "html.lightness_floor")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "qstr.toml: '{}' {}", self.field, self.message)
    }
}

impl QstrConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = parse_hex_code(&self.render.leading_color) {
            errors.push(ConfigValidationError {
                field: "render.leading_color".to_string(),
                message: format!("must be three hex digits ({})", e),
            });
        }

        let floor = self.html.lightness_floor;
        let ceiling = self.html.lightness_ceiling;
        if !(0.0..=1.0).contains(&floor) {
            errors.push(ConfigValidationError {
                field: "html.lightness_floor".to_string(),
                message: "must be between 0 and 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&ceiling) {
            errors.push(ConfigValidationError {
                field: "html.lightness_ceiling".to_string(),
                message: "must be between 0 and 1".to_string(),
            });
        }
        if floor >= ceiling {
            errors.push(ConfigValidationError {
                field: "html.lightness_floor".to_string(),
                message: "must be less than html.lightness_ceiling".to_string(),
            });
        }

        for (i, rule) in self.decode.iter().enumerate() {
            if rule.from.is_empty() {
                errors.push(ConfigValidationError {
                    field: format!("decode[{}].from", i),
                    message: "must be a non-empty string".to_string(),
                });
            }
        }

        errors
    }

    /// Build render options from this configuration.
    ///
    /// An invalid leading color falls back to the palette default.
    pub fn render_options(&self) -> RenderOptions {
        let decoder: Decoder = self.decode.iter().cloned().collect();

        RenderOptions {
            leading_color: parse_hex_code(&self.render.leading_color)
                .unwrap_or_else(|_| palette::default_color()),
            hex_lightness_floor: self.html.lightness_floor,
            hex_lightness_ceiling: self.html.lightness_ceiling,
            decoder: if decoder.is_empty() { None } else { Some(decoder) },
        }
    }
}
