use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use common::constants::N_AXES;
use common::Color;

use crate::keys::Scancode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Vertical band and color of one axis trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub offset: i32,
    pub color: Color,
}

/// Layout of the scrolling accelerometer graph.
///
/// ```toml
/// scale_divisor = 4
/// wrap_threshold = 280
/// rezero_key = "Select"
///
/// [[channels]]
/// offset = 40
/// color = 0xFF0000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Raw sensor units per graph pixel
    pub scale_divisor: i32,
    /// Samples drawn before the graph wraps around
    pub wrap_threshold: u32,
    /// X coordinate of the first segment start
    pub x_origin: i32,
    pub width: i32,
    pub height: i32,
    pub background: Color,
    /// One channel per axis, in x, y, z order
    pub channels: [ChannelConfig; N_AXES],
    pub rezero_key: Scancode,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            scale_divisor: 4,
            wrap_threshold: 280,
            x_origin: 19,
            width: 320,
            height: 240,
            background: Color::BLACK,
            channels: [
                ChannelConfig {
                    offset: 40,
                    color: Color::RED,
                },
                ChannelConfig {
                    offset: 120,
                    color: Color::GREEN,
                },
                ChannelConfig {
                    offset: 200,
                    color: Color::BLUE,
                },
            ],
            rezero_key: Scancode::Select,
        }
    }
}

impl GraphConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GraphConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale_divisor <= 0 {
            return Err(ConfigError::Invalid(format!(
                "scale_divisor must be positive, got {}",
                self.scale_divisor
            )));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "surface size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
