//! Theme configuration.
//!
//! The library never reads files; hosts load the TOML text however they like and hand it to
//! [`Theme::from_toml_str`]. Every field has a default, so an empty document is a valid theme.

use crate::color::Color;
use crate::rect::Extent;
use cgmath::Vector2;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid theme: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid theme: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub palette: Palette,
    pub text: TextConfig,
    pub ribbon: RibbonConfig,
    pub screen: ScreenConfig,
}

/// Background colors for the three pointer states.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub hover: Color,
    pub click: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: Color::BACKGROUND,
            hover: Color::HOVER,
            click: Color::CLICK,
        }
    }
}

/// Text rasterization settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Glyph size in pixels at which text is rasterized.
    pub pixel_size: u32,

    /// Factor from rasterized pixels to logical layout units.
    pub display_scale: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        TextConfig {
            pixel_size: 32,
            display_scale: 1.,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RibbonConfig {
    pub height: f32,

    /// Gap before each ribbon item, also added to each item's width.
    pub padding: f32,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        RibbonConfig {
            height: 50.,
            padding: 50.,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl Theme {
    /// Parses and validates a theme.
    pub fn from_toml_str(source: &str) -> Result<Theme, ConfigError> {
        let theme: Theme = toml::from_str(source)?;
        theme.validate()?;
        log::debug!("loaded theme: {:?}", theme);
        Ok(theme)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.text.pixel_size == 0 {
            return Err(ConfigError::Invalid("text.pixel_size must be positive".into()));
        }
        if !(self.text.display_scale > 0.) {
            return Err(ConfigError::Invalid("text.display_scale must be positive".into()));
        }
        if self.ribbon.height < 0. || self.ribbon.padding < 0. {
            return Err(ConfigError::Invalid("ribbon sizes must not be negative".into()));
        }
        if self.screen.width < 0. || self.screen.height < 0. {
            return Err(ConfigError::Invalid("screen extent must not be negative".into()));
        }
        Ok(())
    }

    /// Returns a copy with the given screen extent.
    pub fn with_screen(mut self, width: f32, height: f32) -> Theme {
        self.screen = ScreenConfig { width, height };
        self
    }

    pub fn screen_extent(&self) -> Extent {
        Vector2::new(self.screen.width, self.screen.height)
    }
}
