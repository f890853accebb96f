//! Reading settings
//!
//! Typography, theme and layout preferences for the reading view.

use serde::{Deserialize, Serialize};

use crate::error::ReaderError;
use crate::pagination::PageLayout;

pub const MIN_FONT_SIZE: u32 = 12;
pub const MAX_FONT_SIZE: u32 = 24;
pub const MIN_LINE_HEIGHT: f32 = 1.2;
pub const MAX_LINE_HEIGHT: f32 = 2.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    #[default]
    Serif,
    SansSerif,
}

impl FontFamily {
    /// CSS font stack
    pub fn css(&self) -> &'static str {
        match self {
            Self::Serif => "Georgia, serif",
            Self::SansSerif => "system-ui, sans-serif",
        }
    }
}

impl std::str::FromStr for FontFamily {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "serif" => Ok(Self::Serif),
            "sans-serif" | "sans" => Ok(Self::SansSerif),
            _ => Err(ReaderError::invalid_value("font family", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Sepia,
}

impl Theme {
    /// Class applied to the reader root; light needs none
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Light => "",
            Self::Dark => "dark",
            Self::Sepia => "sepia",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "sepia" => Ok(Self::Sepia),
            _ => Err(ReaderError::invalid_value("theme", s)),
        }
    }
}

/// Reader preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSettings {
    /// Pixels, 12..=24
    pub font_size: u32,
    pub font_family: FontFamily,
    /// Multiplier, 1.2..=2.0 in steps of 0.1
    pub line_height: f32,
    pub theme: Theme,
    pub page_layout: PageLayout,
    pub fullscreen: bool,
}

impl Default for ReadingSettings {
    fn default() -> Self {
        Self {
            font_size: 16,
            font_family: FontFamily::Serif,
            line_height: 1.6,
            theme: Theme::Light,
            page_layout: PageLayout::Spread,
            fullscreen: false,
        }
    }
}

impl ReadingSettings {
    pub fn set_font_size(&mut self, size: u32) {
        self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    }

    pub fn set_line_height(&mut self, height: f32) {
        let stepped = (height * 10.0).round() / 10.0;
        self.line_height = stepped.clamp(MIN_LINE_HEIGHT, MAX_LINE_HEIGHT);
    }

    /// Re-apply the slider bounds, e.g. after loading values from config
    pub fn normalized(mut self) -> Self {
        self.set_font_size(self.font_size);
        self.set_line_height(self.line_height);
        self
    }

    /// Inline style for a page body
    pub fn page_style(&self) -> String {
        format!(
            "font-size: {}px; line-height: {}; font-family: {}",
            self.font_size,
            self.line_height,
            self.font_family.css()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ReadingSettings::default();
        assert_eq!(settings.font_size, 16);
        assert_eq!(settings.page_layout, PageLayout::Spread);
        assert_eq!(
            settings.page_style(),
            "font-size: 16px; line-height: 1.6; font-family: Georgia, serif"
        );
    }

    #[test]
    fn test_setters_clamp() {
        let mut settings = ReadingSettings::default();
        settings.set_font_size(40);
        assert_eq!(settings.font_size, 24);
        settings.set_font_size(2);
        assert_eq!(settings.font_size, 12);

        settings.set_line_height(3.0);
        assert_eq!(settings.line_height, 2.0);
        settings.set_line_height(1.44);
        assert!((settings.line_height - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_theme_and_family_parsing() {
        assert_eq!("Sepia".parse::<Theme>().unwrap().css_class(), "sepia");
        assert_eq!("light".parse::<Theme>().unwrap().css_class(), "");
        assert!("neon".parse::<Theme>().is_err());
        assert_eq!("sans-serif".parse::<FontFamily>().unwrap(), FontFamily::SansSerif);
    }

    #[test]
    fn test_serialization_uses_ui_names() {
        let settings = ReadingSettings {
            font_family: FontFamily::SansSerif,
            theme: Theme::Dark,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"fontFamily\":\"sans-serif\""));
        assert!(json.contains("\"theme\":\"dark\""));
        assert!(json.contains("\"pageLayout\":\"spread\""));
    }
}
