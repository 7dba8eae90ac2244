//! Editor colour themes
//!
//! The host window paints its chrome and the 2D view backgrounds from these
//! colours. `System` leaves everything to the platform defaults.

use serde::{Deserialize, Serialize};
use shatter_core::Rgb;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    System,
    Light,
    #[default]
    Dark,
    DarkPurple,
    Swamp,
}

/// Colours a host window needs to paint one theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColours {
    /// Window and panel background
    pub window: Rgb,
    /// Background of the 2D views and lists
    pub base: Rgb,
    pub text: Rgb,
    /// Selection and marquee colour
    pub highlight: Rgb,
}

fn rgb8(r: u8, g: u8, b: u8) -> Rgb {
    Rgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::System,
        Theme::Light,
        Theme::Dark,
        Theme::DarkPurple,
        Theme::Swamp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::DarkPurple => "dark-purple",
            Theme::Swamp => "swamp",
        }
    }

    /// None for the platform theme
    pub fn colours(&self) -> Option<ThemeColours> {
        let colours = match self {
            Theme::System => return None,
            Theme::Light => ThemeColours {
                window: rgb8(240, 240, 240),
                base: rgb8(255, 255, 255),
                text: rgb8(0, 0, 0),
                highlight: rgb8(0, 120, 215),
            },
            Theme::Dark => ThemeColours {
                window: rgb8(53, 53, 53),
                base: rgb8(42, 42, 42),
                text: rgb8(255, 255, 255),
                highlight: rgb8(42, 130, 218),
            },
            Theme::DarkPurple => ThemeColours {
                window: rgb8(43, 23, 43),
                base: rgb8(25, 3, 25),
                text: rgb8(147, 6, 246),
                highlight: rgb8(42, 130, 218),
            },
            Theme::Swamp => ThemeColours {
                window: rgb8(0, 32, 39),
                base: rgb8(0, 16, 20),
                text: rgb8(255, 255, 255),
                highlight: rgb8(42, 130, 218),
            },
        };
        Some(colours)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Theme {
    type Err = String;

    /// Accepts `dark-purple`, `dark_purple` and `Dark Purple` alike
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "system" | "systemtheme" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "darkpurple" => Ok(Theme::DarkPurple),
            "swamp" => Ok(Theme::Swamp),
            _ => Err(format!(
                "unknown theme '{}' (expected one of: {})",
                s,
                Theme::ALL.map(|t| t.name()).join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme_names() {
        assert_eq!("Dark Purple".parse::<Theme>(), Ok(Theme::DarkPurple));
        assert_eq!("dark_purple".parse::<Theme>(), Ok(Theme::DarkPurple));
        assert_eq!("System Theme".parse::<Theme>(), Ok(Theme::System));
        assert!("neon".parse::<Theme>().is_err());
        for theme in Theme::ALL {
            assert_eq!(theme.name().parse::<Theme>(), Ok(theme));
        }
    }

    #[test]
    fn test_theme_colours() {
        assert!(Theme::System.colours().is_none());
        let dark = Theme::Dark.colours().unwrap();
        assert_eq!(dark.text, Rgb::WHITE);
        assert!((dark.window.r - 53.0 / 255.0).abs() < 1e-6);
        let light = Theme::Light.colours().unwrap();
        assert_eq!(light.base, Rgb::WHITE);
    }
}
