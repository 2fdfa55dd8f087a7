//! Badge and preview colors
//! Defaults to a Catppuccin-inspired palette; `[theme]` in the config file
//! can override the severity colors with hex values.

use ratatui::style::Color;

use crate::config::ThemeConfig;
use crate::text::ReadabilityBucket;

/// Theme colors for badges and the preview
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,           // Active borders, headings
    pub success: Color,          // Easy-to-read badge
    pub warning: Color,          // Middling badge
    pub danger: Color,           // Hard-to-read badge
    pub text: Color,             // Primary text
    pub text_dim: Color,         // Hints, timestamps
    pub inactive: Color,         // Inactive borders
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(250, 179, 135),
            success: Color::Rgb(166, 218, 149),
            warning: Color::Rgb(250, 179, 135),
            danger: Color::Rgb(243, 139, 168),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            inactive: Color::Rgb(88, 91, 112),
        }
    }
}

impl Theme {
    /// Default palette with any valid config overrides applied
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = Self::default();

        let overrides = [
            ("success", &config.success, &mut theme.success),
            ("warning", &config.warning, &mut theme.warning),
            ("danger", &config.danger, &mut theme.danger),
        ];

        for (name, value, slot) in overrides {
            let Some(value) = value else { continue };
            match Self::parse_hex_color(value) {
                Some(color) => *slot = color,
                None => tracing::warn!("Ignoring invalid {} color '{}'", name, value),
            }
        }

        theme
    }

    /// Color for a readability severity
    pub fn bucket_color(&self, bucket: ReadabilityBucket) -> Color {
        match bucket {
            ReadabilityBucket::Success => self.success,
            ReadabilityBucket::Warning => self.warning,
            ReadabilityBucket::Danger => self.danger,
        }
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    pub fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

/// Convert a theme color for direct terminal output
pub fn to_crossterm(color: Color) -> crossterm::style::Color {
    use crossterm::style::Color as C;

    match color {
        Color::Rgb(r, g, b) => C::Rgb { r, g, b },
        Color::Black => C::Black,
        Color::Red => C::DarkRed,
        Color::Green => C::DarkGreen,
        Color::Yellow => C::DarkYellow,
        Color::Blue => C::DarkBlue,
        Color::Magenta => C::DarkMagenta,
        Color::Cyan => C::DarkCyan,
        Color::Gray => C::Grey,
        Color::DarkGray => C::DarkGrey,
        Color::LightRed => C::Red,
        Color::LightGreen => C::Green,
        Color::LightYellow => C::Yellow,
        Color::LightBlue => C::Blue,
        Color::LightMagenta => C::Magenta,
        Color::LightCyan => C::Cyan,
        Color::White => C::White,
        Color::Indexed(i) => C::AnsiValue(i),
        Color::Reset => C::Reset,
        #[allow(unreachable_patterns)]
        _ => C::Reset,
    }
}
