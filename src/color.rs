//! Color and opacity conversions between the editor and the stylesheet
//!
//! The editor works with `#rrggbb` + percent opacity, the stylesheet stores
//! `rgba(r, g, b, a)`. Channels are clamped, opacity is rounded to 2 decimals.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ColorError;

static COLOR_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*rgba\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*([0-9.]+)\s*\)\s*$")
        .expect("color function pattern is valid")
});

/// An opaque 8-bit RGB triplet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from unbounded channels, clamping each to 0-255
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        let clamp = |c: i64| c.clamp(0, 255) as u8;
        Self::new(clamp(r), clamp(g), clamp(b))
    }

    /// Parse `#rgb` / `#rrggbb` (the `#` is optional)
    pub fn parse(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidFormat {
            input: hex.to_string(),
        };

        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };

        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

/// Opacity stored as a fraction in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opacity(f64);

impl Opacity {
    pub const OPAQUE: Opacity = Opacity(1.0);

    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self(0.0);
        }
        Self(fraction.clamp(0.0, 1.0))
    }

    pub fn from_percent(percent: u8) -> Self {
        Self::from_fraction(f64::from(percent) / 100.0)
    }

    pub fn fraction(self) -> f64 {
        self.0
    }

    /// Nearest whole percent (0-100)
    pub fn percent(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

/// Parse a hex color into its channels
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8), ColorError> {
    let rgb = Rgb::parse(hex)?;
    Ok((rgb.r, rgb.g, rgb.b))
}

/// Format channels as `#rrggbb`, clamping each to 0-255
pub fn rgb_to_hex(r: i64, g: i64, b: i64) -> String {
    Rgb::clamped(r, g, b).to_hex_string()
}

/// Normalize any accepted hex form to lowercase `#rrggbb`
pub fn normalize_hex(hex: &str) -> Result<String, ColorError> {
    Rgb::parse(hex).map(Rgb::to_hex_string)
}

/// `rgba(r, g, b, a)` with `a` clamped to [0, 1] and printed with 2 decimals
pub fn to_color_function(hex: &str, opacity: f64) -> Result<String, ColorError> {
    let rgb = Rgb::parse(hex)?;
    let alpha = Opacity::from_fraction(opacity).fraction();
    Ok(format!("rgba({}, {}, {}, {alpha:.2})", rgb.r, rgb.g, rgb.b))
}

/// Recognize `rgba(r, g, b, a)`; anything else is `None` so the caller uses its default
pub fn parse_color_function(value: &str) -> Option<(String, f64)> {
    let caps = COLOR_FUNCTION.captures(value)?;
    let channel = |i: usize| caps[i].parse::<i64>().unwrap_or(i64::MAX);
    let alpha = caps[4].parse::<f64>().ok()?;

    let hex = rgb_to_hex(channel(1), channel(2), channel(3));
    Some((hex, Opacity::from_fraction(alpha).fraction()))
}
