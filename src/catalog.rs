//! Well-known bar modules offered by the modules editor

/// Generalized modules the editor can place in a zone
pub const BASE_MODULES: [&str; 18] = [
    "hyprland/workspaces",
    "clock#date",
    "custom/weather",
    "cpu",
    "memory",
    "battery",
    "backlight",
    "temperature",
    "network",
    "wireplumber",
    "pulseaudio",
    "tray",
    "custom/spotify",
    "custom/power",
    "custom/screenshot_t",
    "custom/storage",
    "hyprland/window",
    "mpd",
];

/// Nerd Font glyphs shown next to module names
const ICON_HINTS: [(&str, &str); 19] = [
    ("cpu", "\u{F2DB}"),
    ("memory", "\u{F538}"),
    ("battery", "\u{F240}"),
    ("clock", "\u{F017}"),
    ("clock#date", "\u{F017}"),
    ("custom/spotify", "\u{F1BC}"),
    ("custom/weather", "\u{F0C2}"),
    ("network", "\u{F1EB}"),
    ("backlight", "\u{F185}"),
    ("wireplumber", "\u{F028}"),
    ("pulseaudio", "\u{F028}"),
    ("tray", "\u{F0D7}"),
    ("hyprland/workspaces", "\u{F108}"),
    ("custom/power", "\u{F011}"),
    ("custom/screenshot_t", "\u{F030}"),
    ("temperature", "\u{F2C9}"),
    ("custom/storage", "\u{F0A0}"),
    ("mpd", "\u{F001}"),
    ("hyprland/window", "\u{F2D0}"),
];

/// Generic glyph for modules without a hint
const FALLBACK_ICON: &str = "\u{2022}";

pub fn icon_hint(module: &str) -> &'static str {
    ICON_HINTS
        .iter()
        .find(|(name, _)| *name == module)
        .map_or(FALLBACK_ICON, |(_, icon)| icon)
}
