//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the crate, providing a single source of truth for constant values.

/// Zone array fields in the bar config
pub mod zones {
    /// Field holding the left zone's module list
    pub const LEFT_FIELD: &str = "modules-left";

    /// Field holding the center zone's module list
    pub const CENTER_FIELD: &str = "modules-center";

    /// Field holding the right zone's module list
    pub const RIGHT_FIELD: &str = "modules-right";

    /// Marker that disables an array entry without removing it
    pub const DISABLED_MARKER: &str = "//";

    /// Indentation used for entries when the document gives no hint
    pub const DEFAULT_ENTRY_INDENT: &str = "    ";

    /// Indentation used for the closing bracket when the document gives no hint
    pub const DEFAULT_CLOSE_INDENT: &str = "  ";

    /// Indentation used for a newly inserted zone field
    pub const FIELD_INDENT: &str = "  ";
}

/// Module identifier conventions
pub mod modules {
    /// Prefix of user-scripted modules (`custom/weather`)
    pub const CUSTOM_PREFIX: &str = "custom/";

    /// Selector form of the custom prefix (`#custom-weather`)
    pub const CUSTOM_SELECTOR_PREFIX: &str = "custom-";

    /// Compositor namespace dropped from selectors (`hyprland/workspaces`)
    pub const COMPOSITOR_PREFIX: &str = "hyprland/";

    /// Selector identifiers that belong to the compositor namespace
    pub const COMPOSITOR_IDS: [&str; 2] = ["workspaces", "window"];

    /// Separator between a module and its variant (`clock#date`)
    pub const VARIANT_SEPARATOR: char = '#';

    /// The composite workspaces module
    pub const WORKSPACES: &str = "hyprland/workspaces";
}

/// Stylesheet selectors and property names
pub mod css {
    pub const BACKGROUND: &str = "background-color";
    pub const RADIUS: &str = "border-radius";
    pub const COLOR: &str = "color";

    /// Workspaces container block
    pub const WORKSPACES_CONTAINER: &str = "#workspaces";

    /// Every workspace button
    pub const WORKSPACES_BUTTON: &str = "#workspaces button";

    /// The focused workspace button
    pub const WORKSPACES_ACTIVE: &str = "#workspaces button.active";

    /// Indentation for declarations added to a block with no hint
    pub const DEFAULT_DECLARATION_INDENT: &str = "  ";
}

/// Fallback style values used when the stylesheet is silent
pub mod defaults {
    pub const BACKGROUND_HEX: &str = "#111827";
    pub const OPACITY_PERCENT: u8 = 85;
    pub const TEXT_HEX: &str = "#ffffff";

    /// Radius of container-level blocks
    pub const CONTAINER_RADIUS: u8 = 14;

    /// Radius of workspace buttons
    pub const BUTTON_RADIUS: u8 = 6;

    /// Active workspace button background
    pub const ACTIVE_BACKGROUND_HEX: &str = "#025939";
    pub const ACTIVE_OPACITY_PERCENT: u8 = 95;
}

/// Value ranges accepted by the style editor
pub mod validation {
    pub const MAX_OPACITY_PERCENT: u8 = 100;
    pub const MAX_RADIUS: u8 = 30;
}

/// On-disk locations
pub mod paths {
    /// Bar directory under the XDG config dir
    pub const WAYBAR_DIR: &str = "waybar";

    /// Environment override for the bar directory
    pub const WAYBAR_DIR_ENV: &str = "WAYBAR_DIR";

    pub const CONFIG_FILENAME: &str = "config.jsonc";
    pub const STYLE_FILENAME: &str = "style.css";
    pub const CONFIG_BACKUP_FILENAME: &str = "config.jsonc.backup";
    pub const STYLE_BACKUP_FILENAME: &str = "style.css.backup";

    /// Marker written once the first-run backup exists
    pub const BACKUP_MARKER_FILENAME: &str = ".waybar-configurator.meta";

    /// Tool directory under the XDG config and data dirs
    pub const APP_DIR: &str = "waybar-configurator";

    pub const SETTINGS_FILENAME: &str = "settings.json";
    pub const LANG_DIR: &str = "lang";
    pub const THEMES_DIR: &str = "themes";
    pub const USER_THEMES_DIR: &str = "user_themes";
    pub const DEFAULT_THEME_FILENAME: &str = "default_theme.css";
}

/// Bar process control
pub mod process {
    /// Shell snippet restarting the bar detached from this process
    pub const RESTART_SCRIPT: &str = "pkill waybar; sleep 1; waybar & disown";
}
