//! Per-module styles derived from the stylesheet
//!
//! Each value is read from the module's selector block and falls back to a
//! documented default when the stylesheet is silent. Values that exist but
//! cannot be interpreted also fall back, and are reported as a [`Notice`].

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::color::{self, Opacity};
use crate::constants::{css, defaults, modules, validation};
use crate::error::{ColorError, ContractError};
use crate::notice::Notice;
use crate::selector::module_selector;
use crate::stylesheet::{get_property, set_property};

/// Background and corner radius of one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fill {
    /// Lowercase `#rrggbb`
    pub background: String,
    pub opacity_percent: u8,
    pub radius_px: u8,
}

impl Fill {
    pub fn new(background: impl Into<String>, opacity_percent: u8, radius_px: u8) -> Self {
        Self {
            background: background.into(),
            opacity_percent: opacity_percent.min(validation::MAX_OPACITY_PERCENT),
            radius_px: radius_px.min(validation::MAX_RADIUS),
        }
    }

    /// Default for container-level blocks
    pub fn container_default() -> Self {
        Self::new(defaults::BACKGROUND_HEX, defaults::OPACITY_PERCENT, defaults::CONTAINER_RADIUS)
    }

    pub fn button_default() -> Self {
        Self::new(defaults::BACKGROUND_HEX, defaults::OPACITY_PERCENT, defaults::BUTTON_RADIUS)
    }

    pub fn active_default() -> Self {
        Self::new(
            defaults::ACTIVE_BACKGROUND_HEX,
            defaults::ACTIVE_OPACITY_PERCENT,
            defaults::BUTTON_RADIUS,
        )
    }

    /// `rgba(...)` value for `background-color`
    pub fn background_value(&self) -> Result<String, ColorError> {
        color::to_color_function(
            &self.background,
            Opacity::from_percent(self.opacity_percent).fraction(),
        )
    }

    pub fn radius_value(&self) -> String {
        format!("{}px", self.radius_px)
    }
}

/// Style of a plain module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleStyle {
    pub fill: Fill,
    pub text: String,
}

/// Style of the workspaces module: a container plus per-item buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceStyle {
    pub container: Fill,
    pub button: Fill,
    pub active: Fill,
    /// Text color of the buttons
    pub text: String,
}

/// The editable style of one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleRow {
    Plain(ModuleStyle),
    Workspaces(WorkspaceStyle),
}

impl StyleRow {
    /// Fill used as the source of "apply to all"
    pub fn primary_fill(&self) -> &Fill {
        match self {
            StyleRow::Plain(style) => &style.fill,
            StyleRow::Workspaces(style) => &style.container,
        }
    }
}

/// The three independently styled parts of the workspaces module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkspaceRole {
    Container,
    Button,
    Active,
}

impl WorkspaceRole {
    pub const ALL: [WorkspaceRole; 3] = [
        WorkspaceRole::Container,
        WorkspaceRole::Button,
        WorkspaceRole::Active,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            WorkspaceRole::Container => css::WORKSPACES_CONTAINER,
            WorkspaceRole::Button => css::WORKSPACES_BUTTON,
            WorkspaceRole::Active => css::WORKSPACES_ACTIVE,
        }
    }

    pub fn default_fill(self) -> Fill {
        match self {
            WorkspaceRole::Container => Fill::container_default(),
            WorkspaceRole::Button => Fill::button_default(),
            WorkspaceRole::Active => Fill::active_default(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WorkspaceRole::Container => "container",
            WorkspaceRole::Button => "button",
            WorkspaceRole::Active => "active",
        }
    }
}

impl fmt::Display for WorkspaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkspaceRole {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkspaceRole::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ContractError::UnknownRole(s.to_string()))
    }
}

/// What a style edit addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleTarget {
    Module(String),
    Workspaces(WorkspaceRole),
}

impl StyleTarget {
    /// Targets the workspaces module as a whole resolve to its container
    pub fn module(name: &str) -> Self {
        if name == modules::WORKSPACES {
            StyleTarget::Workspaces(WorkspaceRole::Container)
        } else {
            StyleTarget::Module(name.to_string())
        }
    }

    pub fn module_name(&self) -> &str {
        match self {
            StyleTarget::Module(name) => name,
            StyleTarget::Workspaces(_) => modules::WORKSPACES,
        }
    }

    /// Block holding background and radius
    pub fn fill_selector(&self) -> String {
        match self {
            StyleTarget::Module(name) => module_selector(name),
            StyleTarget::Workspaces(role) => role.selector().to_string(),
        }
    }

    /// Block holding the text color; workspace text lives on the buttons
    pub fn text_selector(&self) -> String {
        match self {
            StyleTarget::Module(name) => module_selector(name),
            StyleTarget::Workspaces(_) => css::WORKSPACES_BUTTON.to_string(),
        }
    }
}

/// Derive the style of `module` from the stylesheet
pub fn reconcile_module(stylesheet: &str, module: &str, notices: &mut Vec<Notice>) -> StyleRow {
    if module == modules::WORKSPACES {
        return StyleRow::Workspaces(reconcile_workspaces(stylesheet, notices));
    }

    let selector = module_selector(module);
    StyleRow::Plain(ModuleStyle {
        fill: read_fill(stylesheet, &selector, Fill::container_default(), notices),
        text: read_text_color(stylesheet, &selector, notices),
    })
}

/// Each workspace role is read from its own selector
pub fn reconcile_workspaces(stylesheet: &str, notices: &mut Vec<Notice>) -> WorkspaceStyle {
    let fill = |role: WorkspaceRole, notices: &mut Vec<Notice>| {
        read_fill(stylesheet, role.selector(), role.default_fill(), notices)
    };

    WorkspaceStyle {
        container: fill(WorkspaceRole::Container, notices),
        button: fill(WorkspaceRole::Button, notices),
        active: fill(WorkspaceRole::Active, notices),
        text: read_text_color(stylesheet, css::WORKSPACES_BUTTON, notices),
    }
}

/// Background, opacity and radius of `selector`, falling back to `default`
pub fn read_fill(stylesheet: &str, selector: &str, default: Fill, notices: &mut Vec<Notice>) -> Fill {
    let (background, opacity_percent) =
        match read_background(stylesheet, selector, &default, notices) {
            Some((hex, opacity)) => (hex, opacity.percent()),
            None => (default.background.clone(), default.opacity_percent),
        };

    let radius_px = match get_property(stylesheet, selector, css::RADIUS) {
        None => default.radius_px,
        Some(raw) => parse_radius(&raw).unwrap_or_else(|| {
            report(notices, selector, css::RADIUS, &raw, &default.radius_value());
            default.radius_px
        }),
    };

    Fill::new(background, opacity_percent, radius_px)
}

fn read_background(
    stylesheet: &str,
    selector: &str,
    default: &Fill,
    notices: &mut Vec<Notice>,
) -> Option<(String, Opacity)> {
    let raw = get_property(stylesheet, selector, css::BACKGROUND)?;

    if let Some((hex, alpha)) = color::parse_color_function(&raw) {
        return Some((hex, Opacity::from_fraction(alpha)));
    }
    if raw.starts_with('#')
        && let Ok(hex) = color::normalize_hex(&raw)
    {
        return Some((hex, Opacity::OPAQUE));
    }

    let fallback = default.background_value().unwrap_or_else(|_| default.background.clone());
    report(notices, selector, css::BACKGROUND, &raw, &fallback);
    None
}

/// Text color of `selector` when it is a bare hex value
pub fn read_text_color(stylesheet: &str, selector: &str, notices: &mut Vec<Notice>) -> String {
    let Some(raw) = get_property(stylesheet, selector, css::COLOR) else {
        return defaults::TEXT_HEX.to_string();
    };

    if raw.starts_with('#')
        && let Ok(hex) = color::normalize_hex(&raw)
    {
        return hex;
    }

    report(notices, selector, css::COLOR, &raw, defaults::TEXT_HEX);
    defaults::TEXT_HEX.to_string()
}

/// `14px`, `14`, `6.5px` → whole pixels clamped to the editor range
fn parse_radius(raw: &str) -> Option<u8> {
    let number = raw
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
        .trim();
    let px: f64 = number.parse().ok()?;
    if !px.is_finite() {
        return None;
    }
    Some(px.round().clamp(0.0, f64::from(validation::MAX_RADIUS)) as u8)
}

fn report(notices: &mut Vec<Notice>, selector: &str, property: &str, value: &str, fallback: &str) {
    warn!(selector = %selector, property = %property, value = %value, fallback = %fallback, "unreadable stylesheet value, using default");
    notices.push(Notice::UnreadableValue {
        selector: selector.to_string(),
        property: property.to_string(),
        value: value.to_string(),
        fallback: fallback.to_string(),
    });
}

/// Write background and radius of `fill` into `selector`
pub fn write_fill(stylesheet: &str, selector: &str, fill: &Fill) -> Result<String, ColorError> {
    let background = fill.background_value()?;
    let updated = set_property(stylesheet, selector, css::BACKGROUND, &background);
    Ok(set_property(&updated, selector, css::RADIUS, &fill.radius_value()))
}

/// Copy `fill` (background, opacity, radius) onto every module but the
/// source. Text colors are left alone, and the workspaces selectors are
/// never touched: their parts are styled from their own row.
pub fn apply_fill_to_all(
    stylesheet: &str,
    source: &StyleTarget,
    fill: &Fill,
    known: &[String],
) -> Result<String, ColorError> {
    let source_selector = source.fill_selector();
    let mut done: Vec<String> = Vec::new();
    let mut out = stylesheet.to_string();

    for module in known {
        if module == modules::WORKSPACES || module == source.module_name() {
            continue;
        }
        let selector = module_selector(module);
        if selector == source_selector || done.contains(&selector) {
            continue;
        }
        out = write_fill(&out, &selector, fill)?;
        done.push(selector);
    }

    Ok(out)
}
