//! Editing session over the bar config and stylesheet
//!
//! A [`Session`] owns the two document texts. Edits never mutate it in
//! place: [`Session::apply`] returns the next session, so the front end can
//! keep or compare versions. Everything shown to the user (zones, styles)
//! is derived from the texts on demand through [`Session::view`].

use tracing::{debug, info, warn};

use crate::color;
use crate::constants::css;
use crate::notice::Notice;
use crate::reconcile::{
    Fill, StyleRow, StyleTarget, WorkspaceRole, apply_fill_to_all, reconcile_module,
};
use crate::selector::undeclared_modules;
use crate::stylesheet::set_property;
use crate::zones::{Zone, ZoneEntry, ZoneOrigin, ZoneRead, read_zone, write_zone};

/// A user edit
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Comment a zone entry in or out
    SetEnabled { module: String, enabled: bool },
    /// Move a module into a zone (enabled), or out of every zone with `None`
    AssignZone { module: String, zone: Option<Zone> },
    /// Background color and opacity
    SetBackground {
        target: StyleTarget,
        hex: String,
        opacity_percent: u8,
    },
    /// Opacity only, keeping the current background color
    SetOpacity { target: StyleTarget, opacity_percent: u8 },
    SetRadius { target: StyleTarget, radius_px: u8 },
    SetTextColor { target: StyleTarget, hex: String },
    /// Copy the source's background, opacity and radius onto every other module
    ApplyToAll { source: StyleTarget },
    /// Swap in a whole stylesheet (theme)
    ReplaceStylesheet(String),
    /// Start over from freshly loaded documents
    Reload { config: String, stylesheet: String },
}

/// Zone membership of one module as shown in the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRow {
    pub name: String,
    /// `None` for modules that only exist as a stylesheet rule
    pub zone: Option<Zone>,
    pub enabled: bool,
    pub style: StyleRow,
}

/// Everything the editor renders, derived from one session version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub zones: Vec<(Zone, Vec<ZoneEntry>)>,
    /// Styled modules that no zone declares
    pub others: Vec<String>,
    pub rows: Vec<ModuleRow>,
    /// Fallbacks taken while deriving this view
    pub notices: Vec<Notice>,
}

impl SessionView {
    pub fn row(&self, module: &str) -> Option<&ModuleRow> {
        self.rows.iter().find(|row| row.name == module)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    config: String,
    stylesheet: String,
    notices: Vec<Notice>,
}

impl Session {
    /// Start a session. Empty texts mean "file absent" and are valid.
    pub fn load(config: impl Into<String>, stylesheet: impl Into<String>) -> Self {
        let mut session = Self {
            config: config.into(),
            stylesheet: stylesheet.into(),
            notices: Vec::new(),
        };
        for (zone, read) in session.zone_reads() {
            if read.origin == ZoneOrigin::StructuredFallback {
                session.notices.push(Notice::ZoneFallback { zone });
            }
        }
        info!(
            config_bytes = session.config.len(),
            stylesheet_bytes = session.stylesheet.len(),
            "loaded editing session"
        );
        session
    }

    pub fn config_text(&self) -> &str {
        &self.config
    }

    pub fn stylesheet_text(&self) -> &str {
        &self.stylesheet
    }

    /// Stylesheet for live preview; identical to what a save would write
    pub fn preview_stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// `(config, stylesheet)` to persist
    pub fn documents(&self) -> (&str, &str) {
        (&self.config, &self.stylesheet)
    }

    /// Notices raised by edits applied so far
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Same documents, notices acknowledged
    pub fn without_notices(&self) -> Self {
        Self {
            notices: Vec::new(),
            ..self.clone()
        }
    }

    fn zone_reads(&self) -> Vec<(Zone, ZoneRead)> {
        Zone::ALL
            .into_iter()
            .map(|zone| (zone, read_zone(&self.config, zone.field())))
            .collect()
    }

    pub fn zone_entries(&self, zone: Zone) -> Vec<ZoneEntry> {
        read_zone(&self.config, zone.field()).entries
    }

    /// Zone declaring `module`, if any
    pub fn zone_of(&self, module: &str) -> Option<Zone> {
        Zone::ALL
            .into_iter()
            .find(|zone| self.zone_entries(*zone).iter().any(|e| e.name == module))
    }

    /// Styled modules that no zone declares
    pub fn others(&self) -> Vec<String> {
        let declared: Vec<String> = Zone::ALL
            .into_iter()
            .flat_map(|zone| self.zone_entries(zone))
            .map(|entry| entry.name)
            .collect();
        undeclared_modules(&self.stylesheet, declared.iter().map(String::as_str))
    }

    /// Every module the editor knows: zone entries in zone order, then others
    pub fn known_modules(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for zone in Zone::ALL {
            for entry in self.zone_entries(zone) {
                if !names.contains(&entry.name) {
                    names.push(entry.name);
                }
            }
        }
        names.extend(self.others());
        names
    }

    /// Derive zones and per-module styles
    pub fn view(&self) -> SessionView {
        let mut notices = Vec::new();
        let zones: Vec<(Zone, Vec<ZoneEntry>)> = self
            .zone_reads()
            .into_iter()
            .map(|(zone, read)| (zone, read.entries))
            .collect();
        let others = self.others();

        let mut rows: Vec<ModuleRow> = Vec::new();
        for (zone, entries) in &zones {
            for entry in entries {
                if rows.iter().any(|row| row.name == entry.name) {
                    warn!(module = %entry.name, zone = %zone, "module declared in more than one zone, keeping the first");
                    continue;
                }
                rows.push(ModuleRow {
                    name: entry.name.clone(),
                    zone: Some(*zone),
                    enabled: entry.enabled,
                    style: reconcile_module(&self.stylesheet, &entry.name, &mut notices),
                });
            }
        }
        for name in &others {
            rows.push(ModuleRow {
                name: name.clone(),
                zone: None,
                enabled: true,
                style: reconcile_module(&self.stylesheet, name, &mut notices),
            });
        }

        SessionView {
            zones,
            others,
            rows,
            notices,
        }
    }

    /// Current fill of a style target
    pub fn fill_of(&self, target: &StyleTarget) -> Fill {
        let mut ignored = Vec::new();
        match (target, reconcile_module(&self.stylesheet, target.module_name(), &mut ignored)) {
            (StyleTarget::Workspaces(role), StyleRow::Workspaces(style)) => match role {
                WorkspaceRole::Container => style.container,
                WorkspaceRole::Button => style.button,
                WorkspaceRole::Active => style.active,
            },
            (_, row) => row.primary_fill().clone(),
        }
    }

    /// Apply one edit, returning the next session
    pub fn apply(&self, edit: Edit) -> Session {
        debug!(edit = ?edit, "applying edit");
        let mut next = self.clone();
        match edit {
            Edit::SetEnabled { module, enabled } => next.set_enabled(&module, enabled),
            Edit::AssignZone { module, zone } => next.assign_zone(&module, zone),
            Edit::SetBackground {
                target,
                hex,
                opacity_percent,
            } => {
                let Some(hex) = next.checked_color(&hex) else {
                    return next;
                };
                let fill = Fill::new(hex, opacity_percent, next.fill_of(&target).radius_px);
                next.set_background(&target, &fill);
            }
            Edit::SetOpacity {
                target,
                opacity_percent,
            } => {
                let current = next.fill_of(&target);
                let fill = Fill::new(current.background, opacity_percent, current.radius_px);
                next.set_background(&target, &fill);
            }
            Edit::SetRadius { target, radius_px } => {
                let current = next.fill_of(&target);
                let fill = Fill::new(current.background, current.opacity_percent, radius_px);
                next.stylesheet =
                    set_property(&next.stylesheet, &target.fill_selector(), css::RADIUS, &fill.radius_value());
            }
            Edit::SetTextColor { target, hex } => {
                let Some(hex) = next.checked_color(&hex) else {
                    return next;
                };
                next.stylesheet = set_property(&next.stylesheet, &target.text_selector(), css::COLOR, &hex);
            }
            Edit::ApplyToAll { source } => {
                let fill = next.fill_of(&source);
                let known = next.known_modules();
                match apply_fill_to_all(&next.stylesheet, &source, &fill, &known) {
                    Ok(stylesheet) => {
                        info!(source = %source.module_name(), "applied fill to all modules");
                        next.stylesheet = stylesheet;
                    }
                    Err(e) => {
                        warn!(error = %e, "source fill is not a valid color, nothing applied");
                        next.notices.push(Notice::InvalidColor {
                            input: fill.background,
                        });
                    }
                }
            }
            Edit::ReplaceStylesheet(stylesheet) => next.stylesheet = stylesheet,
            Edit::Reload { config, stylesheet } => return Session::load(config, stylesheet),
        }
        next
    }

    fn checked_color(&mut self, hex: &str) -> Option<String> {
        match color::normalize_hex(hex) {
            Ok(hex) => Some(hex),
            Err(e) => {
                warn!(error = %e, "rejecting color edit");
                self.notices.push(Notice::InvalidColor {
                    input: hex.to_string(),
                });
                None
            }
        }
    }

    fn set_background(&mut self, target: &StyleTarget, fill: &Fill) {
        match fill.background_value() {
            Ok(value) => {
                self.stylesheet =
                    set_property(&self.stylesheet, &target.fill_selector(), css::BACKGROUND, &value);
            }
            Err(_) => self.notices.push(Notice::InvalidColor {
                input: fill.background.clone(),
            }),
        }
    }

    fn set_enabled(&mut self, module: &str, enabled: bool) {
        let Some(zone) = self.zone_of(module) else {
            warn!(module = %module, "cannot toggle a module that no zone declares");
            self.notices.push(Notice::UnknownModule {
                module: module.to_string(),
            });
            return;
        };

        let read = read_zone(&self.config, zone.field());
        if read.origin == ZoneOrigin::StructuredFallback {
            self.refuse_zone_edit(zone);
            return;
        }

        let mut entries = read.entries;
        let mut changed = false;
        for entry in entries.iter_mut().filter(|e| e.name == module) {
            changed |= entry.enabled != enabled;
            entry.enabled = enabled;
        }
        if changed {
            info!(module = %module, zone = %zone, enabled, "toggled module");
            self.config = write_zone(&self.config, zone.field(), &entries);
        }
    }

    /// All affected zones are rewritten, or none is
    fn assign_zone(&mut self, module: &str, target: Option<Zone>) {
        let mut writes = Vec::new();
        for (zone, read) in self.zone_reads() {
            let mut entries = read.entries.clone();

            if Some(zone) == target {
                match entries.iter_mut().find(|e| e.name == module) {
                    Some(entry) => entry.enabled = true,
                    None => entries.push(ZoneEntry::enabled(module)),
                }
            } else {
                entries.retain(|e| e.name != module);
            }

            if entries != read.entries {
                writes.push((zone, read.origin, entries));
            }
        }

        let refused: Vec<Zone> = writes
            .iter()
            .filter(|(_, origin, _)| *origin == ZoneOrigin::StructuredFallback)
            .map(|(zone, _, _)| *zone)
            .collect();
        if !refused.is_empty() {
            for zone in refused {
                self.refuse_zone_edit(zone);
            }
            return;
        }

        for (zone, _, entries) in writes {
            debug!(module = %module, zone = %zone, "rewriting zone");
            self.config = write_zone(&self.config, zone.field(), &entries);
        }
    }

    fn refuse_zone_edit(&mut self, zone: Zone) {
        warn!(zone = %zone, "zone was not read from its literal, refusing to rewrite it");
        self.notices.push(Notice::ZoneReadOnly { zone });
    }

    /// Whether a save would change either document on disk
    pub fn differs_from(&self, config: &str, stylesheet: &str) -> bool {
        self.config != config || self.stylesheet != stylesheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::ModuleStyle;
    use crate::stylesheet::{find_block, get_property};
    use crate::zones::parse_relaxed;
    use pretty_assertions::assert_eq;

    const CONFIG: &str = r#"{
  "layer": "top",
  "modules-left": [
    "hyprland/workspaces",
    // "custom/weather",
    "cpu"
  ],
  "modules-center": [
    "clock#date"
  ],
  "modules-right": [
    "memory"
  ]
}
"#;

    const SHEET: &str = "\
#workspaces { background-color: rgba(10,25,47,0.85); border-radius: 14px; }
#workspaces button { background-color: rgba(10,25,47,0.85); border-radius: 6px; color: #ffffff; }
#workspaces button.active { background-color: rgba(255,179,71,0.95); border-radius: 6px; }

#cpu {
  background-color: rgba(1, 2, 3, 0.40);
  border-radius: 4px;
  color: #eeeeee;
}

#memory {
  color: #dddddd;
}

#custom-power {
  color: #ff0000;
}
";

    fn session() -> Session {
        Session::load(CONFIG, SHEET)
    }

    fn plain(view: &SessionView, module: &str) -> ModuleStyle {
        match &view.row(module).unwrap().style {
            StyleRow::Plain(style) => style.clone(),
            StyleRow::Workspaces(_) => panic!("expected plain style for {module}"),
        }
    }

    #[test]
    fn test_load_empty_documents_degrades_gracefully() {
        let session = Session::load("", "");
        let view = session.view();
        assert!(view.rows.is_empty());
        assert!(view.others.is_empty());
        assert!(view.zones.iter().all(|(_, entries)| entries.is_empty()));
        assert!(session.notices().is_empty());
    }

    #[test]
    fn test_view_rows_cover_zones_then_others() {
        let view = session().view();
        let rows: Vec<(&str, Option<Zone>, bool)> = view
            .rows
            .iter()
            .map(|row| (row.name.as_str(), row.zone, row.enabled))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("hyprland/workspaces", Some(Zone::Left), true),
                ("custom/weather", Some(Zone::Left), false),
                ("cpu", Some(Zone::Left), true),
                ("clock#date", Some(Zone::Center), true),
                ("memory", Some(Zone::Right), true),
                ("custom/power", None, true),
            ]
        );
        assert_eq!(view.others, vec!["custom/power"]);
        assert!(matches!(
            view.row("hyprland/workspaces").unwrap().style,
            StyleRow::Workspaces(_)
        ));
    }

    #[test]
    fn test_load_flags_structured_zone_fallback() {
        let config = "{ \"modules\\u002dleft\": [\"cpu\"] }";
        let session = Session::load(config, "");
        assert_eq!(session.notices(), &[Notice::ZoneFallback { zone: Zone::Left }]);
        assert!(session.view().row("cpu").unwrap().enabled);
    }

    #[test]
    fn test_fallback_zone_is_not_rewritten() {
        let config = "{ \"modules\\u002dleft\": [\"cpu\", \"memory\"] }";
        let session = Session::load(config, "").without_notices();

        let toggled = session.apply(Edit::SetEnabled {
            module: "cpu".to_string(),
            enabled: false,
        });
        assert_eq!(toggled.config_text(), config);
        assert_eq!(toggled.notices(), &[Notice::ZoneReadOnly { zone: Zone::Left }]);

        let moved = session.apply(Edit::AssignZone {
            module: "cpu".to_string(),
            zone: Some(Zone::Right),
        });
        assert_eq!(moved.config_text(), config);
        assert_eq!(moved.notices(), &[Notice::ZoneReadOnly { zone: Zone::Left }]);

        // Zones that do not need the fallback one can still be edited
        let added = session.apply(Edit::AssignZone {
            module: "tray".to_string(),
            zone: Some(Zone::Right),
        });
        assert!(added.notices().is_empty());
        assert_eq!(added.zone_entries(Zone::Right), vec![ZoneEntry::enabled("tray")]);
        assert_eq!(
            added.zone_entries(Zone::Left),
            vec![ZoneEntry::enabled("cpu"), ZoneEntry::enabled("memory")]
        );
        let parsed = parse_relaxed(added.config_text()).unwrap();
        assert_eq!(parsed["modules-left"], serde_json::json!(["cpu", "memory"]));
    }

    #[test]
    fn test_set_enabled_rewrites_only_that_zone() {
        let next = session().apply(Edit::SetEnabled {
            module: "cpu".to_string(),
            enabled: false,
        });
        let expected = CONFIG.replace("    \"cpu\"\n", "    // \"cpu\"\n");
        assert_eq!(next.config_text(), expected);

        let back = next.apply(Edit::SetEnabled {
            module: "cpu".to_string(),
            enabled: true,
        });
        assert_eq!(back.config_text(), CONFIG);
    }

    #[test]
    fn test_set_enabled_unknown_module_notice() {
        let next = session().apply(Edit::SetEnabled {
            module: "custom/power".to_string(),
            enabled: false,
        });
        assert_eq!(next.config_text(), CONFIG);
        assert_eq!(
            next.notices(),
            &[Notice::UnknownModule {
                module: "custom/power".to_string()
            }]
        );
    }

    #[test]
    fn test_assign_zone_moves_and_keeps_single_membership() {
        let next = session().apply(Edit::AssignZone {
            module: "cpu".to_string(),
            zone: Some(Zone::Right),
        });
        assert_eq!(next.zone_of("cpu"), Some(Zone::Right));
        assert_eq!(
            next.zone_entries(Zone::Left),
            vec![
                ZoneEntry::enabled("hyprland/workspaces"),
                ZoneEntry::disabled("custom/weather"),
            ]
        );
        assert_eq!(
            next.zone_entries(Zone::Right),
            vec![ZoneEntry::enabled("memory"), ZoneEntry::enabled("cpu")]
        );
        // Untouched zone keeps its bytes
        assert!(next.config_text().contains("\"modules-center\": [\n    \"clock#date\"\n  ]"));
    }

    #[test]
    fn test_assign_zone_reenables_in_place_and_removes() {
        let enabled = session().apply(Edit::AssignZone {
            module: "custom/weather".to_string(),
            zone: Some(Zone::Left),
        });
        assert_eq!(
            enabled.zone_entries(Zone::Left),
            vec![
                ZoneEntry::enabled("hyprland/workspaces"),
                ZoneEntry::enabled("custom/weather"),
                ZoneEntry::enabled("cpu"),
            ]
        );

        let removed = enabled.apply(Edit::AssignZone {
            module: "custom/weather".to_string(),
            zone: None,
        });
        assert_eq!(removed.zone_of("custom/weather"), None);
        assert_eq!(removed.config_text(), CONFIG.replace("    // \"custom/weather\",\n", ""));
    }

    #[test]
    fn test_assign_zone_into_missing_field() {
        let next = Session::load("{\n  \"layer\": \"top\"\n}\n", "").apply(Edit::AssignZone {
            module: "tray".to_string(),
            zone: Some(Zone::Right),
        });
        assert_eq!(
            next.config_text(),
            "{\n  \"modules-right\": [\n    \"tray\"\n  ],\n  \"layer\": \"top\"\n}\n"
        );
    }

    #[test]
    fn test_set_background_creates_and_updates_block() {
        let next = session().apply(Edit::SetBackground {
            target: StyleTarget::module("clock#date"),
            hex: "#ABC".to_string(),
            opacity_percent: 70,
        });
        assert!(next.stylesheet_text().starts_with(SHEET));
        assert_eq!(
            get_property(next.stylesheet_text(), "#clock", "background-color").as_deref(),
            Some("rgba(170, 187, 204, 0.70)")
        );
        let style = plain(&next.view(), "clock#date");
        assert_eq!(style.fill, Fill::new("#aabbcc", 70, 14));
    }

    #[test]
    fn test_set_opacity_keeps_background() {
        let next = session().apply(Edit::SetOpacity {
            target: StyleTarget::module("cpu"),
            opacity_percent: 90,
        });
        assert_eq!(
            get_property(next.stylesheet_text(), "#cpu", "background-color").as_deref(),
            Some("rgba(1, 2, 3, 0.90)")
        );
    }

    #[test]
    fn test_invalid_color_edit_is_ignored_with_notice() {
        let next = session().apply(Edit::SetTextColor {
            target: StyleTarget::module("cpu"),
            hex: "blue".to_string(),
        });
        assert_eq!(next.stylesheet_text(), SHEET);
        assert_eq!(
            next.notices(),
            &[Notice::InvalidColor {
                input: "blue".to_string()
            }]
        );
        assert!(next.without_notices().notices().is_empty());
    }

    #[test]
    fn test_workspace_roles_edit_their_own_selectors() {
        let next = session()
            .apply(Edit::SetRadius {
                target: StyleTarget::Workspaces(WorkspaceRole::Active),
                radius_px: 9,
            })
            .apply(Edit::SetTextColor {
                target: StyleTarget::Workspaces(WorkspaceRole::Container),
                hex: "#000000".to_string(),
            });

        let css = next.stylesheet_text();
        assert_eq!(get_property(css, "#workspaces button.active", "border-radius").as_deref(), Some("9px"));
        assert_eq!(get_property(css, "#workspaces button", "border-radius").as_deref(), Some("6px"));
        assert_eq!(get_property(css, "#workspaces button", "color").as_deref(), Some("#000000"));
        assert_eq!(get_property(css, "#workspaces", "color"), None);
    }

    #[test]
    fn test_apply_to_all_from_workspaces_container() {
        let start = Session::load(CONFIG, SHEET).apply(Edit::SetBackground {
            target: StyleTarget::Workspaces(WorkspaceRole::Container),
            hex: "#112233".to_string(),
            opacity_percent: 50,
        });
        let start = start.apply(Edit::SetRadius {
            target: StyleTarget::Workspaces(WorkspaceRole::Container),
            radius_px: 10,
        });
        let workspace_blocks: Vec<String> = WorkspaceRole::ALL
            .into_iter()
            .map(|role| {
                let block = find_block(start.stylesheet_text(), role.selector()).unwrap();
                start.stylesheet_text()[block.start..block.end].to_string()
            })
            .collect();

        let next = start.apply(Edit::ApplyToAll {
            source: StyleTarget::Workspaces(WorkspaceRole::Container),
        });
        let view = next.view();

        for module in ["cpu", "memory", "clock#date", "custom/power", "custom/weather"] {
            assert_eq!(plain(&view, module).fill, Fill::new("#112233", 50, 10), "{module}");
        }
        assert_eq!(plain(&view, "cpu").text, "#eeeeee");
        assert_eq!(plain(&view, "memory").text, "#dddddd");
        assert_eq!(plain(&view, "custom/power").text, "#ff0000");

        for (role, before) in WorkspaceRole::ALL.into_iter().zip(&workspace_blocks) {
            let block = find_block(next.stylesheet_text(), role.selector()).unwrap();
            assert_eq!(&next.stylesheet_text()[block.start..block.end], before.as_str());
        }
    }

    #[test]
    fn test_apply_to_all_from_plain_module_skips_workspaces() {
        let next = session().apply(Edit::ApplyToAll {
            source: StyleTarget::module("cpu"),
        });
        let view = next.view();
        assert_eq!(plain(&view, "memory").fill, Fill::new("#010203", 40, 4));
        assert_eq!(
            get_property(next.stylesheet_text(), "#workspaces", "border-radius").as_deref(),
            Some("14px")
        );
    }

    #[test]
    fn test_replace_stylesheet_and_reload() {
        let themed = session().apply(Edit::ReplaceStylesheet("#cpu { color: #123456; }\n".to_string()));
        assert_eq!(plain(&themed.view(), "cpu").text, "#123456");
        assert_eq!(themed.config_text(), CONFIG);

        let reloaded = themed.apply(Edit::Reload {
            config: String::new(),
            stylesheet: String::new(),
        });
        assert_eq!(reloaded, Session::default());
    }

    #[test]
    fn test_untouched_modules_keep_their_bytes() {
        let next = session().apply(Edit::SetRadius {
            target: StyleTarget::module("memory"),
            radius_px: 3,
        });
        let original = find_block(SHEET, "#cpu").unwrap();
        let after = find_block(next.stylesheet_text(), "#cpu").unwrap();
        assert_eq!(
            &next.stylesheet_text()[after.start..after.end],
            &SHEET[original.start..original.end]
        );
        assert!(next.differs_from(CONFIG, SHEET));
        assert!(!session().differs_from(CONFIG, SHEET));
    }
}
