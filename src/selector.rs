//! Mapping between module identifiers and stylesheet selector ids

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::modules::{
    COMPOSITOR_IDS, COMPOSITOR_PREFIX, CUSTOM_PREFIX, CUSTOM_SELECTOR_PREFIX, VARIANT_SEPARATOR,
};

/// A single-identifier selector opening a block at the start of a line
static ID_SELECTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*#([A-Za-z0-9_-]+)\s*\{").expect("id selector pattern is valid")
});

/// Selector identifier (without `#`) styling `module`.
///
/// Lossy: `clock#date` and `clock` share `clock`, `hyprland/window` is `window`.
pub fn module_to_selector(module: &str) -> String {
    let base = module
        .split_once(VARIANT_SEPARATOR)
        .map_or(module, |(base, _)| base);

    if base.starts_with(CUSTOM_PREFIX) {
        return base.replace('/', "-");
    }
    if let Some(rest) = base.strip_prefix(COMPOSITOR_PREFIX) {
        return rest.to_string();
    }
    base.to_string()
}

/// Full `#id` selector for `module`
pub fn module_selector(module: &str) -> String {
    format!("#{}", module_to_selector(module))
}

/// Best-effort inverse of [`module_to_selector`] for a bare selector id
pub fn selector_to_module(id: &str) -> String {
    if let Some(rest) = id.strip_prefix(CUSTOM_SELECTOR_PREFIX) {
        return format!("{CUSTOM_PREFIX}{rest}");
    }
    if COMPOSITOR_IDS.contains(&id) {
        return format!("{COMPOSITOR_PREFIX}{id}");
    }
    id.to_string()
}

/// Module ids for every top-level `#id {` block, deduplicated and sorted by id
pub fn extract_selector_ids(stylesheet: &str) -> Vec<String> {
    let ids: BTreeSet<&str> = ID_SELECTOR
        .captures_iter(stylesheet)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    ids.into_iter().map(selector_to_module).collect()
}

/// Styled modules that no zone declares, in [`extract_selector_ids`] order
pub fn undeclared_modules<'a, I>(stylesheet: &str, declared: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let declared: BTreeSet<&str> = declared.into_iter().collect();
    extract_selector_ids(stylesheet)
        .into_iter()
        .filter(|module| !declared.contains(module.as_str()))
        .collect()
}
