//! Zone module lists in the bar's JSON-with-comments config
//!
//! Zone arrays hold one quoted module name per line. A line starting with
//! `//` keeps the entry in place but disables it:
//!
//! ```text
//! "modules-left": [
//!     "hyprland/workspaces",
//!     // "custom/weather",
//!     "clock"
//! ],
//! ```
//!
//! Reads and writes only ever touch the `[...]` literal of the requested
//! field. The rest of the document is passed through byte for byte.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde_json::Value;
use tracing::{debug, warn};

use crate::constants::zones::{
    CENTER_FIELD, DEFAULT_CLOSE_INDENT, DEFAULT_ENTRY_INDENT, DISABLED_MARKER, FIELD_INDENT,
    LEFT_FIELD, RIGHT_FIELD,
};
use crate::error::ContractError;

/// One of the three horizontal regions of the bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    Left,
    Center,
    Right,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Left, Zone::Center, Zone::Right];

    /// Config field holding this zone's array
    pub fn field(self) -> &'static str {
        match self {
            Zone::Left => LEFT_FIELD,
            Zone::Center => CENTER_FIELD,
            Zone::Right => RIGHT_FIELD,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Zone::Left => "left",
            Zone::Center => "center",
            Zone::Right => "right",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Zone {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::ALL
            .into_iter()
            .find(|zone| zone.name().eq_ignore_ascii_case(s.trim()) || zone.field() == s.trim())
            .ok_or_else(|| ContractError::UnknownZone(s.to_string()))
    }
}

/// A module declared in a zone array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneEntry {
    pub name: String,
    pub enabled: bool,
}

impl ZoneEntry {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
        }
    }

    pub fn enabled(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn disabled(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }
}

/// Where the entries of a zone came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneOrigin {
    /// Read line by line from the array literal, disabled flags intact
    Literal,
    /// Taken from a whole-document parse; disabled entries are lost and
    /// every entry reads as enabled
    StructuredFallback,
    /// The field does not exist in the document
    Missing,
}

/// Result of reading one zone field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRead {
    pub entries: Vec<ZoneEntry>,
    pub origin: ZoneOrigin,
}

/// Read the entries of `field`, keeping commented-out entries as disabled.
pub fn read_zone(config: &str, field: &str) -> ZoneRead {
    let structured = || structured_entries(config, field);

    if let Some(span) = find_array(config, field) {
        let entries = parse_entries(&config[span.inner()]);
        if !entries.is_empty() {
            return ZoneRead {
                entries,
                origin: ZoneOrigin::Literal,
            };
        }

        if let Some(names) = structured().filter(|names| !names.is_empty()) {
            warn!(field = %field, count = names.len(), "zone array unreadable line by line, using parsed entries (disabled flags lost)");
            return ZoneRead {
                entries: names.into_iter().map(ZoneEntry::enabled).collect(),
                origin: ZoneOrigin::StructuredFallback,
            };
        }

        return ZoneRead {
            entries,
            origin: ZoneOrigin::Literal,
        };
    }

    match structured() {
        Some(names) => {
            warn!(field = %field, count = names.len(), "zone array literal not found, using parsed entries (disabled flags lost)");
            ZoneRead {
                entries: names.into_iter().map(ZoneEntry::enabled).collect(),
                origin: ZoneOrigin::StructuredFallback,
            }
        }
        None => {
            debug!(field = %field, "zone field missing");
            ZoneRead {
                entries: Vec::new(),
                origin: ZoneOrigin::Missing,
            }
        }
    }
}

/// Replace the array literal of `field` with `entries`, or insert the field
/// at the start of the top-level object when it does not exist yet.
pub fn write_zone(config: &str, field: &str, entries: &[ZoneEntry]) -> String {
    if let Some(span) = find_array(config, field) {
        let inner = &config[span.inner()];
        if parse_entries(inner) == entries {
            debug!(field = %field, "zone entries unchanged, keeping literal");
            return config.to_string();
        }
        let (entry_indent, close_indent) = literal_indents(inner);
        let mut rendered = render_array(entries, entry_indent, close_indent);
        if keeps_trailing_comma(inner, entries) {
            let close = rendered.len() - close_indent.len() - 2;
            rendered.insert(close, ',');
        }
        return splice(config, span.open..span.close + 1, &rendered);
    }

    let key = quote(field);
    let entry_indent = format!("{FIELD_INDENT}{FIELD_INDENT}");
    let rendered = render_array(entries, &entry_indent, FIELD_INDENT);

    match first_object_open(config) {
        Some(open) => {
            let rest = config[open + 1..].trim_start();
            let insertion = if rest.starts_with('}') {
                format!("\n{FIELD_INDENT}{key}: {rendered}\n")
            } else {
                format!("\n{FIELD_INDENT}{key}: {rendered},")
            };
            debug!(field = %field, "inserting zone field into config");
            splice(config, open + 1..open + 1, &insertion)
        }
        None => {
            debug!(field = %field, "config has no object, appending one");
            let mut out = config.to_string();
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&format!("{{\n{FIELD_INDENT}{key}: {rendered}\n}}\n"));
            out
        }
    }
}

fn render_array(entries: &[ZoneEntry], entry_indent: &str, close_indent: &str) -> String {
    if entries.is_empty() {
        return "[]".to_string();
    }

    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            if entry.enabled {
                format!("{entry_indent}{}", quote(&entry.name))
            } else {
                format!("{entry_indent}{DISABLED_MARKER} {}", quote(&entry.name))
            }
        })
        .collect();

    format!("[\n{}\n{close_indent}]", lines.join(",\n"))
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

/// A real trailing comma is kept. A comma ending a commented-out last line
/// is kept only while the last entry stays disabled, so it never becomes a
/// real one.
fn keeps_trailing_comma(inner: &str, entries: &[ZoneEntry]) -> bool {
    let Some(last) = entries.last() else {
        return false;
    };
    has_trailing_comma(inner) || (!last.enabled && inner.trim_end().ends_with(','))
}

/// Whether the last significant token of an array's inner text is a comma
fn has_trailing_comma(inner: &str) -> bool {
    let bytes = inner.as_bytes();
    let mut last = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = skip_line_comment(inner, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(inner, i),
            b'"' => {
                last = Some(b'"');
                i = read_string(inner, i).1;
            }
            b if b.is_ascii_whitespace() => i += 1,
            b => {
                last = Some(b);
                i += 1;
            }
        }
    }
    last == Some(b',')
}

/// Indentation of the first entry line and of the closing bracket
fn literal_indents(inner: &str) -> (&str, &str) {
    let entry = inner
        .split('\n')
        .skip(1)
        .find(|line| !line.trim().is_empty())
        .map(|line| &line[..line.len() - line.trim_start().len()])
        .unwrap_or(DEFAULT_ENTRY_INDENT);

    let close = inner
        .rsplit_once('\n')
        .map(|(_, tail)| tail)
        .filter(|tail| tail.trim().is_empty())
        .unwrap_or(DEFAULT_CLOSE_INDENT);

    (entry, close)
}

/// Entries of an array literal's inner text, one line at a time
fn parse_entries(inner: &str) -> Vec<ZoneEntry> {
    inner.lines().flat_map(parse_line).collect()
}

fn parse_line(line: &str) -> Vec<ZoneEntry> {
    let bytes = line.as_bytes();
    let mut entries = Vec::new();
    let mut commented = false;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'/') {
            commented = true;
            i += DISABLED_MARKER.len();
        } else if bytes[i] == b'"' {
            let (name, next) = read_string(line, i);
            if !name.is_empty() {
                entries.push(ZoneEntry::new(name, !commented));
            }
            i = next;
        } else {
            i += 1;
        }
    }

    if entries.is_empty() {
        let mut bare = line.trim();
        let mut enabled = true;
        if let Some(rest) = bare.strip_prefix(DISABLED_MARKER) {
            bare = rest.trim();
            enabled = false;
        }
        let bare = bare.trim_end_matches(',').trim();
        if !bare.is_empty() && !bare.contains(char::is_whitespace) && !bare.contains('"') {
            entries.push(ZoneEntry::new(bare, enabled));
        }
    }

    entries
}

/// Read a quoted string starting at `start` (the opening quote). Returns
/// the unescaped content and the offset past the closing quote.
fn read_string(text: &str, start: usize) -> (String, usize) {
    let mut out = String::new();
    let mut chars = text[start + 1..].char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return (out, start + 1 + i + 1),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, escaped)) => out.push(escaped),
                None => break,
            },
            c => out.push(c),
        }
    }

    (out, text.len())
}

/// Byte offsets of an array literal bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ArraySpan {
    open: usize,
    close: usize,
}

impl ArraySpan {
    fn inner(self) -> Range<usize> {
        self.open + 1..self.close
    }
}

/// Locate `"field": [ ... ]`, ignoring keys inside comments. The literal
/// ends at the first `]` outside a quoted string or comment.
fn find_array(text: &str, field: &str) -> Option<ArraySpan> {
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = skip_line_comment(text, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(text, i),
            b'"' => {
                let (key, next) = read_string(text, i);
                i = next;
                if key != field {
                    continue;
                }
                let colon = skip_whitespace(text, next);
                if bytes.get(colon) != Some(&b':') {
                    continue;
                }
                let open = skip_whitespace(text, colon + 1);
                if bytes.get(open) != Some(&b'[') {
                    continue;
                }
                let close = find_array_close(text, open)?;
                return Some(ArraySpan { open, close });
            }
            _ => i += 1,
        }
    }

    None
}

/// First `]` after `open` outside strings and comments
fn find_array_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = skip_line_comment(text, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(text, i),
            b'"' => i = read_string(text, i).1,
            b']' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// First `{` that is not inside a comment or string
fn first_object_open(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = skip_line_comment(text, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(text, i),
            b'"' => i = read_string(text, i).1,
            b'{' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn skip_line_comment(text: &str, from: usize) -> usize {
    text[from..].find('\n').map_or(text.len(), |i| from + i)
}

fn skip_block_comment(text: &str, from: usize) -> usize {
    text[from + 2..].find("*/").map_or(text.len(), |i| from + 2 + i + 2)
}

fn skip_whitespace(text: &str, from: usize) -> usize {
    from + text[from..].len() - text[from..].trim_start().len()
}

fn splice(text: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..range.start]);
    out.push_str(replacement);
    out.push_str(&text[range.end..]);
    out
}

/// Strip comments and trailing commas so `serde_json` accepts the document
fn to_strict_json(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = skip_line_comment(text, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(text, i),
            b'"' => {
                let next = read_string(text, i).1;
                out.push_str(&text[i..next]);
                i = next;
            }
            b',' => {
                let after = skip_insignificant(text, i + 1);
                if !matches!(bytes.get(after), Some(b']') | Some(b'}')) {
                    out.push(',');
                }
                i += 1;
            }
            _ => {
                let ch_len = text[i..].chars().next().map_or(1, char::len_utf8);
                out.push_str(&text[i..i + ch_len]);
                i += ch_len;
            }
        }
    }

    out
}

/// Skip whitespace and comments
fn skip_insignificant(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = from;
    loop {
        i = skip_whitespace(text, i);
        match (bytes.get(i), bytes.get(i + 1)) {
            (Some(b'/'), Some(b'/')) => i = skip_line_comment(text, i),
            (Some(b'/'), Some(b'*')) => i = skip_block_comment(text, i),
            _ => return i,
        }
    }
}

/// Best-effort whole-document parse. A top-level array of bars yields its
/// first object.
pub fn parse_relaxed(config: &str) -> Option<Value> {
    if config.trim().is_empty() {
        return None;
    }
    let value: Value = match serde_json::from_str(&to_strict_json(config)) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "config is not parseable as relaxed JSON");
            return None;
        }
    };

    match value {
        Value::Array(bars) => bars.into_iter().find(Value::is_object),
        other => Some(other),
    }
}

fn structured_entries(config: &str, field: &str) -> Option<Vec<String>> {
    let document = parse_relaxed(config)?;
    let array = document.get(field)?.as_array()?;
    Some(
        array
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const CONFIG: &str = r#"// Waybar config
{
  "layer": "top", // keep on top
  "modules-left": [
    "a",
    // "b",
    "c"
  ],
  "modules-center": [],
  /* "modules-right": ["ignored"], */
  "modules-right": [
    "tray",
    "custom/power"
  ],
  "clock": { "format": "{:%H:%M}" }
}
"#;

    #[test]
    fn test_zone_from_str() {
        assert_eq!("left".parse::<Zone>(), Ok(Zone::Left));
        assert_eq!("Center".parse::<Zone>(), Ok(Zone::Center));
        assert_eq!("modules-right".parse::<Zone>(), Ok(Zone::Right));
        assert_eq!(
            "top".parse::<Zone>(),
            Err(ContractError::UnknownZone("top".to_string()))
        );
    }

    #[test]
    fn test_read_zone_keeps_disabled_entries_in_order() {
        let read = read_zone(CONFIG, "modules-left");
        assert_eq!(read.origin, ZoneOrigin::Literal);
        assert_eq!(
            read.entries,
            vec![
                ZoneEntry::enabled("a"),
                ZoneEntry::disabled("b"),
                ZoneEntry::enabled("c"),
            ]
        );
    }

    #[test]
    fn test_read_zone_skips_commented_out_key() {
        let read = read_zone(CONFIG, "modules-right");
        assert_eq!(
            read.entries,
            vec![ZoneEntry::enabled("tray"), ZoneEntry::enabled("custom/power")]
        );
    }

    #[test]
    fn test_read_zone_empty_literal() {
        let read = read_zone(CONFIG, "modules-center");
        assert_eq!(read.origin, ZoneOrigin::Literal);
        assert!(read.entries.is_empty());
    }

    #[test]
    fn test_read_zone_missing_field_and_empty_document() {
        assert_eq!(read_zone(CONFIG, "modules-extra").origin, ZoneOrigin::Missing);
        let empty = read_zone("", "modules-left");
        assert_eq!(empty.origin, ZoneOrigin::Missing);
        assert!(empty.entries.is_empty());
    }

    #[test]
    fn test_read_zone_inline_array() {
        let config = r#"{ "modules-left": ["cpu", "memory"], "modules-right": ["clock" /* x */, /* "y", */ "tray"] }"#;
        assert_eq!(
            read_zone(config, "modules-left").entries,
            vec![ZoneEntry::enabled("cpu"), ZoneEntry::enabled("memory")]
        );
    }

    #[test]
    fn test_read_zone_trailing_comment_disables_rest_of_line() {
        let config = "{\n  \"modules-left\": [\n    \"cpu\", // \"memory\",\n    //\"battery\"\n  ]\n}";
        assert_eq!(
            read_zone(config, "modules-left").entries,
            vec![
                ZoneEntry::enabled("cpu"),
                ZoneEntry::disabled("memory"),
                ZoneEntry::disabled("battery"),
            ]
        );
    }

    #[test]
    fn test_read_zone_structured_fallback_for_unusual_layout() {
        // Key escaped so the literal scan does not recognize it
        let config = "{ \"modules\\u002dleft\": [\"cpu\"] }";
        let read = read_zone(config, "modules-left");
        assert_eq!(read.origin, ZoneOrigin::StructuredFallback);
        assert_eq!(read.entries, vec![ZoneEntry::enabled("cpu")]);
    }

    #[test]
    fn test_write_zone_noop_roundtrip_is_identity() {
        for zone in Zone::ALL {
            let read = read_zone(CONFIG, zone.field());
            assert_eq!(write_zone(CONFIG, zone.field(), &read.entries), CONFIG);
        }
    }

    #[test]
    fn test_write_zone_disabled_roundtrip() {
        let entries = vec![
            ZoneEntry::enabled("a"),
            ZoneEntry::disabled("b"),
            ZoneEntry::enabled("c"),
        ];
        let written = write_zone("{\n  \"modules-left\": []\n}\n", "modules-left", &entries);
        assert_eq!(
            written,
            "{\n  \"modules-left\": [\n    \"a\",\n    // \"b\",\n    \"c\"\n  ]\n}\n"
        );
        assert_eq!(read_zone(&written, "modules-left").entries, entries);
    }

    #[test]
    fn test_write_zone_only_touches_the_literal() {
        let updated = write_zone(CONFIG, "modules-right", &[ZoneEntry::disabled("tray")]);
        let expected = CONFIG.replace(
            "[\n    \"tray\",\n    \"custom/power\"\n  ]",
            "[\n    // \"tray\"\n  ]",
        );
        assert_eq!(updated, expected);
    }

    #[test]
    fn test_write_zone_inserts_missing_field() {
        let config = "{\n  \"layer\": \"top\"\n}\n";
        let updated = write_zone(config, "modules-center", &[ZoneEntry::enabled("clock")]);
        assert_eq!(
            updated,
            "{\n  \"modules-center\": [\n    \"clock\"\n  ],\n  \"layer\": \"top\"\n}\n"
        );
        assert!(parse_relaxed(&updated).is_some());
    }

    #[test]
    fn test_write_zone_into_empty_object() {
        let updated = write_zone("{}", "modules-left", &[ZoneEntry::enabled("cpu")]);
        assert_eq!(updated, "{\n  \"modules-left\": [\n    \"cpu\"\n  ]\n}");
        assert!(parse_relaxed(&updated).is_some());
    }

    #[test]
    fn test_write_zone_into_empty_document() {
        let updated = write_zone("", "modules-left", &[ZoneEntry::enabled("cpu")]);
        assert_eq!(updated, "{\n  \"modules-left\": [\n    \"cpu\"\n  ]\n}\n");
        assert_eq!(read_zone(&updated, "modules-left").entries, vec![ZoneEntry::enabled("cpu")]);
    }

    #[test]
    fn test_write_zone_skips_brace_in_leading_comment() {
        let config = "// {not this}\n{\n  \"layer\": \"top\"\n}\n";
        let updated = write_zone(config, "modules-left", &[]);
        assert!(updated.starts_with("// {not this}\n{\n  \"modules-left\": [],\n"));
    }

    #[test]
    fn test_bracket_inside_comment_does_not_end_array() {
        let config = "{\n  \"modules-left\": [\n    \"a\", // needs [playerctl]\n    \"c\"\n  ],\n  \"layer\": \"top\"\n}\n";
        let read = read_zone(config, "modules-left");
        assert_eq!(read.origin, ZoneOrigin::Literal);
        assert_eq!(read.entries, vec![ZoneEntry::enabled("a"), ZoneEntry::enabled("c")]);

        let updated = write_zone(
            config,
            "modules-left",
            &[ZoneEntry::enabled("a"), ZoneEntry::disabled("c")],
        );
        assert_eq!(
            updated,
            "{\n  \"modules-left\": [\n    \"a\",\n    // \"c\"\n  ],\n  \"layer\": \"top\"\n}\n"
        );
        assert_eq!(parse_relaxed(&updated).unwrap()["layer"], "top");
    }

    #[test]
    fn test_write_zone_keeps_trailing_comma() {
        let config = "{\n  \"modules-left\": [\n    \"a\",\n    \"b\",\n  ]\n}\n";
        let read = read_zone(config, "modules-left");
        assert_eq!(write_zone(config, "modules-left", &read.entries), config);

        let updated = write_zone(
            config,
            "modules-left",
            &[ZoneEntry::disabled("a"), ZoneEntry::enabled("b")],
        );
        assert_eq!(
            updated,
            "{\n  \"modules-left\": [\n    // \"a\",\n    \"b\",\n  ]\n}\n"
        );
    }

    #[test]
    fn test_trailing_comma_inside_comment() {
        assert!(has_trailing_comma("\n    \"a\",\n  "));
        assert!(!has_trailing_comma("\n    \"a\" // \"b\",\n  "));
        assert!(!has_trailing_comma("\n    \",\"\n  "));

        let commented = "\n    \"a\",\n    // \"b\",\n  ";
        assert!(keeps_trailing_comma(commented, &[ZoneEntry::enabled("a"), ZoneEntry::disabled("b")]));
        assert!(!keeps_trailing_comma(commented, &[ZoneEntry::enabled("a"), ZoneEntry::enabled("b")]));
    }

    #[test]
    fn test_parse_relaxed_handles_comments_and_trailing_commas() {
        let value = parse_relaxed(CONFIG).unwrap();
        assert_eq!(value["layer"], "top");
        assert_eq!(value["modules-left"], serde_json::json!(["a", "c"]));
        assert_eq!(value["clock"]["format"], "{:%H:%M}");
    }

    #[test]
    fn test_parse_relaxed_multi_bar_config() {
        let value = parse_relaxed("[ { \"modules-left\": [\"cpu\",], }, {} ]").unwrap();
        assert_eq!(value["modules-left"], serde_json::json!(["cpu"]));
    }

    #[test]
    fn test_parse_relaxed_garbage() {
        assert_eq!(parse_relaxed("not json at all"), None);
        assert_eq!(parse_relaxed("   "), None);
    }

    fn entry() -> impl Strategy<Value = ZoneEntry> {
        ("[a-z][a-z0-9_-]{0,8}(/[a-z]{1,6})?", any::<bool>())
            .prop_map(|(name, enabled)| ZoneEntry::new(name, enabled))
    }

    /// A config with `entries` laid out one per line, as hand-edited files are
    fn layout(entries: &[ZoneEntry], indent: &str, trailing_comma: bool) -> String {
        let lines: Vec<String> = entries
            .iter()
            .map(|e| {
                if e.enabled {
                    format!("{indent}\"{}\"", e.name)
                } else {
                    format!("{indent}// \"{}\"", e.name)
                }
            })
            .collect();
        let comma = if trailing_comma { "," } else { "" };
        format!(
            "{{\n  \"layer\": \"top\",\n  \"modules-left\": [\n{}{comma}\n  ],\n  \"modules-right\": []\n}}\n",
            lines.join(",\n")
        )
    }

    proptest! {
        #[test]
        fn prop_read_write_keeps_hand_layout(
            entries in prop::collection::vec(entry(), 2..6),
            wide in any::<bool>(),
            trailing_comma in any::<bool>(),
        ) {
            let indent = if wide { "    " } else { "  " };
            let config = layout(&entries, indent, trailing_comma);

            let read = read_zone(&config, "modules-left");
            prop_assert_eq!(read.origin, ZoneOrigin::Literal);
            prop_assert_eq!(&read.entries, &entries);
            prop_assert_eq!(write_zone(&config, "modules-left", &read.entries), config.clone());

            let mut toggled = entries.clone();
            toggled[0].enabled = !toggled[0].enabled;
            let once = write_zone(&config, "modules-left", &toggled);
            prop_assert_eq!(&read_zone(&once, "modules-left").entries, &toggled);
            prop_assert_eq!(write_zone(&once, "modules-left", &entries), config);
        }
    }
}
