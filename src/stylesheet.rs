//! Selector-scoped property editing for the bar stylesheet
//!
//! Only flat `selector { property: value; }` blocks are understood. Every
//! edit is a single splice into the original text, so bytes outside the
//! touched declaration (other blocks, comments, whitespace) are never
//! rewritten.

use std::ops::Range;

use tracing::debug;

use crate::constants::css::DEFAULT_DECLARATION_INDENT;

/// Location of a selector block inside a stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorBlock {
    /// Offset of the first byte of the selector
    pub start: usize,
    /// Offset just past the closing `}`
    pub end: usize,
    /// Range of the text between `{` and `}`
    pub inner: Range<usize>,
}

impl SelectorBlock {
    pub fn inner_text<'a>(&self, doc: &'a str) -> &'a str {
        &doc[self.inner.clone()]
    }
}

/// One `property: value;` declaration, offsets absolute in the document
#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    name: Range<usize>,
    /// Trimmed value, without the terminating `;`
    value: Range<usize>,
}

/// Find the first block whose selector starts a line and is followed by `{`.
///
/// Blocks end at the first `}` after `{`; nesting is not supported.
pub fn find_block(doc: &str, selector: &str) -> Option<SelectorBlock> {
    let selector = selector.trim();
    if selector.is_empty() {
        return None;
    }

    for line_start in line_starts(doc) {
        let start = skip_inline_whitespace(doc, line_start);
        if !doc[start..].starts_with(selector) {
            continue;
        }

        let after_selector = start + selector.len();
        let open = skip_whitespace(doc, after_selector);
        if doc.as_bytes().get(open) != Some(&b'{') {
            continue;
        }

        let Some(close) = doc[open + 1..].find('}').map(|i| open + 1 + i) else {
            debug!(selector = %selector, "selector block is never closed");
            return None;
        };

        return Some(SelectorBlock {
            start,
            end: close + 1,
            inner: open + 1..close,
        });
    }

    None
}

/// Read a property's trimmed value inside `selector`'s block
pub fn get_property(doc: &str, selector: &str, property: &str) -> Option<String> {
    let block = find_block(doc, selector)?;
    let decl = find_declaration(doc, &block, property)?;
    Some(doc[decl.value].to_string())
}

/// Set `property` inside `selector`'s block, creating either as needed.
///
/// Values must not contain `;`, `{` or `}`.
pub fn set_property(doc: &str, selector: &str, property: &str, value: &str) -> String {
    debug_assert!(
        !value.contains([';', '{', '}']),
        "stylesheet value {value:?} would break the block structure"
    );
    let selector = selector.trim();
    let property = property.trim();
    let value = value.trim();

    let Some(block) = find_block(doc, selector) else {
        debug!(selector = %selector, property = %property, "appending new selector block");
        return append_block(doc, selector, property, value);
    };

    if let Some(decl) = find_declaration(doc, &block, property) {
        return splice(doc, decl.value, value);
    }

    debug!(selector = %selector, property = %property, "adding declaration to existing block");
    insert_declaration(doc, &block, property, value)
}

fn append_block(doc: &str, selector: &str, property: &str, value: &str) -> String {
    let mut out = String::with_capacity(doc.len() + selector.len() + property.len() + value.len() + 16);
    out.push_str(doc);
    if !doc.is_empty() {
        if !doc.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "{selector} {{\n{DEFAULT_DECLARATION_INDENT}{property}: {value};\n}}\n"
    ));
    out
}

fn insert_declaration(doc: &str, block: &SelectorBlock, property: &str, value: &str) -> String {
    let inner = block.inner_text(doc);
    let content = inner.trim_end();
    let trailing = &inner[content.len()..];
    let at = block.inner.start + content.len();

    let indent = declaration_indent(inner);
    let mut insertion = String::new();
    if !content.trim().is_empty() && !content.ends_with(';') {
        insertion.push(';');
    }
    insertion.push('\n');
    insertion.push_str(indent);
    insertion.push_str(&format!("{property}: {value};"));
    if !trailing.contains('\n') {
        insertion.push('\n');
    }

    splice(doc, at..at, &insertion)
}

/// Indentation of the first declaration that sits on its own line
fn declaration_indent(inner: &str) -> &str {
    inner
        .split('\n')
        .skip(1)
        .find(|line| !line.trim().is_empty())
        .map(|line| &line[..line.len() - line.trim_start().len()])
        .filter(|indent| !indent.is_empty())
        .unwrap_or(DEFAULT_DECLARATION_INDENT)
}

fn find_declaration(doc: &str, block: &SelectorBlock, property: &str) -> Option<Declaration> {
    let property = property.trim();
    declarations(doc, block).find(|decl| &doc[decl.name.clone()] == property)
}

/// Iterate `name: value;` declarations inside a block. A trailing segment
/// without `;` is not a declaration.
fn declarations<'a>(doc: &'a str, block: &SelectorBlock) -> impl Iterator<Item = Declaration> + 'a {
    let base = block.inner.start;
    let inner = &doc[block.inner.clone()];
    let mut offset = 0;

    std::iter::from_fn(move || {
        loop {
            let rest = &inner[offset..];
            let semi = rest.find(';')?;
            let segment_start = base + offset;
            let segment = &rest[..semi];
            offset += semi + 1;

            let Some(colon) = segment.find(':') else {
                continue;
            };
            let raw_name = &segment[..colon];
            let raw_value = &segment[colon + 1..];

            let name = trimmed_range(raw_name, segment_start);
            let value = trimmed_range(raw_value, segment_start + colon + 1);
            if name.is_empty() {
                continue;
            }
            return Some(Declaration { name, value });
        }
    })
}

/// Absolute range of `text.trim()` given where `text` starts
fn trimmed_range(text: &str, at: usize) -> Range<usize> {
    let lead = text.len() - text.trim_start().len();
    let trimmed = text.trim();
    at + lead..at + lead + trimmed.len()
}

fn splice(doc: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(doc.len() + replacement.len());
    out.push_str(&doc[..range.start]);
    out.push_str(replacement);
    out.push_str(&doc[range.end..]);
    out
}

fn line_starts(doc: &str) -> impl Iterator<Item = usize> + '_ {
    std::iter::once(0).chain(doc.match_indices('\n').map(|(i, _)| i + 1))
}

fn skip_inline_whitespace(doc: &str, from: usize) -> usize {
    from + doc[from..].len() - doc[from..].trim_start_matches([' ', '\t']).len()
}

fn skip_whitespace(doc: &str, from: usize) -> usize {
    from + doc[from..].len() - doc[from..].trim_start().len()
}
