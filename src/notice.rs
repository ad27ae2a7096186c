//! Non-fatal notices raised when a fallback is taken
//!
//! Hand-edited documents often hold values the editor cannot interpret. The
//! core never fails on them; it substitutes a default and records why, so
//! the front end can explain a value the user did not expect.

use std::fmt;
use std::path::PathBuf;

use crate::zones::Zone;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A stylesheet value exists but could not be interpreted
    UnreadableValue {
        selector: String,
        property: String,
        value: String,
        fallback: String,
    },
    /// A zone was read from the whole-document parse, so disabled entries
    /// could not be told apart and all read as enabled
    ZoneFallback { zone: Zone },
    /// A zone edit was refused because the zone came from the
    /// whole-document parse and its literal cannot be rewritten in place
    ZoneReadOnly { zone: Zone },
    /// An edit carried a malformed color and was not applied
    InvalidColor { input: String },
    /// A document could not be read and was treated as empty
    DocumentUnreadable { path: PathBuf, reason: String },
    /// An edit named a module that is not declared or styled
    UnknownModule { module: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::UnreadableValue {
                selector,
                property,
                value,
                fallback,
            } => write!(
                f,
                "{selector} {{ {property}: {value} }} is not understood, showing {fallback}"
            ),
            Notice::ZoneFallback { zone } => write!(
                f,
                "{zone} zone could not be read line by line; disabled entries show as enabled"
            ),
            Notice::ZoneReadOnly { zone } => write!(
                f,
                "{zone} zone is not laid out as a plain array, edit ignored; fix it by hand"
            ),
            Notice::InvalidColor { input } => {
                write!(f, "{input:?} is not a #rgb or #rrggbb color, edit ignored")
            }
            Notice::DocumentUnreadable { path, reason } => {
                write!(f, "could not read {} ({reason}), treating it as empty", path.display())
            }
            Notice::UnknownModule { module } => {
                write!(f, "module {module:?} is not declared in any zone nor styled")
            }
        }
    }
}
