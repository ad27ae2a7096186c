//! Typed error variants for the style editor core.
//!
//! Malformed documents never produce these: they degrade to defaults and a
//! [`Notice`](crate::notice::Notice). These errors cover bad caller input only.

use thiserror::Error;

/// A color string that is neither 3- nor 6-digit hex.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color format: {input:?} (expected #rgb or #rrggbb)")]
    InvalidFormat { input: String },
}

/// Caller-supplied arguments that violate the core's contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// Zone identifiers are fixed: `left`, `center`, `right`.
    #[error("unknown zone {0:?} (expected left, center or right)")]
    UnknownZone(String),

    /// Workspace roles are fixed: `container`, `button`, `active`.
    #[error("unknown workspace role {0:?} (expected container, button or active)")]
    UnknownRole(String),

    /// The module is not declared in a zone, styled, or a catalog module.
    #[error("unknown module {0:?}")]
    UnknownModule(String),
}
