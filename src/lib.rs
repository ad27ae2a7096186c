//! Core of a configurator for the waybar status bar
//!
//! Edits the bar's JSON-with-comments config and its stylesheet as text,
//! touching only the parts an edit addresses so hand-written comments and
//! formatting survive.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod notice;
pub mod persistence;
pub mod reconcile;
pub mod selector;
pub mod session;
pub mod stylesheet;
pub mod themes;
pub mod zones;

pub use error::{ColorError, ContractError};
pub use notice::Notice;
pub use session::{Edit, Session, SessionView};
