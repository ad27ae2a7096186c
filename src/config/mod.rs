//! Configuration for waybar-styler
//!
//! - **paths**: where the bar documents, settings and themes live
//! - **settings**: persisted tool settings, translations and the context
//!   bundling them

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppContext, Settings, Translations};
