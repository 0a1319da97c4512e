//! Settings module for detox-cli
//!
//! Layered settings for the tool itself (shell, manifest location, server
//! defaults). Distinct from the project manifest, which lives in `manifest`.

pub mod loader;
pub mod model;

pub use loader::{find_settings_files, load_settings};
pub use model::*;
