//! Project manifest handling
//!
//! Reads the `detox` section of a project's `package.json` and resolves
//! which configuration's `build` script to run.

pub mod model;
pub mod resolve;

pub use model::*;
pub use resolve::ResolvedBuild;
