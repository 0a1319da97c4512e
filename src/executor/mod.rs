//! Build script execution
//!
//! Runs a resolved build command through a shell with inherited stdio,
//! blocking until the child exits.

pub mod runner;

pub use runner::*;
