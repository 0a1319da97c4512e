//! Standalone coordination server
//!
//! `launcher` validates the port and hands a [`ServerConfig`] to any
//! [`CoordinationServer`]; `relay` is the default implementation.

pub mod launcher;
pub mod relay;

pub use launcher::*;
pub use relay::DetoxServer;
