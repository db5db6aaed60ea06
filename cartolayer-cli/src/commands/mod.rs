//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`check`] - Fetch and decode every layer without composing
//! - [`compose`] - Compose the map and print the layer stack
//! - [`config`] - Configuration management (path, show, init)
//! - [`hover`] - Resolve the feature under a position

pub mod check;
pub mod common;
pub mod compose;
pub mod config;
pub mod hover;
