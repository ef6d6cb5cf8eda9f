//! Core functionality
//!
//! Contains the asset manager that creates, validates and removes assets and
//! their locations.

pub mod assets;

pub use assets::{AssetManager, CreationPolicy};
