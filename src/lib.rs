//! # ConfigMe
//!
//! Scaffolding utility that creates, validates and removes configuration
//! assets (files) and the locations (folders) holding them.
//!
//! ## Features
//!
//! - Location checks with descriptive errors
//! - Folder creation and removal with translated OS errors
//! - Asset writing guarded against overwriting existing files
//! - Script argument parsing with `KEY:VALUE` variable folding
//!
//! ## Example
//!
//! ```no_run
//! use configme::core::AssetManager;
//!
//! let manager = AssetManager::new();
//! let folder = manager.create_folder("out")?;
//! let asset = manager.asset_or_location_exists(folder.join("app.env"))?;
//! manager.write_to_file(&asset, "name=configme\n")?;
//! # Ok::<(), configme::error::ConfigmeError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
