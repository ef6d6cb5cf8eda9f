//! Configuration management for configme
//!
//! Centralizes configuration options and provides validation.

use crate::{
    cli::{fold_pairs_into_mapping, Args, ArgumentMapping, Command},
    core::CreationPolicy,
    error::ConfigmeError,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// How folder creation failures are treated
    pub creation_policy: CreationPolicy,
    /// Asset generation configuration
    pub generate: GenerateConfig,
    /// Location the check and remove commands operate on
    pub location: LocationConfig,
}

/// Asset generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Folder the asset is written into
    pub output_folder: PathBuf,
    /// File name of the asset
    pub asset_name: String,
    /// Variables written into the asset, in first-seen order
    pub variables: ArgumentMapping,
    /// Remove the output folder first
    pub clean: bool,
    /// Folder that has to exist before generating
    pub template_folder: Option<PathBuf>,
}

/// Location configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Folder path
    pub path: PathBuf,
    /// Label used in error messages
    pub subject: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            creation_policy: CreationPolicy::Strict,
            generate: GenerateConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_folder: PathBuf::from("."),
            asset_name: "settings.env".to_string(),
            variables: ArgumentMapping::new(),
            clean: false,
            template_folder: None,
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            subject: "location".to_string(),
        }
    }
}

impl Config {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Result<Self, ConfigmeError> {
        let mut config = Self {
            debug: args.debug,
            creation_policy: if args.lenient_create {
                CreationPolicy::Lenient
            } else {
                CreationPolicy::Strict
            },
            ..Self::default()
        };

        // Override with command-specific options
        match &args.command {
            Command::Generate {
                output_folder,
                asset,
                vars,
                clean,
                template_folder,
            } => {
                config.generate = GenerateConfig {
                    output_folder: output_folder.clone(),
                    asset_name: asset.clone(),
                    variables: fold_pairs_into_mapping(vars.iter().cloned()),
                    clean: *clean,
                    template_folder: template_folder.clone(),
                };
            }
            Command::Check { location, subject } => {
                config.location = LocationConfig {
                    path: location.clone(),
                    subject: subject.clone(),
                };
            }
            Command::Remove { location } => {
                config.location.path = location.clone();
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigmeError> {
        if self.generate.output_folder.as_os_str().is_empty() {
            return Err(ConfigmeError::config("Output folder must not be empty"));
        }

        if self.generate.asset_name.trim().is_empty() {
            return Err(ConfigmeError::config("Asset name must not be empty"));
        }

        if self.location.path.as_os_str().is_empty() {
            return Err(ConfigmeError::config("Location must not be empty"));
        }

        if self.location.subject.trim().is_empty() {
            return Err(ConfigmeError::config("Location subject must not be empty"));
        }

        Ok(())
    }
}
