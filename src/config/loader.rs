//! ConfigLoader: composes sources and deserializes to DoctreeConfig.

use super::sources::{defaults, environment};
use super::DoctreeConfig;
use config::{ConfigError, File};
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    /// Precedence: defaults (lowest) -> config file -> environment (highest).
    pub fn load(path: Option<&Path>) -> Result<DoctreeConfig, ConfigError> {
        let builder = defaults::builder_with_defaults()?;
        let builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
