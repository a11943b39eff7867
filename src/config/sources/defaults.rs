//! Built-in defaults as the lowest-precedence source.

use crate::config::DoctreeConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Start a builder seeded with `DoctreeConfig::default()`.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&DoctreeConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}
