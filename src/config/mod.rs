//! Configuration loading, environment overrides and validation.

pub mod env;
pub mod parser;
pub mod types;
pub mod validate;

use tracing::warn;

use crate::common::error::ConfigError;

pub use parser::load_config;
pub use types::*;
pub use validate::validate_config;

/// Load the config file (if present), apply environment overrides and validate.
pub fn load_and_validate(path: &str) -> Result<Config, ConfigError> {
    let config = env::apply_env_overrides(load_config(path)?);
    validate_config(&config)?;

    for var in env::missing_secrets(&config) {
        warn!("{} is not set; dependent features will fail until it is", var);
    }

    Ok(config)
}
