//! HOCON config file loading.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use hocon::HoconLoader;
use tracing::info;

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Load `path`, falling back to defaults when the file does not exist.
///
/// The file is optional: every setting has a default and secrets normally
/// arrive through the environment.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No config file at {}, using defaults and environment", path.display());
            return Ok(Config::default());
        }
        Err(source) => {
            return Err(ConfigError::IoError {
                path: path.display().to_string(),
                source,
            })
        }
    };

    parse_config(&content)
}

/// Parse HOCON text into a [`Config`].
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let parse_error = |e: hocon::Error| ConfigError::ParseError {
        message: e.to_string(),
    };

    HoconLoader::new()
        .load_str(content)
        .map_err(parse_error)?
        .resolve()
        .map_err(parse_error)
}
