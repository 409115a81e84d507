// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DeployError, Result};
use crate::fs::FileSystem;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(fs, &path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the effective configuration for a run.
///
/// - An explicit path must exist.
/// - Without one, `Minideploy.toml` under `root` is used if present, and the
///   built-in defaults otherwise.
pub fn resolve_config(
    fs: &dyn FileSystem,
    root: &Path,
    explicit: Option<&Path>,
) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        if !fs.exists(path) {
            return Err(DeployError::ConfigError(format!(
                "config file {:?} does not exist",
                path
            )));
        }
        return load_and_validate(fs, path);
    }

    let default_path = root.join(default_config_path());
    if fs.is_file(&default_path) {
        debug!(path = ?default_path, "loading default config file");
        load_and_validate(fs, &default_path)
    } else {
        debug!("no config file found, using built-in defaults");
        Ok(ConfigFile::default())
    }
}

/// File name looked up in the working directory when `--config` is absent.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Minideploy.toml")
}
