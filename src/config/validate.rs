// src/config/validate.rs

use std::path::{Component, Path};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DeployError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::DeployError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.layout, raw.handlers, raw.detection))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_layout(cfg)?;
    validate_handlers(cfg)?;
    validate_detection(cfg)?;
    Ok(())
}

fn validate_layout(cfg: &RawConfigFile) -> Result<()> {
    ensure_single_component("layout.global_pool", &cfg.layout.global_pool)?;
    ensure_single_component("layout.models_root", &cfg.layout.models_root)?;

    if cfg.layout.global_pool == cfg.layout.models_root {
        return Err(DeployError::ConfigError(format!(
            "[layout].global_pool and [layout].models_root must differ (both are '{}')",
            cfg.layout.global_pool
        )));
    }
    Ok(())
}

fn validate_handlers(cfg: &RawConfigFile) -> Result<()> {
    ensure_non_empty("handlers.wifi_profile_prefix", &cfg.handlers.wifi_profile_prefix)?;
    ensure_non_empty("handlers.powershell", &cfg.handlers.powershell)?;
    Ok(())
}

fn validate_detection(cfg: &RawConfigFile) -> Result<()> {
    ensure_non_empty(
        "detection.virtual_machine_model",
        &cfg.detection.virtual_machine_model,
    )
}

fn ensure_non_empty(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DeployError::ConfigError(format!("{key} must not be empty")));
    }
    Ok(())
}

/// Pool roots are looked up directly under the working directory, so they
/// must be plain directory names.
fn ensure_single_component(key: &str, value: &str) -> Result<()> {
    ensure_non_empty(key, value)?;

    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(DeployError::ConfigError(format!(
            "{key} must be a single directory name (got '{value}')"
        ))),
    }
}
