// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [layout]
/// global_pool = "All"
/// models_root = "Models"
///
/// [handlers]
/// wifi_profile_prefix = "Wi-Fi-"
/// powershell = "powershell"
///
/// [detection]
/// virtual_machine_model = "Virtual Machine"
/// ```
///
/// All sections are optional and have the defaults shown above.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub layout: LayoutSection,

    #[serde(default)]
    pub handlers: HandlerSection,

    #[serde(default)]
    pub detection: DetectionSection,
}

/// Validated configuration. Only constructible through
/// `ConfigFile::try_from(RawConfigFile)` or [`ConfigFile::default`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub layout: LayoutSection,
    pub handlers: HandlerSection,
    pub detection: DetectionSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        layout: LayoutSection,
        handlers: HandlerSection,
        detection: DetectionSection,
    ) -> Self {
        Self {
            layout,
            handlers,
            detection,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(
            LayoutSection::default(),
            HandlerSection::default(),
            DetectionSection::default(),
        )
    }
}

/// `[layout]` section: names of the two pool roots under the working directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutSection {
    /// Directory holding task directories that run on every machine.
    #[serde(default = "default_global_pool")]
    pub global_pool: String,

    /// Directory holding one subdirectory per machine model.
    #[serde(default = "default_models_root")]
    pub models_root: String,
}

fn default_global_pool() -> String {
    "All".to_string()
}

fn default_models_root() -> String {
    "Models".to_string()
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            global_pool: default_global_pool(),
            models_root: default_models_root(),
        }
    }
}

/// `[handlers]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerSection {
    /// `xml` task files only register a wireless profile when their file
    /// name starts with this prefix.
    #[serde(default = "default_wifi_profile_prefix")]
    pub wifi_profile_prefix: String,

    /// Interpreter used for `ps1` task files.
    #[serde(default = "default_powershell")]
    pub powershell: String,
}

fn default_wifi_profile_prefix() -> String {
    "Wi-Fi-".to_string()
}

fn default_powershell() -> String {
    "powershell".to_string()
}

impl Default for HandlerSection {
    fn default() -> Self {
        Self {
            wifi_profile_prefix: default_wifi_profile_prefix(),
            powershell: default_powershell(),
        }
    }
}

/// `[detection]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionSection {
    /// Machine model string reported by hypervisors.
    #[serde(default = "default_virtual_machine_model")]
    pub virtual_machine_model: String,
}

fn default_virtual_machine_model() -> String {
    "Virtual Machine".to_string()
}

impl Default for DetectionSection {
    fn default() -> Self {
        Self {
            virtual_machine_model: default_virtual_machine_model(),
        }
    }
}
