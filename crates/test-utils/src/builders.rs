#![allow(dead_code)]

use std::path::{Path, PathBuf};

use minideploy::config::{ConfigFile, RawConfigFile};
use minideploy::fs::mock::MockFileSystem;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn global_pool(mut self, name: &str) -> Self {
        self.config.layout.global_pool = name.to_string();
        self
    }

    pub fn models_root(mut self, name: &str) -> Self {
        self.config.layout.models_root = name.to_string();
        self
    }

    pub fn wifi_profile_prefix(mut self, prefix: &str) -> Self {
        self.config.handlers.wifi_profile_prefix = prefix.to_string();
        self
    }

    pub fn virtual_machine_model(mut self, model: &str) -> Self {
        self.config.detection.virtual_machine_model = model.to_string();
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for an on-disk deployment layout inside a [`MockFileSystem`]:
///
/// ```text
/// <root>/All/<dir>/<file>
/// <root>/Models/<model>/<dir>/<file>
/// ```
pub struct LayoutBuilder {
    fs: MockFileSystem,
    root: PathBuf,
    global_pool: String,
    models_root: String,
}

impl LayoutBuilder {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let fs = MockFileSystem::new();
        fs.add_dir(root.as_ref());
        Self {
            fs,
            root: root.as_ref().to_path_buf(),
            global_pool: "All".to_string(),
            models_root: "Models".to_string(),
        }
    }

    /// Use different pool root names (must match the config under test).
    pub fn roots(mut self, global_pool: &str, models_root: &str) -> Self {
        self.global_pool = global_pool.to_string();
        self.models_root = models_root.to_string();
        self
    }

    pub fn global_dir(self, dir: &str) -> Self {
        self.fs.add_dir(self.root.join(&self.global_pool).join(dir));
        self
    }

    pub fn global_task(self, dir: &str, file: &str) -> Self {
        self.fs
            .add_file(self.root.join(&self.global_pool).join(dir).join(file), b"".to_vec());
        self
    }

    pub fn model_dir(self, model: &str, dir: &str) -> Self {
        self.fs
            .add_dir(self.root.join(&self.models_root).join(model).join(dir));
        self
    }

    pub fn model_task(self, model: &str, dir: &str, file: &str) -> Self {
        self.fs.add_file(
            self.root.join(&self.models_root).join(model).join(dir).join(file),
            b"".to_vec(),
        );
        self
    }

    /// Any other file, relative to the root.
    pub fn file(self, rel: &str) -> Self {
        self.fs.add_file(self.root.join(rel), b"".to_vec());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a global task file.
    pub fn global_path(&self, dir: &str, file: &str) -> PathBuf {
        self.root.join(&self.global_pool).join(dir).join(file)
    }

    /// Absolute path of a model task file.
    pub fn model_path(&self, model: &str, dir: &str, file: &str) -> PathBuf {
        self.root.join(&self.models_root).join(model).join(dir).join(file)
    }

    pub fn build(self) -> (MockFileSystem, PathBuf) {
        (self.fs, self.root)
    }
}
