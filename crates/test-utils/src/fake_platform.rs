use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use minideploy::errors::{DeployError, Result};
use minideploy::platform::Platform;

/// Scripted [`Platform`] that counts how often it is consulted.
#[derive(Debug, Clone, Default)]
pub struct FakePlatform {
    pub model: Option<String>,
    pub elevated: bool,
    pub relaunch_fails: bool,
    model_queries: Arc<AtomicUsize>,
    relaunches: Arc<AtomicUsize>,
}

impl FakePlatform {
    /// An elevated machine reporting `model`.
    pub fn with_model(model: &str) -> Self {
        Self {
            model: Some(model.to_string()),
            elevated: true,
            ..Self::default()
        }
    }

    pub fn elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    pub fn relaunch_fails(mut self) -> Self {
        self.relaunch_fails = true;
        self
    }

    pub fn model_queries(&self) -> usize {
        self.model_queries.load(Ordering::SeqCst)
    }

    pub fn relaunches(&self) -> usize {
        self.relaunches.load(Ordering::SeqCst)
    }
}

impl Platform for FakePlatform {
    fn query_machine_model(&self) -> Option<String> {
        self.model_queries.fetch_add(1, Ordering::SeqCst);
        self.model.clone()
    }

    fn is_elevated(&self) -> bool {
        self.elevated
    }

    fn relaunch_elevated(&self) -> Result<()> {
        if self.relaunch_fails {
            return Err(DeployError::Elevation("scripted failure".to_string()));
        }
        self.relaunches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
