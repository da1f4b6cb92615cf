//! Pipeline configuration

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::template::pipeline::ir::CompatibilityMode;

/// Options fixed for the lifetime of a compilation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    pub compatibility: CompatibilityMode,
}

impl PipelineConfig {
    pub fn new(compatibility: CompatibilityMode) -> Self {
        PipelineConfig { compatibility }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
