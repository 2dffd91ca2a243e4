//! YAML recipe files.
//!
//! A recipe is an ordered list of pipeline steps:
//!
//! ```yaml
//! steps:
//!   - op: resize
//!     scale: 2
//!   - op: contrast
//!     factor: 1.2
//!   - op: tone_curve
//!     curves: [[0, 0], [128, 200], [255, 255]]
//! ```

use anyhow::{Context, Result};
use pixtune_ops::{Pipeline, Step};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parsed recipe file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    /// Steps in execution order
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Recipe {
    /// Reads and parses a recipe file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid recipe: {}", path.display()))
    }

    /// Parses recipe YAML.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Builds a pipeline running the recipe's steps.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::from_steps(self.steps.clone())
    }
}
