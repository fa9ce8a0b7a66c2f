//! Inventory configuration.
//!
//! An inventory file lists the segments and natural classes of a project:
//!
//! ```yaml
//! segments: [p, t, k, a, i, ts]
//! classes: [C, V, "C 1"]
//! ```
//!
//! YAML is the default; a `.json` file is read as JSON with the same shape.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::symbols::{SymbolInventory, ValidationContext};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventoryConfig {
    #[serde(default)]
    pub segments: Vec<String>,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl InventoryConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads an inventory file, choosing JSON or YAML by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_yaml_str(&source)
        }
    }

    /// A fresh validation context over this inventory.
    pub fn to_context(&self) -> ValidationContext {
        let mut ctx = ValidationContext::new();
        ctx.reset_from(self);
        ctx
    }
}

impl SymbolInventory for InventoryConfig {
    fn segments(&self) -> Vec<String> {
        self.segments.clone()
    }

    fn classes(&self) -> Vec<String> {
        self.classes.clone()
    }
}
