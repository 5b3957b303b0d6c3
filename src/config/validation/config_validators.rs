//! Model list validators
//!
//! Validation for `model_list` entries and the cross-entry checks that need
//! the whole list: unique deployment IDs and alias targets.

use super::trait_def::Validate;
use crate::config::models::*;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

impl Validate for ModelEntry {
    fn validate(&self) -> Result<(), String> {
        if self.model_name.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }

        if self.litellm_params.model.trim().is_empty() {
            return Err(format!(
                "litellm_params.model cannot be empty for model {}",
                self.model_name
            ));
        }

        if let Some(id) = self.model_info.as_ref().and_then(|info| info.id.as_deref()) {
            if id.trim().is_empty() {
                return Err(format!(
                    "model_info.id cannot be empty for model {}",
                    self.model_name
                ));
            }
        }

        Ok(())
    }
}

/// Validate every entry and check that deployment IDs are unique
pub fn validate_model_list(model_list: &[ModelEntry]) -> Result<(), String> {
    debug!(entries = model_list.len(), "Validating model list");

    let mut ids = HashSet::new();
    for (index, entry) in model_list.iter().enumerate() {
        entry.validate()?;

        let id = entry.deployment_id(index);
        if !ids.insert(id.clone()) {
            return Err(format!("Duplicate deployment id: {}", id));
        }
    }

    Ok(())
}

/// Check that every alias points at a configured model group
pub fn validate_aliases(
    aliases: &BTreeMap<String, String>,
    model_list: &[ModelEntry],
) -> Result<(), String> {
    let groups: HashSet<&str> = model_list.iter().map(|e| e.model_name.as_str()).collect();

    for (alias, target) in aliases {
        if !groups.contains(target.as_str()) {
            return Err(format!(
                "Alias {} points at unknown model group {}",
                alias, target
            ));
        }
    }

    Ok(())
}
