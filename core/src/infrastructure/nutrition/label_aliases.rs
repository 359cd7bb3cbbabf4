use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::domain::common::entities::app_errors::CoreError;

/// Reads a flat JSON object of detector label to canonical food name.
pub async fn load_label_aliases(path: &Path) -> Result<HashMap<String, String>, CoreError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        CoreError::NutritionTable(format!("cannot read {}: {}", path.display(), e))
    })?;

    let aliases: HashMap<String, String> = serde_json::from_str(&raw)
        .map_err(|e| CoreError::NutritionTable(format!("invalid label aliases: {}", e)))?;

    info!(aliases = aliases.len(), path = %path.display(), "Label aliases loaded");
    Ok(aliases)
}
