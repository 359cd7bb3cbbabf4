use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, instrument};

use crate::domain::{
    common::entities::app_errors::CoreError, meal_analysis::ports::NutritionLookup,
};

static EMBEDDED_TABLE: &str = include_str!("data/nutrition_table.json");

/// On-disk format: two independent tables keyed by canonical food name.
#[derive(Debug, Deserialize)]
struct NutritionTableFile {
    gi: HashMap<String, f64>,
    carbs_per_100g: HashMap<String, f64>,
}

/// In-memory nutrition reference, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct NutritionTable {
    gi: HashMap<String, f64>,
    carbs_per_100g: HashMap<String, f64>,
}

impl NutritionTable {
    pub fn new(gi: HashMap<String, f64>, carbs_per_100g: HashMap<String, f64>) -> Self {
        Self { gi, carbs_per_100g }
    }

    pub fn embedded() -> Result<Self, CoreError> {
        Self::from_json(EMBEDDED_TABLE)
    }

    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let file: NutritionTableFile = serde_json::from_str(raw)
            .map_err(|e| CoreError::NutritionTable(format!("invalid nutrition table: {}", e)))?;

        let invalid = file
            .gi
            .iter()
            .chain(file.carbs_per_100g.iter())
            .find(|(_, value)| !value.is_finite() || **value < 0.0);
        if let Some((name, value)) = invalid {
            return Err(CoreError::NutritionTable(format!(
                "invalid value {} for {}",
                value, name
            )));
        }

        Ok(Self::new(file.gi, file.carbs_per_100g))
    }

    #[instrument]
    pub async fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            CoreError::NutritionTable(format!("cannot read {}: {}", path.display(), e))
        })?;

        let table = Self::from_json(&raw)?;
        info!(foods = table.len(), "Nutrition table loaded");
        Ok(table)
    }

    /// Number of foods with a glycemic index entry.
    pub fn len(&self) -> usize {
        self.gi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gi.is_empty()
    }
}

impl NutritionLookup for NutritionTable {
    fn glycemic_index(&self, canonical_name: &str) -> Option<f64> {
        self.gi.get(canonical_name).copied()
    }

    fn carbs_per_100g(&self, canonical_name: &str) -> Option<f64> {
        self.carbs_per_100g.get(canonical_name).copied()
    }
}
