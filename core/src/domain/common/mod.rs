use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

use crate::domain::meal_analysis::value_objects::{
    DEFAULT_FORECAST_STEPS, DEFAULT_PORTION_GRAMS,
};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct GlycoloadConfig {
    pub detector: DetectorConfig,
    pub forecast: ForecastConfig,
    pub nutrition: NutritionConfig,
    pub analysis: AnalysisSettings,
}

#[derive(Clone, Debug)]
pub struct DetectorConfig {
    pub endpoint: String,
    pub timeout: Duration,
    /// Keep only the detector classes known to be food, renamed to food labels.
    pub class_filter: bool,
}

#[derive(Clone, Debug)]
pub struct ForecastConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug, Default)]
pub struct NutritionConfig {
    /// Falls back to the embedded table when unset.
    pub table_path: Option<PathBuf>,
    pub label_aliases_path: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalysisSettings {
    pub portion_grams: f64,
    pub forecast_steps: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            portion_grams: DEFAULT_PORTION_GRAMS,
            forecast_steps: DEFAULT_FORECAST_STEPS,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}

/// Rounds to two decimal places, the precision glycemic load is reported with.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
