use bytes::Bytes;

use crate::domain::meal_analysis::entities::{Detection, GlucoseWindow};

pub const GLUCOSE_WINDOW_LEN: usize = 3;
pub const FORECAST_INTERVAL_MINUTES: u32 = 15;
/// 3 hours at 15 minute resolution.
pub const DEFAULT_FORECAST_STEPS: usize = 12;
pub const DEFAULT_PORTION_GRAMS: f64 = 200.0;

#[derive(Debug, Clone)]
pub struct AnalyzeMealInput {
    pub image_data: Bytes,
    pub recent_glucose: GlucoseWindow,
}

#[derive(Debug, Clone)]
pub struct AnalyzeDetectionsInput {
    pub detections: Vec<Detection>,
    pub recent_glucose: GlucoseWindow,
}

/// One row per window reading, each paired with the meal's glycemic load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastInput {
    pub readings: [f64; GLUCOSE_WINDOW_LEN],
    pub glycemic_load: f64,
}

impl ForecastInput {
    pub fn new(window: GlucoseWindow, glycemic_load: f64) -> Self {
        Self {
            readings: window.readings(),
            glycemic_load,
        }
    }

    pub fn rows(&self) -> [[f64; 2]; GLUCOSE_WINDOW_LEN] {
        self.readings.map(|reading| [reading, self.glycemic_load])
    }
}
