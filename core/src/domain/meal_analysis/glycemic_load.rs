use tracing::debug;

use crate::domain::{
    common::round2,
    meal_analysis::{
        entities::{GlycemicLoadResult, NormalizedDetection, NutritionFact},
        ports::NutritionLookup,
    },
};

/// GL of one portion: `gi * (carbs_per_100g * portion / 100) / 100`.
///
/// Left unrounded; only the meal total is rounded.
pub fn item_glycemic_load(fact: &NutritionFact, portion_grams: f64) -> f64 {
    let total_carbs = fact.carbs_per_100g * portion_grams / 100.0;
    fact.glycemic_index * total_carbs / 100.0
}

pub struct GlycemicLoadCalculator<'a, N: NutritionLookup> {
    lookup: &'a N,
    portion_grams: f64,
}

impl<'a, N: NutritionLookup> GlycemicLoadCalculator<'a, N> {
    pub fn new(lookup: &'a N, portion_grams: f64) -> Self {
        Self {
            lookup,
            portion_grams,
        }
    }

    /// Foods missing from the nutrition table contribute nothing and are left
    /// out of the breakdown.
    pub fn calculate(&self, items: &[NormalizedDetection]) -> GlycemicLoadResult {
        let mut result = GlycemicLoadResult::default();
        let mut sum = 0.0;

        for item in items {
            let Some(fact) = self.lookup.fact(&item.canonical_name) else {
                debug!(food = %item.canonical_name, "no nutrition record, skipping");
                continue;
            };

            let gl = item_glycemic_load(&fact, self.portion_grams);
            sum += gl;
            result.per_item.insert(item.canonical_name.clone(), gl);
        }

        result.total = round2(sum);
        result
    }
}
