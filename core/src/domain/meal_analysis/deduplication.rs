use std::collections::HashMap;

use crate::domain::meal_analysis::entities::NormalizedDetection;

/// Collapses repeated detections of the same food into one record.
///
/// The highest confidence wins; on equal confidence the first record seen is
/// kept. Output order is the order in which each name first appeared.
pub fn deduplicate(items: Vec<NormalizedDetection>) -> Vec<NormalizedDetection> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<NormalizedDetection> = Vec::new();

    for item in items {
        match positions.get(&item.canonical_name) {
            Some(&index) => {
                if item.confidence > unique[index].confidence {
                    unique[index] = item;
                }
            }
            None => {
                positions.insert(item.canonical_name.clone(), unique.len());
                unique.push(item);
            }
        }
    }

    unique
}
