pub mod analyze_detections;
pub mod analyze_meal;
