pub mod common;
pub mod meal_analysis;
