pub mod label_aliases;
pub mod table;

pub use label_aliases::load_label_aliases;
pub use table::NutritionTable;
