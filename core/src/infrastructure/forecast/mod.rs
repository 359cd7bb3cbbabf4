pub mod tf_serving;

pub use tf_serving::TfServingForecaster;
