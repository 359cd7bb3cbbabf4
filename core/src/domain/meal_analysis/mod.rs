pub mod deduplication;
pub mod entities;
pub mod glycemic_load;
pub mod normalizer;
pub mod ports;
pub mod recommendation;
pub mod services;
pub mod trajectory;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;
