pub mod errors;
pub mod value_objects;
