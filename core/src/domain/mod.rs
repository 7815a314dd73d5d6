//! Domain layer containing entities and value objects of the verification flow.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::*;
pub use value_objects::*;
