//! Domain models
//!
//! The service exposes a single entity. Input is accepted as given:
//! no field-level validation happens beyond JSON type coercion.

pub mod cake;

pub use cake::{Cake, CakeInput};
