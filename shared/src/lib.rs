//! NutriFit Shared Library
//!
//! Domain models, API types and the pure logic shared between the backend
//! and the WASM module: nutrient aggregation, the default plan catalogue and
//! allergy / health-condition substitution.

pub mod alternatives;
pub mod errors;
pub mod models;
pub mod nutrients;
pub mod plans;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::*;
pub use nutrients::{compute_trends, NutrientAverage, NutrientTrends};
pub use types::*;
