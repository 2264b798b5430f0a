//! Pricing formula engine.
//!
//! Turns locale-formatted form text into sale prices and profit figures,
//! and renders the derivation ("memorial") behind every result.

pub mod calculations;
pub mod calculator;
pub mod error;
pub mod locale;
pub mod memorial;
pub mod models;
pub mod validation;

pub use calculator::{Calculation, calculate};
pub use error::PricingError;
pub use memorial::Memorial;
pub use models::*;
pub use validation::{Field, FieldError, RawInputs, ValidationErrors};
