use thiserror::Error;

use crate::calculations::FormulaError;
use crate::validation::ValidationErrors;

/// Anything that blocks a calculation. Every variant is recoverable by
/// correcting the input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("cannot calculate: {0}")]
    Formula(#[from] FormulaError),
}
