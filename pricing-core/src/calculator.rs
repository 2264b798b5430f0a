//! One "calculate" action: parse, validate, evaluate, present.

use serde::Serialize;
use tracing::{debug, info};

use crate::calculations::evaluate;
use crate::error::PricingError;
use crate::memorial::Memorial;
use crate::models::{CalculationMode, Currency, PricingInputs, PricingResult};
use crate::validation::RawInputs;

/// Everything produced by a successful calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calculation {
    pub inputs: PricingInputs,
    pub result: PricingResult,
    pub memorial: Memorial,
}

/// Runs a full calculation over the raw form fields.
///
/// Nothing is retained between calls; every call recomputes from `raw`.
///
/// # Errors
///
/// Returns [`PricingError::Validation`] listing every bad field, or
/// [`PricingError::Formula`] when the inputs leave no valid result
/// (e.g. `OCV + L >= 1`).
///
/// # Example
///
/// ```
/// use pricing_core::{CalculationMode, Currency, RawInputs, calculate};
///
/// let calc = calculate(CalculationMode::Profit, Currency::Real, &RawInputs::default()).unwrap();
///
/// assert_eq!(calc.memorial.headlines[0].value, "20,00%");
/// assert_eq!(calc.memorial.headlines[1].value, "R$ 4.000,00");
/// ```
pub fn calculate(
    mode: CalculationMode,
    currency: Currency,
    raw: &RawInputs,
) -> Result<Calculation, PricingError> {
    debug!(mode = %mode, currency = %currency, "calculate requested");

    let inputs = raw.validate(mode)?;
    let result = evaluate(&inputs)?;
    let memorial = Memorial::build(currency, raw, &inputs, &result);

    info!(mode = %mode, "calculation complete");
    Ok(Calculation {
        inputs,
        result,
        memorial,
    })
}
