use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FormulaError;
use super::common::is_ratio;
use crate::models::PricingInputs;

/// Unit costs shared by every pricing formula.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::calculations::{CostStructure, FormulaError};
///
/// let costs = CostStructure {
///     cfun: dec!(9000),
///     cmvun: dec!(5000),
///     ocv: dec!(1.2),
/// };
///
/// assert_eq!(
///     costs.validate(),
///     Err(FormulaError::RatioOutOfRange { name: "OCV", value: dec!(1.2) })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostStructure {
    /// Fixed cost per unit (CFun).
    pub cfun: Decimal,

    /// Cost of goods sold per unit (CMVun).
    pub cmvun: Decimal,

    /// Other variable costs as a fraction of the sale price (OCV).
    pub ocv: Decimal,
}

impl CostStructure {
    pub fn from_inputs(inputs: &PricingInputs) -> Self {
        Self {
            cfun: inputs.cfun,
            cmvun: inputs.cmvun,
            ocv: inputs.ocv,
        }
    }

    /// CFun + CMVun.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError::Overflow`] when the sum leaves the `Decimal` range.
    pub fn cost_base(&self) -> Result<Decimal, FormulaError> {
        self.cfun
            .checked_add(self.cmvun)
            .ok_or(FormulaError::Overflow("cost base"))
    }

    /// Validates the cost values.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError`] if:
    /// - `cfun` or `cmvun` is negative
    /// - `ocv` is not in [0, 1]
    pub fn validate(&self) -> Result<(), FormulaError> {
        if self.cfun < Decimal::ZERO {
            return Err(FormulaError::NegativeCost {
                name: "CFun",
                value: self.cfun,
            });
        }
        if self.cmvun < Decimal::ZERO {
            return Err(FormulaError::NegativeCost {
                name: "CMVun",
                value: self.cmvun,
            });
        }
        check_ratio("OCV", self.ocv)
    }
}

pub(super) fn check_ratio(
    name: &'static str,
    value: Decimal,
) -> Result<(), FormulaError> {
    if is_ratio(value) {
        Ok(())
    } else {
        Err(FormulaError::RatioOutOfRange { name, value })
    }
}

pub(super) fn check_sale_price(value: Decimal) -> Result<(), FormulaError> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(FormulaError::NonPositiveSalePrice(value))
    }
}
