//! Pricing formula engine.
//!
//! Three closed-form formulas share one cost structure (CFun, CMVun, OCV):
//!
//! | Mode              | Solves for            | Formula                                   |
//! |-------------------|-----------------------|-------------------------------------------|
//! | Sale price        | PV                    | `PV = (CFun + CMVun) / (1 - (OCV + L))`   |
//! | Profit            | L, profit amount      | `L = 1 - OCV - (CFun + CMVun) / PV`       |
//! | Discounted profit | PV', L, profit amount | `PV' = PV × (1 - Discount)`, `L = Profit / PV` |
//!
//! Every evaluation is a pure function of its inputs. Inputs that would
//! divide by zero or by a negative denominator are rejected with a
//! [`FormulaError`] instead of producing an infinite or negative price.

pub mod common;
mod cost_structure;
mod formulas;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

pub use cost_structure::CostStructure;
pub use formulas::{DiscountedProfitFormula, ProfitFormula, SalePriceFormula};

use crate::models::{ModeInputs, PricingInputs, PricingResult};

/// Errors that can occur while evaluating a pricing formula.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormulaError {
    /// A ratio input (OCV, L, Discount) is outside `[0, 1]`.
    #[error("{name} must be between 0 and 1, got {value}")]
    RatioOutOfRange { name: &'static str, value: Decimal },

    /// A unit cost is negative.
    #[error("{name} must not be negative, got {value}")]
    NegativeCost { name: &'static str, value: Decimal },

    /// The sale price is zero or negative, so no ratio can be taken against it.
    #[error("sale price must be positive, got {0}")]
    NonPositiveSalePrice(Decimal),

    /// `1 - (OCV + L)` is zero or negative; no finite positive price exists.
    #[error(
        "OCV + L must be below 1 (OCV = {ocv}, L = {profit_ratio}, denominator = {denominator})"
    )]
    NonPositiveDenominator {
        ocv: Decimal,
        profit_ratio: Decimal,
        denominator: Decimal,
    },

    /// An intermediate value does not fit the decimal range.
    #[error("calculation overflowed while computing {0}")]
    Overflow(&'static str),
}

/// Evaluates the formula selected by the inputs' mode.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::calculations::{common::round_half_up, evaluate};
/// use pricing_core::{ModeInputs, PricingInputs, PricingResult};
///
/// let inputs = PricingInputs {
///     cfun: dec!(9000),
///     cmvun: dec!(5000),
///     ocv: dec!(0.10),
///     target: ModeInputs::SalePrice { profit_ratio: dec!(0.15) },
/// };
///
/// let PricingResult::SalePrice(result) = evaluate(&inputs).unwrap() else {
///     unreachable!()
/// };
/// assert_eq!(round_half_up(result.sale_price), dec!(18666.67));
/// ```
pub fn evaluate(inputs: &PricingInputs) -> Result<PricingResult, FormulaError> {
    let costs = CostStructure::from_inputs(inputs);
    debug!(mode = %inputs.mode(), cfun = %costs.cfun, cmvun = %costs.cmvun, ocv = %costs.ocv, "evaluating pricing formula");

    let result = match inputs.target {
        ModeInputs::SalePrice { profit_ratio } => {
            PricingResult::SalePrice(SalePriceFormula::new(costs).calculate(profit_ratio)?)
        }
        ModeInputs::Profit { sale_price } => {
            PricingResult::Profit(ProfitFormula::new(costs).calculate(sale_price)?)
        }
        ModeInputs::DiscountedProfit {
            sale_price,
            discount,
        } => PricingResult::DiscountedProfit(
            DiscountedProfitFormula::new(costs).calculate(sale_price, discount)?,
        ),
    };

    Ok(result)
}
