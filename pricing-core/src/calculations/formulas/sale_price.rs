//! Sale price formula.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Cost base: CFun + CMVun |
//! | 2    | Denominator: 1 - (OCV + L) |
//! | 3    | Full sale price: Step 1 / Step 2 |
//! | 4    | Break-even denominator: 1 - OCV |
//! | 5    | Break-even sale price: Step 1 / Step 4 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pricing_core::calculations::{CostStructure, SalePriceFormula};
//!
//! let formula = SalePriceFormula::new(CostStructure {
//!     cfun: dec!(9000),
//!     cmvun: dec!(5000),
//!     ocv: dec!(0.10),
//! });
//!
//! let result = formula.calculate(dec!(0.30)).unwrap();
//!
//! // 14000 / (1 - 0.40) = 23333.33...
//! assert_eq!(result.denominator, dec!(0.60));
//! assert_eq!(result.break_even_denominator, dec!(0.90));
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::FormulaError;
use crate::calculations::cost_structure::{CostStructure, check_ratio};
use crate::models::SalePriceResult;

/// Solves `PV = (CFun + CMVun) / (1 - (OCV + L))`.
#[derive(Debug, Clone)]
pub struct SalePriceFormula {
    costs: CostStructure,
}

impl SalePriceFormula {
    pub fn new(costs: CostStructure) -> Self {
        Self { costs }
    }

    /// Calculates the full and break-even sale prices for the desired profit ratio.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError`] if:
    /// - the cost structure is invalid
    /// - `profit_ratio` is not in [0, 1]
    /// - `OCV + L >= 1`, which leaves no positive denominator
    pub fn calculate(
        &self,
        profit_ratio: Decimal,
    ) -> Result<SalePriceResult, FormulaError> {
        self.costs.validate()?;
        check_ratio("L", profit_ratio)?;

        let cost_base = self.costs.cost_base()?;

        let denominator = self.denominator(profit_ratio)?;
        let sale_price = self.price(cost_base, denominator, "sale price")?;

        // Break-even is the same formula with L = 0
        let break_even_denominator = self.denominator(Decimal::ZERO)?;
        let break_even_price = self.price(cost_base, break_even_denominator, "break-even price")?;

        Ok(SalePriceResult {
            profit_ratio,
            cost_base,
            denominator,
            sale_price,
            break_even_denominator,
            break_even_price,
        })
    }

    /// 1 - (OCV + L), rejected when zero or negative.
    fn denominator(
        &self,
        profit_ratio: Decimal,
    ) -> Result<Decimal, FormulaError> {
        let denominator = Decimal::ONE - (self.costs.ocv + profit_ratio);
        if denominator <= Decimal::ZERO {
            warn!(
                ocv = %self.costs.ocv,
                profit_ratio = %profit_ratio,
                denominator = %denominator,
                "OCV + L leaves no positive denominator"
            );
            return Err(FormulaError::NonPositiveDenominator {
                ocv: self.costs.ocv,
                profit_ratio,
                denominator,
            });
        }
        Ok(denominator)
    }

    fn price(
        &self,
        cost_base: Decimal,
        denominator: Decimal,
        what: &'static str,
    ) -> Result<Decimal, FormulaError> {
        cost_base
            .checked_div(denominator)
            .ok_or(FormulaError::Overflow(what))
    }
}
