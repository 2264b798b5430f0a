//! Profit formula at a known sale price.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Cost base: CFun + CMVun |
//! | 2    | Cost ratio: Step 1 / PV |
//! | 3    | Profit ratio: 1 - OCV - Step 2 |
//! | 4    | Variable costs: PV × OCV |
//! | 5    | Profit amount: PV - Step 1 - Step 4 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pricing_core::calculations::{CostStructure, ProfitFormula};
//!
//! let formula = ProfitFormula::new(CostStructure {
//!     cfun: dec!(9000),
//!     cmvun: dec!(5000),
//!     ocv: dec!(0.10),
//! });
//!
//! let result = formula.calculate(dec!(20000)).unwrap();
//!
//! assert_eq!(result.profit_ratio, dec!(0.20));
//! assert_eq!(result.profit_amount, dec!(4000));
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::FormulaError;
use crate::calculations::cost_structure::{CostStructure, check_sale_price};
use crate::models::ProfitResult;

/// Solves `L = 1 - OCV - (CFun + CMVun) / PV` and the matching profit amount.
#[derive(Debug, Clone)]
pub struct ProfitFormula {
    costs: CostStructure,
}

impl ProfitFormula {
    pub fn new(costs: CostStructure) -> Self {
        Self { costs }
    }

    /// Calculates the realized profit ratio and amount at `sale_price`.
    ///
    /// A negative profit is a valid result (selling at a loss) and is only
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError`] if the cost structure is invalid or
    /// `sale_price` is not positive.
    pub fn calculate(
        &self,
        sale_price: Decimal,
    ) -> Result<ProfitResult, FormulaError> {
        self.costs.validate()?;
        check_sale_price(sale_price)?;

        let cost_base = self.costs.cost_base()?;
        let cost_ratio = cost_base
            .checked_div(sale_price)
            .ok_or(FormulaError::Overflow("cost ratio"))?;
        let profit_ratio = (Decimal::ONE - self.costs.ocv)
            .checked_sub(cost_ratio)
            .ok_or(FormulaError::Overflow("profit ratio"))?;

        let variable_costs = sale_price
            .checked_mul(self.costs.ocv)
            .ok_or(FormulaError::Overflow("variable costs"))?;
        let profit_amount = sale_price
            .checked_sub(cost_base)
            .and_then(|v| v.checked_sub(variable_costs))
            .ok_or(FormulaError::Overflow("profit amount"))?;

        if profit_amount < Decimal::ZERO {
            warn!(
                sale_price = %sale_price,
                cost_base = %cost_base,
                profit_amount = %profit_amount,
                "Sale price does not cover costs"
            );
        }

        Ok(ProfitResult {
            sale_price,
            cost_base,
            cost_ratio,
            profit_ratio,
            variable_costs,
            profit_amount,
        })
    }
}
