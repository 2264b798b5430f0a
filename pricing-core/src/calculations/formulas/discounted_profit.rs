//! Profit after a discount on the sale price.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Discount factor: 1 - Discount |
//! | 2    | Discounted price PV': PV × Step 1 |
//! | 3    | Variable costs: OCV × PV' |
//! | 4    | Profit amount: PV' - CFun - CMVun - Step 3 |
//! | 5    | Profit ratio: Step 4 / PV |
//!
//! The profit ratio in Step 5 is taken against the undiscounted price PV,
//! not PV'.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::FormulaError;
use crate::calculations::cost_structure::{CostStructure, check_ratio, check_sale_price};
use crate::models::DiscountedProfitResult;

/// Applies a discount to PV, then computes profit on the discounted price.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::calculations::{CostStructure, DiscountedProfitFormula};
///
/// let formula = DiscountedProfitFormula::new(CostStructure {
///     cfun: dec!(9000),
///     cmvun: dec!(5000),
///     ocv: dec!(0.10),
/// });
///
/// let result = formula.calculate(dec!(20000), dec!(0.10)).unwrap();
///
/// // PV' = 18000; profit = 18000 - 14000 - 1800 = 2200; L = 2200 / 20000
/// assert_eq!(result.discounted_price, dec!(18000));
/// assert_eq!(result.profit_amount, dec!(2200));
/// assert_eq!(result.profit_ratio, dec!(0.11));
/// ```
#[derive(Debug, Clone)]
pub struct DiscountedProfitFormula {
    costs: CostStructure,
}

impl DiscountedProfitFormula {
    pub fn new(costs: CostStructure) -> Self {
        Self { costs }
    }

    /// Calculates the discounted price and the profit it leaves.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError`] if the cost structure is invalid, `sale_price`
    /// is not positive, or `discount` is not in [0, 1].
    pub fn calculate(
        &self,
        sale_price: Decimal,
        discount: Decimal,
    ) -> Result<DiscountedProfitResult, FormulaError> {
        self.costs.validate()?;
        check_sale_price(sale_price)?;
        check_ratio("Discount", discount)?;

        let cost_base = self.costs.cost_base()?;
        let discount_factor = Decimal::ONE - discount;
        let discounted_price = sale_price
            .checked_mul(discount_factor)
            .ok_or(FormulaError::Overflow("discounted price"))?;

        let variable_costs = self
            .costs
            .ocv
            .checked_mul(discounted_price)
            .ok_or(FormulaError::Overflow("variable costs"))?;
        let profit_amount = discounted_price
            .checked_sub(cost_base)
            .and_then(|v| v.checked_sub(variable_costs))
            .ok_or(FormulaError::Overflow("profit amount"))?;

        let profit_ratio = profit_amount
            .checked_div(sale_price)
            .ok_or(FormulaError::Overflow("profit ratio"))?;

        if profit_amount < Decimal::ZERO {
            warn!(
                sale_price = %sale_price,
                discount = %discount,
                discounted_price = %discounted_price,
                profit_amount = %profit_amount,
                "Discounted price does not cover costs"
            );
        }

        Ok(DiscountedProfitResult {
            sale_price,
            discount,
            cost_base,
            discount_factor,
            discounted_price,
            variable_costs,
            profit_amount,
            profit_ratio,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::ProfitFormula;

    fn costs() -> CostStructure {
        CostStructure {
            cfun: dec!(9000),
            cmvun: dec!(5000),
            ocv: dec!(0.10),
        }
    }

    #[test]
    fn zero_discount_matches_plain_profit() {
        let discounted = DiscountedProfitFormula::new(costs())
            .calculate(dec!(20000), dec!(0))
            .unwrap();
        let plain = ProfitFormula::new(costs()).calculate(dec!(20000)).unwrap();

        assert_eq!(discounted.discounted_price, dec!(20000));
        assert_eq!(discounted.profit_amount, plain.profit_amount);
        assert_eq!(discounted.profit_ratio, plain.profit_ratio);
    }

    #[test]
    fn ratio_is_relative_to_original_price() {
        let result = DiscountedProfitFormula::new(costs())
            .calculate(dec!(20000), dec!(0.05))
            .unwrap();

        // PV' = 19000; profit = 19000 - 14000 - 1900 = 3100
        assert_eq!(result.discounted_price, dec!(19000));
        assert_eq!(result.profit_amount, dec!(3100));
        assert_eq!(result.profit_ratio, dec!(0.155));
        assert_ne!(result.profit_ratio, dec!(3100) / dec!(19000));
    }

    #[test]
    fn full_discount_loses_the_cost_base() {
        let result = DiscountedProfitFormula::new(costs())
            .calculate(dec!(20000), dec!(1))
            .unwrap();

        assert_eq!(result.discounted_price, dec!(0));
        assert_eq!(result.profit_amount, dec!(-14000));
        assert_eq!(result.profit_ratio, dec!(-0.7));
    }

    #[test]
    fn rejects_discount_out_of_range() {
        let result = DiscountedProfitFormula::new(costs()).calculate(dec!(20000), dec!(1.5));

        assert_eq!(
            result,
            Err(FormulaError::RatioOutOfRange {
                name: "Discount",
                value: dec!(1.5)
            })
        );
    }

    #[test]
    fn rejects_zero_sale_price() {
        let result = DiscountedProfitFormula::new(costs()).calculate(dec!(0), dec!(0.1));

        assert_eq!(result, Err(FormulaError::NonPositiveSalePrice(dec!(0))));
    }

    #[test]
    fn rejects_cost_base_beyond_decimal_range() {
        let result = DiscountedProfitFormula::new(CostStructure {
            cmvun: Decimal::MAX,
            ..costs()
        })
        .calculate(dec!(20000), dec!(0.05));

        assert_eq!(result, Err(FormulaError::Overflow("cost base")));
    }
}
