use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CalculationMode;

/// Outcome of a sale price calculation.
///
/// Values are kept at full precision; rounding is a presentation concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalePriceResult {
    /// Desired profit ratio (L) the price was solved for.
    pub profit_ratio: Decimal,

    /// CFun + CMVun.
    pub cost_base: Decimal,

    /// 1 - (OCV + L).
    pub denominator: Decimal,

    /// Full sale price: cost_base / denominator.
    pub sale_price: Decimal,

    /// 1 - OCV.
    pub break_even_denominator: Decimal,

    /// Sale price with zero profit: cost_base / break_even_denominator.
    pub break_even_price: Decimal,
}

/// Outcome of a profit calculation at a known sale price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitResult {
    /// Sale price (PV) the profit was measured at.
    pub sale_price: Decimal,

    /// CFun + CMVun.
    pub cost_base: Decimal,

    /// cost_base / PV.
    pub cost_ratio: Decimal,

    /// L = 1 - OCV - cost_ratio.
    pub profit_ratio: Decimal,

    /// PV × OCV.
    pub variable_costs: Decimal,

    /// PV - CFun - CMVun - PV × OCV.
    pub profit_amount: Decimal,
}

/// Outcome of a profit calculation after a discount on the sale price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountedProfitResult {
    /// Undiscounted sale price (PV).
    pub sale_price: Decimal,

    /// Discount ratio applied to PV.
    pub discount: Decimal,

    /// CFun + CMVun.
    pub cost_base: Decimal,

    /// 1 - Discount.
    pub discount_factor: Decimal,

    /// PV' = PV × (1 - Discount).
    pub discounted_price: Decimal,

    /// OCV × PV'.
    pub variable_costs: Decimal,

    /// PV' - CFun - CMVun - OCV × PV'.
    pub profit_amount: Decimal,

    /// profit_amount / PV, measured against the undiscounted price.
    pub profit_ratio: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum PricingResult {
    SalePrice(SalePriceResult),
    Profit(ProfitResult),
    DiscountedProfit(DiscountedProfitResult),
}

impl PricingResult {
    pub fn mode(&self) -> CalculationMode {
        match self {
            Self::SalePrice(_) => CalculationMode::SalePrice,
            Self::Profit(_) => CalculationMode::Profit,
            Self::DiscountedProfit(_) => CalculationMode::DiscountedProfit,
        }
    }
}
