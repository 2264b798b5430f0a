use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CalculationMode;

/// Validated numeric inputs for one calculation.
///
/// Currency amounts are plain amounts; `ocv` and every other ratio are
/// fractions in `[0, 1]` (10% is `0.10`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingInputs {
    /// Fixed cost per unit (CFun).
    pub cfun: Decimal,
    /// Cost of goods sold per unit (CMVun).
    pub cmvun: Decimal,
    /// Other variable costs as a ratio of the sale price (OCV).
    pub ocv: Decimal,
    /// The mode-dependent inputs.
    pub target: ModeInputs,
}

/// Inputs that only some calculation modes require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum ModeInputs {
    SalePrice {
        /// Desired profit ratio (L).
        profit_ratio: Decimal,
    },
    Profit {
        /// Known sale price (PV).
        sale_price: Decimal,
    },
    DiscountedProfit {
        /// Undiscounted sale price (PV).
        sale_price: Decimal,
        /// Discount ratio applied to PV.
        discount: Decimal,
    },
}

impl PricingInputs {
    pub fn mode(&self) -> CalculationMode {
        self.target.mode()
    }
}

impl ModeInputs {
    pub fn mode(&self) -> CalculationMode {
        match self {
            Self::SalePrice { .. } => CalculationMode::SalePrice,
            Self::Profit { .. } => CalculationMode::Profit,
            Self::DiscountedProfit { .. } => CalculationMode::DiscountedProfit,
        }
    }
}
