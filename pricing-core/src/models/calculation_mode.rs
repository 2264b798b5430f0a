use std::fmt;

use serde::{Deserialize, Serialize};

/// Which closed-form formula a calculation runs.
///
/// The mode is picked before calculating and decides both the required
/// inputs and the shape of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationMode {
    /// Solve for the sale price given a desired profit ratio.
    #[default]
    SalePrice,
    /// Solve for the profit ratio and amount given a sale price.
    Profit,
    /// Apply a discount to the sale price, then solve for profit.
    DiscountedProfit,
}

impl CalculationMode {
    pub fn all() -> &'static [CalculationMode] {
        &[
            CalculationMode::SalePrice,
            CalculationMode::Profit,
            CalculationMode::DiscountedProfit,
        ]
    }

    /// Stable code used on the command line and in batch files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SalePrice => "sale-price",
            Self::Profit => "profit",
            Self::DiscountedProfit => "discounted-profit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SalePrice => "Sale Price",
            Self::Profit => "Profit",
            Self::DiscountedProfit => "Discounted Profit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "sale-price" => Some(Self::SalePrice),
            "profit" => Some(Self::Profit),
            "discounted-profit" => Some(Self::DiscountedProfit),
            _ => None,
        }
    }
}

impl fmt::Display for CalculationMode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_every_code_from_as_str() {
        for mode in CalculationMode::all() {
            assert_eq!(CalculationMode::parse(mode.as_str()), Some(*mode));
        }
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        assert_eq!(
            CalculationMode::parse("  profit "),
            Some(CalculationMode::Profit)
        );
    }

    #[test]
    fn parse_rejects_unknown_code() {
        assert_eq!(CalculationMode::parse("markup"), None);
    }

    #[test]
    fn default_is_sale_price() {
        assert_eq!(CalculationMode::default(), CalculationMode::SalePrice);
    }
}
