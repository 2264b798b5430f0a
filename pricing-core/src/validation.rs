//! Form-level validation: raw field text in, [`PricingInputs`] out.
//!
//! Validation checks only the fields the selected mode needs and reports
//! every failing field at once, so a form can flag them all together.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::is_ratio;
use crate::locale::{ParseError, parse_currency, parse_ratio};
use crate::models::{CalculationMode, ModeInputs, PricingInputs};

/// A form field, named by its glossary symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Cfun,
    Cmvun,
    Ocv,
    ProfitRatio,
    SalePrice,
    Discount,
}

impl Field {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Cfun => "CFun",
            Self::Cmvun => "CMVun",
            Self::Ocv => "OCV",
            Self::ProfitRatio => "L",
            Self::SalePrice => "PV",
            Self::Discount => "Discount",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Cfun => "Fixed cost per unit",
            Self::Cmvun => "Cost of goods sold per unit",
            Self::Ocv => "Other variable costs (%)",
            Self::ProfitRatio => "Profit (%)",
            Self::SalePrice => "Sale price",
            Self::Discount => "Discount (%)",
        }
    }

    /// Input hint shown next to the field.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Cfun => "a currency amount (e.g. 9.000,00)",
            Self::Cmvun => "a currency amount (e.g. 5.000,00)",
            Self::Ocv => "a decimal up to 1 (e.g. 0,10) or a percentage (e.g. 10%)",
            Self::ProfitRatio => "a decimal up to 1 (e.g. 0,15) or a percentage (e.g. 15%)",
            Self::SalePrice => "a currency amount (e.g. 20.000,00)",
            Self::Discount => "a decimal up to 1 (e.g. 0,05) or a percentage (e.g. 5%)",
        }
    }

    /// Fields the given mode reads, in form order.
    pub fn required_for(mode: CalculationMode) -> &'static [Field] {
        match mode {
            CalculationMode::SalePrice => &[Field::Cfun, Field::Cmvun, Field::Ocv, Field::ProfitRatio],
            CalculationMode::Profit => &[Field::Cfun, Field::Cmvun, Field::Ocv, Field::SalePrice],
            CalculationMode::DiscountedProfit => &[
                Field::Cfun,
                Field::Cmvun,
                Field::Ocv,
                Field::SalePrice,
                Field::Discount,
            ],
        }
    }

    fn is_ratio_field(&self) -> bool {
        matches!(self, Self::Ocv | Self::ProfitRatio | Self::Discount)
    }
}

impl fmt::Display for Field {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single field that failed validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    /// The text does not resolve to a number.
    #[error("{field}: {source}; enter {}", .field.hint())]
    Parse {
        field: Field,
        #[source]
        source: ParseError,
    },

    /// A ratio outside [0, 1].
    #[error("{field} cannot be greater than 100% or 1, nor negative (got {value})")]
    RatioOutOfRange { field: Field, value: Decimal },

    /// A currency amount that is zero or negative.
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: Field, value: Decimal },
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            Self::Parse { field, .. }
            | Self::RatioOutOfRange { field, .. }
            | Self::NotPositive { field, .. } => *field,
        }
    }
}

/// Every field error found in one validation pass.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{} invalid field(s): {}", .0.len(), join_messages(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns the error for `field`, if it failed.
    pub fn for_field(
        &self,
        field: Field,
    ) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field() == field)
    }
}

/// Field text exactly as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInputs {
    pub cfun: String,
    pub cmvun: String,
    pub ocv: String,
    pub profit_ratio: String,
    pub sale_price: String,
    pub discount: String,
}

impl Default for RawInputs {
    fn default() -> Self {
        Self {
            cfun: "9.000,00".to_string(),
            cmvun: "5.000,00".to_string(),
            ocv: "10%".to_string(),
            profit_ratio: "15%".to_string(),
            sale_price: "20.000,00".to_string(),
            discount: "0%".to_string(),
        }
    }
}

impl RawInputs {
    pub fn get(
        &self,
        field: Field,
    ) -> &str {
        match field {
            Field::Cfun => &self.cfun,
            Field::Cmvun => &self.cmvun,
            Field::Ocv => &self.ocv,
            Field::ProfitRatio => &self.profit_ratio,
            Field::SalePrice => &self.sale_price,
            Field::Discount => &self.discount,
        }
    }

    pub fn set(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) {
        let slot = match field {
            Field::Cfun => &mut self.cfun,
            Field::Cmvun => &mut self.cmvun,
            Field::Ocv => &mut self.ocv,
            Field::ProfitRatio => &mut self.profit_ratio,
            Field::SalePrice => &mut self.sale_price,
            Field::Discount => &mut self.discount,
        };
        *slot = value.into();
    }

    /// Validates a single field in isolation, as a form does on every edit.
    pub fn validate_field(
        &self,
        field: Field,
    ) -> Result<Decimal, FieldError> {
        let text = self.get(field);

        if field.is_ratio_field() {
            let value = parse_ratio(text).map_err(|source| FieldError::Parse { field, source })?;
            if !is_ratio(value) {
                warn!(field = %field, value = %value, "ratio out of range");
                return Err(FieldError::RatioOutOfRange { field, value });
            }
            Ok(value)
        } else {
            let value = parse_currency(text).map_err(|source| FieldError::Parse { field, source })?;
            if value <= Decimal::ZERO {
                warn!(field = %field, value = %value, "amount not positive");
                return Err(FieldError::NotPositive { field, value });
            }
            Ok(value)
        }
    }

    /// Parses and range-checks the fields required by `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing every failing field in form order.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use pricing_core::{CalculationMode, ModeInputs, RawInputs};
    ///
    /// let inputs = RawInputs::default().validate(CalculationMode::SalePrice).unwrap();
    ///
    /// assert_eq!(inputs.cfun, dec!(9000));
    /// assert_eq!(inputs.ocv, dec!(0.10));
    /// assert_eq!(inputs.target, ModeInputs::SalePrice { profit_ratio: dec!(0.15) });
    /// ```
    pub fn validate(
        &self,
        mode: CalculationMode,
    ) -> Result<PricingInputs, ValidationErrors> {
        let mut errors = Vec::new();
        let mut value = |field: Field| match self.validate_field(field) {
            Ok(v) => Some(v),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let cfun = value(Field::Cfun);
        let cmvun = value(Field::Cmvun);
        let ocv = value(Field::Ocv);
        let target = match mode {
            CalculationMode::SalePrice => value(Field::ProfitRatio)
                .map(|profit_ratio| ModeInputs::SalePrice { profit_ratio }),
            CalculationMode::Profit => {
                value(Field::SalePrice).map(|sale_price| ModeInputs::Profit { sale_price })
            }
            CalculationMode::DiscountedProfit => {
                let sale_price = value(Field::SalePrice);
                let discount = value(Field::Discount);
                sale_price.zip(discount).map(|(sale_price, discount)| {
                    ModeInputs::DiscountedProfit {
                        sale_price,
                        discount,
                    }
                })
            }
        };

        match (cfun, cmvun, ocv, target) {
            (Some(cfun), Some(cmvun), Some(ocv), Some(target)) => Ok(PricingInputs {
                cfun,
                cmvun,
                ocv,
                target,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_validate_in_every_mode() {
        for mode in CalculationMode::all() {
            let inputs = RawInputs::default().validate(*mode).unwrap();
            assert_eq!(inputs.mode(), *mode);
        }
    }

    #[test]
    fn profit_mode_reads_sale_price() {
        let inputs = RawInputs::default()
            .validate(CalculationMode::Profit)
            .unwrap();

        assert_eq!(
            inputs.target,
            ModeInputs::Profit {
                sale_price: dec!(20000)
            }
        );
    }

    #[test]
    fn unused_fields_are_not_validated() {
        let raw = RawInputs {
            profit_ratio: "garbage".to_string(),
            discount: "200%".to_string(),
            ..RawInputs::default()
        };

        assert!(raw.validate(CalculationMode::Profit).is_ok());
    }

    #[test]
    fn collects_every_failing_field() {
        let raw = RawInputs {
            cfun: "abc".to_string(),
            ocv: "110%".to_string(),
            profit_ratio: "1,5".to_string(),
            ..RawInputs::default()
        };

        let errors = raw.validate(CalculationMode::SalePrice).unwrap_err();
        let fields: Vec<Field> = errors.errors().iter().map(FieldError::field).collect();

        assert_eq!(fields, vec![Field::Cfun, Field::Ocv, Field::ProfitRatio]);
    }

    #[test]
    fn ratio_above_one_is_range_error() {
        let raw = RawInputs {
            ocv: "110%".to_string(),
            ..RawInputs::default()
        };

        assert_eq!(
            raw.validate_field(Field::Ocv),
            Err(FieldError::RatioOutOfRange {
                field: Field::Ocv,
                value: dec!(1.1)
            })
        );
    }

    #[test]
    fn ratio_bounds_are_inclusive() {
        let mut raw = RawInputs::default();
        raw.set(Field::Discount, "100%");
        assert_eq!(raw.validate_field(Field::Discount), Ok(dec!(1)));

        raw.set(Field::Discount, "0");
        assert_eq!(raw.validate_field(Field::Discount), Ok(dec!(0)));
    }

    #[test]
    fn zero_sale_price_is_rejected() {
        let mut raw = RawInputs::default();
        raw.set(Field::SalePrice, "0,00");

        let errors = raw.validate(CalculationMode::Profit).unwrap_err();

        assert_eq!(
            errors.for_field(Field::SalePrice),
            Some(&FieldError::NotPositive {
                field: Field::SalePrice,
                value: dec!(0)
            })
        );
    }

    #[test]
    fn empty_cost_is_parse_error() {
        let mut raw = RawInputs::default();
        raw.set(Field::Cmvun, "");

        assert_eq!(
            raw.validate_field(Field::Cmvun),
            Err(FieldError::Parse {
                field: Field::Cmvun,
                source: ParseError::Empty
            })
        );
    }

    #[test]
    fn range_error_message_names_field() {
        let err = FieldError::RatioOutOfRange {
            field: Field::ProfitRatio,
            value: dec!(1.5),
        };

        assert_eq!(
            err.to_string(),
            "L cannot be greater than 100% or 1, nor negative (got 1.5)"
        );
    }

    #[test]
    fn required_fields_follow_mode() {
        assert_eq!(
            Field::required_for(CalculationMode::DiscountedProfit).last(),
            Some(&Field::Discount)
        );
        assert!(!Field::required_for(CalculationMode::Profit).contains(&Field::ProfitRatio));
    }
}
