//! In-memory form state: the selected mode and currency plus the raw text
//! of every field.
//!
//! Edits are validated as they happen so a bad field can be flagged before
//! the user asks for a calculation; `calculate` always re-validates from
//! scratch.

use pricing_core::{
    Calculation, CalculationMode, Currency, Field, FieldError, PricingError, RawInputs, calculate,
};
use tracing::{debug, warn};

use crate::config::CalculatorConfig;

#[derive(Debug, Clone, Default)]
pub struct PricingForm {
    pub mode: CalculationMode,
    pub currency: Currency,
    fields: RawInputs,
    errors: Vec<FieldError>,
}

impl PricingForm {
    pub fn new(
        mode: CalculationMode,
        config: &CalculatorConfig,
    ) -> Self {
        Self {
            mode,
            currency: config.currency,
            fields: config.defaults.clone(),
            errors: Vec::new(),
        }
    }

    pub fn fields(&self) -> &RawInputs {
        &self.fields
    }

    /// Field errors raised by edits since the last mode change.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn set_mode(
        &mut self,
        mode: CalculationMode,
    ) {
        self.mode = mode;
        self.errors.clear();
    }

    /// Replaces a field's text and validates it if the current mode uses it.
    pub fn edit(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) {
        self.fields.set(field, value);
        self.errors.retain(|e| e.field() != field);

        if !Field::required_for(self.mode).contains(&field) {
            return;
        }
        if let Err(e) = self.fields.validate_field(field) {
            warn!(field = %field, "{e}");
            self.errors.push(e);
        }
    }

    /// Applies an optional override, as supplied by a command-line flag.
    pub fn edit_if_some(
        &mut self,
        field: Field,
        value: Option<String>,
    ) {
        if let Some(value) = value {
            self.edit(field, value);
        }
    }

    pub fn calculate(&self) -> Result<Calculation, PricingError> {
        debug!(mode = %self.mode, "calculating form");
        calculate(self.mode, self.currency, &self.fields)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn form(mode: CalculationMode) -> PricingForm {
        PricingForm::new(mode, &CalculatorConfig::default())
    }

    #[test]
    fn new_form_uses_config_defaults() {
        let f = form(CalculationMode::SalePrice);

        assert_eq!(f.fields().cfun, "9.000,00");
        assert_eq!(f.currency, Currency::Real);
        assert!(f.errors().is_empty());
    }

    #[test]
    fn bad_edit_is_flagged_immediately() {
        let mut f = form(CalculationMode::SalePrice);
        f.edit(Field::Ocv, "120%");

        assert_eq!(f.errors().len(), 1);
        assert_eq!(f.errors()[0].field(), Field::Ocv);
    }

    #[test]
    fn correcting_a_field_clears_its_error() {
        let mut f = form(CalculationMode::SalePrice);
        f.edit(Field::Ocv, "120%");
        f.edit(Field::Ocv, "12%");

        assert!(f.errors().is_empty());
    }

    #[test]
    fn edits_to_unused_fields_are_not_flagged() {
        let mut f = form(CalculationMode::SalePrice);
        f.edit(Field::SalePrice, "abc");

        assert!(f.errors().is_empty());
        assert_eq!(f.fields().sale_price, "abc");
    }

    #[test]
    fn edit_if_some_ignores_none() {
        let mut f = form(CalculationMode::Profit);
        f.edit_if_some(Field::SalePrice, None);
        f.edit_if_some(Field::Cfun, Some("1.000,00".to_string()));

        assert_eq!(f.fields().sale_price, "20.000,00");
        assert_eq!(f.fields().cfun, "1.000,00");
    }

    #[test]
    fn calculate_uses_current_mode() {
        let mut f = form(CalculationMode::SalePrice);
        f.set_mode(CalculationMode::Profit);

        let calc = f.calculate().unwrap();

        assert_eq!(calc.result.mode(), CalculationMode::Profit);
    }
}
