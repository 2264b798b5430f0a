//! Evaluates batch scenarios independently; one bad row never stops the rest.

use pricing_core::{Calculation, Currency, PricingError, calculate};
use thiserror::Error;
use tracing::{info, warn};

use crate::csv_loader::{Scenario, UnknownMode};

/// Why a single scenario produced no result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error(transparent)]
    UnknownMode(#[from] UnknownMode),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub row: usize,
    /// Mode code as written in the file.
    pub mode: String,
    pub outcome: Result<Calculation, ScenarioError>,
}

impl BatchOutcome {
    /// One-line summary: the headline figures, or the error.
    pub fn summary(&self) -> String {
        let body = match &self.outcome {
            Ok(calc) => calc
                .memorial
                .headlines
                .iter()
                .map(|h| format!("{}: {}", h.label, h.value))
                .collect::<Vec<_>>()
                .join("; "),
            Err(e) => format!("error: {e}"),
        };
        format!("row {} [{}] {}", self.row, self.mode, body)
    }
}

pub fn run(
    scenarios: &[Scenario],
    currency: Currency,
) -> Vec<BatchOutcome> {
    let outcomes: Vec<BatchOutcome> = scenarios
        .iter()
        .map(|s| {
            let outcome = match &s.mode {
                Ok(mode) => calculate(*mode, currency, &s.fields).map_err(ScenarioError::from),
                Err(unknown) => Err(ScenarioError::from(unknown.clone())),
            };
            if let Err(e) = &outcome {
                warn!(row = s.row, "scenario failed: {e}");
            }
            BatchOutcome {
                row: s.row,
                mode: s.mode_code().to_string(),
                outcome,
            }
        })
        .collect();

    let failed = outcomes.iter().filter(|o| o.outcome.is_err()).count();
    info!(total = outcomes.len(), failed, "batch complete");
    outcomes
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use pricing_core::{CalculationMode, Field, RawInputs};

    use super::*;

    fn scenario(
        row: usize,
        mode: CalculationMode,
        fields: RawInputs,
    ) -> Scenario {
        Scenario {
            row,
            mode: Ok(mode),
            fields,
        }
    }

    #[test]
    fn failing_row_does_not_stop_others() {
        let mut bad = RawInputs::default();
        bad.set(Field::Ocv, "abc");

        let outcomes = run(
            &[
                scenario(1, CalculationMode::SalePrice, bad),
                scenario(2, CalculationMode::Profit, RawInputs::default()),
            ],
            Currency::Real,
        );

        assert!(outcomes[0].outcome.is_err());
        assert!(outcomes[1].outcome.is_ok());
    }

    #[test]
    fn unknown_mode_fails_only_its_row() {
        let unknown = Scenario {
            row: 2,
            mode: Err(UnknownMode("markup".to_string())),
            fields: RawInputs::default(),
        };

        let outcomes = run(
            &[
                scenario(1, CalculationMode::Profit, RawInputs::default()),
                unknown,
                scenario(3, CalculationMode::SalePrice, RawInputs::default()),
            ],
            Currency::Real,
        );

        assert!(outcomes[0].outcome.is_ok());
        assert_eq!(
            outcomes[1].outcome.as_ref().err(),
            Some(&ScenarioError::UnknownMode(UnknownMode("markup".to_string())))
        );
        assert_eq!(outcomes[1].summary(), "row 2 [markup] error: unrecognised mode 'markup'");
        assert!(outcomes[2].outcome.is_ok());
    }

    #[test]
    fn summary_lists_headlines() {
        let outcomes = run(
            &[scenario(1, CalculationMode::Profit, RawInputs::default())],
            Currency::Real,
        );

        assert_eq!(
            outcomes[0].summary(),
            "row 1 [profit] Profit ratio: 20,00%; Profit amount: R$ 4.000,00"
        );
    }

    #[test]
    fn summary_reports_error() {
        let mut fields = RawInputs::default();
        fields.set(Field::Ocv, "50%");
        fields.set(Field::ProfitRatio, "50%");

        let outcomes = run(
            &[scenario(7, CalculationMode::SalePrice, fields)],
            Currency::Real,
        );

        assert!(outcomes[0].summary().starts_with("row 7 [sale-price] error: cannot calculate: OCV + L must be below 1"));
    }
}
