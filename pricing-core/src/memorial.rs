//! Calculation memorial: the step-by-step derivation shown next to a result.
//!
//! The memorial only formats values that the formula engine already
//! computed; building it never changes a result.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::locale::{format_money, format_percentage, format_ratio, strip_currency_symbol};
use crate::models::{
    CalculationMode, Currency, DiscountedProfitResult, PricingInputs, PricingResult, ProfitResult,
    SalePriceResult,
};
use crate::validation::{Field, RawInputs};

/// Disclaimer appended to every memorial.
pub const NOTE: &str = "Results are estimates based on the values entered. \
Misclassifying fixed and variable costs can compromise the accuracy of the analysis.";

const LEGEND_CFUN: (&str, &str) = ("CFun", "Fixed cost per unit");
const LEGEND_CMVUN: (&str, &str) = ("CMVun", "Cost of goods sold per unit");
const LEGEND_OCV: (&str, &str) = ("OCV", "Other variable costs (%)");
const LEGEND_L: (&str, &str) = ("L", "Profit (%)");
const LEGEND_PV: (&str, &str) = ("PV", "Sale price");

/// A field as the user entered it, echoed at the top of the memorial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GivenValue {
    pub symbol: &'static str,
    pub text: String,
}

/// A headline figure, e.g. the final sale price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub label: &'static str,
    pub value: String,
}

/// One derivation: formula, legend, and the substitution steps in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemorialSection {
    pub title: &'static str,
    pub formula: &'static str,
    pub legend: Vec<(&'static str, &'static str)>,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Memorial {
    pub mode: CalculationMode,
    pub currency: Currency,
    pub given: Vec<GivenValue>,
    pub headlines: Vec<Headline>,
    pub sections: Vec<MemorialSection>,
    pub note: &'static str,
}

impl Memorial {
    /// Builds the memorial for a computed result.
    ///
    /// `raw` supplies the text echoed under "Given"; `inputs` supplies the
    /// shared cost structure.
    pub fn build(
        currency: Currency,
        raw: &RawInputs,
        inputs: &PricingInputs,
        result: &PricingResult,
    ) -> Self {
        let presenter = Presenter { currency };
        let (headlines, sections) = match result {
            PricingResult::SalePrice(r) => presenter.sale_price(inputs, r),
            PricingResult::Profit(r) => presenter.profit(inputs, r),
            PricingResult::DiscountedProfit(r) => presenter.discounted_profit(inputs, r),
        };

        Self {
            mode: result.mode(),
            currency,
            given: given_values(currency, raw, result.mode()),
            headlines,
            sections,
            note: NOTE,
        }
    }
}

fn given_values(
    currency: Currency,
    raw: &RawInputs,
    mode: CalculationMode,
) -> Vec<GivenValue> {
    Field::required_for(mode)
        .iter()
        .map(|field| {
            let text = match field {
                Field::Cfun | Field::Cmvun | Field::SalePrice => format!(
                    "{} {}",
                    currency.symbol(),
                    strip_currency_symbol(raw.get(*field))
                ),
                _ => raw.get(*field).trim().to_string(),
            };
            GivenValue {
                symbol: field.symbol(),
                text,
            }
        })
        .collect()
}

struct Presenter {
    currency: Currency,
}

impl Presenter {
    fn money(
        &self,
        value: Decimal,
    ) -> String {
        format_money(self.currency, value)
    }

    fn sale_price(
        &self,
        inputs: &PricingInputs,
        r: &SalePriceResult,
    ) -> (Vec<Headline>, Vec<MemorialSection>) {
        let cfun = self.money(inputs.cfun);
        let cmvun = self.money(inputs.cmvun);
        let base = self.money(r.cost_base);
        let ocv = format_ratio(inputs.ocv);

        let full = MemorialSection {
            title: "Full sale price",
            formula: "PV = (CFun + CMVun) / (1 - (OCV + L))",
            legend: vec![LEGEND_CFUN, LEGEND_CMVUN, LEGEND_OCV, LEGEND_L, LEGEND_PV],
            steps: vec![
                "PV = (CFun + CMVun) / (1 - (OCV + L))".to_string(),
                format!(
                    "PV = ({cfun} + {cmvun}) / (1 - ({ocv} + {}))",
                    format_ratio(r.profit_ratio)
                ),
                format!(
                    "PV = {base} / (1 - {})",
                    format_ratio(inputs.ocv + r.profit_ratio)
                ),
                format!("PV = {base} / {}", format_ratio(r.denominator)),
                format!("PV = {}", self.money(r.sale_price)),
            ],
        };

        let break_even = MemorialSection {
            title: "Break-even sale price (L = 0)",
            formula: "PV = (CFun + CMVun) / (1 - OCV)",
            legend: vec![
                LEGEND_CFUN,
                LEGEND_CMVUN,
                LEGEND_OCV,
                ("L", "0 (zero profit at break-even)"),
                ("PV", "Break-even sale price"),
            ],
            steps: vec![
                "PV = (CFun + CMVun) / (1 - OCV)".to_string(),
                format!("PV = ({cfun} + {cmvun}) / (1 - {ocv})"),
                format!("PV = {base} / (1 - {ocv})"),
                format!("PV = {base} / {}", format_ratio(r.break_even_denominator)),
                format!("PV = {}", self.money(r.break_even_price)),
            ],
        };

        let headlines = vec![
            Headline {
                label: "Full sale price (PV)",
                value: self.money(r.sale_price),
            },
            Headline {
                label: "Break-even sale price",
                value: self.money(r.break_even_price),
            },
        ];

        (headlines, vec![full, break_even])
    }

    fn profit(
        &self,
        inputs: &PricingInputs,
        r: &ProfitResult,
    ) -> (Vec<Headline>, Vec<MemorialSection>) {
        let pv = self.money(r.sale_price);
        let base = self.money(r.cost_base);
        let ocv = format_ratio(inputs.ocv);

        let ratio = MemorialSection {
            title: "Profit ratio",
            formula: "L = 1 - OCV - (CFun + CMVun) / PV",
            legend: vec![LEGEND_CFUN, LEGEND_CMVUN, LEGEND_OCV, LEGEND_PV, LEGEND_L],
            steps: vec![
                "L = 1 - OCV - (CFun + CMVun) / PV".to_string(),
                format!(
                    "L = 1 - {ocv} - ({} + {}) / {pv}",
                    self.money(inputs.cfun),
                    self.money(inputs.cmvun)
                ),
                format!("L = 1 - {ocv} - {base} / {pv}"),
                format!("L = 1 - {ocv} - {}", format_ratio(r.cost_ratio)),
                format!(
                    "L = {} ({}%)",
                    format_ratio(r.profit_ratio),
                    format_percentage(r.profit_ratio)
                ),
            ],
        };

        let amount = MemorialSection {
            title: "Profit amount",
            formula: "Profit = PV - CFun - CMVun - (PV × OCV)",
            legend: vec![LEGEND_CFUN, LEGEND_CMVUN, LEGEND_OCV, LEGEND_PV],
            steps: vec![
                "Profit = PV - CFun - CMVun - (PV × OCV)".to_string(),
                format!("Profit = {pv} - {base} - ({pv} × {ocv})"),
                format!(
                    "Profit = {pv} - {base} - {}",
                    self.money(r.variable_costs)
                ),
                format!("Profit = {}", self.money(r.profit_amount)),
            ],
        };

        let headlines = vec![
            Headline {
                label: "Profit ratio",
                value: format!("{}%", format_percentage(r.profit_ratio)),
            },
            Headline {
                label: "Profit amount",
                value: self.money(r.profit_amount),
            },
        ];

        (headlines, vec![ratio, amount])
    }

    fn discounted_profit(
        &self,
        inputs: &PricingInputs,
        r: &DiscountedProfitResult,
    ) -> (Vec<Headline>, Vec<MemorialSection>) {
        let pv = self.money(r.sale_price);
        let discounted = self.money(r.discounted_price);
        let ocv = format_ratio(inputs.ocv);
        let profit = self.money(r.profit_amount);

        let price = MemorialSection {
            title: "Discounted sale price",
            formula: "PV' = PV × (1 - Discount)",
            legend: vec![
                LEGEND_PV,
                ("Discount", "Discount on the sale price (%)"),
                ("PV'", "Discounted sale price"),
            ],
            steps: vec![
                "PV' = PV × (1 - Discount)".to_string(),
                format!("PV' = {pv} × (1 - {})", format_ratio(r.discount)),
                format!("PV' = {pv} × {}", format_ratio(r.discount_factor)),
                format!("PV' = {discounted}"),
            ],
        };

        let amount = MemorialSection {
            title: "Profit amount",
            formula: "Profit = PV' - CFun - CMVun - (OCV × PV')",
            legend: vec![
                LEGEND_CFUN,
                LEGEND_CMVUN,
                LEGEND_OCV,
                ("PV'", "Discounted sale price"),
            ],
            steps: vec![
                "Profit = PV' - CFun - CMVun - (OCV × PV')".to_string(),
                format!(
                    "Profit = {discounted} - {} - {} - ({ocv} × {discounted})",
                    self.money(inputs.cfun),
                    self.money(inputs.cmvun)
                ),
                format!(
                    "Profit = {discounted} - {} - {}",
                    self.money(r.cost_base),
                    self.money(r.variable_costs)
                ),
                format!("Profit = {profit}"),
            ],
        };

        let ratio = MemorialSection {
            title: "Profit ratio (on the undiscounted price)",
            formula: "L = Profit / PV",
            legend: vec![LEGEND_PV, LEGEND_L],
            steps: vec![
                "L = Profit / PV".to_string(),
                format!("L = {profit} / {pv}"),
                format!(
                    "L = {} ({}%)",
                    format_ratio(r.profit_ratio),
                    format_percentage(r.profit_ratio)
                ),
            ],
        };

        let headlines = vec![
            Headline {
                label: "Discounted sale price (PV')",
                value: discounted,
            },
            Headline {
                label: "Profit ratio",
                value: format!("{}%", format_percentage(r.profit_ratio)),
            },
            Headline {
                label: "Profit amount",
                value: profit,
            },
        ];

        (headlines, vec![price, amount, ratio])
    }
}

impl fmt::Display for Memorial {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Calculation Memorial: {}", self.mode)?;
        writeln!(f)?;

        writeln!(f, "Given:")?;
        for given in &self.given {
            writeln!(f, "  {}: {}", given.symbol, given.text)?;
        }
        writeln!(f)?;

        writeln!(f, "Result:")?;
        for headline in &self.headlines {
            writeln!(f, "  {}: {}", headline.label, headline.value)?;
        }

        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.title)?;
            writeln!(f, "  Formula: {}", section.formula)?;
            writeln!(f, "  Where:")?;
            for (symbol, meaning) in &section.legend {
                writeln!(f, "    {symbol} = {meaning}")?;
            }
            writeln!(f)?;
            for step in &section.steps {
                writeln!(f, "    {step}")?;
            }
        }

        writeln!(f)?;
        write!(f, "Note: {}", self.note)
    }
}
