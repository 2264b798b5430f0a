//! CSV loader for batch pricing scenarios.
//!
//! ## CSV Format
//!
//! Cells use the same locale format as the form (`9.000,00`, `10%`), so the
//! file is **semicolon**-delimited. Headers are matched by name; only `mode`
//! is required. Empty or missing cells fall back to the configured defaults.
//! A row with an unknown mode is still returned, carrying an [`UnknownMode`]
//! error, so the rows around it can run.
//!
//! | Column       | Required | Notes                                            |
//! |--------------|----------|--------------------------------------------------|
//! | `mode`       | yes      | `sale-price`, `profit` or `discounted-profit`    |
//! | `cfun`       | no       | currency amount                                  |
//! | `cmvun`      | no       | currency amount                                  |
//! | `ocv`        | no       | ratio (`0,10`) or percentage (`10%`)             |
//! | `profit`     | no       | desired profit L, used by `sale-price`           |
//! | `sale_price` | no       | PV, used by `profit` and `discounted-profit`     |
//! | `discount`   | no       | used by `discounted-profit`                      |
//!
//! ### Example
//!
//! ```csv
//! mode;cfun;cmvun;ocv;profit;sale_price;discount
//! sale-price;9.000,00;5.000,00;10%;15%;;
//! profit;9.000,00;5.000,00;10%;;20.000,00;
//! discounted-profit;;;;;20.000,00;5%
//! ```

use std::io::Read;
use std::path::Path;

use pricing_core::{CalculationMode, Field, RawInputs};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    mode: String,
    #[serde(default)]
    cfun: Option<String>,
    #[serde(default)]
    cmvun: Option<String>,
    #[serde(default)]
    ocv: Option<String>,
    #[serde(default)]
    profit: Option<String>,
    #[serde(default)]
    sale_price: Option<String>,
    #[serde(default)]
    discount: Option<String>,
}

/// A `mode` cell that names no calculation mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised mode '{0}'")]
pub struct UnknownMode(pub String);

/// One row of a batch file, merged over the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// 1-based row number, header excluded.
    pub row: usize,
    pub mode: Result<CalculationMode, UnknownMode>,
    pub fields: RawInputs,
}

impl Scenario {
    /// The mode as written in the file.
    pub fn mode_code(&self) -> &str {
        match &self.mode {
            Ok(mode) => mode.as_str(),
            Err(UnknownMode(text)) => text,
        }
    }
}

/// Errors that can occur while loading a batch file.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read batch file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is structurally invalid (bad quoting, missing `mode` column, ...).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
    defaults: &RawInputs,
) -> Scenario {
    let mode = CalculationMode::parse(&row.mode).ok_or_else(|| {
        debug!(row = row_number, mode = %row.mode, "unknown mode in batch row");
        UnknownMode(row.mode.clone())
    });

    let mut fields = defaults.clone();
    for (field, cell) in [
        (Field::Cfun, row.cfun),
        (Field::Cmvun, row.cmvun),
        (Field::Ocv, row.ocv),
        (Field::ProfitRatio, row.profit),
        (Field::SalePrice, row.sale_price),
        (Field::Discount, row.discount),
    ] {
        if let Some(text) = cell.filter(|t| !t.trim().is_empty()) {
            fields.set(field, text);
        }
    }

    Scenario {
        row: row_number,
        mode,
        fields,
    }
}

/// Parses scenarios from any reader. Rows are returned in file order.
///
/// # Errors
///
/// [CsvLoadError::Parse] if the CSV is structurally invalid. An unknown mode
/// does not fail the load; it is recorded on that row's [`Scenario`].
pub fn load_from_reader<R: Read>(
    reader: R,
    defaults: &RawInputs,
) -> Result<Vec<Scenario>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            result
                .map(|row| convert_row(row, idx + 1, defaults))
                .map_err(CsvLoadError::from)
        })
        .collect()
}

pub fn load_from_str(
    input: &str,
    defaults: &RawInputs,
) -> Result<Vec<Scenario>, CsvLoadError> {
    load_from_reader(input.as_bytes(), defaults)
}

pub fn load_from_file(
    path: &Path,
    defaults: &RawInputs,
) -> Result<Vec<Scenario>, CsvLoadError> {
    let file = std::fs::File::open(path)?;
    load_from_reader(file, defaults)
}
