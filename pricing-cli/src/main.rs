use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use pricing_cli::{
    batch,
    config::CalculatorConfig,
    csv_loader,
    form::PricingForm,
    logging::{self, LogSettings},
};
use pricing_core::{CalculationMode, Currency, Field, PricingError};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Strategic pricing calculator.
///
/// Computes a sale price from costs and a desired profit, or the profit left
/// by a given sale price, and prints the step-by-step calculation memorial.
/// Amounts use "." for thousands and "," for decimals (9.000,00); ratios may
/// be fractions (0,10) or percentages (10%).
#[derive(Debug, Parser)]
#[command(name = "pricing", version)]
struct Cli {
    /// TOML config file (defaults to ./pricing.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Currency label: brl, pyg, usd (or R$, G$, U$).
    #[arg(long, global = true, value_parser = parse_currency_arg)]
    currency: Option<Currency>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Hide log output on the console.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve for the sale price: PV = (CFun + CMVun) / (1 - (OCV + L)).
    SalePrice {
        #[command(flatten)]
        costs: CostArgs,

        /// Desired profit L (e.g. 15% or 0,15).
        #[arg(long, allow_hyphen_values = true)]
        profit: Option<String>,
    },

    /// Solve for the profit at a sale price: L = 1 - OCV - (CFun + CMVun) / PV.
    Profit {
        #[command(flatten)]
        costs: CostArgs,

        /// Sale price PV (e.g. 20.000,00).
        #[arg(long, allow_hyphen_values = true)]
        sale_price: Option<String>,
    },

    /// Apply a discount to PV, then solve for profit.
    DiscountedProfit {
        #[command(flatten)]
        costs: CostArgs,

        /// Undiscounted sale price PV (e.g. 20.000,00).
        #[arg(long, allow_hyphen_values = true)]
        sale_price: Option<String>,

        /// Discount on PV (e.g. 5% or 0,05).
        #[arg(long, allow_hyphen_values = true)]
        discount: Option<String>,
    },

    /// Evaluate every scenario in a semicolon-delimited CSV file.
    Batch {
        /// CSV file with a `mode` column and optional field columns.
        file: PathBuf,
    },
}

/// Fields shared by every calculation mode. Omitted flags keep the
/// configured defaults.
#[derive(Debug, Args)]
struct CostArgs {
    /// Fixed cost per unit (e.g. 9.000,00).
    #[arg(long, allow_hyphen_values = true)]
    cfun: Option<String>,

    /// Cost of goods sold per unit (e.g. 5.000,00).
    #[arg(long, allow_hyphen_values = true)]
    cmvun: Option<String>,

    /// Other variable costs (e.g. 10% or 0,10).
    #[arg(long, allow_hyphen_values = true)]
    ocv: Option<String>,
}

fn parse_currency_arg(s: &str) -> Result<Currency, String> {
    Currency::try_from(s.to_string())
}

// ─── commands ────────────────────────────────────────────────────────────────

fn run_form(
    mut form: PricingForm,
    costs: CostArgs,
    overrides: Vec<(Field, Option<String>)>,
) -> anyhow::Result<()> {
    form.edit_if_some(Field::Cfun, costs.cfun);
    form.edit_if_some(Field::Cmvun, costs.cmvun);
    form.edit_if_some(Field::Ocv, costs.ocv);
    for (field, value) in overrides {
        form.edit_if_some(field, value);
    }

    match form.calculate() {
        Ok(calc) => {
            println!("{}", calc.memorial);
            Ok(())
        }
        Err(PricingError::Validation(errors)) => {
            for error in errors.errors() {
                eprintln!("  {error}");
            }
            bail!("{} field(s) need correcting", errors.errors().len())
        }
        Err(e) => Err(e.into()),
    }
}

fn run_batch(
    config: &CalculatorConfig,
    currency: Currency,
    file: PathBuf,
) -> anyhow::Result<()> {
    let scenarios = csv_loader::load_from_file(&file, &config.defaults)
        .with_context(|| format!("Failed to load batch file: {}", file.display()))?;
    debug!(count = scenarios.len(), "loaded scenarios");

    let outcomes = batch::run(&scenarios, currency);
    for outcome in &outcomes {
        println!("{}", outcome.summary());
    }

    let failed = outcomes.iter().filter(|o| o.outcome.is_err()).count();
    if failed > 0 {
        bail!("{failed} of {} scenario(s) failed", outcomes.len());
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CalculatorConfig::load(cli.config.as_deref())?;
    logging::init_logging(&LogSettings {
        level: config.log_level.clone(),
        quiet: cli.quiet,
        file: cli.log_file.clone(),
    })?;
    debug!(currency = %config.currency, "configuration loaded");

    let currency = cli.currency.unwrap_or(config.currency);

    let (mode, costs, overrides) = match cli.command {
        Command::SalePrice { costs, profit } => (
            CalculationMode::SalePrice,
            costs,
            vec![(Field::ProfitRatio, profit)],
        ),
        Command::Profit { costs, sale_price } => (
            CalculationMode::Profit,
            costs,
            vec![(Field::SalePrice, sale_price)],
        ),
        Command::DiscountedProfit {
            costs,
            sale_price,
            discount,
        } => (
            CalculationMode::DiscountedProfit,
            costs,
            vec![(Field::SalePrice, sale_price), (Field::Discount, discount)],
        ),
        Command::Batch { file } => return run_batch(&config, currency, file),
    };

    let mut form = PricingForm::new(mode, &config);
    form.currency = currency;
    run_form(form, costs, overrides)
}
