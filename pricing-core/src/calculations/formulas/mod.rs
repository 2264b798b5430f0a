//! One module per calculation mode.

mod discounted_profit;
mod profit;
mod sale_price;

pub use discounted_profit::DiscountedProfitFormula;
pub use profit::ProfitFormula;
pub use sale_price::SalePriceFormula;
