mod calculation_mode;
mod currency;
mod pricing_inputs;
mod pricing_result;

pub use calculation_mode::CalculationMode;
pub use currency::Currency;
pub use pricing_inputs::{ModeInputs, PricingInputs};
pub use pricing_result::{DiscountedProfitResult, PricingResult, ProfitResult, SalePriceResult};
