//! Tax calculations: the progressive bracket formula, the federal scale,
//! the per-canton strategies and the pipeline that combines them.

pub mod brackets;
pub mod common;
pub mod federal;
pub mod strategies;
pub mod tax_calculator;

pub use brackets::{average_rate, progressive_tax};
pub use federal::federal_tax;
pub use strategies::{StrategyInput, cantonal_tax};
pub use tax_calculator::{TaxCalculator, TaxError};
