//! Single-pass aggregation of insurance contracts and investment positions.

pub mod insurance;
pub mod investments;

pub use insurance::{InsuranceCategory, InsuranceSummary, summarize_insurance};
pub use investments::{PortfolioGroup, PortfolioSummary, summarize_portfolio};
