//! Swiss income tax, pension and household finance calculations.
//!
//! The engine is synchronous and free of side effects. Persistence goes
//! through the [`db::FinanceRepository`] trait, used only by
//! [`service::FinanceService`].

pub mod aggregation;
pub mod calculations;
pub mod db;
pub mod input;
pub mod models;
pub mod pension;
pub mod reference;
pub mod service;

pub use calculations::{TaxCalculator, TaxError};
pub use db::repository::{FinanceRepository, RepositoryError};
pub use models::*;
pub use reference::ReferenceData;
pub use service::{FinanceService, ServiceError};
