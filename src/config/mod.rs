//! Tax year configuration for the payroll engine.
//!
//! This module provides the immutable [`TaxYearConstants`] table and the
//! [`ConfigLoader`] that reads such tables from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/tax_years").unwrap();
//! println!("Loaded tax years: {:?}", loader.years());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionTier, EmployerLevyRates, FamilyBonusRates, OvertimeExemption,
    SocialInsuranceRates, SoleEarnerCredit, SpecialPaymentBand, SpecialPaymentTariff, TaxBracket,
    TaxYearConstants, UnionDues, WageTaxTariff, WorkingTime,
};
