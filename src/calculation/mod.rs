//! Calculation logic for the payroll engine.
//!
//! Each stage of the gross-to-net pipeline lives in its own module: wage
//! aggregation, social insurance, the wage-tax base, special payments, the
//! progressive tariff and employer levies. [`compute_payroll`] runs them in
//! order and rounds the reported figures.

mod employer_cost;
mod payroll;
mod progressive_tax;
mod rounding;
mod social_insurance;
mod special_payment;
mod wage_aggregation;
mod wage_tax_base;

pub use employer_cost::{calculate_employer_costs, count_mondays};
pub use payroll::compute_payroll;
pub use progressive_tax::{
    WageTaxResult, calculate_wage_tax, family_bonus_amount, sole_earner_credit_amount, tariff_tax,
};
pub use rounding::round_to_cents;
pub use social_insurance::{SocialInsuranceResult, calculate_social_insurance};
pub use special_payment::{
    SpecialPaymentOutcome, banded_special_tax, calculate_special_payment, first_in_year,
    no_special_payment, select_special_payment_state, sixth_exhausted, within_sixth,
};
pub use wage_aggregation::{WageAggregation, aggregate_wage};
pub use wage_tax_base::{
    WageTaxBaseResult, calculate_wage_tax_base, tax_free_overtime_surcharge, union_dues,
};
