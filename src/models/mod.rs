//! Core data models for the payroll engine.
//!
//! [`PayrollInput`] is everything a calculation needs besides the tax year
//! table; [`PayrollResult`] is everything it reports.

mod payroll_input;
mod payroll_result;

pub use payroll_input::{
    FamilyBonusChildren, MAX_AMOUNT, MAX_MONTHLY_HOURS, MAX_WEEKLY_HOURS, MIN_WEEKLY_HOURS,
    OvertimeHours, PayrollInput, PayrollPeriod,
};
pub use payroll_result::{
    AppliedCredits, EmployerCosts, PayrollResult, SpecialPaymentState, SpecialPaymentSummary,
};
