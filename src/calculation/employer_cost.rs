//! Employer-side levies.
//!
//! Municipal tax and the family-burden levies are charged on the employer
//! base; the provision fund on the SV base plus the special payment. The
//! Vienna levy is a flat amount for every Monday of the payroll month.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::EmployerLevyRates;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployerCosts, PayrollPeriod};

/// Counts the Mondays of a calendar month.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] for a month outside 1-12 or a year
/// outside the calendar's range.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::count_mondays;
///
/// // September 2025 starts on a Monday
/// assert_eq!(count_mondays(2025, 9).unwrap(), 5);
/// ```
pub fn count_mondays(year: i32, month: u32) -> EngineResult<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        EngineError::invalid_input(
            "period.month",
            format!("{year}-{month} is not a calendar month"),
        )
    })?;

    let mondays = first
        .iter_days()
        .take_while(|day| day.month() == month)
        .filter(|day| day.weekday() == Weekday::Mon)
        .count();

    Ok(mondays as u32)
}

/// Calculates the employer levies for a month.
///
/// # Arguments
///
/// * `period` - The payroll month
/// * `employer_base` - Gross wage less reimbursements, plus non-cash benefit
///   and special payment
/// * `provision_fund_base` - SV contribution base plus special payment
/// * `rates` - Levy rates of the tax year
///
/// Amounts are not rounded.
pub fn calculate_employer_costs(
    period: PayrollPeriod,
    employer_base: Decimal,
    provision_fund_base: Decimal,
    rates: &EmployerLevyRates,
) -> EngineResult<EmployerCosts> {
    let mondays = count_mondays(period.year, period.month)?;

    let costs = EmployerCosts {
        employer_base,
        municipal_tax: employer_base * rates.municipal_tax_rate,
        family_burden_levy: employer_base * rates.family_burden_rate,
        family_burden_surcharge: employer_base * rates.family_burden_surcharge_rate,
        provision_fund: provision_fund_base * rates.provision_fund_rate,
        mondays,
        vienna_levy: Decimal::from(mondays) * rates.vienna_levy_per_monday,
    };

    debug!(%employer_base, mondays, "Calculated employer levies");

    Ok(costs)
}

impl EmployerCosts {
    /// Sum of all employer levies.
    pub fn total_levies(&self) -> Decimal {
        self.municipal_tax
            + self.family_burden_levy
            + self.family_burden_surcharge
            + self.provision_fund
            + self.vienna_levy
    }
}
