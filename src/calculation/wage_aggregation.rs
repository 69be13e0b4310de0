//! Wage aggregation for additional hours and overtime.
//!
//! Additional hours (up to the statutory full-time limit) are paid from the
//! monthly salary divided by `weeks_per_month × weekly_hours`. True overtime
//! is paid from the salary divided by the overtime divisor, scaled to the
//! employee's weekly hours. For overtime the base and the surcharge are kept
//! apart because only the surcharge can be tax free.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WorkingTime;
use crate::error::{EngineError, EngineResult};
use crate::models::OvertimeHours;

/// The result of aggregating base salary, additional hours and overtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageAggregation {
    /// Base salary plus all hour-based add-ons.
    pub regular_wage: Decimal,
    /// Pay for additional hours at 0%, 25% and 50%.
    pub additional_hours_pay: Decimal,
    /// Base portion of 50% overtime.
    pub overtime_50_base: Decimal,
    /// Surcharge portion of 50% overtime.
    pub overtime_50_surcharge: Decimal,
    /// Base portion of 100% overtime.
    pub overtime_100_base: Decimal,
    /// Surcharge portion of 100% overtime.
    pub overtime_100_surcharge: Decimal,
    /// Hours of 50% overtime, needed to pro-rate the tax exemption.
    pub overtime_50_hours: Decimal,
}

/// Expands additional hours and overtime into wage add-ons.
///
/// # Arguments
///
/// * `gross_base_salary` - Monthly base salary
/// * `weekly_hours` - Contractual weekly hours, must be greater than zero
/// * `hours` - The five additional-hour and overtime quantities
/// * `working_time` - Conversion constants of the tax year
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when `weekly_hours` is not positive.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::aggregate_wage;
/// use payroll_engine::config::TaxYearConstants;
/// use payroll_engine::models::OvertimeHours;
/// use rust_decimal::Decimal;
///
/// let constants = TaxYearConstants::austria_2025();
/// let hours = OvertimeHours {
///     overtime_100: Decimal::new(143, 0),
///     ..OvertimeHours::default()
/// };
///
/// let wage = aggregate_wage(
///     Decimal::new(2000, 0),
///     Decimal::new(385, 1),
///     &hours,
///     &constants.working_time,
/// )
/// .unwrap();
///
/// // One full month of 100% overtime doubles the salary twice over.
/// assert_eq!(wage.regular_wage, Decimal::new(6000, 0));
/// ```
pub fn aggregate_wage(
    gross_base_salary: Decimal,
    weekly_hours: Decimal,
    hours: &OvertimeHours,
    working_time: &WorkingTime,
) -> EngineResult<WageAggregation> {
    if weekly_hours <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "weekly_hours",
            "must be greater than zero",
        ));
    }

    // Multiply before dividing so whole-month quantities stay exact.
    let additional_divisor = working_time.weeks_per_month * weekly_hours;
    let overtime_divisor = working_time.overtime_divisor * weekly_hours;
    let additional_pay = |hours: Decimal, surcharge: Decimal| {
        hours * gross_base_salary * (Decimal::ONE + surcharge) / additional_divisor
    };
    let overtime_pay = |hours: Decimal| {
        hours * gross_base_salary * working_time.standard_weekly_hours / overtime_divisor
    };

    let half = Decimal::new(5, 1);

    let additional_hours_pay = additional_pay(hours.additional_0, Decimal::ZERO)
        + additional_pay(hours.additional_25, Decimal::new(25, 2))
        + additional_pay(hours.additional_50, half);

    let overtime_50_base = overtime_pay(hours.overtime_50);
    let overtime_50_surcharge = overtime_50_base * half;
    let overtime_100_base = overtime_pay(hours.overtime_100);
    let overtime_100_surcharge = overtime_100_base;

    let regular_wage = gross_base_salary
        + additional_hours_pay
        + overtime_50_base
        + overtime_50_surcharge
        + overtime_100_base
        + overtime_100_surcharge;

    debug!(
        %additional_hours_pay,
        overtime_pay = %(overtime_50_base + overtime_50_surcharge + overtime_100_base + overtime_100_surcharge),
        %regular_wage,
        "Aggregated wage"
    );

    Ok(WageAggregation {
        regular_wage,
        additional_hours_pay,
        overtime_50_base,
        overtime_50_surcharge,
        overtime_100_base,
        overtime_100_surcharge,
        overtime_50_hours: hours.overtime_50,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::round_to_cents;
    use crate::config::TaxYearConstants;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn working_time() -> WorkingTime {
        TaxYearConstants::austria_2025().working_time
    }

    #[test]
    fn test_no_extra_hours_returns_base_salary() {
        let wage = aggregate_wage(
            dec("2000"),
            dec("38.5"),
            &OvertimeHours::default(),
            &working_time(),
        )
        .unwrap();

        assert_eq!(wage.regular_wage, dec("2000"));
        assert_eq!(wage.additional_hours_pay, Decimal::ZERO);
        assert_eq!(wage.overtime_50_surcharge, Decimal::ZERO);
    }

    #[test]
    fn test_zero_weekly_hours_is_rejected() {
        let result = aggregate_wage(
            dec("2000"),
            Decimal::ZERO,
            &OvertimeHours::default(),
            &working_time(),
        );

        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { ref field, .. }) if field == "weekly_hours"
        ));
    }

    #[test]
    fn test_overtime_50_splits_base_and_surcharge() {
        // 2000 / 143 per overtime hour at standard weekly hours
        let hours = OvertimeHours {
            overtime_50: dec("10"),
            ..OvertimeHours::default()
        };

        let wage = aggregate_wage(dec("2000"), dec("38.5"), &hours, &working_time()).unwrap();

        assert_eq!(round_to_cents(wage.overtime_50_base), dec("139.86"));
        assert_eq!(round_to_cents(wage.overtime_50_surcharge), dec("69.93"));
        assert_eq!(round_to_cents(wage.regular_wage), dec("2209.79"));
        assert_eq!(wage.overtime_50_hours, dec("10"));
    }

    #[test]
    fn test_overtime_100_surcharge_equals_base() {
        let hours = OvertimeHours {
            overtime_100: dec("143"),
            ..OvertimeHours::default()
        };

        let wage = aggregate_wage(dec("2000"), dec("38.5"), &hours, &working_time()).unwrap();

        assert_eq!(wage.overtime_100_base, dec("2000"));
        assert_eq!(wage.overtime_100_surcharge, dec("2000"));
    }

    #[test]
    fn test_part_time_raises_overtime_hour_rate() {
        // Half the weekly hours doubles the hourly value of the same salary.
        let hours = OvertimeHours {
            overtime_100: dec("143"),
            ..OvertimeHours::default()
        };

        let wage = aggregate_wage(dec("1000"), dec("19.25"), &hours, &working_time()).unwrap();

        assert_eq!(wage.overtime_100_base, dec("2000"));
    }

    #[test]
    fn test_additional_hours_surcharges() {
        // 4.33 weeks at 10 weekly hours: 43.3 hours are worth one monthly salary
        let hours = OvertimeHours {
            additional_0: dec("43.3"),
            additional_25: dec("43.3"),
            additional_50: dec("43.3"),
            ..OvertimeHours::default()
        };

        let wage = aggregate_wage(dec("1000"), dec("10"), &hours, &working_time()).unwrap();

        assert_eq!(round_to_cents(wage.additional_hours_pay), dec("3750.00"));
        assert_eq!(round_to_cents(wage.regular_wage), dec("4750.00"));
    }
}
