//! Payroll input model and related types.
//!
//! A [`PayrollInput`] carries every monthly compensation fact the engine
//! needs for one employee. Fields that the surrounding application used to
//! prompt for interactively (prior special payments, family bonus children)
//! are ordinary fields here and are validated before any calculation runs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest monetary amount accepted on input (one trillion).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Smallest contractual weekly hours accepted on input.
pub const MIN_WEEKLY_HOURS: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Hours in a week.
pub const MAX_WEEKLY_HOURS: Decimal = Decimal::from_parts(168, 0, 0, false, 0);

/// Hours in a 31-day month; the limit for each overtime quantity.
pub const MAX_MONTHLY_HOURS: Decimal = Decimal::from_parts(744, 0, 0, false, 0);

/// The calendar month a payroll run is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Month of the year, 1 to 12.
    pub month: u32,
    /// Calendar year; also selects the tax year table.
    pub year: i32,
}

/// Hours worked beyond the contractual weekly hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertimeHours {
    /// Additional hours without surcharge.
    pub additional_0: Decimal,
    /// Additional hours with a 25% surcharge.
    pub additional_25: Decimal,
    /// Additional hours with a 50% surcharge.
    pub additional_50: Decimal,
    /// True overtime hours with a 50% surcharge.
    pub overtime_50: Decimal,
    /// True overtime hours with a 100% surcharge.
    pub overtime_100: Decimal,
}

impl OvertimeHours {
    fn fields(&self) -> [(&'static str, Decimal); 5] {
        [
            ("overtime.additional_0", self.additional_0),
            ("overtime.additional_25", self.additional_25),
            ("overtime.additional_50", self.additional_50),
            ("overtime.overtime_50", self.overtime_50),
            ("overtime.overtime_100", self.overtime_100),
        ]
    }
}

/// Children the family bonus is claimed for, by age and entitlement share.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyBonusChildren {
    /// Children under 18 with full entitlement.
    pub under_18_full: u32,
    /// Children under 18 with half entitlement.
    pub under_18_half: u32,
    /// Children 18 or older with full entitlement.
    pub over_18_full: u32,
    /// Children 18 or older with half entitlement.
    pub over_18_half: u32,
}

/// Monthly compensation facts for one employee.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayrollInput, PayrollPeriod};
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput {
///     union_member: true,
///     ..PayrollInput::new(
///         PayrollPeriod { month: 1, year: 2025 },
///         Decimal::new(385, 1),
///         Decimal::new(2000, 0),
///     )
/// };
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// The month being paid.
    pub period: PayrollPeriod,
    /// Contractual weekly hours, between 0.01 and 168.
    pub weekly_hours: Decimal,
    /// Monthly base salary.
    pub gross_base_salary: Decimal,
    /// Additional hours and overtime.
    #[serde(default)]
    pub overtime: OvertimeHours,
    /// Bonus-type payment paid this month (13th/14th salary).
    #[serde(default)]
    pub special_payment: Decimal,
    /// Value of non-cash benefits such as a company car.
    #[serde(default)]
    pub non_cash_benefit: Decimal,
    /// Tax-free daily allowances.
    #[serde(default)]
    pub daily_allowance: Decimal,
    /// Reimbursed travel expenses.
    #[serde(default)]
    pub travel_reimbursement: Decimal,
    /// Monthly allowance from a tax office exemption notice.
    #[serde(default)]
    pub tax_free_allowance_notice: Decimal,
    /// Monthly commuter allowance.
    #[serde(default)]
    pub commuter_allowance: Decimal,
    /// Monthly commuter euro credit.
    #[serde(default)]
    pub commuter_euro: Decimal,
    /// Children counted for the sole-earner / single-parent credit.
    #[serde(default)]
    pub sole_earner_children: u32,
    /// Family bonus claim; `None` means the bonus is not claimed.
    #[serde(default)]
    pub family_bonus: Option<FamilyBonusChildren>,
    /// Whether union dues are withheld.
    #[serde(default)]
    pub union_member: bool,
    /// Special payments already paid and taxed earlier this year.
    #[serde(default)]
    pub prior_special_payments: Option<Decimal>,
    /// One sixth of the regular gross paid so far this year.
    #[serde(default)]
    pub annual_sixth: Option<Decimal>,
}

impl PayrollInput {
    /// Creates an input with only the mandatory facts; everything else is zero.
    pub fn new(period: PayrollPeriod, weekly_hours: Decimal, gross_base_salary: Decimal) -> Self {
        Self {
            period,
            weekly_hours,
            gross_base_salary,
            overtime: OvertimeHours::default(),
            special_payment: Decimal::ZERO,
            non_cash_benefit: Decimal::ZERO,
            daily_allowance: Decimal::ZERO,
            travel_reimbursement: Decimal::ZERO,
            tax_free_allowance_notice: Decimal::ZERO,
            commuter_allowance: Decimal::ZERO,
            commuter_euro: Decimal::ZERO,
            sole_earner_children: 0,
            family_bonus: None,
            union_member: false,
            prior_special_payments: None,
            annual_sixth: None,
        }
    }

    /// Checks the input before any calculation runs.
    ///
    /// Rejects an out-of-range month, weekly hours outside
    /// [`MIN_WEEKLY_HOURS`]..=[`MAX_WEEKLY_HOURS`], negative amounts, amounts
    /// above [`MAX_AMOUNT`], overtime quantities above [`MAX_MONTHLY_HOURS`],
    /// and a special payment without the year-to-date figures it needs.
    /// Missing figures are never defaulted.
    pub fn validate(&self) -> EngineResult<()> {
        if !(1..=12).contains(&self.period.month) {
            return Err(EngineError::invalid_input(
                "period.month",
                format!("must be between 1 and 12, got {}", self.period.month),
            ));
        }

        if self.weekly_hours < MIN_WEEKLY_HOURS || self.weekly_hours > MAX_WEEKLY_HOURS {
            return Err(EngineError::invalid_input(
                "weekly_hours",
                format!(
                    "must be between {} and {}, got {}",
                    MIN_WEEKLY_HOURS, MAX_WEEKLY_HOURS, self.weekly_hours
                ),
            ));
        }

        let amounts = [
            ("gross_base_salary", self.gross_base_salary),
            ("special_payment", self.special_payment),
            ("non_cash_benefit", self.non_cash_benefit),
            ("daily_allowance", self.daily_allowance),
            ("travel_reimbursement", self.travel_reimbursement),
            ("tax_free_allowance_notice", self.tax_free_allowance_notice),
            ("commuter_allowance", self.commuter_allowance),
            ("commuter_euro", self.commuter_euro),
        ];
        let optional_amounts = [
            ("prior_special_payments", self.prior_special_payments),
            ("annual_sixth", self.annual_sixth),
        ];
        let amounts = amounts.into_iter().chain(
            optional_amounts
                .into_iter()
                .filter_map(|(field, value)| value.map(|v| (field, v))),
        );

        for (field, value) in amounts {
            check_range(field, value, MAX_AMOUNT)?;
        }
        for (field, value) in self.overtime.fields() {
            check_range(field, value, MAX_MONTHLY_HOURS)?;
        }

        if self.special_payment > Decimal::ZERO {
            for (field, value) in optional_amounts {
                if value.is_none() {
                    return Err(EngineError::invalid_input(
                        field,
                        "is required when a special payment is made",
                    ));
                }
            }
        }

        Ok(())
    }
}

fn check_range(field: &str, value: Decimal, max: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    if value > max {
        return Err(EngineError::invalid_input(
            field,
            format!("must not exceed {}, got {}", max, value),
        ));
    }
    Ok(())
}
