//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and its associated
//! structures that capture every figure of a gross-to-net calculation. All
//! monetary amounts are rounded to cents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayrollPeriod;

/// How a special payment was taxed, chosen once per calculation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::SpecialPaymentState;
///
/// let state = SpecialPaymentState::WithinSixth;
/// assert_eq!(serde_json::to_string(&state).unwrap(), "\"within_sixth\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialPaymentState {
    /// No special payment this month.
    None,
    /// First special payment of the year.
    FirstInYear,
    /// Earlier special payments stayed below the annual sixth.
    WithinSixth,
    /// Earlier special payments already reached the annual sixth.
    SixthExhausted,
}

/// Social insurance and wage tax on the special payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialPaymentSummary {
    /// The path the payment took.
    pub state: SpecialPaymentState,
    /// The special payment paid this month.
    pub amount: Decimal,
    /// Employee SV on the payment.
    pub social_insurance: Decimal,
    /// Employer SV on the payment.
    pub employer_social_insurance: Decimal,
    /// Wage tax at the special-payment rates.
    pub tax: Decimal,
    /// Part of the payment that was taxed with the regular wage instead.
    pub taxed_as_regular_income: Decimal,
    /// What the employee keeps before regular-tariff tax on the redirected part.
    pub net_remainder: Decimal,
}

/// Wage tax credits actually applied, after flooring at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedCredits {
    /// Family bonus.
    pub family_bonus: Decimal,
    /// Commuter euro.
    pub commuter_euro: Decimal,
    /// Sole-earner / single-parent credit.
    pub sole_earner: Decimal,
}

/// Employer-side levies on top of the wage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerCosts {
    /// Base for municipal tax and the family-burden levies.
    pub employer_base: Decimal,
    /// Municipal tax.
    pub municipal_tax: Decimal,
    /// Family-burden equalisation levy.
    pub family_burden_levy: Decimal,
    /// Surcharge on the family-burden levy.
    pub family_burden_surcharge: Decimal,
    /// Employee provision-fund contribution.
    pub provision_fund: Decimal,
    /// Mondays in the payroll month.
    pub mondays: u32,
    /// Vienna employer levy.
    pub vienna_levy: Decimal,
}

/// The complete result of a gross-to-net calculation.
///
/// `net_pay` always equals `gross_wage - employee_social_insurance -
/// wage_tax` to the cent. When part of a special payment is taxed as regular
/// income, that tax lands in `wage_tax` while the payment itself stays in the
/// special payment summary, so `net_pay` can be negative.
/// `total_net_payout` is the amount actually paid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The month that was calculated.
    pub period: PayrollPeriod,
    /// Base salary plus additional hours and overtime.
    pub regular_wage: Decimal,
    /// Regular wage plus daily allowance and travel reimbursement.
    pub gross_wage: Decimal,
    /// SV contribution base (regular wage plus non-cash benefit, uncapped).
    pub social_insurance_base: Decimal,
    /// Employee SV on the current month.
    pub employee_social_insurance: Decimal,
    /// Employer SV on the current month.
    pub employer_social_insurance: Decimal,
    /// Overtime surcharges left out of the wage-tax base.
    pub tax_free_overtime_surcharge: Decimal,
    /// Union dues deducted from the wage-tax base.
    pub union_dues: Decimal,
    /// Base of the progressive wage tax.
    pub wage_tax_base: Decimal,
    /// Progressive wage tax before credits.
    pub wage_tax_before_credits: Decimal,
    /// Credits subtracted from the wage tax.
    pub credits: AppliedCredits,
    /// Wage tax withheld from the regular wage.
    pub wage_tax: Decimal,
    /// Regular net pay; negative when redirected special-payment tax exceeds it.
    pub net_pay: Decimal,
    /// Special payment figures.
    pub special_payment: SpecialPaymentSummary,
    /// Net pay plus the special payment's net remainder.
    pub total_net_payout: Decimal,
    /// Employer levies.
    pub employer_costs: EmployerCosts,
    /// Gross wage, special payment, employer SV and all levies.
    pub total_employer_cost: Decimal,
}
