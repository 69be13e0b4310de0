//! Wage-tax base for the current month.
//!
//! The base starts from the gross wage plus non-cash benefit and subtracts
//! employee SV, allowances, union dues, reimbursed expenses and the tax-free
//! part of overtime surcharges. It is not floored at zero: a negative base
//! simply lands in the untaxed first bracket.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{OvertimeExemption, TaxYearConstants, UnionDues};
use crate::models::PayrollInput;

use super::WageAggregation;

/// The wage-tax base and the deductions that went into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageTaxBaseResult {
    /// The base before any special-payment amount is folded in.
    pub base: Decimal,
    /// Overtime surcharges left untaxed.
    pub tax_free_overtime_surcharge: Decimal,
    /// Union dues deducted.
    pub union_dues: Decimal,
}

/// Returns the tax-free part of the 50% and 100% overtime surcharges.
///
/// The 50% surcharge is exempt for a limited number of hours (pro rata when
/// more hours were worked) and up to a monthly amount; the 100% surcharge has
/// its own monthly cap.
pub fn tax_free_overtime_surcharge(wage: &WageAggregation, exemption: &OvertimeExemption) -> Decimal {
    let mut surcharge_50 = wage.overtime_50_surcharge;
    if wage.overtime_50_hours > exemption.surcharge_50_max_hours {
        surcharge_50 = surcharge_50 * exemption.surcharge_50_max_hours / wage.overtime_50_hours;
    }
    let surcharge_50 = surcharge_50.min(exemption.surcharge_50_max_amount);
    let surcharge_100 = wage
        .overtime_100_surcharge
        .min(exemption.surcharge_100_max_amount);

    surcharge_50 + surcharge_100
}

/// Returns the union dues for a member, a capped share of the gross wage.
pub fn union_dues(gross_wage: Decimal, union_member: bool, dues: &UnionDues) -> Decimal {
    if !union_member {
        return Decimal::ZERO;
    }
    (gross_wage * dues.rate).min(dues.monthly_cap)
}

/// Calculates the wage-tax base for the current month.
///
/// # Arguments
///
/// * `input` - The validated payroll input
/// * `wage` - The aggregated wage
/// * `gross_wage` - Regular wage plus daily allowance and travel reimbursement
/// * `employee_social_insurance` - Employee SV of the current month
/// * `constants` - The tax year table
pub fn calculate_wage_tax_base(
    input: &PayrollInput,
    wage: &WageAggregation,
    gross_wage: Decimal,
    employee_social_insurance: Decimal,
    constants: &TaxYearConstants,
) -> WageTaxBaseResult {
    let tax_free_overtime_surcharge = tax_free_overtime_surcharge(wage, &constants.overtime_exemption);
    let union_dues = union_dues(gross_wage, input.union_member, &constants.union_dues);

    let base = gross_wage + input.non_cash_benefit
        - employee_social_insurance
        - input.tax_free_allowance_notice
        - input.commuter_allowance
        - union_dues
        - input.daily_allowance
        - input.travel_reimbursement
        - tax_free_overtime_surcharge;

    WageTaxBaseResult {
        base,
        tax_free_overtime_surcharge,
        union_dues,
    }
}
