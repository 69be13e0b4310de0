//! Plain-text payslip rendering.
//!
//! The payslip only reads a finished [`PayrollResult`]; nothing here feeds
//! back into the calculation.

use std::fmt;

use rust_decimal::Decimal;

use crate::models::{PayrollResult, SpecialPaymentState};

const RULE: &str =
    "================================================================================";

/// Renders a payroll result as a plain-text payslip.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_payroll;
/// use payroll_engine::config::TaxYearConstants;
/// use payroll_engine::models::{PayrollInput, PayrollPeriod};
/// use payroll_engine::payslip::format_payslip;
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput::new(
///     PayrollPeriod { month: 1, year: 2025 },
///     Decimal::new(385, 1),
///     Decimal::new(2000, 0),
/// );
/// let result = compute_payroll(&input, &TaxYearConstants::austria_2025()).unwrap();
///
/// let payslip = format_payslip(&result);
/// assert!(payslip.contains("Net pay: 1622.66 EUR"));
/// ```
pub fn format_payslip(result: &PayrollResult) -> String {
    Payslip(result).to_string()
}

/// [`fmt::Display`] adapter that renders a payslip.
pub struct Payslip<'a>(pub &'a PayrollResult);

fn eur(amount: Decimal) -> String {
    format!("{:.2} EUR", amount)
}

impl fmt::Display for Payslip<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        let special = &r.special_payment;
        let costs = &r.employer_costs;

        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "  Payroll {:02}/{}    Net pay: {}",
            r.period.month,
            r.period.year,
            eur(r.net_pay)
        )?;
        writeln!(f, "{}", RULE)?;
        writeln!(f)?;

        writeln!(
            f,
            "Gross wage: {}    Regular wage: {}",
            eur(r.gross_wage),
            eur(r.regular_wage)
        )?;
        writeln!(
            f,
            "SV base: {}    SV employee: {}",
            eur(r.social_insurance_base),
            eur(r.employee_social_insurance)
        )?;
        writeln!(
            f,
            "Wage tax base: {}    Wage tax: {}",
            eur(r.wage_tax_base),
            eur(r.wage_tax)
        )?;

        let credits = &r.credits;
        if !(credits.family_bonus.is_zero()
            && credits.commuter_euro.is_zero()
            && credits.sole_earner.is_zero())
        {
            writeln!(
                f,
                "Credits: family bonus {}    commuter euro {}    sole earner {}",
                eur(credits.family_bonus),
                eur(credits.commuter_euro),
                eur(credits.sole_earner)
            )?;
        }
        if !r.union_dues.is_zero() {
            writeln!(f, "Union dues: {}", eur(r.union_dues))?;
        }
        writeln!(f)?;

        if special.state != SpecialPaymentState::None {
            writeln!(
                f,
                "Special payment: {}    Net remainder: {}",
                eur(special.amount),
                eur(special.net_remainder)
            )?;
            writeln!(
                f,
                "SV special payment: {}    Wage tax special payment: {}",
                eur(special.social_insurance),
                eur(special.tax)
            )?;
            if !special.taxed_as_regular_income.is_zero() {
                writeln!(
                    f,
                    "Taxed as regular income: {}",
                    eur(special.taxed_as_regular_income)
                )?;
            }
            writeln!(f, "Total net payout: {}", eur(r.total_net_payout))?;
            writeln!(f)?;
        }

        writeln!(f, "Employer costs")?;
        writeln!(
            f,
            "Municipal tax: {}    Vienna levy: {} ({} Mondays)",
            eur(costs.municipal_tax),
            eur(costs.vienna_levy),
            costs.mondays
        )?;
        writeln!(
            f,
            "Family burden levy: {}    Surcharge: {}",
            eur(costs.family_burden_levy),
            eur(costs.family_burden_surcharge)
        )?;
        writeln!(
            f,
            "SV employer: {}    Provision fund: {}",
            eur(r.employer_social_insurance + special.employer_social_insurance),
            eur(costs.provision_fund)
        )?;
        write!(f, "Total employer cost: {}", eur(r.total_employer_cost))
    }
}
