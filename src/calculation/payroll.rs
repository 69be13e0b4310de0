//! The gross-to-net pipeline.
//!
//! Runs every stage once, in order: wage aggregation, social insurance,
//! wage-tax base, special payment, progressive tax and employer levies.
//! Reported figures are rounded to cents at the end; net pay is derived from
//! the rounded components so it always reconciles to the cent.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxYearConstants;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AppliedCredits, EmployerCosts, PayrollInput, PayrollResult, SpecialPaymentSummary,
};

use super::{
    aggregate_wage, calculate_employer_costs, calculate_social_insurance, calculate_special_payment,
    calculate_wage_tax, calculate_wage_tax_base, round_to_cents,
};

/// Computes a complete monthly payroll.
///
/// # Arguments
///
/// * `input` - The payroll input for one employee and month
/// * `constants` - The tax year table for `input.period.year`
///
/// # Errors
///
/// - [`EngineError::InvalidInput`] when the input fails validation
/// - [`EngineError::ConfigurationMissing`] when `constants` belongs to another year
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_payroll;
/// use payroll_engine::config::TaxYearConstants;
/// use payroll_engine::models::{PayrollInput, PayrollPeriod};
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput::new(
///     PayrollPeriod { month: 1, year: 2025 },
///     Decimal::new(385, 1),
///     Decimal::new(2000, 0),
/// );
///
/// let result = compute_payroll(&input, &TaxYearConstants::austria_2025()).unwrap();
/// assert_eq!(result.net_pay, Decimal::new(162266, 2));
/// ```
pub fn compute_payroll(
    input: &PayrollInput,
    constants: &TaxYearConstants,
) -> EngineResult<PayrollResult> {
    input.validate()?;

    if constants.year != input.period.year {
        return Err(EngineError::ConfigurationMissing {
            year: input.period.year,
        });
    }

    let wage = aggregate_wage(
        input.gross_base_salary,
        input.weekly_hours,
        &input.overtime,
        &constants.working_time,
    )?;
    let gross_wage = wage.regular_wage + input.daily_allowance + input.travel_reimbursement;

    let social_insurance = calculate_social_insurance(
        wage.regular_wage,
        input.non_cash_benefit,
        gross_wage,
        &constants.social_insurance,
    );

    let tax_base = calculate_wage_tax_base(
        input,
        &wage,
        gross_wage,
        social_insurance.employee,
        constants,
    );

    let special = calculate_special_payment(
        input.special_payment,
        input.prior_special_payments.unwrap_or_default(),
        input.annual_sixth.unwrap_or_default(),
        social_insurance.tier_rate,
        constants,
    );

    let wage_tax_base = tax_base.base + special.regular_base_addition;
    let wage_tax = calculate_wage_tax(
        wage_tax_base,
        input.family_bonus.as_ref(),
        input.commuter_euro,
        input.sole_earner_children,
        constants,
    );

    let employer_base = gross_wage - input.daily_allowance - input.travel_reimbursement
        + input.non_cash_benefit
        + input.special_payment;
    let employer_costs = calculate_employer_costs(
        input.period,
        employer_base,
        social_insurance.contribution_base + input.special_payment,
        &constants.employer_levies,
    )?;

    let gross_wage = round_to_cents(gross_wage);
    let employee_social_insurance = round_to_cents(social_insurance.employee);
    let employer_social_insurance = round_to_cents(social_insurance.employer);
    let wage_tax_amount = round_to_cents(wage_tax.wage_tax);
    let net_pay = gross_wage - employee_social_insurance - wage_tax_amount;

    let special_amount = round_to_cents(input.special_payment);
    let special_social_insurance = round_to_cents(special.social_insurance);
    let special_tax = round_to_cents(special.tax);
    let special_payment = SpecialPaymentSummary {
        state: special.state,
        amount: special_amount,
        social_insurance: special_social_insurance,
        employer_social_insurance: round_to_cents(special.employer_social_insurance),
        tax: special_tax,
        taxed_as_regular_income: round_to_cents(special.regular_base_addition),
        net_remainder: special_amount - special_social_insurance - special_tax,
    };

    let employer_costs = round_employer_costs(employer_costs);
    let total_employer_cost = gross_wage
        + special_payment.amount
        + employer_social_insurance
        + special_payment.employer_social_insurance
        + employer_costs.total_levies();

    let result = PayrollResult {
        period: input.period,
        regular_wage: round_to_cents(wage.regular_wage),
        gross_wage,
        social_insurance_base: round_to_cents(social_insurance.contribution_base),
        employee_social_insurance,
        employer_social_insurance,
        tax_free_overtime_surcharge: round_to_cents(tax_base.tax_free_overtime_surcharge),
        union_dues: round_to_cents(tax_base.union_dues),
        wage_tax_base: round_to_cents(wage_tax_base),
        wage_tax_before_credits: round_to_cents(wage_tax.before_credits),
        credits: AppliedCredits {
            family_bonus: round_to_cents(wage_tax.credits.family_bonus),
            commuter_euro: round_to_cents(wage_tax.credits.commuter_euro),
            sole_earner: round_to_cents(wage_tax.credits.sole_earner),
        },
        wage_tax: wage_tax_amount,
        net_pay,
        total_net_payout: net_pay + special_payment.net_remainder,
        special_payment,
        employer_costs,
        total_employer_cost,
    };

    debug!(
        month = result.period.month,
        year = result.period.year,
        gross_wage = %result.gross_wage,
        net_pay = %result.net_pay,
        bracket = wage_tax.bracket,
        "Computed payroll"
    );

    Ok(result)
}

fn round_employer_costs(costs: EmployerCosts) -> EmployerCosts {
    EmployerCosts {
        employer_base: round_to_cents(costs.employer_base),
        municipal_tax: round_to_cents(costs.municipal_tax),
        family_burden_levy: round_to_cents(costs.family_burden_levy),
        family_burden_surcharge: round_to_cents(costs.family_burden_surcharge),
        provision_fund: round_to_cents(costs.provision_fund),
        mondays: costs.mondays,
        vienna_levy: round_to_cents(costs.vienna_levy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FamilyBonusChildren, OvertimeHours, PayrollPeriod, SpecialPaymentState};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_input() -> PayrollInput {
        PayrollInput::new(
            PayrollPeriod {
                month: 1,
                year: 2025,
            },
            dec("38.5"),
            dec("2000"),
        )
    }

    fn with_special_payment(payment: &str, prior: &str, sixth: &str) -> PayrollInput {
        let mut input = create_test_input();
        input.special_payment = dec(payment);
        input.prior_special_payments = Some(dec(prior));
        input.annual_sixth = Some(dec(sixth));
        input
    }

    fn compute(input: &PayrollInput) -> PayrollResult {
        compute_payroll(input, &TaxYearConstants::austria_2025()).unwrap()
    }

    #[test]
    fn test_base_salary_january_2025() {
        let result = compute(&create_test_input());

        assert_eq!(result.gross_wage, dec("2000.00"));
        assert_eq!(result.employee_social_insurance, dec("302.40"));
        assert_eq!(result.employer_social_insurance, dec("419.60"));
        assert_eq!(result.wage_tax_base, dec("1697.60"));
        assert_eq!(result.wage_tax, dec("74.94"));
        assert_eq!(result.net_pay, dec("1622.66"));
        assert_eq!(result.special_payment.state, SpecialPaymentState::None);
        assert_eq!(result.special_payment.net_remainder, Decimal::ZERO);
        assert_eq!(result.total_net_payout, dec("1622.66"));
    }

    #[test]
    fn test_employer_costs_january_2025() {
        let result = compute(&create_test_input());
        let costs = &result.employer_costs;

        assert_eq!(costs.municipal_tax, dec("60.00"));
        assert_eq!(costs.family_burden_levy, dec("74.00"));
        assert_eq!(costs.family_burden_surcharge, dec("7.20"));
        assert_eq!(costs.provision_fund, dec("30.60"));
        assert_eq!(costs.mondays, 4);
        assert_eq!(costs.vienna_levy, dec("8.00"));
        assert_eq!(result.total_employer_cost, dec("2599.40"));
    }

    #[test]
    fn test_special_payment_within_sixth() {
        let result = compute(&with_special_payment("3000", "0", "5000"));
        let special = &result.special_payment;

        assert_eq!(special.state, SpecialPaymentState::FirstInYear);
        assert_eq!(special.social_insurance, dec("423.60"));
        assert_eq!(special.employer_social_insurance, dec("614.40"));
        assert_eq!(special.tax, dec("117.38"));
        assert_eq!(special.taxed_as_regular_income, Decimal::ZERO);
        assert_eq!(special.net_remainder, dec("2459.02"));

        // Regular pay is untouched by a payment inside the sixth
        assert_eq!(result.wage_tax, dec("74.94"));
        assert_eq!(result.net_pay, dec("1622.66"));
        assert_eq!(result.total_net_payout, dec("4081.68"));
        assert_eq!(result.total_employer_cost, dec("6471.50"));
    }

    #[test]
    fn test_special_payment_crossing_sixth_is_taxed_as_regular_income() {
        let result = compute(&with_special_payment("3000", "0", "2000"));

        assert_eq!(result.special_payment.tax, dec("65.86"));
        assert_eq!(result.special_payment.taxed_as_regular_income, dec("858.80"));
        assert_eq!(result.wage_tax_base, dec("2556.40"));
        assert_eq!(result.wage_tax, dec("321.10"));
        assert_eq!(result.net_pay, dec("1376.50"));
        assert_eq!(result.special_payment.net_remainder, dec("2510.54"));
    }

    #[test]
    fn test_exhausted_sixth_taxes_whole_payment_as_regular_income() {
        let result = compute(&with_special_payment("3000", "6000", "5000"));

        assert_eq!(result.special_payment.state, SpecialPaymentState::SixthExhausted);
        assert_eq!(result.special_payment.tax, Decimal::ZERO);
        assert_eq!(result.wage_tax_base, dec("4274.00"));
        assert_eq!(result.wage_tax, dec("964.08"));
    }

    #[test]
    fn test_net_pay_reconciles_with_overtime_and_credits() {
        let mut input = create_test_input();
        input.gross_base_salary = dec("3150.55");
        input.overtime = OvertimeHours {
            additional_25: dec("3.5"),
            overtime_50: dec("7.25"),
            overtime_100: dec("2"),
            ..OvertimeHours::default()
        };
        input.union_member = true;
        input.commuter_euro = dec("12.50");
        input.family_bonus = Some(FamilyBonusChildren {
            under_18_full: 1,
            ..FamilyBonusChildren::default()
        });

        let result = compute(&input);

        assert_eq!(
            result.net_pay,
            result.gross_wage - result.employee_social_insurance - result.wage_tax
        );
        assert_eq!(result.union_dues, dec("40.80"));
        assert!(result.tax_free_overtime_surcharge > Decimal::ZERO);
    }

    #[test]
    fn test_reimbursements_raise_gross_but_not_tax() {
        let mut input = create_test_input();
        input.daily_allowance = dec("100");
        input.travel_reimbursement = dec("50");

        let result = compute(&input);

        assert_eq!(result.gross_wage, dec("2150.00"));
        assert_eq!(result.wage_tax, dec("74.94"));
        assert_eq!(result.employer_costs.employer_base, dec("2000.00"));
        assert_eq!(result.net_pay, dec("1772.66"));
    }

    #[test]
    fn test_non_cash_benefit_below_ceiling() {
        let mut input = create_test_input();
        input.non_cash_benefit = dec("300");

        let result = compute(&input);

        // SV base 2300 falls in the 16.12% tier
        assert_eq!(result.social_insurance_base, dec("2300.00"));
        assert_eq!(result.employee_social_insurance, dec("393.76"));
        assert_eq!(result.employer_social_insurance, dec("482.54"));
        // 2000 + 300 - 393.76, taxed at 30%
        assert_eq!(result.wage_tax_base, dec("1906.24"));
        assert_eq!(result.wage_tax, dec("126.05"));
        assert_eq!(result.gross_wage, dec("2000.00"));
        assert_eq!(result.net_pay, dec("1480.19"));

        let costs = &result.employer_costs;
        assert_eq!(costs.employer_base, dec("2300.00"));
        assert_eq!(costs.municipal_tax, dec("69.00"));
        assert_eq!(costs.family_burden_levy, dec("85.10"));
        assert_eq!(costs.family_burden_surcharge, dec("8.28"));
        assert_eq!(costs.provision_fund, dec("35.19"));
        assert_eq!(result.total_employer_cost, dec("2688.11"));
    }

    #[test]
    fn test_non_cash_benefit_at_ceiling_shifts_sv_to_employer() {
        let mut input = create_test_input();
        input.gross_base_salary = dec("5000");
        input.non_cash_benefit = dec("1500");

        let result = compute(&input);

        // Tier share 6450 × 17.07% = 1101.015 exceeds 20% of 5000
        assert_eq!(result.social_insurance_base, dec("6500.00"));
        assert_eq!(result.employee_social_insurance, dec("1064.50"));
        // 6450 × 21.23% plus the shifted 101.015
        assert_eq!(result.employer_social_insurance, dec("1470.35"));
        assert_eq!(result.wage_tax_base, dec("5435.50"));
        assert_eq!(result.wage_tax, dec("1428.68"));
        assert_eq!(result.net_pay, dec("2506.82"));

        let costs = &result.employer_costs;
        assert_eq!(costs.employer_base, dec("6500.00"));
        assert_eq!(costs.provision_fund, dec("99.45"));
        assert_eq!(result.total_employer_cost, dec("7036.70"));
    }

    #[test]
    fn test_large_bonus_after_exhausted_sixth_can_make_regular_net_negative() {
        let result = compute(&with_special_payment("20000", "6000", "5000"));

        assert_eq!(result.special_payment.state, SpecialPaymentState::SixthExhausted);
        assert_eq!(result.wage_tax, dec("8982.11"));
        assert_eq!(result.net_pay, dec("-7284.51"));
        assert_eq!(
            result.net_pay,
            result.gross_wage - result.employee_social_insurance - result.wage_tax
        );
        assert_eq!(result.special_payment.net_remainder, dec("19025.72"));
        assert_eq!(result.total_net_payout, dec("11741.21"));
    }

    #[test]
    fn test_amount_beyond_limit_is_rejected_instead_of_overflowing() {
        let mut input = create_test_input();
        input.gross_base_salary = Decimal::MAX;
        input.daily_allowance = Decimal::ONE;

        let result = compute_payroll(&input, &TaxYearConstants::austria_2025());

        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { ref field, .. }) if field == "gross_base_salary"
        ));
    }

    #[test]
    fn test_largest_accepted_input_computes() {
        use crate::models::{MAX_AMOUNT, MAX_MONTHLY_HOURS, MIN_WEEKLY_HOURS};

        let mut input = with_special_payment("0", "0", "0");
        input.weekly_hours = MIN_WEEKLY_HOURS;
        input.gross_base_salary = MAX_AMOUNT;
        input.special_payment = MAX_AMOUNT;
        input.prior_special_payments = Some(MAX_AMOUNT);
        input.annual_sixth = Some(MAX_AMOUNT);
        input.non_cash_benefit = MAX_AMOUNT;
        input.daily_allowance = MAX_AMOUNT;
        input.travel_reimbursement = MAX_AMOUNT;
        input.commuter_euro = MAX_AMOUNT;
        input.union_member = true;
        input.overtime = OvertimeHours {
            additional_0: MAX_MONTHLY_HOURS,
            additional_25: MAX_MONTHLY_HOURS,
            additional_50: MAX_MONTHLY_HOURS,
            overtime_50: MAX_MONTHLY_HOURS,
            overtime_100: MAX_MONTHLY_HOURS,
        };

        let result = compute(&input);

        assert!(result.gross_wage > MAX_AMOUNT);
        assert_eq!(
            result.net_pay,
            result.gross_wage - result.employee_social_insurance - result.wage_tax
        );
    }

    #[test]
    fn test_constants_for_another_year_are_rejected() {
        let mut input = create_test_input();
        input.period.year = 2026;

        let result = compute_payroll(&input, &TaxYearConstants::austria_2025());

        assert!(matches!(
            result,
            Err(EngineError::ConfigurationMissing { year: 2026 })
        ));
    }

    #[test]
    fn test_invalid_input_is_rejected_before_calculation() {
        let mut input = create_test_input();
        input.special_payment = dec("1000");

        let result = compute_payroll(&input, &TaxYearConstants::austria_2025());

        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { ref field, .. }) if field == "prior_special_payments"
        ));
    }

    #[test]
    fn test_identical_inputs_yield_identical_results() {
        let input = with_special_payment("1500", "500", "4000");

        assert_eq!(compute(&input), compute(&input));
    }
}
