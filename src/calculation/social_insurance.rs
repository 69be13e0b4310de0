//! Social insurance (SV) contributions on the current month's wage.
//!
//! ## Rate Structure
//!
//! - The employee tier rate is chosen by comparing the contribution base
//!   against ascending thresholds (exclusive upper bounds); the chamber and
//!   housing levies are added on top.
//! - A base at or above the monthly ceiling contributes on the ceiling only,
//!   and the employer pays the blended ceiling rate.
//! - With a non-cash benefit the employee never pays more tier contribution
//!   than a fixed share of the gross wage; the rest moves to the employer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SocialInsuranceRates;

/// The result of the SV calculation for the current month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialInsuranceResult {
    /// Regular wage plus non-cash benefit, before capping.
    pub contribution_base: Decimal,
    /// The base contributions are charged on.
    pub capped_base: Decimal,
    /// Employee tier rate without levies.
    pub tier_rate: Decimal,
    /// Whether the ceiling branch applied.
    pub at_ceiling: bool,
    /// Employee contribution.
    pub employee: Decimal,
    /// Employer contribution, including any benefit-in-kind shift.
    pub employer: Decimal,
    /// Amount moved from employee to employer by the benefit-in-kind rule.
    pub shifted_to_employer: Decimal,
}

/// Calculates employee and employer SV for the current month.
///
/// # Arguments
///
/// * `regular_wage` - Salary plus additional hours and overtime
/// * `non_cash_benefit` - Value of benefits in kind
/// * `gross_wage` - Regular wage plus reimbursements; its share caps the
///   employee's tier contribution when a benefit in kind is present
/// * `rates` - SV rates of the tax year
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_social_insurance;
/// use payroll_engine::config::TaxYearConstants;
/// use rust_decimal::Decimal;
///
/// let rates = TaxYearConstants::austria_2025().social_insurance;
/// let sv = calculate_social_insurance(
///     Decimal::new(2000, 0),
///     Decimal::ZERO,
///     Decimal::new(2000, 0),
///     &rates,
/// );
///
/// // Lowest tier: 14.12% plus 1% levies
/// assert_eq!(sv.employee, Decimal::new(30240, 2));
/// ```
pub fn calculate_social_insurance(
    regular_wage: Decimal,
    non_cash_benefit: Decimal,
    gross_wage: Decimal,
    rates: &SocialInsuranceRates,
) -> SocialInsuranceResult {
    let contribution_base = regular_wage + non_cash_benefit;
    let tier_rate = rates.employee_tier_rate(contribution_base);
    let levy_rate = rates.chamber_levy_rate + rates.employee_housing_levy_rate;

    let at_ceiling = contribution_base >= rates.monthly_ceiling;
    let capped_base = contribution_base.min(rates.monthly_ceiling);

    let mut employee = capped_base * (tier_rate + levy_rate);
    let mut employer = if at_ceiling {
        capped_base * rates.employer_ceiling_rate
    } else {
        capped_base
            * (rates.employer_rate + rates.employer_insolvency_rate + rates.employer_housing_levy_rate)
    };

    let mut shifted_to_employer = Decimal::ZERO;
    if non_cash_benefit > Decimal::ZERO {
        let wage_share = gross_wage * rates.benefit_in_kind_wage_share;
        let tier_contribution = capped_base * tier_rate;

        if tier_contribution > wage_share {
            shifted_to_employer = tier_contribution - wage_share;
            employer += shifted_to_employer;
            employee = wage_share + capped_base * levy_rate;
        }
    }

    debug!(
        %contribution_base,
        %tier_rate,
        at_ceiling,
        %shifted_to_employer,
        "Calculated social insurance"
    );

    SocialInsuranceResult {
        contribution_base,
        capped_base,
        tier_rate,
        at_ceiling,
        employee,
        employer,
        shifted_to_employer,
    }
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

    fn rates() -> SocialInsuranceRates {
        TaxYearConstants::austria_2025().social_insurance
    }

    fn for_wage(wage: &str) -> SocialInsuranceResult {
        calculate_social_insurance(dec(wage), Decimal::ZERO, dec(wage), &rates())
    }

    #[test]
    fn test_lowest_tier() {
        let sv = for_wage("2000");

        assert_eq!(sv.tier_rate, dec("0.1412"));
        assert_eq!(sv.employee, dec("302.40"));
        assert_eq!(sv.employer, dec("419.60"));
        assert!(!sv.at_ceiling);
    }

    #[test]
    fn test_threshold_value_uses_next_tier() {
        let sv = for_wage("2074");

        assert_eq!(sv.tier_rate, dec("0.1512"));
        assert_eq!(sv.employee, dec("334.3288"));
    }

    #[test]
    fn test_top_tier_below_ceiling() {
        let sv = for_wage("3000");

        assert_eq!(sv.tier_rate, dec("0.1707"));
        assert_eq!(sv.employee, dec("542.10"));
        assert_eq!(sv.employer, dec("629.40"));
    }

    #[test]
    fn test_above_ceiling_caps_both_sides() {
        let sv = for_wage("7000");

        assert!(sv.at_ceiling);
        assert_eq!(sv.capped_base, dec("6450"));
        assert_eq!(sv.contribution_base, dec("7000"));
        assert_eq!(round_to_cents(sv.employee), dec("1165.52"));
        assert_eq!(round_to_cents(sv.employer), dec("1369.34"));
    }

    #[test]
    fn test_exactly_at_ceiling_uses_ceiling_branch() {
        let sv = for_wage("6450");

        assert!(sv.at_ceiling);
        assert_eq!(sv.employer, dec("6450") * dec("0.2123"));
        assert_eq!(sv.employee, for_wage("9000").employee);
    }

    #[test]
    fn test_benefit_in_kind_shifts_excess_to_employer() {
        // Base 800, tier contribution 112.96 exceeds 20% of a 500 wage
        let sv = calculate_social_insurance(dec("500"), dec("300"), dec("500"), &rates());

        assert_eq!(sv.contribution_base, dec("800"));
        assert_eq!(sv.shifted_to_employer, dec("12.96"));
        assert_eq!(sv.employee, dec("108.00"));
        assert_eq!(sv.employer, dec("180.80"));
    }

    #[test]
    fn test_small_benefit_in_kind_keeps_regular_split() {
        let sv = calculate_social_insurance(dec("2000"), dec("50"), dec("2000"), &rates());

        assert_eq!(sv.shifted_to_employer, Decimal::ZERO);
        assert_eq!(sv.employee, dec("2050") * dec("0.1512"));
    }

    #[test]
    fn test_employee_contribution_constant_above_ceiling() {
        assert_eq!(for_wage("6500").employee, for_wage("12000").employee);
    }
}
