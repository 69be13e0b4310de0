//! Progressive wage tax and tax credits.
//!
//! ## Tariff
//!
//! Each bracket taxes the whole monthly base as `base × rate − deduction`;
//! the deductions make the tariff continuous at the bracket boundaries.
//! Brackets with a non-zero rate also subtract the transport credit. The
//! result is floored at zero before any credit is applied.
//!
//! ## Credits
//!
//! Family bonus, commuter euro and sole-earner credit are subtracted in that
//! order, each step floored at zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{FamilyBonusRates, SoleEarnerCredit, TaxYearConstants, WageTaxTariff};
use crate::models::{AppliedCredits, FamilyBonusChildren};

/// The result of the progressive wage-tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageTaxResult {
    /// One-based number of the bracket the base fell into.
    pub bracket: usize,
    /// Tax from the tariff, floored at zero.
    pub before_credits: Decimal,
    /// Credits actually subtracted.
    pub credits: AppliedCredits,
    /// Wage tax after credits.
    pub wage_tax: Decimal,
}

/// Applies the bracket tariff to a monthly base.
///
/// Returns the one-based bracket number and the tax, floored at zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::tariff_tax;
/// use payroll_engine::config::TaxYearConstants;
/// use rust_decimal::Decimal;
///
/// let tariff = TaxYearConstants::austria_2025().wage_tax;
///
/// let (bracket, tax) = tariff_tax(Decimal::new(1000, 0), &tariff);
/// assert_eq!(bracket, 1);
/// assert_eq!(tax, Decimal::ZERO);
/// ```
pub fn tariff_tax(base: Decimal, tariff: &WageTaxTariff) -> (usize, Decimal) {
    let index = tariff
        .brackets
        .iter()
        .position(|bracket| bracket.below.is_none_or(|below| base < below))
        .unwrap_or(tariff.brackets.len().saturating_sub(1));

    let Some(bracket) = tariff.brackets.get(index) else {
        return (0, Decimal::ZERO);
    };

    let transport_credit = if bracket.rate.is_zero() {
        Decimal::ZERO
    } else {
        tariff.transport_credit
    };

    let tax = base * bracket.rate - bracket.deduction - transport_credit;
    (index + 1, tax.max(Decimal::ZERO))
}

/// Returns the monthly family bonus for the claimed children.
pub fn family_bonus_amount(children: Option<&FamilyBonusChildren>, rates: &FamilyBonusRates) -> Decimal {
    let Some(children) = children else {
        return Decimal::ZERO;
    };

    Decimal::from(children.under_18_full) * rates.under_18_full
        + Decimal::from(children.under_18_half) * rates.under_18_half
        + Decimal::from(children.over_18_full) * rates.over_18_full
        + Decimal::from(children.over_18_half) * rates.over_18_half
}

/// Returns the monthly sole-earner / single-parent credit.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::sole_earner_credit_amount;
/// use payroll_engine::config::TaxYearConstants;
/// use rust_decimal::Decimal;
///
/// let credit = TaxYearConstants::austria_2025().sole_earner_credit;
/// assert_eq!(sole_earner_credit_amount(0, &credit), Decimal::ZERO);
/// assert_eq!(sole_earner_credit_amount(3, &credit), Decimal::new(9008, 2));
/// ```
pub fn sole_earner_credit_amount(children: u32, credit: &SoleEarnerCredit) -> Decimal {
    match children {
        0 => Decimal::ZERO,
        1 => credit.one_child,
        n => credit.two_children + Decimal::from(n - 2) * credit.per_additional_child,
    }
}

/// Calculates the wage tax for a monthly base, including credits.
///
/// # Arguments
///
/// * `base` - The wage-tax base, including any special-payment excess
/// * `family_bonus` - Children the family bonus is claimed for, if any
/// * `commuter_euro` - Monthly commuter euro
/// * `sole_earner_children` - Children counted for the sole-earner credit
/// * `constants` - The tax year table
pub fn calculate_wage_tax(
    base: Decimal,
    family_bonus: Option<&FamilyBonusChildren>,
    commuter_euro: Decimal,
    sole_earner_children: u32,
    constants: &TaxYearConstants,
) -> WageTaxResult {
    let (bracket, before_credits) = tariff_tax(base, &constants.wage_tax);

    let mut remaining = before_credits;
    let mut apply = |credit: Decimal| {
        let applied = credit.min(remaining);
        remaining -= applied;
        applied
    };

    let credits = AppliedCredits {
        family_bonus: apply(family_bonus_amount(family_bonus, &constants.family_bonus)),
        commuter_euro: apply(commuter_euro),
        sole_earner: apply(sole_earner_credit_amount(
            sole_earner_children,
            &constants.sole_earner_credit,
        )),
    };

    debug!(%base, bracket, %before_credits, wage_tax = %remaining, "Calculated wage tax");

    WageTaxResult {
        bracket,
        before_credits,
        credits,
        wage_tax: remaining,
    }
}
