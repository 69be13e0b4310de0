//! Special payments (13th/14th salary) and the annual sixth.
//!
//! ## States
//!
//! The path a payment takes is selected once, from the payment itself, the
//! special payments already taxed this year and the annual sixth:
//!
//! | State            | Condition                         |
//! |------------------|-----------------------------------|
//! | `None`           | no payment this month             |
//! | `FirstInYear`    | payment, nothing paid before      |
//! | `WithinSixth`    | earlier payments below the sixth  |
//! | `SixthExhausted` | earlier payments reached the sixth|
//!
//! ## Taxation
//!
//! SV is charged at the regular tier rate on the part of the payment that
//! still fits under twice the monthly ceiling. The part of the payment that
//! fits under the remaining sixth is taxed in the special-payment bands,
//! continuing from the band position the earlier payments already used.
//! Everything else, less its SV share, is added to the regular wage-tax base.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{SocialInsuranceRates, SpecialPaymentTariff, TaxYearConstants};
use crate::models::SpecialPaymentState;

/// Unrounded figures of the special payment calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialPaymentOutcome {
    /// The selected state.
    pub state: SpecialPaymentState,
    /// Part of the payment that is SV-liable.
    pub sv_eligible: Decimal,
    /// Employee SV on the payment.
    pub social_insurance: Decimal,
    /// Employer SV on the payment.
    pub employer_social_insurance: Decimal,
    /// Tax at the special-payment rates.
    pub tax: Decimal,
    /// Amount to add to the regular wage-tax base.
    pub regular_base_addition: Decimal,
}

impl SpecialPaymentOutcome {
    /// What the employee keeps of the payment before the regular tariff
    /// taxes the redirected part.
    pub fn net_remainder(&self, amount: Decimal) -> Decimal {
        amount - self.social_insurance - self.tax
    }
}

/// Selects how a special payment is taxed.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::select_special_payment_state;
/// use payroll_engine::models::SpecialPaymentState;
/// use rust_decimal::Decimal;
///
/// let state = select_special_payment_state(
///     Decimal::new(3000, 0),
///     Decimal::new(6000, 0),
///     Decimal::new(5000, 0),
/// );
/// assert_eq!(state, SpecialPaymentState::SixthExhausted);
/// ```
pub fn select_special_payment_state(
    payment: Decimal,
    prior_payments: Decimal,
    annual_sixth: Decimal,
) -> SpecialPaymentState {
    if payment <= Decimal::ZERO {
        SpecialPaymentState::None
    } else if prior_payments <= Decimal::ZERO {
        SpecialPaymentState::FirstInYear
    } else if prior_payments < annual_sixth {
        SpecialPaymentState::WithinSixth
    } else {
        SpecialPaymentState::SixthExhausted
    }
}

/// Calculates SV and tax on a special payment.
///
/// # Arguments
///
/// * `payment` - The special payment paid this month
/// * `prior_payments` - Special payments already taxed this year
/// * `annual_sixth` - One sixth of the year-to-date regular gross
/// * `regular_tier_rate` - Employee SV tier rate of the regular contribution base
/// * `constants` - The tax year table
pub fn calculate_special_payment(
    payment: Decimal,
    prior_payments: Decimal,
    annual_sixth: Decimal,
    regular_tier_rate: Decimal,
    constants: &TaxYearConstants,
) -> SpecialPaymentOutcome {
    let state = select_special_payment_state(payment, prior_payments, annual_sixth);

    let outcome = match state {
        SpecialPaymentState::None => no_special_payment(),
        SpecialPaymentState::FirstInYear => {
            first_in_year(payment, annual_sixth, regular_tier_rate, constants)
        }
        SpecialPaymentState::WithinSixth => within_sixth(
            payment,
            prior_payments,
            annual_sixth,
            regular_tier_rate,
            constants,
        ),
        SpecialPaymentState::SixthExhausted => {
            sixth_exhausted(payment, prior_payments, regular_tier_rate, constants)
        }
    };

    debug!(
        state = ?outcome.state,
        %payment,
        tax = %outcome.tax,
        regular_base_addition = %outcome.regular_base_addition,
        "Calculated special payment"
    );

    outcome
}

/// State (a): all special-payment figures are zero.
pub fn no_special_payment() -> SpecialPaymentOutcome {
    SpecialPaymentOutcome {
        state: SpecialPaymentState::None,
        sv_eligible: Decimal::ZERO,
        social_insurance: Decimal::ZERO,
        employer_social_insurance: Decimal::ZERO,
        tax: Decimal::ZERO,
        regular_base_addition: Decimal::ZERO,
    }
}

/// State (b): the first special payment of the year.
pub fn first_in_year(
    payment: Decimal,
    annual_sixth: Decimal,
    regular_tier_rate: Decimal,
    constants: &TaxYearConstants,
) -> SpecialPaymentOutcome {
    split_at_sixth(
        SpecialPaymentState::FirstInYear,
        payment,
        Decimal::ZERO,
        annual_sixth,
        regular_tier_rate,
        constants,
    )
}

/// State (c): earlier payments left part of the annual sixth unused.
pub fn within_sixth(
    payment: Decimal,
    prior_payments: Decimal,
    annual_sixth: Decimal,
    regular_tier_rate: Decimal,
    constants: &TaxYearConstants,
) -> SpecialPaymentOutcome {
    split_at_sixth(
        SpecialPaymentState::WithinSixth,
        payment,
        prior_payments,
        annual_sixth,
        regular_tier_rate,
        constants,
    )
}

/// State (d): the annual sixth is used up, the payment after SV is regular income.
pub fn sixth_exhausted(
    payment: Decimal,
    prior_payments: Decimal,
    regular_tier_rate: Decimal,
    constants: &TaxYearConstants,
) -> SpecialPaymentOutcome {
    let (sv_eligible, social_insurance, employer_social_insurance) = special_social_insurance(
        payment,
        prior_payments,
        regular_tier_rate,
        &constants.social_insurance,
    );

    SpecialPaymentOutcome {
        state: SpecialPaymentState::SixthExhausted,
        sv_eligible,
        social_insurance,
        employer_social_insurance,
        tax: Decimal::ZERO,
        regular_base_addition: payment - social_insurance,
    }
}

/// SV-liable amount, employee SV and employer SV on a special payment.
fn special_social_insurance(
    payment: Decimal,
    prior_payments: Decimal,
    regular_tier_rate: Decimal,
    rates: &SocialInsuranceRates,
) -> (Decimal, Decimal, Decimal) {
    let headroom = (rates.annual_special_payment_ceiling() - prior_payments).max(Decimal::ZERO);
    let sv_eligible = payment.min(headroom);

    (
        sv_eligible,
        sv_eligible * regular_tier_rate,
        sv_eligible * (rates.employer_rate + rates.employer_insolvency_rate),
    )
}

fn split_at_sixth(
    state: SpecialPaymentState,
    payment: Decimal,
    prior_payments: Decimal,
    annual_sixth: Decimal,
    regular_tier_rate: Decimal,
    constants: &TaxYearConstants,
) -> SpecialPaymentOutcome {
    let (sv_eligible, social_insurance, employer_social_insurance) = special_social_insurance(
        payment,
        prior_payments,
        regular_tier_rate,
        &constants.social_insurance,
    );

    let within = payment.min((annual_sixth - prior_payments).max(Decimal::ZERO));
    let sv_within = (within * regular_tier_rate).min(social_insurance);
    let sv_excess = social_insurance - sv_within;

    // Earlier payments only carried SV up to the annual special-payment ceiling.
    let prior_sv = prior_payments.min(constants.social_insurance.annual_special_payment_ceiling())
        * regular_tier_rate;
    let prior_net = prior_payments - prior_sv;
    let (tax, overflow) = banded_special_tax(prior_net, within - sv_within, &constants.special_payment);

    SpecialPaymentOutcome {
        state,
        sv_eligible,
        social_insurance,
        employer_social_insurance,
        tax,
        regular_base_addition: payment - within - sv_excess + overflow,
    }
}

/// Tax on `net` in the special-payment bands, continuing after `already_taxed`.
///
/// Returns the tax and the part of `net` that lies beyond the last band.
pub fn banded_special_tax(
    already_taxed: Decimal,
    net: Decimal,
    tariff: &SpecialPaymentTariff,
) -> (Decimal, Decimal) {
    let (tax_before, overflow_before) = cumulative_band_tax(already_taxed, tariff);
    let (tax_after, overflow_after) = cumulative_band_tax(already_taxed + net, tariff);

    (tax_after - tax_before, overflow_after - overflow_before)
}

fn cumulative_band_tax(total: Decimal, tariff: &SpecialPaymentTariff) -> (Decimal, Decimal) {
    let taxable = (total - tariff.tax_free_allowance).max(Decimal::ZERO);

    let mut lower = Decimal::ZERO;
    let mut tax = Decimal::ZERO;
    for band in &tariff.bands {
        let portion = (taxable.min(band.up_to) - lower).max(Decimal::ZERO);
        tax += portion * band.rate;
        lower = band.up_to;
    }

    (tax, (taxable - lower).max(Decimal::ZERO))
}
