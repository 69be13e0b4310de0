//! Configuration types for one tax year.
//!
//! This module contains the strongly-typed tables that are deserialized from
//! the YAML files under `config/tax_years/`. A table is never mutated after
//! it has been loaded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employee social-insurance rate tier.
///
/// The tier applies to contribution bases strictly below `below`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionTier {
    /// Exclusive upper bound of the contribution base for this tier.
    pub below: Decimal,
    /// The employee rate for this tier, without chamber and housing levies.
    pub rate: Decimal,
}

/// Social-insurance (SV) rates and thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialInsuranceRates {
    /// Ascending employee rate tiers.
    pub employee_tiers: Vec<ContributionTier>,
    /// Employee rate for bases at or above the last tier threshold.
    pub employee_top_rate: Decimal,
    /// Employee chamber-of-labour levy rate.
    pub chamber_levy_rate: Decimal,
    /// Employee housing-subsidy levy rate.
    pub employee_housing_levy_rate: Decimal,
    /// Employer contribution rate.
    pub employer_rate: Decimal,
    /// Employer insolvency-fund levy rate.
    pub employer_insolvency_rate: Decimal,
    /// Employer housing-subsidy levy rate.
    pub employer_housing_levy_rate: Decimal,
    /// Blended employer rate applied once the base reaches the ceiling.
    pub employer_ceiling_rate: Decimal,
    /// Monthly contribution ceiling.
    pub monthly_ceiling: Decimal,
    /// Share of the gross wage an employee pays at most on a non-cash benefit.
    pub benefit_in_kind_wage_share: Decimal,
}

impl SocialInsuranceRates {
    /// Returns the employee tier rate for a contribution base.
    ///
    /// Tier bounds are exclusive, so a base equal to a threshold falls into
    /// the next tier.
    pub fn employee_tier_rate(&self, base: Decimal) -> Decimal {
        self.employee_tiers
            .iter()
            .find(|tier| base < tier.below)
            .map(|tier| tier.rate)
            .unwrap_or(self.employee_top_rate)
    }

    /// Returns the highest employee rate including the levies.
    pub fn highest_employee_rate(&self) -> Decimal {
        let top_tier = self
            .employee_tiers
            .iter()
            .map(|tier| tier.rate)
            .fold(self.employee_top_rate, Decimal::max);
        top_tier + self.chamber_levy_rate + self.employee_housing_levy_rate
    }

    /// Annual ceiling on SV-liable special payments.
    pub fn annual_special_payment_ceiling(&self) -> Decimal {
        self.monthly_ceiling * Decimal::TWO
    }
}

/// Conversion constants for additional hours and overtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingTime {
    /// Weeks per month used for the additional-hour factor.
    pub weeks_per_month: Decimal,
    /// Monthly divisor for the overtime hourly wage at standard hours.
    pub overtime_divisor: Decimal,
    /// Standard weekly hours the overtime divisor refers to.
    pub standard_weekly_hours: Decimal,
}

/// Caps on the tax-free part of overtime surcharges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeExemption {
    /// Hours of 50% overtime whose surcharge is tax free.
    pub surcharge_50_max_hours: Decimal,
    /// Monthly cap for the tax-free 50% surcharge.
    pub surcharge_50_max_amount: Decimal,
    /// Monthly cap for the tax-free 100% surcharge.
    pub surcharge_100_max_amount: Decimal,
}

/// One bracket of the progressive wage-tax tariff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Exclusive upper bound of the monthly base, `None` for the top bracket.
    #[serde(default)]
    pub below: Option<Decimal>,
    /// Marginal rate.
    pub rate: Decimal,
    /// Fixed amount subtracted from `base × rate`.
    pub deduction: Decimal,
}

/// Monthly progressive wage-tax tariff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageTaxTariff {
    /// Ascending brackets; the last one has no upper bound.
    pub brackets: Vec<TaxBracket>,
    /// Transport credit subtracted in every bracket with a non-zero rate.
    pub transport_credit: Decimal,
}

/// One rate band of the special-payment tariff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialPaymentBand {
    /// Inclusive upper bound on the cumulative post-allowance amount.
    pub up_to: Decimal,
    /// Flat rate within the band.
    pub rate: Decimal,
}

/// Special-payment (13th/14th salary) tariff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialPaymentTariff {
    /// Annual tax-free allowance.
    pub tax_free_allowance: Decimal,
    /// Ascending bands; amounts beyond the last band are taxed as regular pay.
    pub bands: Vec<SpecialPaymentBand>,
}

/// Monthly family bonus per child category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyBonusRates {
    /// Child under 18, full entitlement.
    pub under_18_full: Decimal,
    /// Child under 18, half entitlement.
    pub under_18_half: Decimal,
    /// Child 18 or older, full entitlement.
    pub over_18_full: Decimal,
    /// Child 18 or older, half entitlement.
    pub over_18_half: Decimal,
}

/// Monthly sole-earner / single-parent credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoleEarnerCredit {
    /// Credit with one child.
    pub one_child: Decimal,
    /// Credit with two children.
    pub two_children: Decimal,
    /// Increment for every child beyond the second.
    pub per_additional_child: Decimal,
}

/// Union dues deductible from the wage-tax base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionDues {
    /// Share of the gross wage.
    pub rate: Decimal,
    /// Monthly cap.
    pub monthly_cap: Decimal,
}

/// Employer-side levies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerLevyRates {
    /// Municipal tax rate.
    pub municipal_tax_rate: Decimal,
    /// Family-burden equalisation levy rate.
    pub family_burden_rate: Decimal,
    /// Surcharge on the family-burden levy.
    pub family_burden_surcharge_rate: Decimal,
    /// Employee provision-fund rate.
    pub provision_fund_rate: Decimal,
    /// Vienna employer levy per Monday of the month.
    pub vienna_levy_per_monday: Decimal,
}

/// The complete rate and threshold table for one tax year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxYearConstants {
    /// The tax year this table applies to.
    pub year: i32,
    /// Social-insurance rates and thresholds.
    pub social_insurance: SocialInsuranceRates,
    /// Hour conversion constants.
    pub working_time: WorkingTime,
    /// Tax-free overtime surcharge caps.
    pub overtime_exemption: OvertimeExemption,
    /// Progressive wage-tax tariff.
    pub wage_tax: WageTaxTariff,
    /// Special-payment tariff.
    pub special_payment: SpecialPaymentTariff,
    /// Family bonus amounts.
    pub family_bonus: FamilyBonusRates,
    /// Sole-earner credit amounts.
    pub sole_earner_credit: SoleEarnerCredit,
    /// Union dues rule.
    pub union_dues: UnionDues,
    /// Employer levy rates.
    pub employer_levies: EmployerLevyRates,
}

fn d(num: i64, scale: u32) -> Decimal {
    Decimal::new(num, scale)
}

impl TaxYearConstants {
    /// The built-in table for Austrian payroll 2025.
    ///
    /// Mirrors `config/tax_years/2025.yaml` for callers that do not load a
    /// configuration directory.
    pub fn austria_2025() -> Self {
        Self {
            year: 2025,
            social_insurance: SocialInsuranceRates {
                employee_tiers: vec![
                    ContributionTier {
                        below: d(2074, 0),
                        rate: d(1412, 4),
                    },
                    ContributionTier {
                        below: d(2262, 0),
                        rate: d(1512, 4),
                    },
                    ContributionTier {
                        below: d(2451, 0),
                        rate: d(1612, 4),
                    },
                ],
                employee_top_rate: d(1707, 4),
                chamber_levy_rate: d(5, 3),
                employee_housing_levy_rate: d(5, 3),
                employer_rate: d(2038, 4),
                employer_insolvency_rate: d(1, 3),
                employer_housing_levy_rate: d(5, 3),
                employer_ceiling_rate: d(2123, 4),
                monthly_ceiling: d(6450, 0),
                benefit_in_kind_wage_share: d(20, 2),
            },
            working_time: WorkingTime {
                weeks_per_month: d(433, 2),
                overtime_divisor: d(143, 0),
                standard_weekly_hours: d(385, 1),
            },
            overtime_exemption: OvertimeExemption {
                surcharge_50_max_hours: d(18, 0),
                surcharge_50_max_amount: d(200, 0),
                surcharge_100_max_amount: d(400, 0),
            },
            wage_tax: WageTaxTariff {
                brackets: vec![
                    TaxBracket {
                        below: Some(d(1120, 0)),
                        rate: Decimal::ZERO,
                        deduction: Decimal::ZERO,
                    },
                    TaxBracket {
                        below: Some(d(181245, 2)),
                        rate: d(20, 2),
                        deduction: d(224, 0),
                    },
                    TaxBracket {
                        below: Some(d(299733, 2)),
                        rate: d(30, 2),
                        deduction: d(40524, 2),
                    },
                    TaxBracket {
                        below: Some(d(577483, 2)),
                        rate: d(40, 2),
                        deduction: d(70494, 2),
                    },
                    TaxBracket {
                        below: Some(d(860033, 2)),
                        rate: d(48, 2),
                        deduction: d(116696, 2),
                    },
                    TaxBracket {
                        below: Some(d(8334433, 2)),
                        rate: d(50, 2),
                        deduction: d(133897, 2),
                    },
                    TaxBracket {
                        below: None,
                        rate: d(55, 2),
                        deduction: d(550619, 2),
                    },
                ],
                transport_credit: d(4058, 2),
            },
            special_payment: SpecialPaymentTariff {
                tax_free_allowance: d(620, 0),
                bands: vec![
                    SpecialPaymentBand {
                        up_to: d(24380, 0),
                        rate: d(6, 2),
                    },
                    SpecialPaymentBand {
                        up_to: d(49380, 0),
                        rate: d(27, 2),
                    },
                    SpecialPaymentBand {
                        up_to: d(82713, 0),
                        rate: d(3575, 4),
                    },
                ],
            },
            family_bonus: FamilyBonusRates {
                under_18_full: d(16668, 2),
                under_18_half: d(8334, 2),
                over_18_full: d(5834, 2),
                over_18_half: d(2917, 2),
            },
            sole_earner_credit: SoleEarnerCredit {
                one_child: d(5008, 2),
                two_children: d(6775, 2),
                per_additional_child: d(2233, 2),
            },
            union_dues: UnionDues {
                rate: d(1, 2),
                monthly_cap: d(4080, 2),
            },
            employer_levies: EmployerLevyRates {
                municipal_tax_rate: d(3, 2),
                family_burden_rate: d(37, 3),
                family_burden_surcharge_rate: d(36, 4),
                provision_fund_rate: d(153, 4),
                vienna_levy_per_monday: d(2, 0),
            },
        }
    }
}
