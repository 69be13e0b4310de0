//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structure shared by the
//! `/calculate` and `/payslip` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FamilyBonusChildren, OvertimeHours, PayrollInput, PayrollPeriod};

/// Request body for the `/calculate` and `/payslip` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// Identifier of the employee, used for request logging only.
    pub employee_id: String,
    /// The month being paid.
    pub period: PeriodRequest,
    /// Contractual weekly hours.
    pub weekly_hours: Decimal,
    /// Monthly base salary.
    pub gross_base_salary: Decimal,
    /// Additional hours and overtime.
    #[serde(default)]
    pub overtime: OvertimeHours,
    /// Special payment paid this month, if any.
    #[serde(default)]
    pub special_payment: Option<SpecialPaymentRequest>,
    /// Allowances and reimbursements.
    #[serde(default)]
    pub allowances: AllowancesRequest,
    /// Tax credits claimed.
    #[serde(default)]
    pub tax_credits: TaxCreditsRequest,
    /// Whether union dues are withheld.
    #[serde(default)]
    pub union_member: bool,
}

/// Payroll month in a request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// Month of the year, 1 to 12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// Special payment in a request.
///
/// The year-to-date figures are optional here so that a missing value is
/// reported as an invalid input rather than a JSON error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialPaymentRequest {
    /// The payment amount.
    pub amount: Decimal,
    /// Special payments already taxed this year.
    #[serde(default)]
    pub prior_payments: Option<Decimal>,
    /// One sixth of the year-to-date regular gross.
    #[serde(default)]
    pub annual_sixth: Option<Decimal>,
}

/// Allowances and reimbursements in a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowancesRequest {
    /// Value of non-cash benefits.
    pub non_cash_benefit: Decimal,
    /// Tax-free daily allowances.
    pub daily_allowance: Decimal,
    /// Reimbursed travel expenses.
    pub travel_reimbursement: Decimal,
    /// Allowance from a tax office exemption notice.
    pub tax_free_allowance_notice: Decimal,
    /// Commuter allowance.
    pub commuter_allowance: Decimal,
}

/// Tax credits in a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxCreditsRequest {
    /// Monthly commuter euro.
    pub commuter_euro: Decimal,
    /// Children counted for the sole-earner credit.
    pub sole_earner_children: u32,
    /// Family bonus claim.
    pub family_bonus: Option<FamilyBonusChildren>,
}

impl From<PeriodRequest> for PayrollPeriod {
    fn from(req: PeriodRequest) -> Self {
        PayrollPeriod {
            month: req.month,
            year: req.year,
        }
    }
}

impl From<PayrollRequest> for PayrollInput {
    fn from(req: PayrollRequest) -> Self {
        let (special_payment, prior_special_payments, annual_sixth) = match req.special_payment {
            Some(special) => (special.amount, special.prior_payments, special.annual_sixth),
            None => (Decimal::ZERO, None, None),
        };

        PayrollInput {
            overtime: req.overtime,
            special_payment,
            non_cash_benefit: req.allowances.non_cash_benefit,
            daily_allowance: req.allowances.daily_allowance,
            travel_reimbursement: req.allowances.travel_reimbursement,
            tax_free_allowance_notice: req.allowances.tax_free_allowance_notice,
            commuter_allowance: req.allowances.commuter_allowance,
            commuter_euro: req.tax_credits.commuter_euro,
            sole_earner_children: req.tax_credits.sole_earner_children,
            family_bonus: req.tax_credits.family_bonus,
            union_member: req.union_member,
            prior_special_payments,
            annual_sixth,
            ..PayrollInput::new(req.period.into(), req.weekly_hours, req.gross_base_salary)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_minimal_request() {
        let json = r#"{
            "employee_id": "emp_001",
            "period": { "month": 1, "year": 2025 },
            "weekly_hours": "38.5",
            "gross_base_salary": "2000"
        }"#;

        let request: PayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_id, "emp_001");
        assert_eq!(request.weekly_hours, dec("38.5"));
        assert!(request.special_payment.is_none());
        assert!(!request.union_member);
    }

    #[test]
    fn test_deserialize_full_request() {
        let json = r#"{
            "employee_id": "emp_002",
            "period": { "month": 6, "year": 2025 },
            "weekly_hours": "20",
            "gross_base_salary": "1500.50",
            "overtime": { "overtime_50": "4" },
            "special_payment": {
                "amount": "1500.50",
                "prior_payments": "0",
                "annual_sixth": "1500.50"
            },
            "allowances": { "daily_allowance": "26.40" },
            "tax_credits": {
                "commuter_euro": "8",
                "family_bonus": { "under_18_full": 2 }
            },
            "union_member": true
        }"#;

        let request: PayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.overtime.overtime_50, dec("4"));
        assert_eq!(request.allowances.daily_allowance, dec("26.40"));
        assert_eq!(
            request.tax_credits.family_bonus.map(|c| c.under_18_full),
            Some(2)
        );
    }

    #[test]
    fn test_conversion_to_payroll_input() {
        let request = PayrollRequest {
            employee_id: "emp_001".to_string(),
            period: PeriodRequest {
                month: 12,
                year: 2025,
            },
            weekly_hours: dec("38.5"),
            gross_base_salary: dec("2400"),
            overtime: OvertimeHours::default(),
            special_payment: Some(SpecialPaymentRequest {
                amount: dec("2400"),
                prior_payments: Some(dec("2400")),
                annual_sixth: None,
            }),
            allowances: AllowancesRequest {
                commuter_allowance: dec("31"),
                ..AllowancesRequest::default()
            },
            tax_credits: TaxCreditsRequest::default(),
            union_member: true,
        };

        let input: PayrollInput = request.into();
        assert_eq!(input.period.month, 12);
        assert_eq!(input.special_payment, dec("2400"));
        assert_eq!(input.prior_special_payments, Some(dec("2400")));
        assert_eq!(input.annual_sixth, None);
        assert_eq!(input.commuter_allowance, dec("31"));
        assert!(input.union_member);
    }

    #[test]
    fn test_conversion_without_special_payment() {
        let request: PayrollRequest = serde_json::from_str(
            r#"{
                "employee_id": "emp_003",
                "period": { "month": 3, "year": 2025 },
                "weekly_hours": "38.5",
                "gross_base_salary": "2000"
            }"#,
        )
        .unwrap();

        let input: PayrollInput = request.into();
        assert_eq!(input.special_payment, Decimal::ZERO);
        assert!(input.validate().is_ok());
    }
}
