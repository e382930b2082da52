//! Payslip models.
//!
//! This module contains the [`Payslip`] type and the itemized structures it
//! is assembled from. Monetary and percentage fields serialize as JSON
//! numbers; percentages are decimal fractions (`0.0448` for 4.48%).

use rust_decimal::Decimal;
use rust_decimal::serde::float;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{FamilyStatus, PayPeriod};

/// A contribution or deduction computed as `base * rate`.
///
/// # Example
///
/// ```
/// use moroccan_payroll::models::Contribution;
/// use rust_decimal_macros::dec;
///
/// let cnss = Contribution {
///     base: dec!(6000.00),
///     rate: dec!(0.0448),
///     amount: dec!(268.80),
/// };
/// assert_eq!(cnss.base * cnss.rate, cnss.amount);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// The amount the rate is applied to (after any ceiling).
    #[serde(serialize_with = "float::serialize")]
    pub base: Decimal,
    /// The rate as a decimal fraction.
    #[serde(serialize_with = "float::serialize")]
    pub rate: Decimal,
    /// The rounded contribution.
    #[serde(serialize_with = "float::serialize")]
    pub amount: Decimal,
}

impl Contribution {
    /// A contribution of zero on `base`.
    pub fn zero(base: Decimal) -> Self {
        Self {
            base,
            rate: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }
}

/// The seniority bonus line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeniorityBonus {
    /// Months of service used for the tier lookup.
    pub seniority_months: u32,
    /// Label of the tier that matched.
    pub tier_label: String,
    /// Bonus rate of that tier.
    #[serde(serialize_with = "float::serialize")]
    pub rate: Decimal,
    /// `base_salary * rate`, rounded.
    #[serde(serialize_with = "float::serialize")]
    pub amount: Decimal,
}

/// The components of gross pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossPay {
    /// Monthly base salary.
    #[serde(serialize_with = "float::serialize")]
    pub base_salary: Decimal,
    /// Seniority bonus amount.
    #[serde(serialize_with = "float::serialize")]
    pub seniority_bonus: Decimal,
    /// Taxable premiums.
    #[serde(serialize_with = "float::serialize")]
    pub taxable_premiums: Decimal,
    /// Overtime pay.
    #[serde(serialize_with = "float::serialize")]
    pub overtime_amount: Decimal,
    /// Total gross pay (SBG).
    #[serde(serialize_with = "float::serialize")]
    pub gross_pay: Decimal,
    /// Taxable gross pay (SBI). Equal to gross pay under the current model.
    #[serde(serialize_with = "float::serialize")]
    pub taxable_gross: Decimal,
}

/// Professional-expense deduction detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalExpenseDeduction {
    /// Taxable gross the rate applies to.
    #[serde(serialize_with = "float::serialize")]
    pub base: Decimal,
    /// Flat rate.
    #[serde(serialize_with = "float::serialize")]
    pub rate: Decimal,
    /// Monthly cap.
    #[serde(serialize_with = "float::serialize")]
    pub monthly_cap: Decimal,
    /// Deduction actually taken.
    #[serde(serialize_with = "float::serialize")]
    pub amount: Decimal,
    /// True if the cap limited the deduction.
    pub cap_applied: bool,
}

/// Employee-side deductions before income tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeContributions {
    /// CNSS on the capped base.
    pub cnss: Contribution,
    /// AMO on the full taxable gross.
    pub amo: Contribution,
    /// Optional pension scheme.
    pub pension: Contribution,
    /// Optional group insurance.
    pub group_insurance: Contribution,
    /// Professional-expense deduction (reduces the tax base only).
    pub professional_expenses: ProfessionalExpenseDeduction,
    /// CNSS + AMO + pension + group insurance, withheld from pay.
    #[serde(serialize_with = "float::serialize")]
    pub social_total: Decimal,
    /// `social_total` + professional expenses, subtracted from SBI to reach SNI.
    #[serde(serialize_with = "float::serialize")]
    pub total: Decimal,
}

/// The income tax bracket that applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedBracket {
    /// Bracket lower bound.
    #[serde(serialize_with = "float::serialize")]
    pub min: Decimal,
    /// Bracket upper bound, absent for the top bracket.
    #[serde(
        serialize_with = "rust_decimal::serde::float_option::serialize",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max: Option<Decimal>,
    /// Marginal rate.
    #[serde(serialize_with = "float::serialize")]
    pub rate: Decimal,
    /// Subtraction term.
    #[serde(serialize_with = "float::serialize")]
    pub deduction: Decimal,
}

/// Family deduction detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyDeduction {
    /// Civil status of the employee.
    pub family_status: FamilyStatus,
    /// Number of dependents the deduction was computed for.
    pub dependents: u32,
    /// Deduction after the ceiling.
    #[serde(serialize_with = "float::serialize")]
    pub amount: Decimal,
    /// True if the ceiling limited the deduction.
    pub ceiling_applied: bool,
}

/// Income tax (IR) detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTax {
    /// Taxable net (SNI) the bracket was looked up with.
    #[serde(serialize_with = "float::serialize")]
    pub taxable_net: Decimal,
    /// The bracket used.
    pub bracket: AppliedBracket,
    /// `SNI * rate - deduction`, rounded.
    #[serde(serialize_with = "float::serialize")]
    pub gross_tax: Decimal,
    /// Family deduction.
    pub family_deduction: FamilyDeduction,
    /// `max(0, gross_tax - family_deduction)`, rounded.
    #[serde(serialize_with = "float::serialize")]
    pub net_tax: Decimal,
}

/// Employer-side charges, computed from base salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// CNSS employer share on the capped base.
    pub cnss: Contribution,
    /// AMO employer share, uncapped.
    pub amo: Contribution,
    /// Vocational training tax.
    pub training_tax: Contribution,
    /// Sum of the above.
    #[serde(serialize_with = "float::serialize")]
    pub total: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Legal reference for this rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The fully itemized, immutable result of one payroll calculation.
///
/// Contains no timestamps or random identifiers, so computing the same input
/// twice produces an identical payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// The version of the engine that produced the payslip.
    pub engine_version: String,
    /// Version of the statutory table used.
    pub constants_version: String,
    /// Employee identifier.
    pub employee_id: String,
    /// Company label, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Pay period.
    pub period: PayPeriod,
    /// Seniority bonus.
    pub seniority_bonus: SeniorityBonus,
    /// Gross pay components.
    pub gross: GrossPay,
    /// Employee contributions and professional expenses.
    pub contributions: EmployeeContributions,
    /// Taxable net (SNI).
    #[serde(serialize_with = "float::serialize")]
    pub taxable_net: Decimal,
    /// Income tax detail.
    pub income_tax: IncomeTax,
    /// Other deductions from net pay.
    #[serde(serialize_with = "float::serialize")]
    pub other_deductions: Decimal,
    /// Non-taxable premiums added to net pay.
    #[serde(serialize_with = "float::serialize")]
    pub non_taxable_premiums: Decimal,
    /// Final net pay.
    #[serde(serialize_with = "float::serialize")]
    pub net_pay: Decimal,
    /// Employer charges.
    pub employer: EmployerContributions,
    /// Gross pay plus employer charges.
    #[serde(serialize_with = "float::serialize")]
    pub total_employer_cost: Decimal,
    /// Ordered record of every stage.
    pub audit_trace: Vec<AuditStep>,
    /// SHA-256 over `(employee_id, period, net_pay)`.
    pub fingerprint: String,
}

impl Payslip {
    /// Recomputes the fingerprint and compares it to the stored one.
    ///
    /// Returns false if the employee id, period or net pay was altered after
    /// the payslip was produced.
    pub fn verify_fingerprint(&self) -> bool {
        compute_fingerprint(&self.employee_id, &self.period, self.net_pay) == self.fingerprint
    }
}

/// Computes the lowercase hex SHA-256 of `"{employee_id}|{YYYY-MM}|{net_pay:.2}"`.
///
/// # Example
///
/// ```
/// use moroccan_payroll::models::{compute_fingerprint, PayPeriod};
/// use rust_decimal_macros::dec;
///
/// let a = compute_fingerprint("emp_001", &PayPeriod::new(2025, 1), dec!(12756.99));
/// let b = compute_fingerprint("emp_001", &PayPeriod::new(2025, 1), dec!(12756.990));
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub fn compute_fingerprint(employee_id: &str, period: &PayPeriod, net_pay: Decimal) -> String {
    let canonical = format!("{}|{}|{:.2}", employee_id, period.label(), net_pay);
    let hash = Sha256::digest(canonical.as_bytes());
    format!("{:x}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_number(value: &serde_json::Value, expected: f64) {
        let actual = value.as_f64().expect("expected a JSON number");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_contribution_serializes_numbers() {
        let contribution = Contribution {
            base: dec!(6000.00),
            rate: dec!(0.0448),
            amount: dec!(268.80),
        };

        let json = serde_json::to_value(&contribution).unwrap();
        assert_number(&json["base"], 6000.0);
        assert_number(&json["rate"], 0.0448);
        assert_number(&json["amount"], 268.8);
    }

    #[test]
    fn test_contribution_deserializes_numbers() {
        let json = r#"{ "base": 15750.0, "rate": 0.0226, "amount": 355.95 }"#;
        let contribution: Contribution = serde_json::from_str(json).unwrap();
        assert_eq!(contribution.amount, dec!(355.95));
        assert_eq!(contribution.rate, dec!(0.0226));
    }

    #[test]
    fn test_unbounded_bracket_omits_max() {
        let bracket = AppliedBracket {
            min: dec!(15000),
            max: None,
            rate: dec!(0.38),
            deduction: dec!(2033.33),
        };
        let json = serde_json::to_string(&bracket).unwrap();
        assert!(!json.contains("max"));

        let bounded = AppliedBracket {
            max: Some(dec!(15000)),
            ..bracket
        };
        let json = serde_json::to_value(&bounded).unwrap();
        assert_number(&json["max"], 15000.0);
    }

    #[test]
    fn test_fingerprint_changes_with_net_pay() {
        let period = PayPeriod::new(2025, 1);
        let a = compute_fingerprint("emp_001", &period, dec!(12756.99));
        let b = compute_fingerprint("emp_001", &period, dec!(12757.00));
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_changes_with_period() {
        let a = compute_fingerprint("emp_001", &PayPeriod::new(2025, 1), dec!(1000));
        let b = compute_fingerprint("emp_001", &PayPeriod::new(2025, 2), dec!(1000));
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_is_hex() {
        let fingerprint = compute_fingerprint("emp_001", &PayPeriod::new(2025, 1), dec!(1000));
        assert_eq!(fingerprint.len(), 64);
        assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "seniority_bonus".to_string(),
            rule_name: "Seniority Bonus".to_string(),
            legal_ref: "Code du travail art. 350".to_string(),
            input: serde_json::json!({"seniority_months": 30}),
            output: serde_json::json!({"rate": "0.05"}),
            reasoning: "30 months falls in tier '2 to 5 years'".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"seniority_bonus\""));
        assert!(json.contains("\"legal_ref\":\"Code du travail art. 350\""));
    }
}
