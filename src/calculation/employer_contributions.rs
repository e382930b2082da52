//! Employer-side charges.
//!
//! Computed from base salary, not taxable gross, so the seniority bonus,
//! premiums and overtime never raise them.

use rust_decimal::Decimal;

use crate::config::StatutoryConstants;
use crate::models::{AuditStep, EmployerContributions};

use super::social_contributions::{AMO_REF, CNSS_REF, contribution, contribution_step};
use super::round_money;

/// Legal reference for the vocational training tax.
pub const TRAINING_TAX_REF: &str = "Dahir 1-73-633";

/// Employer charges and the total employer cost, with audit steps.
#[derive(Debug, Clone)]
pub struct EmployerContributionsResult {
    /// CNSS, AMO and training tax lines.
    pub employer: EmployerContributions,
    /// `gross_pay + employer.total`, rounded.
    pub total_employer_cost: Decimal,
    /// One step per charge, then the total.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates the employer CNSS (capped base), AMO (uncapped) and training
/// tax on `base_salary`.
///
/// # Examples
///
/// ```
/// use moroccan_payroll::calculation::calculate_employer_contributions;
/// use moroccan_payroll::config::StatutoryConstants;
/// use rust_decimal_macros::dec;
///
/// let constants = StatutoryConstants::morocco();
/// let result = calculate_employer_contributions(dec!(15000), dec!(15750), &constants, 14);
/// assert_eq!(result.employer.cnss.amount, dec!(538.80));
/// assert_eq!(result.employer.amo.amount, dec!(616.50));
/// assert_eq!(result.employer.training_tax.amount, dec!(240.00));
/// assert_eq!(result.total_employer_cost, dec!(17145.30));
/// ```
pub fn calculate_employer_contributions(
    base_salary: Decimal,
    gross_pay: Decimal,
    constants: &StatutoryConstants,
    step_number: u32,
) -> EmployerContributionsResult {
    let cnss_base = base_salary.min(constants.cnss.monthly_ceiling);
    let cnss = contribution(cnss_base, constants.cnss.employer_rate);
    let amo = contribution(base_salary, constants.amo.employer_rate);
    let training_tax = contribution(base_salary, constants.training_tax.rate);
    let total = round_money(cnss.amount + amo.amount + training_tax.amount);
    let total_employer_cost = round_money(gross_pay + total);

    let audit_steps = vec![
        contribution_step(
            step_number,
            "cnss_employer",
            "CNSS Employer Contribution",
            CNSS_REF,
            &cnss,
            format!(
                "min({}, {}) x {} = {}",
                base_salary,
                constants.cnss.monthly_ceiling,
                cnss.rate.normalize(),
                cnss.amount
            ),
        ),
        contribution_step(
            step_number + 1,
            "amo_employer",
            "AMO Employer Contribution",
            AMO_REF,
            &amo,
            format!(
                "{} x {} = {}",
                amo.base,
                amo.rate.normalize(),
                amo.amount
            ),
        ),
        contribution_step(
            step_number + 2,
            "training_tax",
            "Vocational Training Tax",
            TRAINING_TAX_REF,
            &training_tax,
            format!(
                "{} x {} = {}",
                training_tax.base,
                training_tax.rate.normalize(),
                training_tax.amount
            ),
        ),
        AuditStep {
            step_number: step_number + 3,
            rule_id: "total_employer_cost".to_string(),
            rule_name: "Total Employer Cost".to_string(),
            legal_ref: CNSS_REF.to_string(),
            input: serde_json::json!({
                "gross_pay": gross_pay.to_string(),
                "employer_total": total.to_string()
            }),
            output: serde_json::json!({
                "total_employer_cost": total_employer_cost.to_string()
            }),
            reasoning: format!("{} + {} = {}", gross_pay, total, total_employer_cost),
        },
    ];

    EmployerContributionsResult {
        employer: EmployerContributions {
            cnss,
            amo,
            training_tax,
            total,
        },
        total_employer_cost,
        audit_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_employer_cnss_capped() {
        let result =
            calculate_employer_contributions(dec!(9000), dec!(9000), &StatutoryConstants::morocco(), 1);
        assert_eq!(result.employer.cnss.base, dec!(6000.00));
        assert_eq!(result.employer.cnss.amount, dec!(538.80));
    }

    #[test]
    fn test_employer_charges_ignore_bonus_and_premiums() {
        let constants = StatutoryConstants::morocco();
        let plain = calculate_employer_contributions(dec!(4000), dec!(4000), &constants, 1);
        let with_extras = calculate_employer_contributions(dec!(4000), dec!(5500), &constants, 1);
        assert_eq!(plain.employer, with_extras.employer);
        assert_eq!(with_extras.total_employer_cost - plain.total_employer_cost, dec!(1500));
    }

    #[test]
    fn test_employer_totals() {
        let result =
            calculate_employer_contributions(dec!(4000), dec!(4000), &StatutoryConstants::morocco(), 1);
        // 359.20 + 164.40 + 64.00
        assert_eq!(result.employer.total, dec!(587.60));
        assert_eq!(result.total_employer_cost, dec!(4587.60));
        assert_eq!(result.audit_steps.len(), 4);
        assert_eq!(result.audit_steps[3].rule_id, "total_employer_cost");
    }
}
