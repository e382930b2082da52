//! Gross pay (SBG) and taxable gross (SBI).

use rust_decimal::Decimal;

use crate::models::{AuditStep, GrossPay};

use super::round_money;

/// The gross pay components and the audit steps recording them.
#[derive(Debug, Clone)]
pub struct GrossPayResult {
    /// Gross and taxable gross pay.
    pub gross: GrossPay,
    /// One step for SBG, one for SBI.
    pub audit_steps: Vec<AuditStep>,
}

/// Sums base salary, seniority bonus, taxable premiums and overtime.
///
/// Taxable gross equals gross pay: no exemption applies between the two
/// under the current model. Both are rounded.
///
/// # Examples
///
/// ```
/// use moroccan_payroll::calculation::calculate_gross_pay;
/// use rust_decimal_macros::dec;
///
/// let result = calculate_gross_pay(dec!(15000), dec!(750), dec!(0), dec!(0), 2);
/// assert_eq!(result.gross.gross_pay, dec!(15750.00));
/// assert_eq!(result.gross.taxable_gross, result.gross.gross_pay);
/// assert_eq!(result.audit_steps[1].step_number, 3);
/// ```
pub fn calculate_gross_pay(
    base_salary: Decimal,
    seniority_bonus: Decimal,
    taxable_premiums: Decimal,
    overtime_amount: Decimal,
    step_number: u32,
) -> GrossPayResult {
    let gross_pay = round_money(base_salary + seniority_bonus + taxable_premiums + overtime_amount);
    let taxable_gross = gross_pay;

    let gross_step = AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay (SBG)".to_string(),
        legal_ref: "Code du travail art. 345".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "seniority_bonus": seniority_bonus.to_string(),
            "taxable_premiums": taxable_premiums.to_string(),
            "overtime_amount": overtime_amount.to_string()
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.to_string()
        }),
        reasoning: format!(
            "{} + {} + {} + {} = {}",
            base_salary, seniority_bonus, taxable_premiums, overtime_amount, gross_pay
        ),
    };

    let taxable_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "taxable_gross".to_string(),
        rule_name: "Taxable Gross (SBI)".to_string(),
        legal_ref: "CGI art. 56".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string()
        }),
        output: serde_json::json!({
            "taxable_gross": taxable_gross.to_string()
        }),
        reasoning: "No exempt components: taxable gross equals gross pay".to_string(),
    };

    GrossPayResult {
        gross: GrossPay {
            base_salary,
            seniority_bonus,
            taxable_premiums,
            overtime_amount,
            gross_pay,
            taxable_gross,
        },
        audit_steps: vec![gross_step, taxable_step],
    }
}
