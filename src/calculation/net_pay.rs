//! Net pay calculation.

use rust_decimal::Decimal;

use crate::models::AuditStep;

use super::round_money;

/// Net pay with its audit step.
#[derive(Debug, Clone)]
pub struct NetPayResult {
    /// Amount paid to the employee.
    pub net_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes `gross - (social contributions + net tax + other deductions) + non-taxable premiums`.
///
/// The professional-expense deduction is not withheld: it only lowers the
/// tax base.
///
/// # Examples
///
/// ```
/// use moroccan_payroll::calculation::calculate_net_pay;
/// use rust_decimal_macros::dec;
///
/// let result = calculate_net_pay(dec!(15750), dec!(624.75), dec!(2368.26), dec!(0), dec!(0), 13);
/// assert_eq!(result.net_pay, dec!(12756.99));
/// ```
pub fn calculate_net_pay(
    gross_pay: Decimal,
    social_contributions: Decimal,
    net_tax: Decimal,
    other_deductions: Decimal,
    non_taxable_premiums: Decimal,
    step_number: u32,
) -> NetPayResult {
    let withheld = social_contributions + net_tax + other_deductions;
    let net_pay = round_money(gross_pay - withheld + non_taxable_premiums);

    NetPayResult {
        net_pay,
        audit_step: AuditStep {
            step_number,
            rule_id: "net_pay".to_string(),
            rule_name: "Net Pay".to_string(),
            legal_ref: "Code du travail art. 361".to_string(),
            input: serde_json::json!({
                "gross_pay": gross_pay.to_string(),
                "social_contributions": social_contributions.to_string(),
                "net_tax": net_tax.to_string(),
                "other_deductions": other_deductions.to_string(),
                "non_taxable_premiums": non_taxable_premiums.to_string()
            }),
            output: serde_json::json!({
                "net_pay": net_pay.to_string()
            }),
            reasoning: format!(
                "{} - ({} + {} + {}) + {} = {}",
                gross_pay,
                social_contributions,
                net_tax,
                other_deductions,
                non_taxable_premiums,
                net_pay
            ),
        },
    }
}
