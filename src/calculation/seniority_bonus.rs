//! Seniority bonus calculation.
//!
//! The bonus ("prime d'ancienneté") is a percentage of base salary that
//! grows with continuous months of service, per the tier table.

use rust_decimal::Decimal;

use crate::config::StatutoryConstants;
use crate::error::EngineResult;
use crate::models::{AuditStep, SeniorityBonus};

use super::round_money;

/// Legal reference for the seniority bonus.
pub const SENIORITY_BONUS_REF: &str = "Code du travail art. 350";

/// The seniority bonus with the audit step that produced it.
#[derive(Debug, Clone)]
pub struct SeniorityBonusResult {
    /// The bonus line.
    pub bonus: SeniorityBonus,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the seniority bonus: `round(base_salary * tier.rate, 2)`.
///
/// # Errors
///
/// Returns `Configuration` if no tier covers `seniority_months`.
///
/// # Examples
///
/// ```
/// use moroccan_payroll::calculation::calculate_seniority_bonus;
/// use moroccan_payroll::config::StatutoryConstants;
/// use rust_decimal_macros::dec;
///
/// let constants = StatutoryConstants::morocco();
/// let result = calculate_seniority_bonus(dec!(15000), 30, &constants, 1).unwrap();
/// assert_eq!(result.bonus.rate, dec!(0.05));
/// assert_eq!(result.bonus.amount, dec!(750.00));
/// ```
pub fn calculate_seniority_bonus(
    base_salary: Decimal,
    seniority_months: u32,
    constants: &StatutoryConstants,
    step_number: u32,
) -> EngineResult<SeniorityBonusResult> {
    let tier = constants.find_seniority_tier(seniority_months)?;
    let amount = round_money(base_salary * tier.rate);

    let reasoning = if tier.rate.is_zero() {
        format!(
            "{} months of service falls in tier '{}': no seniority bonus",
            seniority_months, tier.label
        )
    } else {
        format!(
            "{} months of service falls in tier '{}': {} x {} = {}",
            seniority_months,
            tier.label,
            base_salary,
            tier.rate.normalize(),
            amount
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "seniority_bonus".to_string(),
        rule_name: "Seniority Bonus".to_string(),
        legal_ref: SENIORITY_BONUS_REF.to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "seniority_months": seniority_months
        }),
        output: serde_json::json!({
            "tier": tier.label,
            "rate": tier.rate.normalize().to_string(),
            "amount": amount.to_string()
        }),
        reasoning,
    };

    Ok(SeniorityBonusResult {
        bonus: SeniorityBonus {
            seniority_months,
            tier_label: tier.label.clone(),
            rate: tier.rate,
            amount,
        },
        audit_step,
    })
}
