//! Taxable net (SNI).

use rust_decimal::Decimal;

use crate::models::AuditStep;

use super::round_money;

/// Taxable net with its audit step.
#[derive(Debug, Clone)]
pub struct TaxableNetResult {
    /// SNI, never below zero.
    pub taxable_net: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes `SBI - contributions_total`, rounded.
///
/// Floors at zero: high optional scheme rates could otherwise push the base
/// negative, and no bracket covers a negative amount.
pub fn calculate_taxable_net(
    taxable_gross: Decimal,
    contributions_total: Decimal,
    step_number: u32,
) -> TaxableNetResult {
    let taxable_net = round_money((taxable_gross - contributions_total).max(Decimal::ZERO));

    TaxableNetResult {
        taxable_net,
        audit_step: AuditStep {
            step_number,
            rule_id: "taxable_net".to_string(),
            rule_name: "Taxable Net (SNI)".to_string(),
            legal_ref: "CGI art. 58".to_string(),
            input: serde_json::json!({
                "taxable_gross": taxable_gross.to_string(),
                "contributions_total": contributions_total.to_string()
            }),
            output: serde_json::json!({
                "taxable_net": taxable_net.to_string()
            }),
            reasoning: format!(
                "{} - {} = {}",
                taxable_gross, contributions_total, taxable_net
            ),
        },
    }
}
