//! Income tax (IR) calculation.
//!
//! This module provides the bracket computation on taxable net and the family
//! charge deduction applied against the gross tax.

use rust_decimal::Decimal;

use crate::config::StatutoryConstants;
use crate::error::EngineResult;
use crate::models::{AppliedBracket, AuditStep, FamilyDeduction, FamilyStatus, IncomeTax};

use super::round_money;

/// Legal reference for the income tax scale.
pub const INCOME_TAX_REF: &str = "CGI art. 73-I";
/// Legal reference for the family charge deduction.
pub const FAMILY_DEDUCTION_REF: &str = "CGI art. 74-I";

/// Income tax detail with the audit steps that produced it.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// Bracket, gross tax, family deduction and net tax.
    pub income_tax: IncomeTax,
    /// Gross tax, family deduction and net tax steps.
    pub audit_steps: Vec<AuditStep>,
}

/// Computes the family charge deduction.
///
/// A single employee gets nothing whatever the number of children. A married
/// employee without children counts one dependent. Every other case counts
/// the employee plus up to `max_children` children. The total is capped at
/// the ceiling.
///
/// # Examples
///
/// ```
/// use moroccan_payroll::calculation::calculate_family_deduction;
/// use moroccan_payroll::config::StatutoryConstants;
/// use moroccan_payroll::models::FamilyStatus;
/// use rust_decimal_macros::dec;
///
/// let constants = StatutoryConstants::morocco();
/// let deduction = calculate_family_deduction(FamilyStatus::Married, 2, &constants);
/// assert_eq!(deduction.amount, dec!(90.00));
/// assert_eq!(deduction.dependents, 3);
/// ```
pub fn calculate_family_deduction(
    family_status: FamilyStatus,
    number_of_children: u32,
    constants: &StatutoryConstants,
) -> FamilyDeduction {
    let rates = &constants.family_deduction;

    let dependents = match (family_status, number_of_children) {
        (FamilyStatus::Single, _) => 0,
        (FamilyStatus::Married, 0) => 1,
        (_, children) => 1 + children.min(rates.max_children),
    };

    let uncapped = round_money(rates.amount_per_dependent * Decimal::from(dependents));
    let ceiling_applied = uncapped > rates.ceiling;
    let amount = if ceiling_applied {
        round_money(rates.ceiling)
    } else {
        uncapped
    };

    FamilyDeduction {
        family_status,
        dependents,
        amount,
        ceiling_applied,
    }
}

/// Calculates the income tax on taxable net.
///
/// `gross_tax = SNI * rate - deduction` for the matching bracket, or zero in
/// the exempt bracket. `net_tax = max(0, gross_tax - family_deduction)`.
///
/// # Errors
///
/// Returns `Configuration` if no bracket covers `taxable_net`.
///
/// # Examples
///
/// ```
/// use moroccan_payroll::calculation::calculate_income_tax;
/// use moroccan_payroll::config::StatutoryConstants;
/// use moroccan_payroll::models::FamilyStatus;
/// use rust_decimal_macros::dec;
///
/// let constants = StatutoryConstants::morocco();
/// let result = calculate_income_tax(dec!(12625.25), FamilyStatus::Married, 2, &constants, 10)
///     .unwrap();
/// assert_eq!(result.income_tax.gross_tax, dec!(2458.26));
/// assert_eq!(result.income_tax.net_tax, dec!(2368.26));
/// ```
pub fn calculate_income_tax(
    taxable_net: Decimal,
    family_status: FamilyStatus,
    number_of_children: u32,
    constants: &StatutoryConstants,
    step_number: u32,
) -> EngineResult<IncomeTaxResult> {
    let bracket = constants.find_income_tax_bracket(taxable_net)?;

    let gross_tax = if bracket.rate > Decimal::ZERO {
        round_money(bracket.tax_at(taxable_net).max(Decimal::ZERO))
    } else {
        round_money(Decimal::ZERO)
    };

    let family_deduction = calculate_family_deduction(family_status, number_of_children, constants);
    let net_tax = round_money((gross_tax - family_deduction.amount).max(Decimal::ZERO));

    let bracket_label = match bracket.max {
        Some(max) => format!("{} to {}", bracket.min, max),
        None => format!("above {}", bracket.min),
    };

    let gross_reasoning = if bracket.rate.is_zero() {
        format!(
            "Taxable net {} falls in the exempt bracket ({})",
            taxable_net, bracket_label
        )
    } else {
        format!(
            "Taxable net {} falls in bracket {}: {} x {} - {} = {}",
            taxable_net,
            bracket_label,
            taxable_net,
            bracket.rate.normalize(),
            bracket.deduction,
            gross_tax
        )
    };

    let gross_step = AuditStep {
        step_number,
        rule_id: "income_tax_gross".to_string(),
        rule_name: "Income Tax Scale".to_string(),
        legal_ref: INCOME_TAX_REF.to_string(),
        input: serde_json::json!({
            "taxable_net": taxable_net.to_string()
        }),
        output: serde_json::json!({
            "bracket_min": bracket.min.to_string(),
            "bracket_max": bracket.max.map(|max| max.to_string()),
            "rate": bracket.rate.normalize().to_string(),
            "deduction": bracket.deduction.to_string(),
            "gross_tax": gross_tax.to_string()
        }),
        reasoning: gross_reasoning,
    };

    let family_reasoning = if family_deduction.dependents == 0 {
        "Single employee: no family deduction".to_string()
    } else if family_deduction.ceiling_applied {
        format!(
            "{} dependents exceed the ceiling, deduction limited to {}",
            family_deduction.dependents, family_deduction.amount
        )
    } else {
        format!(
            "{} dependents x {} = {}",
            family_deduction.dependents,
            constants.family_deduction.amount_per_dependent,
            family_deduction.amount
        )
    };

    let family_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "family_deduction".to_string(),
        rule_name: "Family Charge Deduction".to_string(),
        legal_ref: FAMILY_DEDUCTION_REF.to_string(),
        input: serde_json::json!({
            "family_status": family_status,
            "number_of_children": number_of_children
        }),
        output: serde_json::json!({
            "dependents": family_deduction.dependents,
            "amount": family_deduction.amount.to_string(),
            "ceiling_applied": family_deduction.ceiling_applied
        }),
        reasoning: family_reasoning,
    };

    let net_step = AuditStep {
        step_number: step_number + 2,
        rule_id: "income_tax_net".to_string(),
        rule_name: "Net Income Tax".to_string(),
        legal_ref: INCOME_TAX_REF.to_string(),
        input: serde_json::json!({
            "gross_tax": gross_tax.to_string(),
            "family_deduction": family_deduction.amount.to_string()
        }),
        output: serde_json::json!({
            "net_tax": net_tax.to_string()
        }),
        reasoning: format!(
            "max(0, {} - {}) = {}",
            gross_tax, family_deduction.amount, net_tax
        ),
    };

    Ok(IncomeTaxResult {
        income_tax: IncomeTax {
            taxable_net,
            bracket: AppliedBracket {
                min: bracket.min,
                max: bracket.max,
                rate: bracket.rate,
                deduction: bracket.deduction,
            },
            gross_tax,
            family_deduction,
            net_tax,
        },
        audit_steps: vec![gross_step, family_step, net_step],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use rust_decimal_macros::dec;

    fn constants() -> StatutoryConstants {
        StatutoryConstants::morocco()
    }

    fn gross_tax(taxable_net: Decimal) -> Decimal {
        calculate_income_tax(taxable_net, FamilyStatus::Single, 0, &constants(), 1)
            .unwrap()
            .income_tax
            .gross_tax
    }

    /// IR-001: reference scenario
    #[test]
    fn test_reference_income_tax() {
        let result =
            calculate_income_tax(dec!(12625.25), FamilyStatus::Married, 2, &constants(), 10)
                .unwrap();
        let tax = &result.income_tax;
        assert_eq!(tax.bracket.rate, dec!(0.34));
        assert_eq!(tax.bracket.deduction, dec!(1433.33));
        assert_eq!(tax.gross_tax, dec!(2458.26));
        assert_eq!(tax.family_deduction.amount, dec!(90.00));
        assert_eq!(tax.net_tax, dec!(2368.26));
        assert_eq!(result.audit_steps.len(), 3);
        assert_eq!(result.audit_steps[2].step_number, 12);
    }

    #[test]
    fn test_exempt_bracket() {
        assert_eq!(gross_tax(dec!(0)), Decimal::ZERO);
        assert_eq!(gross_tax(dec!(2500.00)), Decimal::ZERO);
    }

    #[test]
    fn test_boundary_values_use_first_matching_bracket() {
        // 4166.67 belongs to the 10% bracket: 416.667 - 250
        assert_eq!(gross_tax(dec!(4166.67)), dec!(166.67));
        // 15000 belongs to the 34% bracket: 5100 - 1433.33
        assert_eq!(gross_tax(dec!(15000)), dec!(3666.67));
        assert_eq!(gross_tax(dec!(15000.01)), dec!(3666.67));
    }

    #[test]
    fn test_top_bracket() {
        // 20000 * 0.38 - 2033.33
        assert_eq!(gross_tax(dec!(20000)), dec!(5566.67));
    }

    #[test]
    fn test_family_deduction_cannot_make_tax_negative() {
        // 2600 * 0.10 - 250 = 10, deduction 90
        let result =
            calculate_income_tax(dec!(2600), FamilyStatus::Married, 2, &constants(), 1).unwrap();
        assert_eq!(result.income_tax.gross_tax, dec!(10.00));
        assert_eq!(result.income_tax.net_tax, Decimal::ZERO);
    }

    #[test]
    fn test_bracket_gap_returns_configuration_error() {
        let mut constants = constants();
        constants.income_tax_brackets.remove(2);

        let result = calculate_income_tax(dec!(4500), FamilyStatus::Single, 0, &constants, 1);
        assert!(matches!(result, Err(EngineError::Configuration { .. })));
    }

    /// FD-001: single earns nothing whatever the children
    #[test]
    fn test_family_deduction_single() {
        for children in [0, 1, 3, 10] {
            let deduction = calculate_family_deduction(FamilyStatus::Single, children, &constants());
            assert_eq!(deduction.amount, Decimal::ZERO);
            assert_eq!(deduction.dependents, 0);
        }
    }

    /// FD-002: married without children is one unit
    #[test]
    fn test_family_deduction_married_no_children() {
        let deduction = calculate_family_deduction(FamilyStatus::Married, 0, &constants());
        assert_eq!(deduction.amount, dec!(30.00));
        assert_eq!(deduction.dependents, 1);
    }

    /// FD-003: married with 6 or more children is capped
    #[test]
    fn test_family_deduction_ceiling() {
        for children in [6, 7, 12] {
            let deduction = calculate_family_deduction(FamilyStatus::Married, children, &constants());
            assert_eq!(deduction.amount, dec!(180.00));
            assert!(deduction.ceiling_applied);
            assert_eq!(deduction.dependents, 7);
        }
    }

    #[test]
    fn test_family_deduction_divorced_with_children() {
        let deduction = calculate_family_deduction(FamilyStatus::Divorced, 3, &constants());
        assert_eq!(deduction.amount, dec!(120.00));
        assert!(!deduction.ceiling_applied);
    }

    #[test]
    fn test_audit_output_for_top_bracket_has_null_max() {
        let result =
            calculate_income_tax(dec!(30000), FamilyStatus::Single, 0, &constants(), 1).unwrap();
        assert!(result.audit_steps[0].output["bracket_max"].is_null());
        assert!(result.audit_steps[0].reasoning.contains("above 15000"));
    }
}
