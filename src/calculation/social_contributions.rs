//! Employee social contributions and the professional-expense deduction.
//!
//! Every amount here is computed on taxable gross (SBI) and rounded on its
//! own before the totals are taken.

use rust_decimal::Decimal;

use crate::config::StatutoryConstants;
use crate::models::{AuditStep, Contribution, EmployeeContributions, ProfessionalExpenseDeduction};

use super::round_money;

/// Legal reference for CNSS contributions.
pub const CNSS_REF: &str = "Dahir 1-72-184 art. 19";
/// Legal reference for AMO contributions.
pub const AMO_REF: &str = "Loi 65-00 art. 106";
/// Legal reference for the professional-expense deduction.
pub const PROFESSIONAL_EXPENSES_REF: &str = "CGI art. 59-I";

/// Employee contributions with one audit step per line.
#[derive(Debug, Clone)]
pub struct SocialContributionsResult {
    /// The contribution lines and totals.
    pub contributions: EmployeeContributions,
    /// Audit steps, in the order the lines were computed.
    pub audit_steps: Vec<AuditStep>,
}

/// Computes `round(base * rate)` as a [`Contribution`].
pub fn contribution(base: Decimal, rate: Decimal) -> Contribution {
    if rate.is_zero() {
        return Contribution::zero(base);
    }
    Contribution {
        base,
        rate,
        amount: round_money(base * rate),
    }
}

/// Computes the professional-expense deduction: `min(SBI * rate, monthly_cap)`.
///
/// The annual cap is not applied on the monthly path.
///
/// # Examples
///
/// ```
/// use moroccan_payroll::calculation::calculate_professional_expenses;
/// use moroccan_payroll::config::StatutoryConstants;
/// use rust_decimal_macros::dec;
///
/// let constants = StatutoryConstants::morocco();
/// let capped = calculate_professional_expenses(dec!(15750), &constants);
/// assert_eq!(capped.amount, dec!(2500));
/// assert!(capped.cap_applied);
///
/// let uncapped = calculate_professional_expenses(dec!(5000), &constants);
/// assert_eq!(uncapped.amount, dec!(1000.00));
/// ```
pub fn calculate_professional_expenses(
    taxable_gross: Decimal,
    constants: &StatutoryConstants,
) -> ProfessionalExpenseDeduction {
    let rates = &constants.professional_expenses;
    let uncapped = round_money(taxable_gross * rates.rate);
    let cap_applied = uncapped > rates.monthly_cap;
    let amount = if cap_applied {
        round_money(rates.monthly_cap)
    } else {
        uncapped
    };

    ProfessionalExpenseDeduction {
        base: taxable_gross,
        rate: rates.rate,
        monthly_cap: rates.monthly_cap,
        amount,
        cap_applied,
    }
}

/// Calculates CNSS, AMO, optional pension and group insurance, and the
/// professional-expense deduction on taxable gross.
///
/// CNSS applies to `min(SBI, ceiling)`; AMO and the optional schemes apply
/// to the full SBI. `social_total` holds what is withheld from pay and
/// `total` adds the professional expenses, which only reduce the tax base.
///
/// # Examples
///
/// ```
/// use moroccan_payroll::calculation::calculate_social_contributions;
/// use moroccan_payroll::config::StatutoryConstants;
/// use rust_decimal_macros::dec;
///
/// let constants = StatutoryConstants::morocco();
/// let result = calculate_social_contributions(dec!(15750), dec!(0), dec!(0), &constants, 4);
/// let c = &result.contributions;
/// assert_eq!(c.cnss.base, dec!(6000));
/// assert_eq!(c.cnss.amount, dec!(268.80));
/// assert_eq!(c.amo.amount, dec!(355.95));
/// assert_eq!(c.social_total, dec!(624.75));
/// assert_eq!(c.total, dec!(3124.75));
/// ```
pub fn calculate_social_contributions(
    taxable_gross: Decimal,
    pension_rate: Decimal,
    group_insurance_rate: Decimal,
    constants: &StatutoryConstants,
    step_number: u32,
) -> SocialContributionsResult {
    let ceiling = constants.cnss.monthly_ceiling;
    let cnss_base = taxable_gross.min(ceiling);
    let cnss = contribution(cnss_base, constants.cnss.employee_rate);
    let amo = contribution(taxable_gross, constants.amo.employee_rate);
    let pension = contribution(taxable_gross, pension_rate);
    let group_insurance = contribution(taxable_gross, group_insurance_rate);
    let professional_expenses = calculate_professional_expenses(taxable_gross, constants);

    let social_total =
        round_money(cnss.amount + amo.amount + pension.amount + group_insurance.amount);
    let total = round_money(social_total + professional_expenses.amount);

    let mut audit_steps = Vec::with_capacity(5);
    let mut step = step_number;

    let cnss_reasoning = if taxable_gross > ceiling {
        format!(
            "Taxable gross {} exceeds the CNSS ceiling {}: {} x {} = {}",
            taxable_gross,
            ceiling,
            cnss.base,
            cnss.rate.normalize(),
            cnss.amount
        )
    } else {
        format!(
            "Taxable gross {} is within the CNSS ceiling {}: {} x {} = {}",
            taxable_gross,
            ceiling,
            cnss.base,
            cnss.rate.normalize(),
            cnss.amount
        )
    };
    audit_steps.push(contribution_step(
        step,
        "cnss_employee",
        "CNSS Employee Contribution",
        CNSS_REF,
        &cnss,
        cnss_reasoning,
    ));
    step += 1;

    audit_steps.push(contribution_step(
        step,
        "amo_employee",
        "AMO Employee Contribution",
        AMO_REF,
        &amo,
        format!(
            "AMO is uncapped: {} x {} = {}",
            amo.base,
            amo.rate.normalize(),
            amo.amount
        ),
    ));
    step += 1;

    if !pension.rate.is_zero() {
        audit_steps.push(contribution_step(
            step,
            "pension",
            "Pension Contribution",
            "Contrat de retraite complémentaire",
            &pension,
            format!(
                "{} x {} = {}",
                pension.base,
                pension.rate.normalize(),
                pension.amount
            ),
        ));
        step += 1;
    }

    if !group_insurance.rate.is_zero() {
        audit_steps.push(contribution_step(
            step,
            "group_insurance",
            "Group Insurance",
            "Contrat d'assurance groupe",
            &group_insurance,
            format!(
                "{} x {} = {}",
                group_insurance.base,
                group_insurance.rate.normalize(),
                group_insurance.amount
            ),
        ));
        step += 1;
    }

    let expense_reasoning = if professional_expenses.cap_applied {
        format!(
            "{} x {} exceeds the monthly cap, deduction limited to {}",
            taxable_gross,
            professional_expenses.rate.normalize(),
            professional_expenses.amount
        )
    } else {
        format!(
            "{} x {} = {}",
            taxable_gross,
            professional_expenses.rate.normalize(),
            professional_expenses.amount
        )
    };
    audit_steps.push(AuditStep {
        step_number: step,
        rule_id: "professional_expenses".to_string(),
        rule_name: "Professional Expense Deduction".to_string(),
        legal_ref: PROFESSIONAL_EXPENSES_REF.to_string(),
        input: serde_json::json!({
            "taxable_gross": taxable_gross.to_string(),
            "rate": professional_expenses.rate.normalize().to_string(),
            "monthly_cap": professional_expenses.monthly_cap.to_string()
        }),
        output: serde_json::json!({
            "amount": professional_expenses.amount.to_string(),
            "cap_applied": professional_expenses.cap_applied,
            "social_total": social_total.to_string(),
            "total": total.to_string()
        }),
        reasoning: expense_reasoning,
    });

    SocialContributionsResult {
        contributions: EmployeeContributions {
            cnss,
            amo,
            pension,
            group_insurance,
            professional_expenses,
            social_total,
            total,
        },
        audit_steps,
    }
}

pub(crate) fn contribution_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    legal_ref: &str,
    contribution: &Contribution,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        legal_ref: legal_ref.to_string(),
        input: serde_json::json!({
            "base": contribution.base.to_string(),
            "rate": contribution.rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": contribution.amount.to_string()
        }),
        reasoning,
    }
}
