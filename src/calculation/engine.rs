//! Payslip computation.
//!
//! Chains the stages in statutory order, numbers their audit steps and
//! assembles the immutable [`Payslip`]. Pure: no I/O, no logging, no clock.

use crate::config::StatutoryConstants;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BatchFailure, BatchOutcome, EmployeePayrollInput, PayrollContext, Payslip, compute_fingerprint,
};

use super::{
    calculate_employer_contributions, calculate_gross_pay, calculate_income_tax,
    calculate_net_pay, calculate_seniority_bonus, calculate_social_contributions,
    calculate_taxable_net, validate_input,
};

/// Version of the engine, recorded on every payslip.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Computes the payslip of one employee for the period in `context`.
///
/// # Errors
///
/// - `Validation` listing every invalid field; nothing is computed.
/// - `Configuration` if the constants table has a bracket or tier gap.
///
/// # Examples
///
/// ```
/// use moroccan_payroll::calculation::compute_payslip;
/// use moroccan_payroll::config::StatutoryConstants;
/// use moroccan_payroll::models::{EmployeePayrollInput, FamilyStatus, PayPeriod, PayrollContext};
/// use rust_decimal_macros::dec;
///
/// let employee = EmployeePayrollInput {
///     seniority_months: Some(30),
///     family_status: Some(FamilyStatus::Married),
///     number_of_children: 2,
///     ..EmployeePayrollInput::new("emp_001", dec!(15000))
/// };
/// let context = PayrollContext::new(PayPeriod::new(2025, 1));
///
/// let payslip = compute_payslip(&employee, &context, &StatutoryConstants::morocco()).unwrap();
/// assert_eq!(payslip.gross.gross_pay, dec!(15750.00));
/// assert_eq!(payslip.income_tax.net_tax, dec!(2368.26));
/// assert_eq!(payslip.net_pay, dec!(12756.99));
/// assert!(payslip.verify_fingerprint());
/// ```
pub fn compute_payslip(
    employee: &EmployeePayrollInput,
    context: &PayrollContext,
    constants: &StatutoryConstants,
) -> EngineResult<Payslip> {
    let input = validate_input(employee, context)?;
    let mut audit_trace = Vec::new();
    let mut step_number = 1;

    let seniority = calculate_seniority_bonus(
        input.base_salary,
        input.seniority_months,
        constants,
        step_number,
    )?;
    audit_trace.push(seniority.audit_step);
    step_number += 1;

    let gross = calculate_gross_pay(
        input.base_salary,
        seniority.bonus.amount,
        employee.taxable_premiums,
        employee.overtime_amount,
        step_number,
    );
    step_number += gross.audit_steps.len() as u32;
    audit_trace.extend(gross.audit_steps);
    let gross = gross.gross;

    let social = calculate_social_contributions(
        gross.taxable_gross,
        employee.pension_contribution_rate,
        employee.group_insurance_rate,
        constants,
        step_number,
    );
    step_number += social.audit_steps.len() as u32;
    audit_trace.extend(social.audit_steps);
    let contributions = social.contributions;

    let taxable_net = calculate_taxable_net(gross.taxable_gross, contributions.total, step_number);
    audit_trace.push(taxable_net.audit_step);
    step_number += 1;
    let taxable_net = taxable_net.taxable_net;

    let income_tax = calculate_income_tax(
        taxable_net,
        input.family_status,
        input.number_of_children,
        constants,
        step_number,
    )?;
    step_number += income_tax.audit_steps.len() as u32;
    audit_trace.extend(income_tax.audit_steps);
    let income_tax = income_tax.income_tax;

    let net_pay = calculate_net_pay(
        gross.gross_pay,
        contributions.social_total,
        income_tax.net_tax,
        employee.other_deductions,
        employee.non_taxable_premiums,
        step_number,
    );
    audit_trace.push(net_pay.audit_step);
    step_number += 1;
    let net_pay = net_pay.net_pay;

    let employer =
        calculate_employer_contributions(input.base_salary, gross.gross_pay, constants, step_number);
    audit_trace.extend(employer.audit_steps);

    let fingerprint = compute_fingerprint(&employee.employee_id, &context.period, net_pay);

    Ok(Payslip {
        engine_version: ENGINE_VERSION.to_string(),
        constants_version: constants.metadata.version.clone(),
        employee_id: employee.employee_id.clone(),
        company: context.company.clone(),
        period: context.period,
        seniority_bonus: seniority.bonus,
        gross,
        contributions,
        taxable_net,
        income_tax,
        other_deductions: employee.other_deductions,
        non_taxable_premiums: employee.non_taxable_premiums,
        net_pay,
        employer: employer.employer,
        total_employer_cost: employer.total_employer_cost,
        audit_trace,
        fingerprint,
    })
}

/// Computes payslips for every employee in `employees`.
///
/// Invalid records are collected in [`BatchOutcome::failed`] with their
/// position and violations; the remaining employees are still computed.
///
/// # Errors
///
/// Returns the first configuration error encountered. A broken constants
/// table affects every employee, so no partial outcome is returned.
pub fn compute_batch(
    employees: &[EmployeePayrollInput],
    context: &PayrollContext,
    constants: &StatutoryConstants,
) -> EngineResult<BatchOutcome> {
    let mut outcome = BatchOutcome::default();

    for (index, employee) in employees.iter().enumerate() {
        match compute_payslip(employee, context, constants) {
            Ok(payslip) => outcome.succeeded.push(payslip),
            Err(EngineError::Validation(error)) => {
                outcome.failed.push(BatchFailure {
                    index,
                    employee_id: employee.employee_id.clone(),
                    message: error.to_string(),
                    violations: error.violations,
                });
            }
            Err(other) => return Err(other),
        }
    }

    Ok(outcome)
}
