//! Employee input validation.
//!
//! Runs every check before any computation and reports all violated fields
//! at once.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{FieldViolation, ValidationError};
use crate::models::{EmployeePayrollInput, FamilyStatus, PayrollContext, seniority_months_between};

/// Largest monthly amount accepted for any money field, in MAD.
///
/// Keeps every intermediate sum and product well inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Employee input that passed validation, with counts narrowed to unsigned types.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedInput {
    /// Positive base salary.
    pub base_salary: Decimal,
    /// Civil status.
    pub family_status: FamilyStatus,
    /// Months of service, explicit or derived from the hire date.
    pub seniority_months: u32,
    /// Number of children.
    pub number_of_children: u32,
}

/// Validates an employee record against the calculation context.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violated field:
/// - `employee_id` missing or blank
/// - `base_salary` missing or not positive
/// - `family_status` missing
/// - `seniority_months`, `number_of_children` negative
/// - `hire_date` after the end of the pay period
/// - premiums, overtime or other deductions negative
/// - salary, premiums, overtime or other deductions above [`MAX_AMOUNT`]
/// - pension or group insurance rate outside `[0, 1]`
/// - `period.month` outside 1 to 12
/// - `period.year` outside the calendar range when a hire date is given
///
/// # Examples
///
/// ```
/// use moroccan_payroll::calculation::validate_input;
/// use moroccan_payroll::models::{EmployeePayrollInput, PayPeriod, PayrollContext};
/// use rust_decimal_macros::dec;
///
/// let context = PayrollContext::new(PayPeriod::new(2025, 1));
/// let mut employee = EmployeePayrollInput::new("", dec!(0));
/// employee.number_of_children = -1;
///
/// let error = validate_input(&employee, &context).unwrap_err();
/// assert_eq!(error.violations.len(), 3);
/// ```
pub fn validate_input(
    employee: &EmployeePayrollInput,
    context: &PayrollContext,
) -> Result<ValidatedInput, ValidationError> {
    let mut violations = Vec::new();

    if employee.employee_id.trim().is_empty() {
        violations.push(FieldViolation::new("employee_id", "is required"));
    }

    if !context.period.is_valid() {
        violations.push(FieldViolation::new(
            "period.month",
            format!("must be between 1 and 12, got {}", context.period.month),
        ));
    }

    let base_salary = match employee.base_salary {
        None => {
            violations.push(FieldViolation::new("base_salary", "is required"));
            Decimal::ZERO
        }
        Some(salary) if salary <= Decimal::ZERO => {
            violations.push(FieldViolation::new(
                "base_salary",
                format!("must be greater than zero, got {}", salary),
            ));
            Decimal::ZERO
        }
        Some(salary) if salary > MAX_AMOUNT => {
            violations.push(exceeds_maximum("base_salary", salary));
            Decimal::ZERO
        }
        Some(salary) => salary,
    };

    let family_status = employee.family_status.unwrap_or_else(|| {
        violations.push(FieldViolation::new("family_status", "is required"));
        FamilyStatus::Single
    });

    let seniority_months = resolve_seniority(employee, context, &mut violations);
    let number_of_children = non_negative_count(
        "number_of_children",
        employee.number_of_children,
        &mut violations,
    );

    let amounts = [
        ("taxable_premiums", employee.taxable_premiums),
        ("overtime_amount", employee.overtime_amount),
        ("non_taxable_premiums", employee.non_taxable_premiums),
        ("other_deductions", employee.other_deductions),
    ];
    for (field, amount) in amounts {
        if amount < Decimal::ZERO {
            violations.push(FieldViolation::new(
                field,
                format!("cannot be negative, got {}", amount),
            ));
        } else if amount > MAX_AMOUNT {
            violations.push(exceeds_maximum(field, amount));
        }
    }

    let rates = [
        ("pension_contribution_rate", employee.pension_contribution_rate),
        ("group_insurance_rate", employee.group_insurance_rate),
    ];
    for (field, rate) in rates {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            violations.push(FieldViolation::new(
                field,
                format!("must be between 0 and 1, got {}", rate),
            ));
        }
    }

    if !violations.is_empty() {
        let employee_id = Some(employee.employee_id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        return Err(ValidationError {
            employee_id,
            violations,
        });
    }

    Ok(ValidatedInput {
        base_salary,
        family_status,
        seniority_months,
        number_of_children,
    })
}

fn resolve_seniority(
    employee: &EmployeePayrollInput,
    context: &PayrollContext,
    violations: &mut Vec<FieldViolation>,
) -> u32 {
    if let Some(months) = employee.seniority_months {
        return non_negative_count("seniority_months", months, violations);
    }

    let Some(hire_date) = employee.hire_date else {
        return 0;
    };
    let Some(period_end) = context.period.end_date() else {
        // An invalid month is already reported.
        if context.period.is_valid() {
            violations.push(FieldViolation::new(
                "period.year",
                format!("is out of range, got {}", context.period.year),
            ));
        }
        return 0;
    };

    seniority_months_between(hire_date, period_end).unwrap_or_else(|| {
        violations.push(FieldViolation::new(
            "hire_date",
            format!(
                "{} is after the end of pay period {}",
                hire_date, context.period
            ),
        ));
        0
    })
}

fn exceeds_maximum(field: &str, amount: Decimal) -> FieldViolation {
    FieldViolation::new(
        field,
        format!("cannot exceed {}, got {}", MAX_AMOUNT, amount),
    )
}

fn non_negative_count(field: &str, value: i64, violations: &mut Vec<FieldViolation>) -> u32 {
    if value < 0 {
        violations.push(FieldViolation::new(
            field,
            format!("cannot be negative, got {}", value),
        ));
        return 0;
    }
    u32::try_from(value).unwrap_or_else(|_| {
        violations.push(FieldViolation::new(
            field,
            format!("is out of range, got {}", value),
        ));
        0
    })
}
