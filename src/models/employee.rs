//! Employee payroll input and related types.
//!
//! The input record is deliberately permissive (optional salary, signed
//! counts) so that a malformed record reaches validation and produces a
//! complete list of violations instead of failing on the first bad field.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Civil status used to compute the family deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyStatus {
    /// Not married.
    #[serde(alias = "CELIBATAIRE")]
    Single,
    /// Married.
    #[serde(alias = "MARIE")]
    Married,
    /// Divorced.
    #[serde(alias = "DIVORCE")]
    Divorced,
    /// Widowed.
    #[serde(alias = "VEUF")]
    Widowed,
}

/// Per-period facts needed to compute one payslip.
///
/// The engine only ever borrows this record; it is never mutated.
///
/// # Example
///
/// ```
/// use moroccan_payroll::models::{EmployeePayrollInput, FamilyStatus};
/// use rust_decimal_macros::dec;
///
/// let employee = EmployeePayrollInput {
///     seniority_months: Some(30),
///     family_status: Some(FamilyStatus::Married),
///     number_of_children: 2,
///     ..EmployeePayrollInput::new("emp_001", dec!(15000))
/// };
/// assert_eq!(employee.base_salary, Some(dec!(15000)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePayrollInput {
    /// Unique identifier for the employee. Required; empty is treated as missing.
    #[serde(default)]
    pub employee_id: String,
    /// Monthly base salary in MAD. Required and must be positive.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// Months of continuous service. Takes precedence over `hire_date`.
    #[serde(default)]
    pub seniority_months: Option<i64>,
    /// Original hire date, used when `seniority_months` is absent.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// Civil status. Required; missing is reported by validation.
    #[serde(default)]
    pub family_status: Option<FamilyStatus>,
    /// Number of dependent children.
    #[serde(default)]
    pub number_of_children: i64,
    /// Taxable premiums added to gross pay.
    #[serde(default)]
    pub taxable_premiums: Decimal,
    /// Overtime pay added to gross pay.
    #[serde(default)]
    pub overtime_amount: Decimal,
    /// Premiums paid on top of net pay and exempt from tax and contributions.
    #[serde(default)]
    pub non_taxable_premiums: Decimal,
    /// Other deductions from net pay (advances, loans, ...).
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Employee pension contribution rate on taxable gross (e.g., 0.06).
    #[serde(default)]
    pub pension_contribution_rate: Decimal,
    /// Employee group insurance rate on taxable gross.
    #[serde(default)]
    pub group_insurance_rate: Decimal,
}

impl EmployeePayrollInput {
    /// Creates a single employee with no children, seniority or extras.
    pub fn new(employee_id: impl Into<String>, base_salary: Decimal) -> Self {
        Self {
            employee_id: employee_id.into(),
            base_salary: Some(base_salary),
            seniority_months: None,
            hire_date: None,
            family_status: Some(FamilyStatus::Single),
            number_of_children: 0,
            taxable_premiums: Decimal::ZERO,
            overtime_amount: Decimal::ZERO,
            non_taxable_premiums: Decimal::ZERO,
            other_deductions: Decimal::ZERO,
            pension_contribution_rate: Decimal::ZERO,
            group_insurance_rate: Decimal::ZERO,
        }
    }
}

/// Counts whole months of service from `hire_date` up to `as_of`.
///
/// A month is counted once the day of month is reached again, so
/// 2023-01-15 to 2023-03-14 is one month and to 2023-03-15 is two.
/// Returns `None` when `as_of` precedes `hire_date`.
///
/// # Examples
///
/// ```
/// use moroccan_payroll::models::seniority_months_between;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
/// assert_eq!(seniority_months_between(hire, as_of), Some(59));
/// ```
pub fn seniority_months_between(hire_date: NaiveDate, as_of: NaiveDate) -> Option<u32> {
    if as_of < hire_date {
        return None;
    }
    let years = as_of.year() - hire_date.year();
    let mut months = years * 12 + as_of.month() as i32 - hire_date.month() as i32;
    // Partial month; end-of-month hires count once the target month ends.
    if as_of.day() < hire_date.day() && !is_last_day_of_month(as_of) {
        months -= 1;
    }
    u32::try_from(months.max(0)).ok()
}

fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt().is_none_or(|next| next.month() != date.month())
}
