//! Core data models for the payroll engine.
//!
//! This module contains the employee input record, the pay period, the
//! itemized payslip and the batch outcome.

mod batch;
mod employee;
mod pay_period;
mod payslip;

pub use batch::{BatchFailure, BatchOutcome};
pub use employee::{EmployeePayrollInput, FamilyStatus, seniority_months_between};
pub use pay_period::{PayPeriod, PayrollContext};
pub use payslip::{
    AppliedBracket, AuditStep, Contribution, EmployeeContributions, EmployerContributions,
    FamilyDeduction, GrossPay, IncomeTax, Payslip, ProfessionalExpenseDeduction, SeniorityBonus,
    compute_fingerprint,
};
