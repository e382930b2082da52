//! Request types for the payroll API.
//!
//! This module defines the JSON request bodies for `/calculate` and
//! `/calculate-batch`.

use serde::{Deserialize, Serialize};

use crate::models::{EmployeePayrollInput, PayPeriod, PayrollContext};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee record.
    pub employee: EmployeePayrollInput,
    /// The pay period to compute.
    pub period: PayPeriod,
    /// Optional company label, copied to the payslip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl CalculationRequest {
    /// The calculation context of this request.
    pub fn context(&self) -> PayrollContext {
        PayrollContext {
            period: self.period,
            company: self.company.clone(),
        }
    }
}

/// Request body for the `/calculate-batch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCalculationRequest {
    /// The pay period shared by every employee.
    pub period: PayPeriod,
    /// Optional company label, copied to every payslip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// The employee records, computed independently.
    pub employees: Vec<EmployeePayrollInput>,
}

impl BatchCalculationRequest {
    /// The calculation context of this request.
    pub fn context(&self) -> PayrollContext {
        PayrollContext {
            period: self.period,
            company: self.company.clone(),
        }
    }
}
