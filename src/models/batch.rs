//! Batch calculation outcome.

use serde::{Deserialize, Serialize};

use crate::error::FieldViolation;

use super::Payslip;

/// One employee of a batch that could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Position of the employee in the submitted batch.
    pub index: usize,
    /// The employee id, empty when none was supplied.
    pub employee_id: String,
    /// Human-readable error message.
    pub message: String,
    /// Every violated field.
    pub violations: Vec<FieldViolation>,
}

/// Per-employee results of a batch, successes and failures kept apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Payslips computed successfully, in submission order.
    pub succeeded: Vec<Payslip>,
    /// Employees rejected by validation, in submission order.
    pub failed: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// Total number of employees processed.
    pub fn len(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Returns true if the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
