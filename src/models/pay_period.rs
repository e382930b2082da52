//! Pay period and calculation context.
//!
//! This module contains the [`PayPeriod`] (a calendar month) and the
//! [`PayrollContext`] passed alongside each employee record.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A monthly pay period.
///
/// # Example
///
/// ```
/// use moroccan_payroll::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(2025, 2);
/// assert_eq!(period.label(), "2025-02");
/// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2025, 2, 28));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 to 12.
    pub month: u32,
}

impl PayPeriod {
    /// Creates a pay period for `year`/`month`. The month is not checked here.
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Returns true if the month is between 1 and 12.
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
    }

    /// The `YYYY-MM` label used in fingerprints and documents.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// First day of the period, `None` if the month is invalid.
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last day of the period, `None` if the month is invalid.
    pub fn end_date(&self) -> Option<NaiveDate> {
        if !self.is_valid() {
            return None;
        }
        let (next_year, next_month) = if self.month == 12 {
            (self.year.checked_add(1)?, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|d| d.pred_opt())
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What the engine needs besides the employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollContext {
    /// The pay period being computed.
    pub period: PayPeriod,
    /// Company or instance label, copied to the payslip untouched.
    #[serde(default)]
    pub company: Option<String>,
}

impl PayrollContext {
    /// Creates a context without a company label.
    pub fn new(period: PayPeriod) -> Self {
        Self {
            period,
            company: None,
        }
    }

    /// Sets the company label.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}
