//! Calculation logic for the payroll engine.
//!
//! This module contains one function per statutory stage: input validation,
//! seniority bonus, gross and taxable gross pay, employee social
//! contributions and professional expenses, taxable net, income tax with the
//! family deduction, net pay, and employer charges. [`compute_payslip`] and
//! [`compute_batch`] chain them.

mod employer_contributions;
mod engine;
mod gross_pay;
mod income_tax;
mod net_pay;
mod rounding;
mod seniority_bonus;
mod social_contributions;
mod taxable_net;
mod validation;

pub use employer_contributions::{
    EmployerContributionsResult, TRAINING_TAX_REF, calculate_employer_contributions,
};
pub use engine::{ENGINE_VERSION, compute_batch, compute_payslip};
pub use gross_pay::{GrossPayResult, calculate_gross_pay};
pub use income_tax::{
    FAMILY_DEDUCTION_REF, INCOME_TAX_REF, IncomeTaxResult, calculate_family_deduction,
    calculate_income_tax,
};
pub use net_pay::{NetPayResult, calculate_net_pay};
pub use rounding::{MONEY_DP, round_money};
pub use seniority_bonus::{SENIORITY_BONUS_REF, SeniorityBonusResult, calculate_seniority_bonus};
pub use social_contributions::{
    AMO_REF, CNSS_REF, PROFESSIONAL_EXPENSES_REF, SocialContributionsResult,
    calculate_professional_expenses, calculate_social_contributions, contribution,
};
pub use taxable_net::{TaxableNetResult, calculate_taxable_net};
pub use validation::{MAX_AMOUNT, ValidatedInput, validate_input};
