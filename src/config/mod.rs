//! Statutory constants for Moroccan payroll.
//!
//! This module provides the read-only table of CNSS, AMO, professional
//! expense, training tax, family deduction, income tax and seniority figures,
//! loaded from YAML files or built in code.
//!
//! # Example
//!
//! ```no_run
//! use moroccan_payroll::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/morocco").unwrap();
//! println!("Constants version: {}", loader.constants().metadata.version);
//! ```

mod constants;
mod loader;
mod types;

pub use constants::{BRACKET_CONTINUITY_TOLERANCE, MOROCCO_EFFECTIVE_DATE};
pub use loader::ConfigLoader;
pub use types::{
    AmoRates, CnssRates, ConstantsMetadata, FamilyDeductionRates, IncomeTaxBracket,
    ProfessionalExpenseRates, SeniorityTier, StatutoryConstants, TrainingTaxRate,
};
