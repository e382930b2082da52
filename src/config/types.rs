//! Statutory constant types.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML files under `config/morocco/`, plus the assembled
//! [`StatutoryConstants`] table the engine reads from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::serde::float;
use serde::{Deserialize, Serialize};

/// Identifying information for a version of the statutory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantsMetadata {
    /// The version label of this table (e.g., "2025-01").
    pub version: String,
    /// ISO country code the table applies to.
    pub jurisdiction: String,
    /// The date from which these figures apply.
    pub effective_date: NaiveDate,
    /// Where the figures come from.
    pub source: String,
}

/// CNSS (social security) rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CnssRates {
    /// Employee share, applied to the capped base.
    #[serde(serialize_with = "float::serialize")]
    pub employee_rate: Decimal,
    /// Employer share, applied to the capped base.
    #[serde(serialize_with = "float::serialize")]
    pub employer_rate: Decimal,
    /// Monthly salary ceiling for CNSS contributions.
    #[serde(serialize_with = "float::serialize")]
    pub monthly_ceiling: Decimal,
    /// Declared maximum monthly employee contribution.
    ///
    /// Must equal `monthly_ceiling * employee_rate`; checked on validation.
    #[serde(serialize_with = "float::serialize")]
    pub max_employee_contribution: Decimal,
}

/// AMO (mandatory health insurance) rates. No ceiling applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmoRates {
    /// Employee share.
    #[serde(serialize_with = "float::serialize")]
    pub employee_rate: Decimal,
    /// Employer share.
    #[serde(serialize_with = "float::serialize")]
    pub employer_rate: Decimal,
}

/// Professional-expense deduction ("frais professionnels").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalExpenseRates {
    /// Flat rate applied to taxable gross.
    #[serde(serialize_with = "float::serialize")]
    pub rate: Decimal,
    /// Monthly cap on the deduction.
    #[serde(serialize_with = "float::serialize")]
    pub monthly_cap: Decimal,
    /// Annual cap on the deduction. Declared only; the monthly path never applies it.
    #[serde(serialize_with = "float::serialize")]
    pub annual_cap: Decimal,
}

/// Vocational training tax (employer only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingTaxRate {
    /// Rate applied to base salary.
    #[serde(serialize_with = "float::serialize")]
    pub rate: Decimal,
}

/// Family charge deduction applied against gross income tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyDeductionRates {
    /// Flat monthly amount per dependent.
    #[serde(serialize_with = "float::serialize")]
    pub amount_per_dependent: Decimal,
    /// Maximum number of children counted.
    pub max_children: u32,
    /// Monthly ceiling on the total deduction.
    #[serde(serialize_with = "float::serialize")]
    pub ceiling: Decimal,
}

/// A monthly income tax bracket.
///
/// `tax = taxable_net * rate - deduction`. The deduction term is chosen so
/// that the tax is continuous at the bracket's lower bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxBracket {
    /// Lower bound (inclusive).
    #[serde(serialize_with = "float::serialize")]
    pub min: Decimal,
    /// Upper bound (inclusive), `None` for the top bracket.
    #[serde(serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub max: Option<Decimal>,
    /// Marginal rate.
    #[serde(serialize_with = "float::serialize")]
    pub rate: Decimal,
    /// Subtraction term.
    #[serde(serialize_with = "float::serialize")]
    pub deduction: Decimal,
}

impl IncomeTaxBracket {
    /// Returns true if `amount` falls in this bracket (`min <= amount <= max`).
    pub fn contains(&self, amount: Decimal) -> bool {
        self.min <= amount && self.max.is_none_or(|max| amount <= max)
    }

    /// Evaluates `amount * rate - deduction`, unrounded.
    pub fn tax_at(&self, amount: Decimal) -> Decimal {
        amount * self.rate - self.deduction
    }
}

/// A seniority bonus tier, expressed in whole months of service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeniorityTier {
    /// First month of the tier (inclusive).
    pub min_months: u32,
    /// Last month of the tier (inclusive), `None` for the top tier.
    pub max_months: Option<u32>,
    /// Bonus rate applied to base salary.
    #[serde(serialize_with = "float::serialize")]
    pub rate: Decimal,
    /// Human-readable tier label (e.g., "2 to 5 years").
    pub label: String,
}

impl SeniorityTier {
    /// Returns true if `months` falls in this tier.
    pub fn contains(&self, months: u32) -> bool {
        self.min_months <= months && self.max_months.is_none_or(|max| months <= max)
    }
}

/// The complete, read-only statutory table.
///
/// Built once (from YAML via [`crate::config::ConfigLoader`] or in code via
/// [`StatutoryConstants::morocco`]) and shared by reference between any
/// number of concurrent calculations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryConstants {
    /// Table version information.
    pub metadata: ConstantsMetadata,
    /// CNSS rates and ceiling.
    pub cnss: CnssRates,
    /// AMO rates.
    pub amo: AmoRates,
    /// Professional-expense deduction.
    pub professional_expenses: ProfessionalExpenseRates,
    /// Training tax.
    pub training_tax: TrainingTaxRate,
    /// Family charge deduction.
    pub family_deduction: FamilyDeductionRates,
    /// Income tax brackets, ordered by `min`.
    pub income_tax_brackets: Vec<IncomeTaxBracket>,
    /// Seniority tiers, ordered by `min_months`.
    pub seniority_tiers: Vec<SeniorityTier>,
}
