//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the statutory
//! table from YAML files.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AmoRates, CnssRates, ConstantsMetadata, FamilyDeductionRates, IncomeTaxBracket,
    ProfessionalExpenseRates, SeniorityTier, StatutoryConstants, TrainingTaxRate,
};

/// Layout of `constants.yaml`.
#[derive(Debug, Deserialize)]
struct ConstantsFile {
    metadata: ConstantsMetadata,
    cnss: CnssRates,
    amo: AmoRates,
    professional_expenses: ProfessionalExpenseRates,
    training_tax: TrainingTaxRate,
    family_deduction: FamilyDeductionRates,
}

/// Layout of `income_tax.yaml`.
#[derive(Debug, Deserialize)]
struct IncomeTaxFile {
    brackets: Vec<IncomeTaxBracket>,
}

/// Layout of `seniority.yaml`.
#[derive(Debug, Deserialize)]
struct SeniorityFile {
    tiers: Vec<SeniorityTier>,
}

/// Loads and provides access to the statutory table.
///
/// # Directory Structure
///
/// ```text
/// config/morocco/
/// ├── constants.yaml   # Metadata, CNSS, AMO, professional expenses, training tax, family deduction
/// ├── income_tax.yaml  # Monthly income tax brackets
/// └── seniority.yaml   # Seniority bonus tiers
/// ```
///
/// # Example
///
/// ```no_run
/// use moroccan_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/morocco")?;
/// println!("Loaded constants version {}", loader.constants().metadata.version);
/// # Ok::<(), moroccan_payroll::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    constants: StatutoryConstants,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The assembled table breaks a table invariant (`Configuration`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let constants_file = Self::load_yaml::<ConstantsFile>(&path.join("constants.yaml"))?;
        let income_tax = Self::load_yaml::<IncomeTaxFile>(&path.join("income_tax.yaml"))?;
        let seniority = Self::load_yaml::<SeniorityFile>(&path.join("seniority.yaml"))?;

        let constants = StatutoryConstants {
            metadata: constants_file.metadata,
            cnss: constants_file.cnss,
            amo: constants_file.amo,
            professional_expenses: constants_file.professional_expenses,
            training_tax: constants_file.training_tax,
            family_deduction: constants_file.family_deduction,
            income_tax_brackets: income_tax.brackets,
            seniority_tiers: seniority.tiers,
        };
        constants.validate()?;

        Ok(Self { constants })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded statutory table.
    pub fn constants(&self) -> &StatutoryConstants {
        &self.constants
    }

    /// Consumes the loader, returning the statutory table.
    pub fn into_constants(self) -> StatutoryConstants {
        self.constants
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/morocco"
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "moroccan-payroll-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        for file in ["constants.yaml", "income_tax.yaml", "seniority.yaml"] {
            fs::copy(Path::new(config_path()).join(file), dir.join(file)).unwrap();
        }
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.constants().metadata.jurisdiction, "MA");
        assert_eq!(loader.constants().metadata.version, "2025-01");
    }

    #[test]
    fn test_yaml_matches_builtin_table() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.constants(), &StatutoryConstants::morocco());
    }

    #[test]
    fn test_cnss_rates_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let cnss = &loader.constants().cnss;

        assert_eq!(cnss.employee_rate, dec!(0.0448));
        assert_eq!(cnss.monthly_ceiling, dec!(6000.00));
        assert_eq!(cnss.max_employee_contribution, dec!(268.80));
    }

    #[test]
    fn test_annual_cap_is_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(
            loader.constants().professional_expenses.annual_cap,
            dec!(30000.00)
        );
    }

    #[test]
    fn test_brackets_and_tiers_loaded_in_order() {
        let constants = ConfigLoader::load(config_path()).unwrap().into_constants();

        assert_eq!(constants.income_tax_brackets.len(), 6);
        assert!(constants.income_tax_brackets.last().unwrap().max.is_none());
        assert_eq!(constants.seniority_tiers.len(), 6);
        assert_eq!(constants.seniority_tiers[1].label, "2 to 5 years");
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("constants.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir("parse");
        fs::write(dir.join("seniority.yaml"), "tiers: [this is: not valid").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("seniority.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_bracket_gap_in_yaml_is_configuration_error() {
        let dir = scratch_dir("gap");
        let broken = r#"
brackets:
  - { min: "0", max: "2500.00", rate: "0", deduction: "0" }
  - { min: "2501.00", max: null, rate: "0.10", deduction: "250.00" }
"#;
        fs::write(dir.join("income_tax.yaml"), broken).unwrap();

        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::Configuration { .. })));
        fs::remove_dir_all(dir).ok();
    }
}
