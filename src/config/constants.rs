//! Lookups and invariants over the statutory table.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculation::round_money;
use crate::error::{EngineError, EngineResult};

use super::types::{
    AmoRates, CnssRates, ConstantsMetadata, FamilyDeductionRates, IncomeTaxBracket,
    ProfessionalExpenseRates, SeniorityTier, StatutoryConstants, TrainingTaxRate,
};

/// Largest tax jump allowed where two brackets meet.
pub const BRACKET_CONTINUITY_TOLERANCE: Decimal = dec!(0.01);

/// Effective date of the table returned by [`StatutoryConstants::morocco`].
pub const MOROCCO_EFFECTIVE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 1, 1) {
    Some(date) => date,
    None => panic!("2025-01-01 is a valid date"),
};

impl StatutoryConstants {
    /// Returns the Moroccan monthly table built in code.
    ///
    /// Matches `config/morocco/*.yaml`. Useful for callers that do not ship
    /// the YAML files.
    ///
    /// # Example
    ///
    /// ```
    /// use moroccan_payroll::config::StatutoryConstants;
    /// use rust_decimal_macros::dec;
    ///
    /// let constants = StatutoryConstants::morocco();
    /// assert!(constants.validate().is_ok());
    /// assert_eq!(constants.cnss.monthly_ceiling, dec!(6000));
    /// ```
    pub fn morocco() -> Self {
        Self {
            metadata: ConstantsMetadata {
                version: "2025-01".to_string(),
                jurisdiction: "MA".to_string(),
                effective_date: MOROCCO_EFFECTIVE_DATE,
                source: "Code du travail art. 350; Dahir 1-72-184 (CNSS); Loi 65-00 (AMO); CGI art. 59, 73, 74".to_string(),
            },
            cnss: CnssRates {
                employee_rate: dec!(0.0448),
                employer_rate: dec!(0.0898),
                monthly_ceiling: dec!(6000.00),
                max_employee_contribution: dec!(268.80),
            },
            amo: AmoRates {
                employee_rate: dec!(0.0226),
                employer_rate: dec!(0.0411),
            },
            professional_expenses: ProfessionalExpenseRates {
                rate: dec!(0.20),
                monthly_cap: dec!(2500.00),
                annual_cap: dec!(30000.00),
            },
            training_tax: TrainingTaxRate { rate: dec!(0.016) },
            family_deduction: FamilyDeductionRates {
                amount_per_dependent: dec!(30.00),
                max_children: 6,
                ceiling: dec!(180.00),
            },
            income_tax_brackets: vec![
                bracket(dec!(0), Some(dec!(2500.00)), dec!(0), dec!(0)),
                bracket(dec!(2500.00), Some(dec!(4166.67)), dec!(0.10), dec!(250.00)),
                bracket(dec!(4166.67), Some(dec!(5000.00)), dec!(0.20), dec!(666.67)),
                bracket(dec!(5000.00), Some(dec!(6666.67)), dec!(0.30), dec!(1166.67)),
                bracket(dec!(6666.67), Some(dec!(15000.00)), dec!(0.34), dec!(1433.33)),
                bracket(dec!(15000.00), None, dec!(0.38), dec!(2033.33)),
            ],
            seniority_tiers: vec![
                tier(0, Some(23), dec!(0), "Less than 2 years"),
                tier(24, Some(59), dec!(0.05), "2 to 5 years"),
                tier(60, Some(143), dec!(0.10), "5 to 12 years"),
                tier(144, Some(239), dec!(0.15), "12 to 20 years"),
                tier(240, Some(299), dec!(0.20), "20 to 25 years"),
                tier(300, None, dec!(0.25), "25 years and more"),
            ],
        }
    }

    /// Finds the income tax bracket covering `taxable_amount`.
    ///
    /// Scans in order and returns the first bracket with
    /// `min <= amount` and (`max` unbounded or `amount <= max`). At a shared
    /// boundary the lower bracket wins.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] when no bracket matches, which
    /// means the table has a gap.
    pub fn find_income_tax_bracket(&self, taxable_amount: Decimal) -> EngineResult<&IncomeTaxBracket> {
        self.income_tax_brackets
            .iter()
            .find(|b| b.contains(taxable_amount))
            .ok_or_else(|| {
                EngineError::configuration(format!(
                    "no income tax bracket covers taxable amount {}",
                    taxable_amount
                ))
            })
    }

    /// Finds the seniority tier covering `months`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] when no tier matches.
    pub fn find_seniority_tier(&self, months: u32) -> EngineResult<&SeniorityTier> {
        self.seniority_tiers
            .iter()
            .find(|t| t.contains(months))
            .ok_or_else(|| {
                EngineError::configuration(format!("no seniority tier covers {} months", months))
            })
    }

    /// Checks every table invariant.
    ///
    /// - CNSS declared maximum equals `ceiling * employee_rate`.
    /// - Rates lie in `[0, 1]`.
    /// - Brackets start at zero, are contiguous (`next.min == prev.max`),
    ///   have increasing rates, end unbounded, and the tax is continuous at
    ///   every boundary within [`BRACKET_CONTINUITY_TOLERANCE`].
    /// - Tiers start at month zero, are contiguous (`next.min == prev.max + 1`),
    ///   have non-decreasing rates and end unbounded.
    pub fn validate(&self) -> EngineResult<()> {
        self.validate_rates()?;
        self.validate_brackets()?;
        self.validate_tiers()
    }

    fn validate_rates(&self) -> EngineResult<()> {
        let rates = [
            ("cnss.employee_rate", self.cnss.employee_rate),
            ("cnss.employer_rate", self.cnss.employer_rate),
            ("amo.employee_rate", self.amo.employee_rate),
            ("amo.employer_rate", self.amo.employer_rate),
            ("professional_expenses.rate", self.professional_expenses.rate),
            ("training_tax.rate", self.training_tax.rate),
        ];
        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::configuration(format!(
                    "{} must be between 0 and 1, got {}",
                    name, rate
                )));
            }
        }

        let expected = round_money(self.cnss.monthly_ceiling * self.cnss.employee_rate);
        if self.cnss.max_employee_contribution != expected {
            return Err(EngineError::configuration(format!(
                "CNSS max employee contribution {} does not equal ceiling {} x rate {} = {}",
                self.cnss.max_employee_contribution,
                self.cnss.monthly_ceiling,
                self.cnss.employee_rate,
                expected
            )));
        }
        Ok(())
    }

    fn validate_brackets(&self) -> EngineResult<()> {
        let brackets = &self.income_tax_brackets;
        let first = brackets
            .first()
            .ok_or_else(|| EngineError::configuration("income tax bracket table is empty"))?;
        if first.min != Decimal::ZERO {
            return Err(EngineError::configuration(format!(
                "first income tax bracket must start at 0, starts at {}",
                first.min
            )));
        }

        for (i, pair) in brackets.windows(2).enumerate() {
            let (low, high) = (&pair[0], &pair[1]);
            let Some(boundary) = low.max else {
                return Err(EngineError::configuration(format!(
                    "income tax bracket {} is unbounded but is not the last bracket",
                    i
                )));
            };
            if boundary < low.min {
                return Err(EngineError::configuration(format!(
                    "income tax bracket {} has max {} below min {}",
                    i, boundary, low.min
                )));
            }
            if high.min != boundary {
                return Err(EngineError::configuration(format!(
                    "gap between income tax brackets {} and {}: {} then {}",
                    i,
                    i + 1,
                    boundary,
                    high.min
                )));
            }
            if high.rate <= low.rate {
                return Err(EngineError::configuration(format!(
                    "income tax rates must increase: bracket {} has {} after {}",
                    i + 1,
                    high.rate,
                    low.rate
                )));
            }
            let jump = (high.tax_at(boundary) - low.tax_at(boundary)).abs();
            if jump > BRACKET_CONTINUITY_TOLERANCE {
                return Err(EngineError::configuration(format!(
                    "income tax jumps by {} at boundary {}",
                    jump, boundary
                )));
            }
        }

        if brackets.last().is_some_and(|b| b.max.is_some()) {
            return Err(EngineError::configuration(
                "last income tax bracket must be unbounded",
            ));
        }
        Ok(())
    }

    fn validate_tiers(&self) -> EngineResult<()> {
        let tiers = &self.seniority_tiers;
        let first = tiers
            .first()
            .ok_or_else(|| EngineError::configuration("seniority tier table is empty"))?;
        if first.min_months != 0 {
            return Err(EngineError::configuration(format!(
                "first seniority tier must start at 0 months, starts at {}",
                first.min_months
            )));
        }

        for (i, pair) in tiers.windows(2).enumerate() {
            let (low, high) = (&pair[0], &pair[1]);
            let Some(last_month) = low.max_months else {
                return Err(EngineError::configuration(format!(
                    "seniority tier '{}' is unbounded but is not the last tier",
                    low.label
                )));
            };
            if last_month < low.min_months {
                return Err(EngineError::configuration(format!(
                    "seniority tier '{}' ends before it starts",
                    low.label
                )));
            }
            if high.min_months != last_month + 1 {
                return Err(EngineError::configuration(format!(
                    "gap between seniority tiers {} and {}: month {} then {}",
                    i,
                    i + 1,
                    last_month,
                    high.min_months
                )));
            }
            if high.rate < low.rate {
                return Err(EngineError::configuration(format!(
                    "seniority rates must not decrease: '{}' has {} after {}",
                    high.label, high.rate, low.rate
                )));
            }
        }

        if tiers.last().is_some_and(|t| t.max_months.is_some()) {
            return Err(EngineError::configuration(
                "last seniority tier must be unbounded",
            ));
        }
        Ok(())
    }
}

fn bracket(min: Decimal, max: Option<Decimal>, rate: Decimal, deduction: Decimal) -> IncomeTaxBracket {
    IncomeTaxBracket {
        min,
        max,
        rate,
        deduction,
    }
}

fn tier(min_months: u32, max_months: Option<u32>, rate: Decimal, label: &str) -> SeniorityTier {
    SeniorityTier {
        min_months,
        max_months,
        rate,
        label: label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_morocco_table_is_valid() {
        let constants = StatutoryConstants::morocco();
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_morocco_effective_date() {
        let constants = StatutoryConstants::morocco();
        assert_eq!(
            constants.metadata.effective_date.to_string(),
            "2025-01-01"
        );
        assert_eq!(constants.metadata.effective_date, MOROCCO_EFFECTIVE_DATE);
    }

    #[test]
    fn test_find_bracket_zero_rate_at_2500() {
        let constants = StatutoryConstants::morocco();
        let bracket = constants.find_income_tax_bracket(dec!(2500.00)).unwrap();
        assert_eq!(bracket.rate, dec!(0));
    }

    #[test]
    fn test_find_bracket_just_above_2500() {
        let constants = StatutoryConstants::morocco();
        let bracket = constants.find_income_tax_bracket(dec!(2500.01)).unwrap();
        assert_eq!(bracket.rate, dec!(0.10));
        assert_eq!(bracket.deduction, dec!(250.00));
    }

    #[test]
    fn test_find_bracket_for_reference_scenario() {
        let constants = StatutoryConstants::morocco();
        let bracket = constants.find_income_tax_bracket(dec!(12625.25)).unwrap();
        assert_eq!(bracket.rate, dec!(0.34));
        assert_eq!(bracket.deduction, dec!(1433.33));
    }

    #[test]
    fn test_find_bracket_top_is_unbounded() {
        let constants = StatutoryConstants::morocco();
        let bracket = constants.find_income_tax_bracket(dec!(1000000)).unwrap();
        assert_eq!(bracket.rate, dec!(0.38));
        assert!(bracket.max.is_none());
    }

    #[test]
    fn test_find_bracket_negative_amount_is_configuration_error() {
        let constants = StatutoryConstants::morocco();
        let result = constants.find_income_tax_bracket(dec!(-1));
        assert!(matches!(result, Err(EngineError::Configuration { .. })));
    }

    #[test]
    fn test_find_tier_boundaries() {
        let constants = StatutoryConstants::morocco();
        assert_eq!(constants.find_seniority_tier(0).unwrap().rate, dec!(0));
        assert_eq!(constants.find_seniority_tier(23).unwrap().rate, dec!(0));
        assert_eq!(constants.find_seniority_tier(24).unwrap().rate, dec!(0.05));
        assert_eq!(constants.find_seniority_tier(59).unwrap().rate, dec!(0.05));
        assert_eq!(constants.find_seniority_tier(60).unwrap().rate, dec!(0.10));
        assert_eq!(constants.find_seniority_tier(300).unwrap().rate, dec!(0.25));
        assert_eq!(constants.find_seniority_tier(600).unwrap().rate, dec!(0.25));
    }

    #[test]
    fn test_tier_gap_is_configuration_error() {
        let mut constants = StatutoryConstants::morocco();
        constants.seniority_tiers[1].min_months = 30;

        assert!(matches!(
            constants.validate(),
            Err(EngineError::Configuration { .. })
        ));
        let result = constants.find_seniority_tier(26);
        assert!(matches!(result, Err(EngineError::Configuration { .. })));
    }

    #[test]
    fn test_bracket_gap_is_rejected() {
        let mut constants = StatutoryConstants::morocco();
        constants.income_tax_brackets[1].min = dec!(2501.00);

        match constants.validate() {
            Err(EngineError::Configuration { message }) => {
                assert!(message.contains("gap"), "unexpected message: {}", message);
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_bracket_cliff_is_rejected() {
        let mut constants = StatutoryConstants::morocco();
        constants.income_tax_brackets[4].deduction = dec!(1400.00);

        match constants.validate() {
            Err(EngineError::Configuration { message }) => {
                assert!(message.contains("jumps"), "unexpected message: {}", message);
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_decreasing_bracket_rate_is_rejected() {
        let mut constants = StatutoryConstants::morocco();
        constants.income_tax_brackets[2].rate = dec!(0.05);
        assert!(constants.validate().is_err());
    }

    #[test]
    fn test_bounded_last_bracket_is_rejected() {
        let mut constants = StatutoryConstants::morocco();
        constants.income_tax_brackets[5].max = Some(dec!(99999));
        assert!(constants.validate().is_err());
    }

    #[test]
    fn test_cnss_max_must_match_ceiling_times_rate() {
        let mut constants = StatutoryConstants::morocco();
        constants.cnss.max_employee_contribution = dec!(270.00);

        match constants.validate() {
            Err(EngineError::Configuration { message }) => {
                assert!(message.contains("CNSS"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_rate_is_rejected() {
        let mut constants = StatutoryConstants::morocco();
        constants.amo.employee_rate = dec!(2.26);
        assert!(constants.validate().is_err());
    }

    #[test]
    fn test_boundaries_are_continuous() {
        let constants = StatutoryConstants::morocco();
        for pair in constants.income_tax_brackets.windows(2) {
            let boundary = pair[0].max.unwrap();
            let jump = pair[1].tax_at(boundary) - pair[0].tax_at(boundary);
            assert!(
                jump.abs() <= BRACKET_CONTINUITY_TOLERANCE,
                "jump of {} at {}",
                jump,
                boundary
            );
        }
    }
}
